// swearjar-core/src/engines/mod.rs
//! This module contains the profanity engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `ProfanityEngine` trait. `scan_mask` is the regex-driven scan-and-mask
//! detector used everywhere in the crate.
//!
//! License: MIT OR APACHE 2.0

pub mod scan_mask;
