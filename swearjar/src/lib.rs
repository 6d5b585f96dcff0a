// swearjar/src/lib.rs
//! # Swearjar CLI Application
//!
//! This crate provides the command-line interface for the swearjar
//! profanity detector. All detection logic lives in `swearjar-core`; this
//! crate parses arguments, loads configuration, and formats output.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
