// swearjar/src/ui/output_format.rs
//! Formats the human-readable detection summary and status messages.
//! Colour is applied only when the destination is a terminal.
//! License: MIT OR Apache-2.0

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use swearjar_core::{DetectionMatch, DetectionResult, UniqueBy};

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), msg)?;
    } else {
        writeln!(writer, "Error: {}", msg)?;
    }
    Ok(())
}

/// Writes a short summary of a check: match count and unique findings.
pub fn print_summary<W: Write>(
    result: &DetectionResult,
    unique_by: UniqueBy,
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    if !result.has_profanity() {
        let line = "No profanity found.";
        if supports_color {
            writeln!(writer, "{}", line.green())?;
        } else {
            writeln!(writer, "{}", line)?;
        }
        return Ok(());
    }

    let header = format!(
        "Found {} match{} ({} unique):",
        result.match_count(),
        if result.match_count() == 1 { "" } else { "es" },
        result.unique_terms_found().len()
    );
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    for term in result.unique_terms_found() {
        let is_finding = |m: &DetectionMatch| match unique_by {
            UniqueBy::Term => m.term == *term,
            UniqueBy::MatchedText => m.matched_text == *term,
        };
        let occurrences = result.matches.iter().filter(|m| is_finding(m)).count();
        if supports_color {
            writeln!(writer, "  - {} ({})", term.magenta(), occurrences)?;
        } else {
            writeln!(writer, "  - {} ({})", term, occurrences)?;
        }
    }
    Ok(())
}
