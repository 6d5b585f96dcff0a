// swearjar/src/commands/check.rs
//! `check` command: reads the input, runs the detector and prints the masked
//! text (or the full result as JSON) plus a summary on stderr.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use swearjar_core::{DetectionResult, Detector, DetectorOptions, ProfanityEngine, SwearjarConfig, UniqueBy};

use crate::cli::CheckCommand;
use crate::ui::output_format;

/// Options for the ergonomic run_check API.
pub struct CheckOptions {
    pub input: String,
    pub json: bool,
    pub no_summary: bool,
    pub quiet: bool,
    pub unique_by: UniqueBy,
}

/// Builds detector options from the loaded configuration, then applies the
/// command-line overrides.
pub fn detector_options(config: &SwearjarConfig, cmd: &CheckCommand) -> DetectorOptions {
    let mut options = DetectorOptions::from_config(config).unique_by(cmd.unique_by.into());
    if let Some(language) = &cmd.language {
        options = options.with_language(language.as_str());
    }
    if let Some(mask) = &cmd.mask {
        options = options.mask_with(mask);
    }
    if let Some(threshold) = cmd.threshold {
        options = options.with_threshold(threshold);
    }
    if let Some(mode) = cmd.selected_mode() {
        options = options.with_mode(mode);
    }
    options
}

/// Reads the text to check from the positional argument, the input file or
/// stdin, in that order. One trailing line break is dropped.
pub fn read_input(text: Option<&str>, input_file: Option<&PathBuf>) -> Result<String> {
    let raw = match (text, input_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        (None, None) => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            buffer
        }
    };
    let trimmed = raw.strip_suffix('\n').unwrap_or(&raw);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

/// Runs the check and writes its output. Returns whether anything was found.
pub fn run_check(engine: &dyn ProfanityEngine, opts: &CheckOptions) -> Result<bool> {
    info!("Starting swearjar check.");
    let result = engine.check(&opts.input).context("Check failed")?;
    debug!(
        "Check finished: {} match(es), {} unique.",
        result.match_count(),
        result.unique_terms_found().len()
    );

    write_primary_output(&result, opts)?;
    write_summary(&result, opts)?;

    Ok(result.has_profanity())
}

fn write_primary_output(result: &DetectionResult, opts: &CheckOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opts.json {
        let json = serde_json::to_string_pretty(result).context("Failed to serialize detection result")?;
        writeln!(writer, "{}", json)?;
    } else {
        writeln!(writer, "{}", result.masked_text())?;
    }
    Ok(())
}

fn write_summary(result: &DetectionResult, opts: &CheckOptions) -> Result<()> {
    if opts.no_summary || opts.quiet || opts.json {
        return Ok(());
    }
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    output_format::print_summary(result, opts.unique_by, &mut stderr.lock(), supports_color)
}

/// Entry point used by `main`: loads configuration, builds the detector and
/// runs the check.
pub fn execute(cmd: &CheckCommand, quiet: bool) -> Result<bool> {
    let config = super::load_config(&cmd.config)?;
    let options = detector_options(&config, cmd);
    let unique_by = options.unique_by;
    let detector = Detector::from_config(&config, options, None).context("Failed to build detector")?;

    let input = read_input(cmd.text.as_deref(), cmd.input_file.as_ref())?;
    let opts = CheckOptions { input, json: cmd.json, no_summary: cmd.no_summary, quiet, unique_by };
    run_check(&detector, &opts)
}
