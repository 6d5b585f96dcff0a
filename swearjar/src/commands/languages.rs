// swearjar/src/commands/languages.rs
//! `languages` command: lists every language the loaded configuration can
//! check, plus packs installed in the standard locations.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use swearjar_core::{config, Normalizer, SwearjarConfig};

use crate::cli::LanguagesCommand;

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub language: String,
    pub terms: usize,
    pub false_positives: usize,
    pub normalizer: String,
    pub default: bool,
}

/// Summarizes every language registered in `config`.
pub fn summarize(config: &SwearjarConfig) -> Vec<LanguageSummary> {
    config
        .languages
        .iter()
        .map(|(language, pack)| LanguageSummary {
            language: language.clone(),
            terms: pack.profanities.len(),
            false_positives: pack.false_positives.len(),
            normalizer: Normalizer::for_language(language)
                .map(|n| n.to_string())
                .unwrap_or_else(|_| "none".to_string()),
            default: language == config.default_language(),
        })
        .collect()
}

fn render_table(rows: &[LanguageSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Language", "Terms", "False positives", "Normalizer", "Default"]);
    for row in rows {
        table.add_row(vec![
            row.language.clone(),
            row.terms.to_string(),
            row.false_positives.to_string(),
            row.normalizer.clone(),
            if row.default { "yes".to_string() } else { String::new() },
        ]);
    }
    table
}

pub fn execute(cmd: &LanguagesCommand) -> Result<()> {
    let config = super::load_config(&cmd.config)?;
    let rows = summarize(&config);
    let installed: Vec<(String, PathBuf)> = config::installed_language_packs();

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize language list")?;
        writeln!(writer, "{}", json)?;
        return Ok(());
    }

    writeln!(writer, "{}", render_table(&rows))?;
    writeln!(writer, "Use '-l all' to check against every language at once.")?;
    if !installed.is_empty() {
        writeln!(writer, "Installed packs (load with --language-pack NAME):")?;
        for (name, path) in installed {
            writeln!(writer, "  {} ({})", name, path.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_default_config() {
        let config = SwearjarConfig::load_default().unwrap();
        let rows = summarize(&config);
        assert_eq!(rows.len(), 5);
        let english = rows.iter().find(|r| r.language == "english").unwrap();
        assert!(english.default);
        assert!(english.terms > 0);
        let german = rows.iter().find(|r| r.language == "german").unwrap();
        assert_eq!(german.normalizer, "german");
        assert!(!german.default);
    }

    #[test]
    fn test_table_lists_every_language() {
        let config = SwearjarConfig::load_default().unwrap();
        let rendered = render_table(&summarize(&config)).to_string();
        for language in ["english", "french", "german", "spanish", "russian"] {
            assert!(rendered.contains(language));
        }
    }
}
