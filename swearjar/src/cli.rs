// swearjar/src/cli.rs
//! This file defines the command-line interface (CLI) for the swearjar
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use swearjar_core::{DetectionMode, UniqueBy};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "swearjar",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find and mask profanity in text",
    long_about = "Swearjar checks text against per-language profanity lexicons, tolerating common obfuscations (look-alike characters, separators, repeated letters), and prints the text with every match masked.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `swearjar` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Checks text for profanity and prints it with every match masked.
    #[command(about = "Checks text for profanity and prints it with every match masked.")]
    Check(CheckCommand),

    /// Lists the languages available for checking.
    #[command(about = "Lists the languages available for checking.")]
    Languages(LanguagesCommand),
}

/// Detection strategy, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeChoice {
    Normal,
    Strict,
    Lenient,
}

impl From<ModeChoice> for DetectionMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Normal => DetectionMode::Normal,
            ModeChoice::Strict => DetectionMode::Strict,
            ModeChoice::Lenient => DetectionMode::Lenient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UniqueByChoice {
    Term,
    MatchedText,
}

impl From<UniqueByChoice> for UniqueBy {
    fn from(choice: UniqueByChoice) -> Self {
        match choice {
            UniqueByChoice::Term => UniqueBy::Term,
            UniqueByChoice::MatchedText => UniqueBy::MatchedText,
        }
    }
}

/// Configuration sources shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a custom configuration file (YAML), merged over the defaults.
    #[arg(long = "config", value_name = "FILE", env = "SWEARJAR_CONFIG", help = "Path to a custom configuration file (YAML), merged over the defaults.")]
    pub config: Option<PathBuf>,

    /// Extra language packs, by name or path.
    #[arg(long = "language-pack", value_name = "NAME|FILE", value_delimiter = ',', help = "Load extra language packs by name (searched in the standard locations) or by file path.")]
    pub language_packs: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Text to check. Reads from --input-file or stdin when omitted.
    #[arg(value_name = "TEXT", help = "Text to check (reads --input-file or stdin when omitted).")]
    pub text: Option<String>,

    /// Path to an input file.
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "text", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Language to check against, or "all".
    #[arg(long, short = 'l', value_name = "LANG", help = "Language to check against, or 'all' for every loaded language.")]
    pub language: Option<String>,

    /// Mask character (only the first character is used).
    #[arg(long, short = 'm', value_name = "CHAR", help = "Character used to mask matches (first character of the value).")]
    pub mask: Option<String>,

    /// Minimum share of the enclosing word a match must cover.
    #[arg(long, value_name = "RATIO", help = "Minimum share of the enclosing word a match must cover, in (0, 1].")]
    pub threshold: Option<f64>,

    /// Detection mode.
    #[arg(long, value_enum, value_name = "MODE", help = "Detection mode: normal, strict (no density check) or lenient (whole words only).")]
    pub mode: Option<ModeChoice>,

    /// Shorthand for --mode strict.
    #[arg(long, conflicts_with_all = ["mode", "lenient"], help = "Shorthand for --mode strict.")]
    pub strict: bool,

    /// Shorthand for --mode lenient.
    #[arg(long, conflicts_with = "mode", help = "Shorthand for --mode lenient.")]
    pub lenient: bool,

    /// What the summary lists as unique findings.
    #[arg(long = "unique-by", value_enum, default_value = "term", help = "List unique findings by lexicon term or by the exact matched text.")]
    pub unique_by: UniqueByChoice,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the full detection result as JSON.
    #[arg(long, help = "Print the full detection result as JSON instead of the masked text.")]
    pub json: bool,

    /// Exit with status 1 when anything was found.
    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if any profanity was found.")]
    pub fail_on_match: bool,

    /// Suppress the summary printed to stderr.
    #[arg(long = "no-summary", help = "Suppress the detection summary.")]
    pub no_summary: bool,
}

impl CheckCommand {
    /// The mode selected by --mode, --strict or --lenient.
    pub fn selected_mode(&self) -> Option<DetectionMode> {
        if self.strict {
            Some(DetectionMode::Strict)
        } else if self.lenient {
            Some(DetectionMode::Lenient)
        } else {
            self.mode.map(DetectionMode::from)
        }
    }
}

/// Arguments for the `languages` command.
#[derive(Parser, Debug)]
pub struct LanguagesCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the language list as JSON.
    #[arg(long, help = "Print the language list as JSON.")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_shorthands() {
        let cli = Cli::try_parse_from(["swearjar", "check", "--strict", "text"]).unwrap();
        match cli.command {
            Commands::Check(cmd) => assert_eq!(cmd.selected_mode(), Some(DetectionMode::Strict)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["swearjar", "check", "--strict", "--lenient", "text"]).is_err());
    }

    #[test]
    fn test_text_and_input_file_conflict() {
        assert!(Cli::try_parse_from(["swearjar", "check", "-i", "in.txt", "text"]).is_err());
    }
}
