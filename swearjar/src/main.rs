// swearjar/src/main.rs
//! Swearjar entry point.
//!
//! Parses the command line, initializes logging and dispatches to the
//! selected command.

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use swearjar::cli::{Cli, Commands};
use swearjar::commands::{check, languages};
use swearjar::logger;
use swearjar::ui::output_format;

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Check(cmd) => {
            let found = check::execute(cmd, cli.quiet)?;
            if found && cmd.fail_on_match {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Languages(cmd) => {
            languages::execute(cmd)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_for_flags(cli.quiet, cli.debug));

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let stderr = io::stderr();
            let supports_color = stderr.is_terminal();
            let _ = output_format::print_error_message(&mut stderr.lock(), &format!("{:#}", e), supports_color);
            ExitCode::from(2)
        }
    }
}
