// ukphone/src/main.rs
//! ukphone entry point.
//!
//! Parses the command line, sets up logging and the colour theme, and
//! dispatches to the chosen subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use ukphone::cli::{Cli, Commands};
use ukphone::commands::{check::run_check, specs::run_specs};
use ukphone::logger;
use ukphone::ui::output_format::print_error_message;
use ukphone::ui::theme::{build_theme_map, ThemeStyle};

fn run(cli: Cli) -> Result<ExitCode> {
    let theme_map = build_theme_map(cli.theme.as_ref()).context("Theme error")?;

    match cli.command {
        Commands::Check(cmd) => {
            let failures = run_check(&cmd, &theme_map)?;
            if cmd.fail_on_invalid && failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Specs(cmd) => run_specs(&cmd)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if cli.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if cli.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let theme = ThemeStyle::default_theme_map();
            let stderr = io::stderr();
            let colors = stderr.is_terminal();
            let _ = print_error_message(&mut stderr.lock(), &format!("{:#}", e), &theme, colors);
            ExitCode::from(2)
        }
    }
}
