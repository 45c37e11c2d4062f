// ukphone/src/cli.rs
//! This file defines the command-line interface (CLI) for the ukphone
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ukphone_core::Category;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "ukphone",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validate and format UK telephone numbers",
    long_about = "ukphone checks user-entered telephone numbers against the UK numbering plan. It strips punctuation, rewrites +44 into national form, rejects international numbers, classifies premium-rate and service numbers, checks digit counts, and prints each number in its canonical spacing.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `ukphone` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validates and formats numbers given as arguments or read from stdin.
    #[command(about = "Validates and formats numbers given as arguments or read from stdin, one per line.")]
    Check(CheckCommand),

    /// Prints the numbering-plan table in use.
    #[command(about = "Prints the numbering-plan table in use.")]
    Specs(SpecsCommand),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Numbers to check (reads stdin line by line if none are given).
    #[arg(value_name = "NUMBER", help = "Numbers to check. Reads one number per line from stdin if omitted.")]
    pub numbers: Vec<String>,

    /// Categories to reject (comma-separated).
    #[arg(long, short = 'r', value_delimiter = ',', value_name = "CATEGORY", help = "Reject these categories: premium, service (comma-separated).")]
    pub reject: Vec<Category>,

    /// Config name or path (YAML).
    #[arg(long = "config", short = 'c', value_name = "NAME|FILE", env = "UKPHONE_CONFIG", help = "Validator config to load, by file path or by name from the standard locations.")]
    pub config: Option<String>,

    /// Alternative numbering-plan table (YAML).
    #[arg(long = "specs", value_name = "FILE", help = "Use this numbering-plan table instead of the built-in one.")]
    pub specs: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long = "json", help = "Print results to stdout as a JSON array.")]
    pub json: bool,

    /// Exit with status 1 if any number is invalid.
    #[arg(long = "fail-on-invalid", help = "Exit with a non-zero code if any number fails validation.")]
    pub fail_on_invalid: bool,
}

/// Arguments for the `specs` command.
#[derive(Parser, Debug)]
pub struct SpecsCommand {
    /// Config name or path (YAML).
    #[arg(long = "config", short = 'c', value_name = "NAME|FILE", env = "UKPHONE_CONFIG", help = "Validator config whose table should be shown.")]
    pub config: Option<String>,

    /// Alternative numbering-plan table (YAML).
    #[arg(long = "specs", value_name = "FILE", help = "Show this numbering-plan table instead of the built-in one.")]
    pub specs: Option<PathBuf>,

    /// Show patterns in full.
    #[arg(long = "full", help = "Do not shorten long patterns.")]
    pub full: bool,
}
