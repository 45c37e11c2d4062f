//! The `check` command: validate and format a batch of numbers.
//!
//! Valid numbers go to stdout in canonical form, one per line and in input
//! order. Failures are rendered through the message catalog and written to
//! stderr prefixed with the input. With `--json` everything goes to stdout as
//! a single array instead.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, BufRead, Write};

use ukphone_core::{Category, MessageCatalog, MessageRenderer, PhoneValidator, ValidationError};

use crate::cli::CheckCommand;
use crate::commands::resolve_config;
use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Outcome for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Message key of the failure (`partial`, `length_range`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckReport {
    fn passed(input: &str, formatted: String, category: Option<Category>) -> Self {
        Self {
            input: input.to_string(),
            valid: true,
            formatted: Some(formatted),
            category,
            code: None,
            message: None,
        }
    }

    fn failed(input: &str, error: &ValidationError, message: String) -> Self {
        Self {
            input: input.to_string(),
            valid: false,
            formatted: None,
            category: None,
            code: Some(error.code()),
            message: Some(message),
        }
    }
}

/// Runs every input through the validator and renders failures with `renderer`.
pub fn check_numbers<S: AsRef<str>>(
    validator: &PhoneValidator,
    renderer: &dyn MessageRenderer,
    inputs: &[S],
) -> Result<Vec<CheckReport>> {
    inputs
        .iter()
        .map(|input| {
            let input = input.as_ref();
            match validator.validate(input) {
                Ok(validated) => Ok(CheckReport::passed(input, validated.formatted, validated.category)),
                Err(error) => {
                    let message = renderer
                        .render(&error)
                        .with_context(|| format!("Failed to render message '{}'", error.code()))?;
                    Ok(CheckReport::failed(input, &error, message))
                }
            }
        })
        .collect()
}

/// Writes reports as text: formatted numbers to `out`, failures to `err`.
pub fn write_text_reports<W: Write, E: Write>(
    reports: &[CheckReport],
    out: &mut W,
    err: &mut E,
    theme: &ThemeMap,
    out_colors: bool,
    err_colors: bool,
) -> io::Result<()> {
    for report in reports {
        match (&report.formatted, &report.message) {
            (Some(formatted), _) => {
                let line = styled(formatted, ThemeEntry::Valid, theme, out_colors);
                match report.category {
                    Some(category) => writeln!(
                        out,
                        "{} [{}]",
                        line,
                        styled(category.as_str(), ThemeEntry::Category, theme, out_colors)
                    )?,
                    None => writeln!(out, "{}", line)?,
                }
            }
            (None, Some(message)) => writeln!(
                err,
                "{}: {}",
                report.input,
                styled(message, ThemeEntry::Invalid, theme, err_colors)
            )?,
            (None, None) => {}
        }
    }
    Ok(())
}

fn read_inputs<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        inputs.push(line.context("Failed to read number from stdin")?);
    }
    Ok(inputs)
}

/// Entry point for `ukphone check`. Returns the number of inputs that failed.
pub fn run_check(cmd: &CheckCommand, theme: &ThemeMap) -> Result<usize> {
    info!("Starting ukphone check.");

    let mut settings = resolve_config(cmd.config.as_deref(), cmd.specs.as_deref())?;
    settings.reject.extend(cmd.reject.iter().copied());

    let validator = PhoneValidator::from_config(&settings)?;
    let catalog = MessageCatalog::with_overrides(&settings.messages)
        .context("Invalid message template in config")?;
    debug!("Rejecting categories: {:?}", validator.rejects().categories());

    let inputs = if cmd.numbers.is_empty() {
        debug!("No numbers on the command line, reading stdin");
        read_inputs(io::stdin().lock())?
    } else {
        cmd.numbers.clone()
    };

    let reports = check_numbers(&validator, &catalog, &inputs)?;
    let failures = reports.iter().filter(|r| !r.valid).count();

    let stdout = io::stdout();
    let stderr = io::stderr();
    if cmd.json {
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &reports).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        let out_colors = stdout.is_terminal();
        let err_colors = stderr.is_terminal();
        write_text_reports(&reports, &mut stdout.lock(), &mut stderr.lock(), theme, out_colors, err_colors)?;
    }

    info!("Checked {} numbers, {} failed.", reports.len(), failures);
    Ok(failures)
}
