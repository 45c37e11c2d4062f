//! The `specs` command: print the numbering-plan table in match order.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Write};

use ukphone_core::{get_or_compile_table, SpecTable};

use crate::cli::SpecsCommand;
use crate::commands::resolve_config;

/// Patterns longer than this are shortened unless `--full` is given.
const PATTERN_PREVIEW_CHARS: usize = 48;

fn preview(pattern: &str, full: bool) -> String {
    if full || pattern.chars().count() <= PATTERN_PREVIEW_CHARS {
        return pattern.to_string();
    }
    let head: String = pattern.chars().take(PATTERN_PREVIEW_CHARS - 3).collect();
    format!("{}...", head)
}

/// Builds the table shown by `ukphone specs`.
pub fn build_specs_table(table: &SpecTable, full: bool) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Pattern", "Category", "Layout", "Length"]);

    for spec in table.iter() {
        out.add_row(vec![
            spec.index.to_string(),
            preview(&spec.pattern, full),
            spec.category.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
            spec.layout.as_ref().map(|l| l.to_string()).unwrap_or_else(|| "-".to_string()),
            spec.layout
                .as_ref()
                .map(|l| l.length_bounds().to_string())
                .unwrap_or_else(|| "any".to_string()),
        ]);
    }
    out
}

/// Entry point for `ukphone specs`.
pub fn run_specs(cmd: &SpecsCommand) -> Result<()> {
    let settings = resolve_config(cmd.config.as_deref(), cmd.specs.as_deref())?;
    let specs = settings.spec_table_config()?;
    let table = get_or_compile_table(&specs).context("Failed to compile number specs")?;
    info!("Showing {} specs.", table.len());

    let stdout = io::stdout();
    let mut rendered = build_specs_table(&table, cmd.full);
    if !stdout.is_terminal() {
        rendered.force_no_tty();
    }
    writeln!(stdout.lock(), "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ukphone_core::default_table;

    #[test]
    fn long_patterns_are_shortened() {
        let long = "0".repeat(100);
        let short = preview(&long, false);
        assert_eq!(short.chars().count(), PATTERN_PREVIEW_CHARS);
        assert!(short.ends_with("..."));
        assert_eq!(preview(&long, true), long);
        assert_eq!(preview("^999$", false), "^999$");
    }

    #[test]
    fn table_lists_every_row() {
        let table = default_table().unwrap();
        let rendered = build_specs_table(&table, false);
        assert_eq!(rendered.row_iter().count(), table.len());

        let text = rendered.to_string();
        assert!(text.contains("premium"));
        assert!(text.contains("service"));
        assert!(text.contains("(3, 4, 4)"));
    }
}
