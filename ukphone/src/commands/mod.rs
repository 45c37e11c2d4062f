// ukphone/src/commands/mod.rs
//! Subcommand implementations and the settings they share.

pub mod check;
pub mod specs;

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use ukphone_core::{load_config_by_name, ValidatorConfig};

/// Resolves validator settings from `--config` and `--specs`.
///
/// A named or path config is loaded first; `--specs` then replaces whatever
/// table the config pointed at.
pub fn resolve_config(config: Option<&str>, specs: Option<&Path>) -> Result<ValidatorConfig> {
    let mut settings = match config {
        Some(name) => load_config_by_name(name)
            .with_context(|| format!("Failed to load config '{}'", name))?,
        None => ValidatorConfig::default(),
    };

    if let Some(path) = specs {
        debug!("Using spec table from command line: {}", path.display());
        settings.specs_file = Some(path.to_path_buf());
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use ukphone_core::Category;

    #[test]
    fn no_flags_gives_default_settings() {
        let settings = resolve_config(None, None).unwrap();
        assert_eq!(settings, ValidatorConfig::default());
    }

    #[test]
    fn specs_flag_overrides_config_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "reject: [premium]\nspecs_file: /nonexistent/table.yaml").unwrap();
        let config_path = file.path().to_string_lossy().into_owned();

        let settings = resolve_config(Some(&config_path), Some(Path::new("custom.yaml"))).unwrap();
        assert_eq!(settings.reject, vec![Category::Premium]);
        assert_eq!(settings.specs_file, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = resolve_config(Some("ukphone-no-such-config-anywhere"), None).unwrap_err();
        assert!(format!("{:#}", err).contains("ukphone-no-such-config-anywhere"));
    }
}
