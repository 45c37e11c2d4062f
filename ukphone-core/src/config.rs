//! Configuration management for `ukphone-core`.
//!
//! This module defines the data model of a numbering-plan table (categories,
//! layouts and number specs) and the validator configuration a host supplies.
//! It handles YAML (de)serialization of both and provides utilities for
//! loading and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::UkPhoneError;
use crate::length::LengthBounds;

/// Maximum allowed length for a regex pattern string.
///
/// The geographic rows of the UK table run to roughly 600 characters.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Tariff category of a matched number.
///
/// Standard geographic, mobile and freephone numbers have no category and are
/// represented as `None` wherever a category is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Premium-rate numbers (070 personal numbers, 087x, 09x).
    Premium,
    /// Short service numbers (116xxx, 118xxx, 999 and the leading-1 catch-all).
    Service,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Premium => "premium",
            Category::Service => "service",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UkPhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" => Ok(Category::Premium),
            "service" => Ok(Category::Service),
            _ => Err(UkPhoneError::UnknownCategory(s.to_string())),
        }
    }
}

/// One element of a layout as written in YAML: a fixed width, or a
/// `[min_extra, max_extra]` pair for a variable-width final chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LayoutElement {
    Width(usize),
    Range(usize, usize),
}

/// Width of the final chunk of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LastChunk {
    Exact(usize),
    Range { min_extra: usize, max_extra: usize },
}

/// Digit grouping of a number.
///
/// Every chunk but the last has a fixed width. The last chunk either has a
/// fixed width or a width range. The declared last width is only used to
/// derive length bounds; the formatter always gives the last group whatever
/// digits remain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "Vec<LayoutElement>", into = "Vec<LayoutElement>")]
pub struct Layout {
    leading: Vec<usize>,
    last: LastChunk,
}

impl Layout {
    /// Builds a layout whose every chunk has a fixed width.
    pub fn fixed(widths: &[usize]) -> Result<Self, UkPhoneError> {
        let elements: Vec<LayoutElement> = widths.iter().copied().map(LayoutElement::Width).collect();
        Self::try_from(elements)
    }

    /// Builds a layout with fixed leading chunks and a variable-width final chunk.
    pub fn with_range(leading: &[usize], min_extra: usize, max_extra: usize) -> Result<Self, UkPhoneError> {
        let mut elements: Vec<LayoutElement> = leading.iter().copied().map(LayoutElement::Width).collect();
        elements.push(LayoutElement::Range(min_extra, max_extra));
        Self::try_from(elements)
    }

    /// Fixed widths of every chunk except the last.
    pub fn leading(&self) -> &[usize] {
        &self.leading
    }

    pub fn last(&self) -> LastChunk {
        self.last
    }

    /// Total digit count (or range of counts) this layout accepts.
    pub fn length_bounds(&self) -> LengthBounds {
        let base: usize = self.leading.iter().sum();
        match self.last {
            LastChunk::Exact(width) => LengthBounds::Exact(base + width),
            LastChunk::Range { min_extra, max_extra } => LengthBounds::Range {
                min: base + min_extra,
                max: base + max_extra,
            },
        }
    }
}

impl TryFrom<Vec<LayoutElement>> for Layout {
    type Error = UkPhoneError;

    fn try_from(mut elements: Vec<LayoutElement>) -> Result<Self, Self::Error> {
        let last = elements
            .pop()
            .ok_or_else(|| UkPhoneError::InvalidLayout("layout must have at least one chunk".to_string()))?;

        let mut leading = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                LayoutElement::Width(0) => {
                    return Err(UkPhoneError::InvalidLayout("chunk widths must be positive".to_string()));
                }
                LayoutElement::Width(width) => leading.push(width),
                LayoutElement::Range(min, max) => {
                    return Err(UkPhoneError::InvalidLayout(format!(
                        "range [{}, {}] is only allowed as the last chunk",
                        min, max
                    )));
                }
            }
        }

        let last = match last {
            LayoutElement::Width(0) => {
                return Err(UkPhoneError::InvalidLayout("chunk widths must be positive".to_string()));
            }
            LayoutElement::Width(width) => LastChunk::Exact(width),
            LayoutElement::Range(min, max) if min == 0 || min > max => {
                return Err(UkPhoneError::InvalidLayout(format!(
                    "final chunk range [{}, {}] must satisfy 0 < min <= max",
                    min, max
                )));
            }
            LayoutElement::Range(min, max) if min == max => LastChunk::Exact(min),
            LayoutElement::Range(min, max) => LastChunk::Range { min_extra: min, max_extra: max },
        };

        let widest_last = match last {
            LastChunk::Exact(width) => width,
            LastChunk::Range { max_extra, .. } => max_extra,
        };
        leading
            .iter()
            .try_fold(widest_last, |total, &width| total.checked_add(width))
            .ok_or_else(|| UkPhoneError::InvalidLayout("total layout width overflows".to_string()))?;

        Ok(Self { leading, last })
    }
}

impl From<Layout> for Vec<LayoutElement> {
    fn from(layout: Layout) -> Self {
        let mut elements: Vec<LayoutElement> = layout.leading.into_iter().map(LayoutElement::Width).collect();
        elements.push(match layout.last {
            LastChunk::Exact(width) => LayoutElement::Width(width),
            LastChunk::Range { min_extra, max_extra } => LayoutElement::Range(min_extra, max_extra),
        });
        elements
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts: Vec<String> = self.leading.iter().map(|w| w.to_string()).collect();
        parts.push(match self.last {
            LastChunk::Exact(width) => width.to_string(),
            LastChunk::Range { min_extra, max_extra } => format!("{}-{}", min_extra, max_extra),
        });
        write!(f, "({})", parts.join(", "))
    }
}

/// One row of a numbering-plan table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct NumberSpec {
    /// Regex tried against the start of a normalized number.
    pub pattern: String,
    /// Tariff category, `None` for standard numbers.
    #[serde(default)]
    pub category: Option<Category>,
    /// Digit grouping, `None` for no length constraint and no splitting.
    #[serde(default)]
    pub layout: Option<Layout>,
}

/// An ordered numbering-plan table as loaded from YAML.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SpecTableConfig {
    /// Rows in priority order; the first matching row wins.
    pub specs: Vec<NumberSpec>,
}

impl SpecTableConfig {
    /// Loads a numbering-plan table from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading number specs from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read spec file {}", path.display()))?;
        let config: SpecTableConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse spec file {}", path.display()))?;

        validate_specs(&config.specs)?;
        info!("Loaded {} number specs from file {}.", config.specs.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in UK numbering-plan table.
    pub fn load_default_specs() -> Result<Self> {
        debug!("Loading default number specs from embedded string...");
        let default_yaml = include_str!("../config/number_specs.yaml");
        let config: SpecTableConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default number specs")?;

        debug!("Loaded {} default number specs.", config.specs.len());
        Ok(config)
    }
}

/// Validates table shape: at least one row, and no row with an empty pattern.
///
/// Pattern length and regex syntax are checked when the table is compiled.
fn validate_specs(specs: &[NumberSpec]) -> Result<()> {
    let mut errors = Vec::new();

    if specs.is_empty() {
        errors.push("The table has no `specs` entries.".to_string());
    }

    for (index, spec) in specs.iter().enumerate() {
        if spec.pattern.is_empty() {
            errors.push(format!("Spec #{} has an empty `pattern` field.", index));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Number spec validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

/// Host-side validator settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Categories to treat as invalid input.
    pub reject: Vec<Category>,
    /// Message template overrides keyed by message code (`partial`, `length`, ...).
    pub messages: HashMap<String, String>,
    /// Alternative numbering-plan table; relative paths resolve against the config file.
    pub specs_file: Option<PathBuf>,
}

impl ValidatorConfig {
    /// Loads validator settings from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading validator config from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: ValidatorConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(specs_file) = config.specs_file.take() {
            let resolved = match path.parent() {
                Some(dir) if specs_file.is_relative() => dir.join(specs_file),
                _ => specs_file,
            };
            debug!("Config points at spec file {}", resolved.display());
            config.specs_file = Some(resolved);
        }

        let unique: HashSet<&Category> = config.reject.iter().collect();
        if unique.len() != config.reject.len() {
            warn!("Config file {} lists a rejected category more than once.", path.display());
        }

        Ok(config)
    }

    /// Loads the table this config points at, or the built-in table.
    pub fn spec_table_config(&self) -> Result<SpecTableConfig> {
        match &self.specs_file {
            Some(path) => SpecTableConfig::load_from_file(path),
            None => SpecTableConfig::load_default_specs(),
        }
    }
}

/// Locations searched for a named config, in priority order.
pub fn config_candidate_paths(name: &str) -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".ukphone")),
        dirs::config_dir().map(|p| p.join("ukphone")),
        Some(PathBuf::from("/etc/ukphone")),
        Some(PathBuf::from("./config")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a config from a direct file path, or by name from the candidate locations.
pub fn load_config_by_name(name_or_path: &str) -> Result<ValidatorConfig> {
    debug!("Attempting to load config from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.is_file() {
            Some(path.to_path_buf())
        } else {
            config_candidate_paths(name_or_path)
                .into_iter()
                .find(|p| p.exists())
        }
    }
    .context("Config not found. It is not a valid file path, and was not found in expected locations.")?;

    ValidatorConfig::load_from_file(&path_to_load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Premium".parse::<Category>().unwrap(), Category::Premium);
        assert_eq!(" service ".parse::<Category>().unwrap(), Category::Service);
        assert!(matches!(
            "freephone".parse::<Category>(),
            Err(UkPhoneError::UnknownCategory(name)) if name == "freephone"
        ));
    }

    #[test]
    fn layout_parses_fixed_and_range_tails() {
        let fixed: Layout = serde_yml::from_str("[4, 3, 4]").unwrap();
        assert_eq!(fixed.leading(), &[4, 3]);
        assert_eq!(fixed.last(), LastChunk::Exact(4));

        let ranged: Layout = serde_yml::from_str("[4, 3, [4, 6]]").unwrap();
        assert_eq!(ranged.last(), LastChunk::Range { min_extra: 4, max_extra: 6 });
        assert_eq!(ranged.to_string(), "(4, 3, 4-6)");
    }

    #[test]
    fn layout_rejects_malformed_shapes() {
        assert!(serde_yml::from_str::<Layout>("[]").is_err());
        assert!(serde_yml::from_str::<Layout>("[[1, 2], 3]").is_err());
        assert!(serde_yml::from_str::<Layout>("[4, 0]").is_err());
        assert!(serde_yml::from_str::<Layout>("[4, [6, 4]]").is_err());
        assert!(Layout::with_range(&[3], 0, 2).is_err());
    }

    #[test]
    fn degenerate_range_collapses_to_exact() {
        let layout = Layout::with_range(&[3], 4, 4).unwrap();
        assert_eq!(layout.last(), LastChunk::Exact(4));
        assert_eq!(layout.length_bounds(), LengthBounds::Exact(7));
    }

    #[test]
    fn layout_round_trips_through_yaml() {
        let layout = Layout::with_range(&[4, 3], 4, 6).unwrap();
        let yaml = serde_yml::to_string(&layout).unwrap();
        let back: Layout = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn default_specs_keep_table_order() {
        let config = SpecTableConfig::load_default_specs().unwrap();
        assert_eq!(config.specs.len(), 20);
        assert!(config.specs[0].pattern.starts_with("^01((1(3[0-48]"));
        let last = config.specs.last().unwrap();
        assert_eq!(last.pattern, "^1");
        assert_eq!(last.category, Some(Category::Service));
        assert_eq!(last.layout, None);
        assert!(validate_specs(&config.specs).is_ok());
    }

    #[test]
    fn validate_specs_collects_every_problem() {
        let specs = vec![
            NumberSpec { pattern: String::new(), category: None, layout: None },
            NumberSpec { pattern: "^0".to_string(), category: None, layout: None },
            NumberSpec { pattern: String::new(), category: None, layout: None },
        ];
        let message = validate_specs(&specs).unwrap_err().to_string();
        assert!(message.contains("Spec #0 has an empty"));
        assert!(!message.contains("Spec #1"));
        assert!(message.contains("Spec #2 has an empty"));

        assert!(validate_specs(&[]).unwrap_err().to_string().contains("no `specs` entries"));
    }

    #[test]
    fn layout_widths_that_overflow_are_rejected() {
        let huge: Result<Layout, _> = serde_yml::from_str("[18446744073709551615, 1]");
        assert!(huge.is_err());
        assert!(matches!(
            Layout::with_range(&[usize::MAX], 1, 2),
            Err(UkPhoneError::InvalidLayout(message)) if message.contains("overflows")
        ));
        assert!(Layout::fixed(&[usize::MAX - 1, 1]).is_ok());
    }

    #[test]
    fn candidate_paths_end_with_name() {
        for path in config_candidate_paths("strict") {
            assert!(path.ends_with("strict.yaml"));
        }
    }
}
