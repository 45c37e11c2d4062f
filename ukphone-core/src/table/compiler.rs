//! compiler.rs - Compiles and caches numbering-plan tables.
//!
//! Turns a `SpecTableConfig` into a `SpecTable` of compiled regexes. Compiled
//! tables are kept in a global cache keyed by a hash of the config, and the
//! built-in UK table is compiled once on first use.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::debug;
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{Category, Layout, NumberSpec, SpecTableConfig, MAX_PATTERN_LENGTH};
use crate::errors::UkPhoneError;

/// A single table row with its pattern compiled.
#[derive(Debug)]
pub struct CompiledSpec {
    /// Position of the row in its table.
    pub index: usize,
    /// The pattern as written in the table.
    pub pattern: String,
    /// The pattern anchored at the start of the input.
    pub regex: Regex,
    pub category: Option<Category>,
    pub layout: Option<Layout>,
}

impl CompiledSpec {
    /// Prefix match: the pattern must match starting at the first character,
    /// but need not consume the whole number.
    pub fn matches(&self, number: &str) -> bool {
        self.regex.is_match(number)
    }
}

/// An ordered, immutable numbering-plan table ready for classification.
#[derive(Debug)]
pub struct SpecTable {
    specs: Vec<CompiledSpec>,
}

impl SpecTable {
    /// Rows in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledSpec> {
        self.specs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CompiledSpec> {
        self.specs.get(index)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

lazy_static! {
    /// Thread-safe cache of compiled tables keyed by a hash of their config.
    static ref COMPILED_TABLE_CACHE: RwLock<HashMap<u64, Arc<SpecTable>>> = RwLock::new(HashMap::new());
}

static DEFAULT_TABLE: OnceCell<Arc<SpecTable>> = OnceCell::new();

/// Row order is part of a table's identity, so rows are hashed in place.
fn hash_config(config: &SpecTableConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Compiles table rows, keeping their order. All failing rows are reported together.
pub fn compile_specs(specs: Vec<NumberSpec>) -> Result<SpecTable, UkPhoneError> {
    debug!("Starting compilation of {} number specs.", specs.len());

    let mut compiled = Vec::with_capacity(specs.len());
    let mut compilation_errors = Vec::new();

    for (index, spec) in specs.into_iter().enumerate() {
        if spec.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(UkPhoneError::PatternLengthExceeded(
                index,
                spec.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        // Only a match beginning at position 0 counts.
        let anchored = format!("^(?:{})", spec.pattern);
        let regex_result = RegexBuilder::new(&anchored)
            .size_limit(10 * (1 << 20))
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "ukphone_core::table",
                    "Spec #{} compiled successfully.",
                    index
                );
                compiled.push(CompiledSpec {
                    index,
                    pattern: spec.pattern,
                    regex,
                    category: spec.category,
                    layout: spec.layout,
                });
            }
            Err(e) => compilation_errors.push(UkPhoneError::SpecCompilationError(index, e)),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(UkPhoneError::Fatal(format!(
            "Failed to compile {} number spec(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling number specs. Total compiled: {}.", compiled.len());
        Ok(SpecTable { specs: compiled })
    }
}

/// Gets a compiled table from the cache, compiling it on a miss.
pub fn get_or_compile_table(config: &SpecTableConfig) -> Result<Arc<SpecTable>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_TABLE_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = cache.get(&cache_key) {
            debug!("Serving compiled table from cache for key: {}", cache_key);
            return Ok(Arc::clone(table));
        }
    }

    debug!("Compiled table not found in cache. Compiling now.");
    let compiled = Arc::new(compile_specs(config.specs.clone())?);

    COMPILED_TABLE_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached table for key: {}", cache_key);
    Ok(compiled)
}

/// The built-in UK table, compiled on first use and shared afterwards.
pub fn default_table() -> Result<Arc<SpecTable>> {
    DEFAULT_TABLE
        .get_or_try_init(|| -> Result<Arc<SpecTable>> {
            let config = SpecTableConfig::load_default_specs()?;
            let table = compile_specs(config.specs).context("Failed to compile the built-in UK table")?;
            Ok(Arc::new(table))
        })
        .map(Arc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pattern: &str) -> NumberSpec {
        NumberSpec { pattern: pattern.to_string(), category: None, layout: None }
    }

    #[test]
    fn patterns_are_anchored_at_start() {
        let table = compile_specs(vec![spec("999"), spec("^11[68]")]).unwrap();
        let unanchored = table.get(0).unwrap();
        assert!(unanchored.matches("999"));
        assert!(!unanchored.matches("1999"));

        // No end anchor: trailing digits are allowed.
        let service = table.get(1).unwrap();
        assert!(service.matches("116123"));
        assert!(service.matches("11612345678"));
    }

    #[test]
    fn every_bad_row_is_reported() {
        let err = compile_specs(vec![spec("^0("), spec("^1"), spec("[")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to compile 2 number spec(s)"));
        assert!(message.contains("spec #0"));
        assert!(message.contains("spec #2"));
    }

    #[test]
    fn overlong_patterns_are_reported_with_regex_errors() {
        let long = format!("^0{}", "1".repeat(MAX_PATTERN_LENGTH));
        let err = compile_specs(vec![spec(&long), spec("^0(")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to compile 2 number spec(s)"));
        assert!(message.contains("Number spec #0: pattern length"));
        assert!(message.contains("Failed to compile number spec #1"));
    }

    #[test]
    fn cache_returns_the_same_table() {
        let config = SpecTableConfig { specs: vec![spec("^0"), spec("^1")] };
        let first = get_or_compile_table(&config).unwrap();
        let second = get_or_compile_table(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let reordered = SpecTableConfig { specs: vec![spec("^1"), spec("^0")] };
        let third = get_or_compile_table(&reordered).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn default_table_compiles_every_row() {
        let table = default_table().unwrap();
        assert_eq!(table.len(), 20);
        assert!(table.iter().enumerate().all(|(i, s)| s.index == i));
    }
}
