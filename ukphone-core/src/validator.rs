//! The validation pipeline.
//!
//! `PhoneValidator` runs a raw string through every stage in a fixed order:
//! normalize, international-prefix guard, classify, rejection filter, length
//! check and formatting. Each stage either hands its result on or ends the
//! call with a `ValidationError`; nothing is retried.
//!
//! A validator owns nothing mutable. The compiled table is shared through an
//! `Arc`, so one validator (or many) can serve any number of threads.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::classify::classify_or_partial;
use crate::config::{Category, ValidatorConfig};
use crate::errors::ValidationError;
use crate::format::format_number;
use crate::length::validate_length;
use crate::normalize::{check_international_prefix, is_blank, normalize, redact_number};
use crate::reject::{check_reject, RejectSet};
use crate::table::compiler::{default_table, get_or_compile_table, SpecTable};

/// A successfully validated number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidatedNumber {
    /// Digits after normalization; empty for blank input.
    pub normalized: String,
    /// Canonically spaced form; empty for blank input.
    pub formatted: String,
    pub category: Option<Category>,
    /// Row of the table that matched; `None` for blank input.
    pub spec_index: Option<usize>,
}

impl ValidatedNumber {
    pub fn is_blank(&self) -> bool {
        self.spec_index.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PhoneValidator {
    table: Arc<SpecTable>,
    rejects: RejectSet,
}

impl PhoneValidator {
    /// Validator over the built-in UK table.
    pub fn new(rejects: RejectSet) -> Result<Self> {
        let table = default_table().context("Failed to load the built-in UK table for PhoneValidator")?;
        Ok(Self::with_table(table, rejects))
    }

    pub fn with_table(table: Arc<SpecTable>, rejects: RejectSet) -> Self {
        Self { table, rejects }
    }

    /// Builds a validator from host configuration, loading its table if it names one.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let rejects: RejectSet = config.reject.iter().copied().collect();
        let table = match &config.specs_file {
            Some(_) => {
                let specs = config.spec_table_config()?;
                get_or_compile_table(&specs).context("Failed to compile configured number specs")?
            }
            None => default_table()?,
        };
        info!(
            "Validator ready with {} specs, rejecting {:?}",
            table.len(),
            rejects.categories()
        );
        Ok(Self::with_table(table, rejects))
    }

    pub fn table(&self) -> &SpecTable {
        &self.table
    }

    pub fn rejects(&self) -> &RejectSet {
        &self.rejects
    }

    /// Runs the full pipeline and reports what matched.
    pub fn validate(&self, raw: &str) -> Result<ValidatedNumber, ValidationError> {
        if is_blank(raw) {
            debug!("Blank input, nothing to validate");
            return Ok(ValidatedNumber::default());
        }

        let number = normalize(raw);
        check_international_prefix(&number)?;

        let spec = classify_or_partial(&number, &self.table)?;
        check_reject(spec.category, &self.rejects)?;
        validate_length(&number, spec.layout.as_ref())?;

        let formatted = format_number(&number, spec.layout.as_ref());
        debug!("Validated {} as spec #{}", redact_number(&formatted), spec.index);

        Ok(ValidatedNumber {
            normalized: number.into_string(),
            formatted,
            category: spec.category,
            spec_index: Some(spec.index),
        })
    }

    /// Runs the full pipeline and returns only the formatted number.
    pub fn clean(&self, raw: &str) -> Result<String, ValidationError> {
        self.validate(raw).map(|validated| validated.formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Layout, NumberSpec};
    use crate::table::compiler::compile_specs;

    fn uk(rejects: &[Category]) -> PhoneValidator {
        PhoneValidator::new(RejectSet::from(rejects)).unwrap()
    }

    #[test]
    fn blank_input_short_circuits() {
        let validator = uk(&[Category::Premium, Category::Service]);
        assert_eq!(validator.clean(""), Ok(String::new()));
        assert_eq!(validator.clean("   \t"), Ok(String::new()));
        assert!(validator.validate(" ").unwrap().is_blank());
    }

    #[test]
    fn non_blank_noise_is_partial() {
        assert_eq!(uk(&[]).clean("n/a"), Err(ValidationError::PartialNumber));
    }

    #[test]
    fn rejected_categories_fail() {
        let validator = uk(&[Category::Premium]);
        // Rows carry their own end anchors, so a short 070 number matches nothing.
        assert_eq!(validator.clean("070 1234"), Err(ValidationError::PartialNumber));
        assert_eq!(validator.clean("0117 496 0123"), Ok("0117 496 0123".to_string()));
        assert_eq!(
            validator.clean("0909 879 0000"),
            Err(ValidationError::RejectedCategory(Category::Premium))
        );
    }

    #[test]
    fn rejection_precedes_length_on_loose_rows() {
        let validator = uk(&[Category::Service]);
        // ^11[68] has no end anchor, so an over-long number still matches it.
        assert_eq!(
            validator.clean("1161234567"),
            Err(ValidationError::RejectedCategory(Category::Service))
        );
        assert_eq!(uk(&[]).clean("1161234567"), Err(ValidationError::LengthExact(6)));
    }

    #[test]
    fn custom_table_with_range_layout() {
        let table = compile_specs(vec![NumberSpec {
            pattern: r"^0113\d+$".to_string(),
            category: None,
            layout: Some(Layout::with_range(&[4, 3], 4, 6).unwrap()),
        }])
        .unwrap();
        let validator = PhoneValidator::with_table(Arc::new(table), RejectSet::new());

        assert_eq!(validator.clean("0113 496 0123"), Ok("0113 496 0123".to_string()));
        assert_eq!(validator.clean("0113 496 012345"), Ok("0113 496 012345".to_string()));
        assert_eq!(validator.clean("0113 496 012"), Err(ValidationError::LengthRange(11, 13)));
        assert_eq!(validator.clean("0113 496 0123456"), Err(ValidationError::LengthRange(11, 13)));
    }

    #[test]
    fn validate_reports_match_details() {
        let validated = uk(&[]).validate("+44 (0)20 7946 0123").unwrap();
        assert_eq!(validated.normalized, "02079460123");
        assert_eq!(validated.formatted, "020 7946 0123");
        assert_eq!(validated.category, None);
        assert_eq!(validated.spec_index, Some(6));
    }
}
