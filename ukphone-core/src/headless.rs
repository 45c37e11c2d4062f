// File: ukphone-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot validation without building a validator
//! by hand. Every call uses the built-in UK table.

use crate::config::Category;
use crate::errors::UkPhoneError;
use crate::reject::RejectSet;
use crate::validator::PhoneValidator;

/// Validates and formats a single number against the built-in UK table.
///
/// # Arguments
///
/// * `raw` - The number as the user typed it.
/// * `rejects` - Categories to treat as invalid.
///
/// Bad input comes back as `UkPhoneError::Invalid` wrapping the
/// `ValidationError`; any other variant means the built-in table failed to load.
pub fn clean_uk_number(raw: &str, rejects: &[Category]) -> Result<String, UkPhoneError> {
    let validator = PhoneValidator::new(RejectSet::from(rejects))?;
    Ok(validator.clean(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn test_clean_uk_number_formats() -> anyhow::Result<()> {
        assert_eq!(clean_uk_number("02079460123", &[])?, "020 7946 0123");
        assert_eq!(clean_uk_number("+441914960123", &[])?, "0191 496 0123");
        assert_eq!(clean_uk_number("999", &[])?, "999");
        Ok(())
    }

    #[test]
    fn test_clean_uk_number_wraps_validation_errors() {
        assert!(matches!(
            clean_uk_number("999", &[Category::Service]),
            Err(UkPhoneError::Invalid(ValidationError::RejectedCategory(Category::Service)))
        ));
        assert!(matches!(
            clean_uk_number("+1234567890", &[]),
            Err(UkPhoneError::Invalid(ValidationError::NonDomesticNumber))
        ));
    }
}
