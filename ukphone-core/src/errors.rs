//! errors.rs - Error types for the ukphone-core library.
//!
//! Two families live here. `ValidationError` is the closed set of outcomes a
//! validation call can end with; they describe bad input, never a fault.
//! `UkPhoneError` covers faults in loading or compiling a numbering-plan
//! table, parsing configuration, or rendering messages.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::config::Category;

/// The reasons a raw string can fail to validate as a UK number.
///
/// Every variant carries only what a host needs to render its own message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("number carries an international dialing prefix")]
    NonDomesticNumber,

    #[error("number does not match any numbering-plan rule")]
    PartialNumber,

    #[error("numbers in the '{0}' category are rejected")]
    RejectedCategory(Category),

    #[error("number must be exactly {0} digits long")]
    LengthExact(usize),

    #[error("number must be between {0} and {1} digits long")]
    LengthRange(usize, usize),
}

impl ValidationError {
    /// Stable key identifying the message a host should show for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NonDomesticNumber => "non_uk",
            ValidationError::PartialNumber => "partial",
            ValidationError::RejectedCategory(Category::Premium) => "reject_premium",
            ValidationError::RejectedCategory(Category::Service) => "reject_service",
            ValidationError::LengthExact(_) => "length",
            ValidationError::LengthRange(_, _) => "length_range",
        }
    }
}

/// Faults raised while building tables, loading configuration or rendering messages.
///
/// `#[non_exhaustive]` because new table or config checks may add variants.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UkPhoneError {
    #[error("Invalid phone number: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to compile number spec #{0}: {1}")]
    SpecCompilationError(usize, regex::Error),

    #[error("Number spec #{0}: pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(usize, usize, usize),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Unknown number category '{0}' (expected 'premium' or 'service')")]
    UnknownCategory(String),

    #[error("Failed to render message template: {0}")]
    TemplateError(String),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
