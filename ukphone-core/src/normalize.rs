//! Normalization of raw user input into a canonical digit string.
//!
//! Punctuation and letters are dropped, only a single leading `+` survives,
//! and a `+44` country code is rewritten into the national trunk form.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::ops::Deref;

use lazy_static::lazy_static;
use log::debug;

use crate::errors::ValidationError;

const UK_COUNTRY_CODE: &str = "+44";

lazy_static! {
    /// Whether raw phone numbers may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("UKPHONE_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A string of ASCII digits with at most one leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedNumber {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True for input the pipeline treats as "no value provided".
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Rewrites raw input into a `NormalizedNumber`.
pub fn normalize(raw: &str) -> NormalizedNumber {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '+' if out.is_empty() => out.push(c),
            _ => {}
        }
    }

    let rewritten = match out.strip_prefix(UK_COUNTRY_CODE) {
        Some(rest) if rest.starts_with(|c: char| matches!(c, '1'..='9')) => Some(format!("0{}", rest)),
        Some(rest) if rest.starts_with('0') => Some(rest.to_string()),
        _ => None,
    };
    if let Some(local) = rewritten {
        out = local;
    }

    debug!("Normalized {} -> {}", redact_number(raw), redact_number(&out));
    NormalizedNumber(out)
}

/// Fails for numbers dialled with an international prefix other than `+44`.
pub fn check_international_prefix(number: &NormalizedNumber) -> Result<(), ValidationError> {
    let s = number.as_str();
    let foreign_plus = s.starts_with('+') && !s.starts_with(UK_COUNTRY_CODE);
    if foreign_plus || s.starts_with("00") {
        return Err(ValidationError::NonDomesticNumber);
    }
    Ok(())
}

/// Masks all but the last two digits of a number unless PII debugging is enabled.
pub fn redact_number(s: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        return s.to_string();
    }
    let total = s.chars().count();
    s.chars()
        .enumerate()
        .map(|(i, c)| if c.is_ascii_digit() && i + 2 < total { '*' } else { c })
        .collect()
}
