//! User-facing messages for validation errors.
//!
//! The pipeline itself only returns `ValidationError`s. Turning them into
//! text is the host's job; `MessageRenderer` is the seam a host plugs its own
//! localization into, and `MessageCatalog` is a ready-made English catalog
//! whose entries can be overridden with `tinytemplate` templates such as
//! `"Use {min} to {max} digits"`.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tinytemplate::TinyTemplate;

use crate::errors::{UkPhoneError, ValidationError};

/// Every message key a `ValidationError` can map to.
pub const MESSAGE_CODES: [&str; 6] = [
    "partial",
    "non_uk",
    "length_range",
    "length",
    "reject_premium",
    "reject_service",
];

static DEFAULT_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("partial", "Phone number must include an area code."),
        ("non_uk", "Phone number must be a UK number."),
        ("length_range", "Phone number must be between {min} and {max} digits"),
        ("length", "Phone number must be {length} digits"),
        ("reject_premium", "Phone number can't be a premium rate number."),
        ("reject_service", "Phone number can't be a service number."),
    ])
});

/// Renders a validation error as text for an end user.
pub trait MessageRenderer: Send + Sync {
    fn render(&self, error: &ValidationError) -> Result<String, UkPhoneError>;
}

/// Template context exposed to message templates.
fn message_context(error: &ValidationError) -> Value {
    match *error {
        ValidationError::LengthExact(length) => json!({ "length": length }),
        ValidationError::LengthRange(min, max) => json!({ "min": min, "max": max }),
        ValidationError::RejectedCategory(category) => json!({ "category": category.as_str() }),
        ValidationError::NonDomesticNumber | ValidationError::PartialNumber => json!({}),
    }
}

fn compile_template<'a>(tt: &mut TinyTemplate<'a>, code: &'a str, template: &'a str) -> Result<(), UkPhoneError> {
    tt.add_template(code, template)
        .map_err(|e| UkPhoneError::TemplateError(format!("message '{}': {}", code, e)))
}

/// English message catalog with optional per-key overrides.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_MESSAGES
                .iter()
                .map(|(code, text)| (code.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default catalog with the given templates replacing the defaults.
    ///
    /// Unknown keys are ignored with a warning; templates that fail to parse
    /// are an error.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, UkPhoneError> {
        let mut catalog = Self::default();
        for (code, template) in overrides {
            if !MESSAGE_CODES.contains(&code.as_str()) {
                warn!("Ignoring message override for unknown key '{}'.", code);
                continue;
            }
            let mut tt = TinyTemplate::new();
            compile_template(&mut tt, code, template)?;
            debug!("Overriding message '{}'", code);
            catalog.templates.insert(code.clone(), template.clone());
        }
        Ok(catalog)
    }

    pub fn template(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(String::as_str)
    }
}

impl MessageRenderer for MessageCatalog {
    fn render(&self, error: &ValidationError) -> Result<String, UkPhoneError> {
        let code = error.code();
        let template = self
            .template(code)
            .ok_or_else(|| UkPhoneError::TemplateError(format!("no message for '{}'", code)))?;

        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        compile_template(&mut tt, code, template)?;
        tt.render(code, &message_context(error))
            .map_err(|e| UkPhoneError::TemplateError(format!("message '{}': {}", code, e)))
    }
}
