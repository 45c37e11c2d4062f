// ukphone-core/src/lib.rs
//! # ukphone Core Library
//!
//! `ukphone-core` validates, classifies and canonically formats UK telephone
//! numbers. A raw, user-entered string goes through a strictly linear
//! pipeline driven by an ordered numbering-plan table:
//!
//! normalize → international-prefix guard → classify → rejection filter →
//! length check → format
//!
//! The library is pure and stateless. Tables and reject sets are built once
//! and only read afterwards, so a validator can be shared freely between
//! threads.
//!
//! ## Modules
//!
//! * `config`: Categories, layouts, number specs, and YAML loading of tables and validator settings.
//! * `table`: Compilation and caching of numbering-plan tables, including the built-in UK table.
//! * `normalize`: Punctuation stripping, `+44` rewriting and the international-prefix guard.
//! * `classify`: First-match lookup of a normalized number in a table.
//! * `reject`: The caller-supplied `RejectSet` and the rejection filter.
//! * `length`: Exact and ranged length bounds derived from a layout.
//! * `format`: Canonical spacing of a validated number.
//! * `validator`: `PhoneValidator`, which runs the whole pipeline.
//! * `messages`: The `MessageRenderer` seam and a default English catalog.
//! * `headless`: One-shot helpers.
//! * `errors`: `ValidationError` outcomes and `UkPhoneError` faults.
//!
//! ## Usage Example
//!
//! ```rust
//! use ukphone_core::{Category, MessageCatalog, MessageRenderer, PhoneValidator, RejectSet, ValidationError};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let validator = PhoneValidator::new(RejectSet::from(&[Category::Premium][..]))?;
//!
//!     assert_eq!(validator.clean("+44 20 7946 0123")?, "020 7946 0123");
//!     assert_eq!(validator.clean("")?, "");
//!
//!     let err = validator.clean("0909 879 0000").unwrap_err();
//!     assert_eq!(err, ValidationError::RejectedCategory(Category::Premium));
//!     println!("{}", MessageCatalog::new().render(&err)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Validation outcomes are typed `ValidationError`s carrying only the numbers
//! a host needs to word its own message. Faults while loading or compiling
//! tables surface as `UkPhoneError` or `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod classify;
pub mod config;
pub mod errors;
pub mod format;
pub mod headless;
pub mod length;
pub mod messages;
pub mod normalize;
pub mod reject;
pub mod table;
pub mod validator;

/// Re-exports the table and configuration data model.
pub use config::{
    config_candidate_paths,
    load_config_by_name,
    Category,
    LastChunk,
    Layout,
    LayoutElement,
    NumberSpec,
    SpecTableConfig,
    ValidatorConfig,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the error types.
pub use errors::{UkPhoneError, ValidationError};

/// Re-exports the individual pipeline stages for hosts that compose their own.
pub use classify::{classify, classify_or_partial};
pub use format::format_number;
pub use length::{validate_length, LengthBounds};
pub use normalize::{check_international_prefix, is_blank, normalize, NormalizedNumber};
pub use reject::{check_reject, RejectSet};

/// Re-exports compiled tables.
pub use table::compiler::{compile_specs, default_table, get_or_compile_table, CompiledSpec, SpecTable};

/// Re-exports the pipeline and message rendering.
pub use messages::{MessageCatalog, MessageRenderer, MESSAGE_CODES};
pub use validator::{PhoneValidator, ValidatedNumber};

/// Re-exports the one-shot helper.
pub use headless::clean_uk_number;
