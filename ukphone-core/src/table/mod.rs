//! Numbering-plan tables in their compiled form.
//!
//! `compiler` turns the YAML rows defined in `config` into anchored regexes,
//! caches compiled tables, and owns the built-in UK table.

pub mod compiler;
