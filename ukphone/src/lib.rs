// ukphone/src/lib.rs
//! # ukphone CLI Application
//!
//! Command-line front end for `ukphone-core`: validates and formats UK
//! telephone numbers given as arguments or on stdin, and prints the active
//! numbering-plan table.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
