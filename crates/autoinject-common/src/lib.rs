//! Common types and utilities for the autoinject constructor generator.
//!
//! This crate provides foundational types used across all autoinject crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticKind`, message templates)
//! - Source locations (`Location`)
//! - Centralized limits

// Diagnostic types, codes and message templates
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticKind, DiagnosticMessage, format_message,
};

// Location - where a declaration lives in its source file
pub mod location;
pub use location::Location;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
