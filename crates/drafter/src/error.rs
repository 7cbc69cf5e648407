//! Error types for drafter operations.
//!
//! This module provides the main error type [`DrafterError`] which wraps
//! the error conditions that can occur while processing a spec into a
//! generated artifact.

use std::io;

use thiserror::Error;

use drafter_parser::error::ParseError;

/// The main error type for drafter operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics together with the
/// source text they refer to, so callers can render labeled source
/// snippets.
#[derive(Debug, Error)]
pub enum DrafterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Reconciliation failed: {0}")]
    Reconcile(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl DrafterError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
