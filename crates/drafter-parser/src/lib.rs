//! # Drafter Parser
//!
//! Parser and validator for drafter architecture specs. This crate turns
//! the line-oriented spec format into a validated [`Graph`], collecting
//! warnings along the way and batching errors so one run reports the full
//! defect list.
//!
//! ## Usage
//!
//! ```
//! # use drafter_parser::parse;
//!
//! let source = "# Web Stack\n\n## Components\n- **web**: Web Server | nginx\n\
//!     - **db**: Database | postgresql\n\n## Connections\n- web -> db | queries\n";
//!
//! let outcome = parse(source).expect("spec is valid");
//! assert_eq!(outcome.graph.nodes.len(), 2);
//! assert_eq!(outcome.graph.edges.len(), 1);
//! assert!(outcome.warnings.is_empty());
//! ```

pub mod ast;
pub mod error;

mod parser;
mod scan;
mod span;
mod validate;


pub use parser::{Parse, parse_draft};
pub use span::{Span, Spanned};
pub use validate::validate;

use drafter_core::graph::{ExpectedCounts, Graph};

use error::{Diagnostic, ParseError};

/// Result of running the full parse-and-validate pipeline.
#[derive(Debug)]
pub struct Outcome {
    /// The validated graph.
    pub graph: Graph,
    /// Ground-truth counts, when the input declared an Expected Results
    /// section.
    pub expected: Option<ExpectedCounts>,
    /// Recoverable parse warnings (skipped lines and the like).
    pub warnings: Vec<Diagnostic>,
}

/// Parse source text into a validated graph.
///
/// This is the main entry point. It orchestrates the pipeline:
///
/// 1. **Parse** - single pass over lines, building the draft graph
/// 2. **Validate** - check every structural invariant, batching errors
///
/// # Errors
///
/// Returns a [`ParseError`] when the input has no recognizable section
/// structure, or when the draft graph violates any invariant. The error
/// carries every diagnostic found, not just the first.
pub fn parse(source: &str) -> Result<Outcome, ParseError> {
    let parsed = parse_draft(source)?;
    let graph = validate(&parsed.draft)?;

    Ok(Outcome {
        graph,
        expected: parsed.expected,
        warnings: parsed.warnings,
    })
}
