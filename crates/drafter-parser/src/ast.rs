//! Draft graph types produced by parsing.
//!
//! These are the unvalidated counterparts of the semantic model in
//! [`drafter_core::graph`]. Every identifier field carries the span it was
//! declared at so validation can point diagnostics at the exact source
//! location. A draft graph is built once per parse and consumed once by
//! validation; nothing mutates it in between.

use drafter_core::identifier::Id;

use crate::span::{Span, Spanned};

/// An unvalidated node declaration.
#[derive(Debug, Clone)]
pub struct DraftNode {
    pub id: Spanned<Id>,
    pub label: String,
    pub type_tag: String,
    pub description: Option<String>,
}

/// An unvalidated connection declaration.
#[derive(Debug, Clone)]
pub struct DraftEdge {
    pub source: Spanned<Id>,
    pub target: Spanned<Id>,
    pub label: Option<String>,
}

/// An unvalidated cluster declaration.
#[derive(Debug, Clone)]
pub struct DraftCluster {
    pub id: Spanned<Id>,
    pub label: String,
    pub node_ids: Vec<Spanned<Id>>,
    pub parent: Option<Spanned<Id>>,
}

/// The draft graph: everything the parser extracted, before validation.
#[derive(Debug, Clone)]
pub struct DraftGraph {
    /// Diagram title from the `#` heading, or "Diagram" if absent.
    pub name: String,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Direction as written (or the "TB" default); validated later.
    pub direction: Spanned<String>,
    pub nodes: Vec<DraftNode>,
    pub edges: Vec<DraftEdge>,
    pub clusters: Vec<DraftCluster>,
}

impl Default for DraftGraph {
    fn default() -> Self {
        Self {
            name: "Diagram".to_owned(),
            description: None,
            direction: Spanned::new("TB".to_owned(), Span::default()),
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
        }
    }
}
