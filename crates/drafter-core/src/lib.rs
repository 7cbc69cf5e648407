//! Core types for the drafter diagram pipeline.
//!
//! This crate defines the validated graph model shared by the parser,
//! renderer, and external collaborators, plus the static type registry
//! that maps node type tags to rendering constructs.

pub mod graph;
pub mod identifier;
pub mod registry;
