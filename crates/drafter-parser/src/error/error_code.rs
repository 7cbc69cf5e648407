//! Error codes for the drafter diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Fatal scan errors
//! - `E1xx` - Parse warnings (line skipped)
//! - `E2xx` - Validation errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Scan Errors (E0xx)
    // =========================================================================
    /// No recognized section structure found.
    ///
    /// The input contains no `## Components`, `## Connections`,
    /// `## Clusters`, `## Expected Results`, or `## Description` header.
    E001,

    // =========================================================================
    // Parse Warnings (E1xx)
    // =========================================================================
    /// Unrecognized line inside a known section.
    ///
    /// The line does not match the bullet shape of its section and was
    /// skipped.
    E100,

    /// Orphan parent attribute.
    ///
    /// A `- parent: <id>` line appeared before any cluster bullet in the
    /// Clusters section.
    E101,

    /// Malformed expected count.
    ///
    /// A `- Total:` bullet in the Expected Results section does not name a
    /// recognized axis (`nodes`, `connections`, or `clusters`).
    E102,

    /// Unrecognized section header.
    ///
    /// A `##` header names a section the parser does not know; its
    /// contents are ignored.
    E103,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Duplicate node id.
    E200,

    /// Duplicate cluster id.
    E201,

    /// A cluster id collides with a node id.
    E202,

    /// Dangling edge endpoint.
    ///
    /// An edge references a node id that was never declared.
    E203,

    /// Dangling cluster member.
    ///
    /// A cluster lists a node id that was never declared.
    E204,

    /// Dangling cluster parent.
    ///
    /// A cluster names a parent cluster id that was never declared.
    E205,

    /// Ambiguous node placement.
    ///
    /// A node is a direct member of more than one cluster.
    E206,

    /// Cluster parent cycle.
    ///
    /// The cluster parent relation contains a cycle; clusters must form a
    /// forest.
    E207,

    /// Invalid direction value.
    E208,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "no recognized sections",
            ErrorCode::E100 => "unrecognized line skipped",
            ErrorCode::E101 => "orphan parent attribute",
            ErrorCode::E102 => "malformed expected count",
            ErrorCode::E103 => "unrecognized section",
            ErrorCode::E200 => "duplicate node id",
            ErrorCode::E201 => "duplicate cluster id",
            ErrorCode::E202 => "cluster id collides with node id",
            ErrorCode::E203 => "dangling edge endpoint",
            ErrorCode::E204 => "dangling cluster member",
            ErrorCode::E205 => "dangling cluster parent",
            ErrorCode::E206 => "node in more than one cluster",
            ErrorCode::E207 => "cluster parent cycle",
            ErrorCode::E208 => "invalid direction",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
