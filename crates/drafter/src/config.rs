//! Configuration types for the drafter pipeline.
//!
//! This module provides configuration structures that control rendering
//! and reconciliation. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining render and reconcile settings.
//! - [`RenderConfig`] - Controls the generated artifact, such as the diagram filename stem.
//! - [`ReconcileConfig`] - Controls how strictly expected counts are enforced.
//!
//! # Example
//!
//! ```
//! # use drafter::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.reconcile().tolerance(), 0.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration combining render and reconcile
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Reconcile configuration section.
    #[serde(default)]
    reconcile: ReconcileConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(render: RenderConfig, reconcile: ReconcileConfig) -> Self {
        Self { render, reconcile }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the reconcile configuration.
    pub fn reconcile(&self) -> &ReconcileConfig {
        &self.reconcile
    }
}

/// Configuration for the generated artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Filename stem passed to the generated `Diagram(...)` call. The
    /// diagram toolchain appends the image extension itself.
    #[serde(default = "default_output_stem")]
    output_stem: String,
}

impl RenderConfig {
    /// Returns the diagram filename stem.
    pub fn output_stem(&self) -> &str {
        &self.output_stem
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_stem: default_output_stem(),
        }
    }
}

fn default_output_stem() -> String {
    "diagram".to_owned()
}

/// Configuration for count reconciliation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconcileConfig {
    /// Relative slack allowed on each count ratio; `0.0` demands exact
    /// counts.
    #[serde(default)]
    tolerance: f64,
}

impl ReconcileConfig {
    /// Returns the reconciliation tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render().output_stem(), "diagram");
        assert_eq!(config.reconcile().tolerance(), 0.0);
    }
}
