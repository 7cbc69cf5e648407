//! Drafter - architecture specs to diagrams-as-code.
//!
//! Parsing, validation, rendering, and count reconciliation for the
//! drafter spec format. A spec describes components, connections, and
//! cluster hierarchy; drafter turns it into executable Python `diagrams`
//! code.

pub mod config;

mod error;
mod output;
mod reconcile;
mod render;

pub use drafter_core::{graph, identifier, registry};
pub use drafter_parser::error::Diagnostic;

pub use error::DrafterError;
pub use output::write_artifact;
pub use reconcile::{AxisReport, ReconcileReport};
pub use render::{RenderOutput, RenderWarning};

use log::{debug, info, trace};

use drafter_core::graph::{Counts, ExpectedCounts, Graph};

use config::AppConfig;
use render::Renderer;

/// Result of parsing a spec: the validated graph plus side channels.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The validated graph.
    pub graph: Graph,
    /// Ground-truth counts, when the spec declared them.
    pub expected: Option<ExpectedCounts>,
    /// Recoverable parse warnings.
    pub warnings: Vec<Diagnostic>,
}

/// Builder for parsing and rendering drafter specs.
///
/// This provides an API for processing a spec through the parsing,
/// validation, and rendering stages.
///
/// # Examples
///
/// ```
/// use drafter::{DiagramBuilder, config::AppConfig};
///
/// let source = "# Web Stack\n\n## Components\n- **web**: Web Server | nginx\n\
///     - **db**: Database | postgresql\n\n## Connections\n- web -> db | queries\n";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to a validated graph
/// let outcome = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the graph to Python diagrams code
/// let rendered = builder.render(&outcome.graph);
/// assert!(rendered.code.contains("with Diagram("));
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use drafter::{DiagramBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let builder = DiagramBuilder::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse spec source into a validated graph.
    ///
    /// This performs the single-pass line parse followed by structural
    /// validation, producing a graph whose references are all resolved.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Parse`] when the input has no recognizable
    /// structure or violates a structural invariant. The error carries
    /// every diagnostic found together with the source text.
    pub fn parse(&self, source: &str) -> Result<ParseOutcome, DrafterError> {
        info!("Parsing spec");

        let outcome = drafter_parser::parse(source)
            .map_err(|err| DrafterError::new_parse_error(err, source))?;

        debug!(
            nodes = outcome.graph.nodes.len(),
            edges = outcome.graph.edges.len(),
            clusters = outcome.graph.clusters.len();
            "Spec parsed successfully"
        );
        trace!(graph:? = outcome.graph; "Parsed graph");

        Ok(ParseOutcome {
            graph: outcome.graph,
            expected: outcome.expected,
            warnings: outcome.warnings,
        })
    }

    /// Render a validated graph to Python `diagrams` code.
    ///
    /// Rendering is total: unknown node types degrade to a generic
    /// construct and are reported in [`RenderOutput::warnings`] instead of
    /// failing the run. Output is deterministic; the same graph always
    /// yields byte-identical code.
    ///
    /// # Examples
    ///
    /// ```
    /// use drafter::{DiagramBuilder, config::AppConfig};
    ///
    /// let source = "# App\n\n## Components\n- **api**: API | fastapi\n";
    /// let builder = DiagramBuilder::new(AppConfig::default());
    ///
    /// let outcome = builder.parse(source).expect("Failed to parse");
    /// let rendered = builder.render(&outcome.graph);
    ///
    /// println!("{}", rendered.code);
    /// ```
    pub fn render(&self, graph: &Graph) -> RenderOutput {
        info!(name = graph.name; "Rendering diagram code");
        Renderer::new(graph, self.config.render().output_stem()).render()
    }

    /// Compare rendered counts against the spec's declared expectations,
    /// using the configured tolerance.
    pub fn reconcile(&self, expected: &ExpectedCounts, actual: &Counts) -> ReconcileReport {
        reconcile::reconcile(expected, actual, self.config.reconcile().tolerance())
    }
}
