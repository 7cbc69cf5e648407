//! CLI logic for the drafter tool.
//!
//! This module contains the core CLI logic for turning spec files into
//! generated diagram code.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;
use std::path::Path;

use log::{info, warn};

use drafter::{DiagramBuilder, DrafterError, write_artifact};

/// Run the drafter CLI application
///
/// This function processes the input spec through the drafter pipeline
/// and writes the generated Python code to the output file.
///
/// # Errors
///
/// Returns `DrafterError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and validation errors
/// - Reconciliation failures (with `--reconcile`)
pub fn run(args: &Args) -> Result<(), DrafterError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing spec"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Parse and validate using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let outcome = builder.parse(&source)?;

    for warning in &outcome.warnings {
        warn!("{warning}");
    }

    if let Some(path) = &args.emit_graph {
        let json = serde_json::to_string_pretty(&outcome.graph)
            .map_err(|err| DrafterError::Export(Box::new(err)))?;
        write_artifact(Path::new(path), &json)?;
        info!(graph_file = path; "Graph exported as JSON");
    }

    if args.check {
        info!("Spec is valid, skipping artifact generation (--check)");
        return Ok(());
    }

    // Render and write the artifact
    let rendered = builder.render(&outcome.graph);
    write_artifact(Path::new(&args.output), &rendered.code)?;

    info!(output_file = args.output; "Diagram code generated successfully");

    if args.reconcile {
        match &outcome.expected {
            Some(expected) => {
                let report = builder.reconcile(expected, &rendered.counts);
                for line in report.to_string().lines() {
                    info!("{line}");
                }
                if !report.passed {
                    return Err(DrafterError::Reconcile(report.to_string()));
                }
            }
            None => {
                warn!("Spec declares no Expected Results section, nothing to reconcile");
            }
        }
    }

    Ok(())
}
