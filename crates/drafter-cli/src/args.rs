//! Command-line argument definitions for the drafter CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, optional pipeline stages, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the drafter tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input spec file
    #[arg(help = "Path to the input spec file")]
    pub input: String,

    /// Path to the generated Python file
    #[arg(short, long, default_value = "diagram.py")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Parse and validate only, writing no artifact
    #[arg(long)]
    pub check: bool,

    /// Write the validated graph as JSON to the given path
    #[arg(long, value_name = "PATH")]
    pub emit_graph: Option<String>,

    /// Compare rendered counts against the spec's Expected Results
    #[arg(long)]
    pub reconcile: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
