use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// funnelviz - Funnel conversion metrics from step/count rows
#[derive(Parser)]
#[command(name = "funnelviz")]
#[command(about = "Compute and display funnel conversion and drop-off metrics")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the funnel and print the steps as JSON
    Compute {
        /// JSON rows or host payload (reads stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Print a plain-text funnel report
    Report {
        /// JSON rows or host payload (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Style configuration file
        #[arg(short, long)]
        style: Option<PathBuf>,
    },
    /// Open the interactive terminal funnel viewer
    View {
        /// JSON rows or host payload
        input: PathBuf,

        /// Style configuration file
        #[arg(short, long)]
        style: Option<PathBuf>,
    },
    /// Validate a style configuration file
    ValidateStyle {
        /// Path to style file to validate
        style: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
