//! funnelviz - Main entry point
//!
//! Reads funnel rows, runs the metrics engine, and hands the result to one
//! of the presentation front ends (JSON, text report, terminal viewer).

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use funnelviz::cli::{Cli, Commands};
use funnelviz::{compute_funnel_from_value, render_report, App, FunnelError, StyleConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use std::io::{stdout, Read};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    // RUST_LOG overrides the default level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Compute { input } => {
            let payload = read_payload(input.as_deref())?;
            let steps = compute_steps(&payload)?;
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        Commands::Report { input, style } => {
            let payload = read_payload(input.as_deref())?;
            let style = resolve_style(style.as_deref(), &payload)?;
            let steps = compute_steps(&payload)?;
            print!("{}", render_report(&steps, &style));
        }
        Commands::View { input, style } => {
            let payload = read_payload(Some(input.as_path()))?;
            let style = resolve_style(style.as_deref(), &payload)?;
            let steps = compute_steps(&payload)?;
            info!(steps = steps.len(), "Launching funnel viewer");
            if let Some(interaction) = run_viewer(steps, style)? {
                println!("{}", interaction.to_json()?);
            }
        }
        Commands::ValidateStyle { style } => {
            info!("Validating style file: {:?}", style);
            let config = StyleConfig::load_from_file(&style)?;
            match config.validate() {
                Ok(()) => println!("✓ Style file is valid: {}", style.display()),
                Err(e) => {
                    error!("Style validation failed: {}", e);
                    eprintln!("✗ Style validation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Read a JSON payload from a file, or stdin when no path is given
fn read_payload(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Failed to parse input JSON")
}

fn compute_steps(payload: &Value) -> Result<Vec<funnelviz::FunnelStep>> {
    compute_funnel_from_value(payload).map_err(|e| {
        if e.is_contract_violation() {
            error!("Input is not a collection of funnel rows: {}", e);
        }
        anyhow::Error::new(e)
    })
}

/// Style from an explicit file, else from the payload's `style` object,
/// else defaults
fn resolve_style(path: Option<&Path>, payload: &Value) -> Result<StyleConfig> {
    let style = match path {
        Some(path) => {
            let style = StyleConfig::load_from_file(path)?;
            style.validate()?;
            style
        }
        None => payload
            .get("style")
            .map(StyleConfig::from_host_style)
            .unwrap_or_default(),
    };
    Ok(style)
}

/// Run the terminal viewer, always restoring the terminal afterwards
fn run_viewer(
    steps: Vec<funnelviz::FunnelStep>,
    style: StyleConfig,
) -> Result<Option<funnelviz::FilterInteraction>> {
    debug!("Initializing terminal for viewer");

    enable_raw_mode()
        .map_err(|e| FunnelError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| FunnelError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| FunnelError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| App::new(steps, style).run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if the viewer failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    Ok(result?)
}
