//! funnelviz Library
//!
//! Turns unordered (step, count) rows into an ordered funnel with
//! conversion and drop-off statistics, and provides the presentation
//! pieces (text report, terminal viewer) that consume it.

pub mod app;
pub mod binding;
pub mod cli;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, ViewState};
pub use binding::{rows_from_file, rows_from_reader, rows_from_value};
pub use config_file::StyleConfig;
pub use error::FunnelError;
pub use presentation::{render_report, FilterInteraction, FunnelSummary};
pub use types::{FunnelStep, OrderHint, RawRow, SENTINEL_ORDER};

// Metrics engine
pub use engine::metrics::{compute_funnel, compute_funnel_from_value};
pub use engine::order::{extract_order, resolve_order};
