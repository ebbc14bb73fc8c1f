//! Engine modules: the pure core that turns raw rows into an ordered funnel.
//!
//! Nothing in here does I/O or keeps state between calls. Every invocation
//! builds its output from its arguments alone.

pub mod metrics;
pub mod order;
