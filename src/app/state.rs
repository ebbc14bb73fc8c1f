//! Viewer state definitions
//!
//! `ViewState` owns one render's worth of data: the computed steps, the
//! style they are drawn with, and what the user has selected so far.

use crate::config_file::StyleConfig;
use crate::presentation::FilterInteraction;
use crate::types::FunnelStep;

/// Main viewer state
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Engine output, in display order
    pub steps: Vec<FunnelStep>,
    /// Style for this render
    pub style: StyleConfig,
    /// Index of the highlighted step
    pub selected: usize,
    /// Whether the detail panel is visible
    pub details_visible: bool,
    /// Most recent filter request, if the user made one
    pub last_interaction: Option<FilterInteraction>,
    /// Status line for user feedback
    pub status_message: String,
}

impl ViewState {
    pub fn new(steps: Vec<FunnelStep>, style: StyleConfig) -> Self {
        let status_message = if steps.is_empty() {
            "No data to display".to_string()
        } else {
            format!("{} steps loaded", steps.len())
        };
        Self {
            steps,
            style,
            selected: 0,
            details_visible: true,
            last_interaction: None,
            status_message,
        }
    }

    /// Currently highlighted step, `None` for an empty funnel
    pub fn selected_step(&self) -> Option<&FunnelStep> {
        self.steps.get(self.selected)
    }

    /// Move the highlight down, stopping at the last step
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.steps.len() {
            self.selected += 1;
        }
    }

    /// Move the highlight up, stopping at the first step
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_details(&mut self) {
        self.details_visible = !self.details_visible;
    }

    /// Record a filter request for the highlighted step
    pub fn emit_filter(&mut self) -> Option<&FilterInteraction> {
        let interaction = FilterInteraction::for_step(self.selected_step()?);
        self.status_message = format!("Filter applied: {}", interaction.values[0][0]);
        self.last_interaction = Some(interaction);
        self.last_interaction.as_ref()
    }
}
