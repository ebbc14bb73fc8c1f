//! Summary header rendering

use crate::presentation::{format_number, format_percent, FunnelSummary};
use crate::theme::Styles;
use crate::types::FunnelStep;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the "Funnel Analysis" strip with whole-funnel statistics
pub fn render_summary(f: &mut Frame, area: Rect, steps: &[FunnelStep]) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(Span::styled(" Funnel Analysis ", Styles::title()));

    let line = match FunnelSummary::from_steps(steps) {
        Some(summary) => Line::from(vec![
            Span::styled("Total Entries ", Styles::text_secondary()),
            Span::raw(format_number(summary.total_entries)),
            Span::styled("   Completions ", Styles::text_secondary()),
            Span::raw(format_number(summary.completions)),
            Span::styled("   Overall Conversion ", Styles::text_secondary()),
            Span::raw(format_percent(summary.overall_conversion)),
            Span::styled("   Total Drop-off ", Styles::text_secondary()),
            Span::raw(format_number(summary.total_dropoff)),
        ]),
        None => Line::from(Span::styled("No data to display", Styles::text_secondary())),
    };

    let header = Paragraph::new(line).block(block).alignment(Alignment::Center);
    f.render_widget(header, area);
}
