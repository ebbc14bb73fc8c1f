//! Detail panel for the highlighted step

use crate::app::ViewState;
use crate::presentation::detail_lines;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_details(f: &mut Frame, area: Rect, state: &ViewState) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(" Step Details ");

    let lines: Vec<Line> = match state.selected_step() {
        Some(step) => {
            let mut lines = vec![
                Line::from(Span::styled(step.name.clone(), Styles::title())),
                Line::default(),
            ];
            lines.extend(detail_lines(step).into_iter().map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), Styles::text_secondary()),
                    Span::raw(value),
                ])
            }));
            lines
        }
        None => vec![Line::from(Span::styled("No step selected", Styles::text_secondary()))],
    };

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}
