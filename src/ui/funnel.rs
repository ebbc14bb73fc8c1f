//! Funnel bar rendering
//!
//! Vertical orientation stacks one bar per row group, widest first.
//! Horizontal orientation draws the steps side by side as a bar chart.

use crate::app::ViewState;
use crate::presentation::{
    bar_width_percent, format_number, format_percent, max_value, ConversionClass, StepTreatment,
};
use crate::theme::{step_color, Colors, Styles};
use crate::types::{FunnelStep, Orientation};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

const BAR_SYMBOL: &str = "█";

/// Render all steps in the style's orientation
pub fn render_funnel(f: &mut Frame, area: Rect, state: &ViewState) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(" Steps ");

    if state.steps.is_empty() {
        let empty = Paragraph::new("No data to display")
            .style(Styles::text_secondary())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    match state.style.orientation {
        Orientation::Vertical => render_stacked(f, area, block, state),
        Orientation::Horizontal => render_columns(f, area, block, state),
    }
}

fn conversion_color(rate: f64) -> Color {
    match ConversionClass::from_rate(rate) {
        ConversionClass::Good => Colors::RATE_GOOD,
        ConversionClass::Medium => Colors::RATE_MEDIUM,
        ConversionClass::Poor => Colors::RATE_POOR,
    }
}

/// Lines for one step in the stacked layout
fn step_lines(
    state: &ViewState,
    index: usize,
    step: &FunnelStep,
    inner_width: u16,
) -> Vec<Line<'static>> {
    let style = &state.style;
    let count = state.steps.len();
    let color = step_color(style.start_rgb(), style.end_rgb(), index, count);
    let selected = index == state.selected;

    let marker = if selected { "▶ " } else { "  " };
    let name_style = if selected {
        Styles::selected()
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Styles::selected()),
        Span::styled(step.name.clone(), name_style),
    ])];

    let bar_columns = inner_width.saturating_sub(2);
    let percent = bar_width_percent(step, max_value(&state.steps), style.funnel_width);
    let mut width = ((f64::from(bar_columns) * percent / 100.0).round() as usize)
        .min(usize::from(bar_columns));
    if width == 0 && step.value > 0.0 {
        width = 1;
    }
    let mut bar = vec![
        Span::raw("  "),
        Span::styled(BAR_SYMBOL.repeat(width), Style::default().fg(Color::from(color))),
    ];
    if style.show_values {
        bar.push(Span::raw(format!(" {}", format_number(step.value))));
    }
    if style.show_percentages && index > 0 {
        bar.push(Span::styled(
            format!("  {} of total", format_percent(step.conversion_from_start)),
            Styles::text_secondary(),
        ));
    }
    lines.push(Line::from(bar));

    if index > 0 && style.show_conversion_rate {
        lines.push(Line::from(Span::styled(
            format!("  ↓ Conversion: {}", format_percent(step.conversion_from_previous)),
            Style::default().fg(conversion_color(step.conversion_from_previous)),
        )));
    }

    if index > 0 && style.show_dropoff && StepTreatment::for_step(step) == StepTreatment::Dropoff
    {
        lines.push(Line::from(Span::styled(
            format!(
                "  ⚠ Drop-off: {} ({})",
                format_number(step.dropoff),
                format_percent(step.dropoff_percent)
            ),
            Style::default().fg(Color::from(style.dropoff_rgb())),
        )));
    }

    for _ in 0..style.step_spacing / 10 {
        lines.push(Line::default());
    }
    lines
}

fn render_stacked(f: &mut Frame, area: Rect, block: Block, state: &ViewState) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines = Vec::new();
    let mut selected_range = (0, 0);
    for (index, step) in state.steps.iter().enumerate() {
        let group = step_lines(state, index, step, inner_width);
        if index == state.selected {
            selected_range = (lines.len(), lines.len() + group.len());
        }
        lines.extend(group);
    }

    // Keep the highlighted step on screen
    let scroll = selected_range.1.saturating_sub(inner_height).min(selected_range.0);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn render_columns(f: &mut Frame, area: Rect, block: Block, state: &ViewState) {
    let style = &state.style;
    let count = state.steps.len();
    let inner_width = area.width.saturating_sub(2);
    let gap: u16 = if style.step_spacing > 0 { 1 } else { 0 };
    let slots = u16::try_from(count).unwrap_or(u16::MAX).max(1);
    let bar_width = (inner_width / slots).saturating_sub(gap).max(1);

    let bars: Vec<Bar> = state
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let color = step_color(style.start_rgb(), style.end_rgb(), index, count);
            let label_style = if index == state.selected {
                Styles::selected()
            } else {
                Style::default()
            };
            let text = if style.show_values {
                format_number(step.value)
            } else {
                String::new()
            };
            Bar::default()
                .value(step.value.round().max(0.0) as u64)
                .text_value(text)
                .label(Line::styled(step.name.clone(), label_style))
                .style(Style::default().fg(Color::from(color)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(gap)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}
