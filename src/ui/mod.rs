//! User interface rendering module
//!
//! - `header` - Summary statistics strip
//! - `funnel` - Step bars, stacked (vertical) or side by side (horizontal)
//! - `details` - Detail panel for the highlighted step
//!
//! Every function takes the state it draws as a parameter. Nothing here
//! remembers the previous frame.

mod details;
mod funnel;
mod header;

use crate::app::ViewState;
use crate::theme::Styles;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};

/// Width of the detail panel in columns
const DETAILS_WIDTH: u16 = 36;

const NAV_HINTS: &str = "↑/↓ select  Enter filter  d details  q quit";

/// Draw one full frame
pub fn draw(f: &mut Frame, state: &ViewState) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    header::render_summary(f, header_area, &state.steps);

    if state.details_visible && body_area.width > DETAILS_WIDTH * 2 {
        let [chart_area, details_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(DETAILS_WIDTH)])
                .areas(body_area);
        funnel::render_funnel(f, chart_area, state);
        details::render_details(f, details_area, state);
    } else {
        funnel::render_funnel(f, body_area, state);
    }

    let footer = Paragraph::new(format!("{}  |  {}", NAV_HINTS, state.status_message))
        .style(Styles::nav_hint());
    f.render_widget(footer, footer_area);
}
