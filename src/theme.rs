//! Centralized colors and styling for funnel rendering
//!
//! Style colors arrive as `#rrggbb` strings from the style config. This
//! module parses them, interpolates the per-step gradient, and converts
//! them into ratatui colors for the terminal viewer.
//!
//! # Usage
//! ```rust
//! use funnelviz::theme::{Rgb, step_color};
//!
//! let start = Rgb::parse_hex("#1a73e8");
//! let end = Rgb::parse_hex("#34a853");
//! assert_eq!(step_color(start, end, 0, 3), start);
//! assert_eq!(step_color(start, end, 2, 3), end);
//! ```

use ratatui::style::{Color, Modifier, Style};
use std::fmt;

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback when a color string cannot be parsed (#1a73e8)
    pub const DEFAULT_BLUE: Rgb = Rgb { r: 26, g: 115, b: 232 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Strict `#rrggbb` (or `rrggbb`) parse
    pub fn try_parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lenient parse: malformed input yields `DEFAULT_BLUE`
    pub fn parse_hex(hex: &str) -> Self {
        Self::try_parse_hex(hex).unwrap_or(Self::DEFAULT_BLUE)
    }

    /// Linear blend from `self` toward `other`; `factor` is clamped to [0, 1]
    pub fn interpolate(self, other: Rgb, factor: f64) -> Rgb {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            (f64::from(a) + factor * (f64::from(b) - f64::from(a))).round() as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Gradient color for step `index` of `count` steps.
///
/// The first step gets `start`, the last gets `end`. A single step is
/// drawn in `start`.
pub fn step_color(start: Rgb, end: Rgb, index: usize, count: usize) -> Rgb {
    if count <= 1 {
        return start;
    }
    start.interpolate(end, index as f64 / (count - 1) as f64)
}

// =============================================================================
// TERMINAL PALETTE
// =============================================================================

/// Fixed colors for viewer chrome (borders, labels, status)
pub struct Colors;

impl Colors {
    /// Border and title accent
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected step marker
    pub const SELECTED: Color = Color::Yellow;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;

    /// Conversion rate >= 70%
    pub const RATE_GOOD: Color = Color::Green;

    /// Conversion rate >= 50%
    pub const RATE_MEDIUM: Color = Color::Yellow;

    /// Conversion rate < 50%
    pub const RATE_POOR: Color = Color::Red;
}

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text (gray)
    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Key hints in the footer
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Selected step label
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    }
}
