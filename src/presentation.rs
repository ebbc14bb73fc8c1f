//! Presentation helpers consuming engine output
//!
//! Rounding and formatting happen here and only here. The engine hands over
//! unrounded percentages and signed drop-offs; this module decides how they
//! read on screen.

use serde::{Deserialize, Serialize};

use crate::config_file::StyleConfig;
use crate::types::FunnelStep;

/// Round to an integer and group thousands with commas.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One decimal place with a percent sign.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// How a step's drop-off should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTreatment {
    /// Entities were lost since the previous step
    Dropoff,
    /// No change, or growth
    Neutral,
}

impl StepTreatment {
    pub fn for_step(step: &FunnelStep) -> Self {
        if step.dropoff > 0.0 {
            Self::Dropoff
        } else {
            Self::Neutral
        }
    }
}

/// Step-to-step conversion quality band
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConversionClass {
    Good,
    Medium,
    Poor,
}

impl ConversionClass {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 70.0 {
            Self::Good
        } else if rate >= 50.0 {
            Self::Medium
        } else {
            Self::Poor
        }
    }
}

/// Header statistics for a whole funnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSummary {
    pub total_entries: f64,
    pub completions: f64,
    pub overall_conversion: f64,
    pub total_dropoff: f64,
}

impl FunnelSummary {
    /// `None` for an empty funnel
    pub fn from_steps(steps: &[FunnelStep]) -> Option<Self> {
        let first = steps.first()?;
        let last = steps.last()?;
        let overall_conversion = if steps.len() == 1 {
            100.0
        } else if first.value > 0.0 {
            last.value / first.value * 100.0
        } else {
            0.0
        };
        Some(Self {
            total_entries: first.value,
            completions: last.value,
            overall_conversion,
            total_dropoff: first.value - last.value,
        })
    }
}

/// Bar length for a step, as a percent of the available width.
pub fn bar_width_percent(step: &FunnelStep, max_value: f64, funnel_width: u32) -> f64 {
    if max_value > 0.0 {
        step.value / max_value * f64::from(funnel_width)
    } else {
        0.0
    }
}

/// Largest step value, 0 for an empty funnel
pub fn max_value(steps: &[FunnelStep]) -> f64 {
    steps.iter().map(|s| s.value).fold(0.0, f64::max)
}

/// Detail panel content for one step
pub fn detail_lines(step: &FunnelStep) -> Vec<(String, String)> {
    let mut lines = vec![
        ("Users".to_string(), format_number(step.value)),
        ("% of Total".to_string(), format_percent(step.conversion_from_start)),
    ];
    if step.conversion_from_previous < 100.0 {
        lines.push((
            "Conversion from Previous".to_string(),
            format_percent(step.conversion_from_previous),
        ));
        lines.push((
            "Drop-off".to_string(),
            format!(
                "{} ({})",
                format_number(step.dropoff),
                format_percent(step.dropoff_percent)
            ),
        ));
    }
    lines
}

/// Cross-filter request emitted when a step is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInteraction {
    pub action: String,
    pub concepts: Vec<String>,
    pub values: Vec<Vec<String>>,
}

impl FilterInteraction {
    /// Filter on the step dimension, keyed by step name
    pub fn for_step(step: &FunnelStep) -> Self {
        Self {
            action: "filter".to_string(),
            concepts: vec!["step".to_string()],
            values: vec![vec![step.name.clone()]],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Plain-text funnel report honoring the style's display toggles.
pub fn render_report(steps: &[FunnelStep], style: &StyleConfig) -> String {
    let Some(summary) = FunnelSummary::from_steps(steps) else {
        return "No data to display\n".to_string();
    };

    let mut lines = vec![
        "Funnel Analysis".to_string(),
        format!("  Total Entries:      {}", format_number(summary.total_entries)),
        format!("  Completions:        {}", format_number(summary.completions)),
        format!("  Overall Conversion: {}", format_percent(summary.overall_conversion)),
        format!("  Total Drop-off:     {}", format_number(summary.total_dropoff)),
        String::new(),
    ];

    for (i, step) in steps.iter().enumerate() {
        let mut line = format!("{}. {}", i + 1, step.name);
        if style.show_values {
            line.push_str(&format!("  {}", format_number(step.value)));
        }
        if style.show_percentages && i > 0 {
            line.push_str(&format!("  {} of total", format_percent(step.conversion_from_start)));
        }
        lines.push(line);

        if i > 0 && style.show_conversion_rate {
            lines.push(format!(
                "   ↓ Conversion: {} ({})",
                format_percent(step.conversion_from_previous),
                ConversionClass::from_rate(step.conversion_from_previous)
            ));
        }
        if i > 0 && style.show_dropoff && StepTreatment::for_step(step) == StepTreatment::Dropoff
        {
            lines.push(format!(
                "   ⚠ Drop-off: {} ({})",
                format_number(step.dropoff),
                format_percent(step.dropoff_percent)
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
