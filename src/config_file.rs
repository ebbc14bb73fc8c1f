//! Style configuration handling for saving and loading funnel styles.
//!
//! Mirrors the dashboard style panel: colors, layout, display toggles and
//! typography. Missing fields take defaults so a partial file is valid.
//! Enumerated options use type-safe enums instead of strings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::theme::Rgb;
use crate::types::{FontFamily, Orientation};

/// Allowed funnel width range (percent of available width)
pub const FUNNEL_WIDTH_RANGE: (u32, u32) = (50, 100);
/// Allowed spacing between steps
pub const STEP_SPACING_RANGE: (u32, u32) = (0, 50);
/// Allowed font size range
pub const FONT_SIZE_RANGE: (u32, u32) = (10, 24);

/// Per-render style options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    // Colors
    pub start_color: String,
    pub end_color: String,
    pub dropoff_color: String,
    pub text_color: String,

    // Layout
    pub orientation: Orientation,
    pub funnel_width: u32,
    pub step_spacing: u32,

    // Display options
    pub show_conversion_rate: bool,
    pub show_dropoff: bool,
    pub show_percentages: bool,
    pub show_values: bool,
    pub animate_on_load: bool, // Accepted for compatibility, the viewer does not animate

    // Typography
    pub font_size: u32,
    pub font_family: FontFamily,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            start_color: "#1a73e8".to_string(),
            end_color: "#34a853".to_string(),
            dropoff_color: "#ea4335".to_string(),
            text_color: "#202124".to_string(),
            orientation: Orientation::Vertical,
            funnel_width: 80,
            step_spacing: 10,
            show_conversion_rate: true,
            show_dropoff: true,
            show_percentages: true,
            show_values: true,
            animate_on_load: true,
            font_size: 14,
            font_family: FontFamily::Roboto,
        }
    }
}

impl StyleConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize style to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write style to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read style from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse style JSON")?;

        Ok(config)
    }

    /// Build a style from the host's style payload.
    ///
    /// Hosts send `{"startColor": {"value": {"color": "#.."}}, "funnelWidth": {"value": 80}}`.
    /// Anything missing or of the wrong type keeps its default. Numeric
    /// options are clamped to the ranges `validate` enforces.
    pub fn from_host_style(style: &Value) -> Self {
        let mut config = Self::default();
        let value = |id: &str| style.get(id).and_then(|v| v.get("value"));
        let color = |id: &str| {
            value(id)
                .and_then(|v| v.get("color"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let number = |id: &str, (min, max): (u32, u32)| {
            value(id)
                .and_then(Value::as_f64)
                .filter(|n| n.is_finite() && *n > 0.0)
                .map(|n| n.round().clamp(f64::from(min), f64::from(max)) as u32)
        };
        let flag = |id: &str| value(id).and_then(Value::as_bool);
        let choice = |id: &str| value(id).and_then(Value::as_str);

        if let Some(c) = color("startColor") {
            config.start_color = c;
        }
        if let Some(c) = color("endColor") {
            config.end_color = c;
        }
        if let Some(c) = color("dropoffColor") {
            config.dropoff_color = c;
        }
        if let Some(c) = color("textColor") {
            config.text_color = c;
        }
        if let Some(o) = choice("orientation").and_then(|s| s.parse().ok()) {
            config.orientation = o;
        }
        if let Some(n) = number("funnelWidth", FUNNEL_WIDTH_RANGE) {
            config.funnel_width = n;
        }
        if let Some(n) = number("stepSpacing", STEP_SPACING_RANGE) {
            config.step_spacing = n;
        }
        if let Some(b) = flag("showConversionRate") {
            config.show_conversion_rate = b;
        }
        if let Some(b) = flag("showDropoff") {
            config.show_dropoff = b;
        }
        if let Some(b) = flag("showPercentages") {
            config.show_percentages = b;
        }
        if let Some(b) = flag("showValues") {
            config.show_values = b;
        }
        if let Some(b) = flag("animateOnLoad") {
            config.animate_on_load = b;
        }
        if let Some(n) = number("fontSize", FONT_SIZE_RANGE) {
            config.font_size = n;
        }
        if let Some(f) = choice("fontFamily").and_then(|s| s.parse().ok()) {
            config.font_family = f;
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, color) in [
            ("startColor", &self.start_color),
            ("endColor", &self.end_color),
            ("dropoffColor", &self.dropoff_color),
            ("textColor", &self.text_color),
        ] {
            if Rgb::try_parse_hex(color).is_none() {
                anyhow::bail!("{} must be a #rrggbb color, got {:?}", name, color);
            }
        }

        check_range("funnelWidth", self.funnel_width, FUNNEL_WIDTH_RANGE)?;
        check_range("stepSpacing", self.step_spacing, STEP_SPACING_RANGE)?;
        check_range("fontSize", self.font_size, FONT_SIZE_RANGE)?;

        Ok(())
    }

    pub fn start_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.start_color)
    }

    pub fn end_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.end_color)
    }

    pub fn dropoff_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.dropoff_color)
    }
}

fn check_range(name: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        anyhow::bail!("{} must be between {} and {}, got {}", name, min, max, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_valid() {
        assert!(StyleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StyleConfig =
            serde_json::from_str(r#"{"funnelWidth": 60, "orientation": "horizontal"}"#)
                .expect("partial style should parse");
        assert_eq!(config.funnel_width, 60);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.font_size, 14);
        assert!(config.show_dropoff);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = StyleConfig {
            funnel_width: 120,
            ..StyleConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("funnelWidth"));

        let config = StyleConfig {
            font_size: 9,
            ..StyleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let config = StyleConfig {
            dropoff_color: "crimson".to_string(),
            ..StyleConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dropoffColor"));
    }

    #[test]
    fn test_from_host_style() {
        let config = StyleConfig::from_host_style(&json!({
            "startColor": {"value": {"color": "#000000"}},
            "orientation": {"value": "horizontal"},
            "funnelWidth": {"value": 70},
            "stepSpacing": {"value": 0},
            "showDropoff": {"value": false},
            "fontFamily": {"value": "arial"},
            "fontSize": {"value": "big"}
        }));
        assert_eq!(config.start_color, "#000000");
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.funnel_width, 70);
        // Zero is treated as unset
        assert_eq!(config.step_spacing, 10);
        assert!(!config.show_dropoff);
        assert_eq!(config.font_family, FontFamily::Arial);
        assert_eq!(config.font_size, 14);
        assert_eq!(config.end_color, "#34a853");
    }

    #[test]
    fn test_from_host_style_clamps_numbers() {
        let config = StyleConfig::from_host_style(&json!({
            "funnelWidth": {"value": 1e12},
            "stepSpacing": {"value": 5000},
            "fontSize": {"value": 2}
        }));
        assert_eq!(config.funnel_width, 100);
        assert_eq!(config.step_spacing, 50);
        assert_eq!(config.font_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("style.json");
        let config = StyleConfig {
            show_values: false,
            ..StyleConfig::default()
        };
        config.save_to_file(&path).expect("save");
        let loaded = StyleConfig::load_from_file(&path).expect("load");
        assert_eq!(loaded, config);
    }
}
