//! Core data types for funnelviz
//!
//! `RawRow` is what the host data-binding layer hands us, `FunnelStep` is
//! what the engine hands to presentation. Style enums live here as well so
//! that config files get compile-time checked values instead of strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order value used when a row has no usable hint and no "Step N" label.
pub const SENTINEL_ORDER: i64 = 99;

/// Explicit step order supplied by the host.
///
/// Hosts send this either as text (dimension values) or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderHint {
    Number(f64),
    Text(String),
}

impl OrderHint {
    /// Integer value of the hint, if it has one.
    ///
    /// Text hints are read the lenient way dashboards write them: leading
    /// whitespace is skipped and the leading signed digits are taken, so
    /// `"3"`, `"3.0"` and `"3rd"` are all 3. Numbers are truncated.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_integer(s),
        }
    }
}

impl From<i64> for OrderHint {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for OrderHint {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for OrderHint {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first().copied() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerce a raw count into a usable metric value.
///
/// Negative, NaN and infinite values become 0.
pub fn coerce_count(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One input row, one per funnel step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    pub step_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_order_hint: Option<OrderHint>,
    #[serde(default)]
    pub count: f64,
}

impl RawRow {
    /// Row without an explicit order hint
    pub fn new(step_label: impl Into<String>, count: f64) -> Self {
        Self {
            step_label: step_label.into(),
            step_order_hint: None,
            count,
        }
    }

    /// Attach an explicit order hint
    pub fn with_order(mut self, hint: impl Into<OrderHint>) -> Self {
        self.step_order_hint = Some(hint.into());
        self
    }
}

/// One enriched funnel step, in final display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub name: String,
    pub value: f64,
    /// Resolved sort key. Only meaningful for ordering.
    pub order: i64,
    pub conversion_from_start: f64,
    pub conversion_from_previous: f64,
    /// Signed: negative when the step grew over the previous one.
    pub dropoff: f64,
    pub dropoff_percent: f64,
}

/// Funnel layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Font family option. Carried through style files; the terminal viewer
/// uses the terminal's own font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Roboto,
    Arial,
    GoogleSans,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_hint_parsing() {
        assert_eq!(OrderHint::from("3").as_integer(), Some(3));
        assert_eq!(OrderHint::from("  12 ").as_integer(), Some(12));
        assert_eq!(OrderHint::from("3.0").as_integer(), Some(3));
        assert_eq!(OrderHint::from("3rd").as_integer(), Some(3));
        assert_eq!(OrderHint::from("-2").as_integer(), Some(-2));
        assert_eq!(OrderHint::from("first").as_integer(), None);
        assert_eq!(OrderHint::from("").as_integer(), None);
        assert_eq!(OrderHint::from("-").as_integer(), None);
    }

    #[test]
    fn test_number_hint_truncates() {
        assert_eq!(OrderHint::Number(2.7).as_integer(), Some(2));
        assert_eq!(OrderHint::Number(-1.5).as_integer(), Some(-1));
        assert_eq!(OrderHint::Number(f64::NAN).as_integer(), None);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(42.0), 42.0);
        assert_eq!(coerce_count(-5.0), 0.0);
        assert_eq!(coerce_count(f64::NAN), 0.0);
        assert_eq!(coerce_count(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_funnel_step_serializes_camel_case() {
        let step = FunnelStep {
            name: "Visit".to_string(),
            value: 10.0,
            order: 1,
            conversion_from_start: 100.0,
            conversion_from_previous: 100.0,
            dropoff: 0.0,
            dropoff_percent: 0.0,
        };
        let json = serde_json::to_value(&step).expect("serialize");
        assert!(json.get("conversionFromStart").is_some());
        assert!(json.get("dropoffPercent").is_some());
    }

    #[test]
    fn test_style_enums_parse() {
        assert_eq!("horizontal".parse::<Orientation>().ok(), Some(Orientation::Horizontal));
        assert_eq!("google-sans".parse::<FontFamily>().ok(), Some(FontFamily::GoogleSans));
        assert_eq!(FontFamily::Arial.to_string(), "arial");
    }
}
