//! Step order resolution
//!
//! Each row resolves to one integer sort key:
//!
//! | Source                        | Result            |
//! |-------------------------------|-------------------|
//! | Hint with a leading integer   | that integer      |
//! | Label matching `Step <N>`     | N                 |
//! | Anything else                 | `SENTINEL_ORDER`  |

use crate::types::{OrderHint, SENTINEL_ORDER};
use regex::Regex;
use std::sync::OnceLock;

static STEP_PATTERN: OnceLock<Regex> = OnceLock::new();

fn step_pattern() -> &'static Regex {
    STEP_PATTERN.get_or_init(|| {
        Regex::new(r"(?i-u:step)\s+([0-9]+)").expect("step pattern is a valid regex")
    })
}

/// Extract N from the first case-insensitive "Step N" in a label.
///
/// Case folding is ASCII only: "ſtep 3" is not a step label.
///
/// Returns `None` when there is no such pattern or the digits do not fit
/// in an `i64`.
pub fn extract_order(label: &str) -> Option<i64> {
    step_pattern()
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Resolve the sort key for one row.
pub fn resolve_order(hint: Option<&OrderHint>, label: &str) -> i64 {
    hint.and_then(OrderHint::as_integer)
        .or_else(|| extract_order(label))
        .unwrap_or(SENTINEL_ORDER)
}
