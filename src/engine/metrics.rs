//! Funnel Metrics Engine
//!
//! Translates an unordered set of `RawRow`s into the ordered `FunnelStep`
//! sequence consumed by presentation.
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no state between calls
//! - **Total**: malformed rows degrade to fallback values, never errors
//! - **Zero-safe**: every ratio with a zero denominator is defined as 0

use crate::binding::rows_from_value;
use crate::engine::order::resolve_order;
use crate::error::Result;
use crate::types::{coerce_count, FunnelStep, RawRow};
use tracing::debug;

/// Percentage `part / whole * 100`, or 0 when `whole` is not positive.
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Build the ordered funnel with conversion and drop-off statistics.
///
/// Output has exactly one step per input row. Rows are sorted by resolved
/// order; equal orders keep their input position.
pub fn compute_funnel(rows: &[RawRow]) -> Vec<FunnelStep> {
    let mut resolved: Vec<(i64, &RawRow)> = rows
        .iter()
        .map(|row| (resolve_order(row.step_order_hint.as_ref(), &row.step_label), row))
        .collect();

    // sort_by_key is stable
    resolved.sort_by_key(|(order, _)| *order);

    let total_users = resolved
        .first()
        .map(|(_, row)| coerce_count(row.count))
        .unwrap_or(0.0);

    let mut steps: Vec<FunnelStep> = Vec::with_capacity(resolved.len());
    for (order, row) in resolved {
        let value = coerce_count(row.count);
        let conversion_from_start = percent_of(value, total_users);

        let (conversion_from_previous, dropoff, dropoff_percent) = match steps.last() {
            None => (100.0, 0.0, 0.0),
            Some(previous) => {
                let dropoff = previous.value - value;
                (
                    percent_of(value, previous.value),
                    dropoff,
                    percent_of(dropoff, previous.value),
                )
            }
        };

        steps.push(FunnelStep {
            name: row.step_label.clone(),
            value,
            order,
            conversion_from_start,
            conversion_from_previous,
            dropoff,
            dropoff_percent,
        });
    }

    debug!(steps = steps.len(), total_users, "Computed funnel");
    steps
}

/// Decode a host payload and compute the funnel.
///
/// Fails only when the payload is not a collection of rows at all.
pub fn compute_funnel_from_value(payload: &serde_json::Value) -> Result<Vec<FunnelStep>> {
    let rows = rows_from_value(payload)?;
    Ok(compute_funnel(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SENTINEL_ORDER;
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_funnel(&[]).is_empty());
    }

    #[test]
    fn test_single_step() {
        let steps = compute_funnel(&[RawRow::new("Step 1: Visit", 250.0)]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].conversion_from_start, 100.0);
        assert_eq!(steps[0].conversion_from_previous, 100.0);
        assert_eq!(steps[0].dropoff, 0.0);
        assert_eq!(steps[0].dropoff_percent, 0.0);
    }

    #[test]
    fn test_sorts_by_label_order() {
        let rows = vec![
            RawRow::new("Step 3: Purchase", 100.0),
            RawRow::new("Step 1: Visit", 1000.0),
            RawRow::new("Step 2: Signup", 400.0),
        ];
        let steps = compute_funnel(&rows);
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Step 1: Visit", "Step 2: Signup", "Step 3: Purchase"]);
        assert!(approx(steps[2].conversion_from_previous, 25.0));
    }

    #[test]
    fn test_unlabeled_steps_sort_last() {
        let rows = vec![
            RawRow::new("Purchased", 10.0),
            RawRow::new("Step 1: Visit", 100.0),
            RawRow::new("Churned", 5.0),
        ];
        let steps = compute_funnel(&rows);
        assert_eq!(steps[0].name, "Step 1: Visit");
        assert_eq!(steps[1].name, "Purchased");
        assert_eq!(steps[2].name, "Churned");
        assert_eq!(steps[1].order, SENTINEL_ORDER);
    }

    #[test]
    fn test_zero_first_step() {
        let rows = vec![RawRow::new("Step 1", 0.0), RawRow::new("Step 2", 10.0)];
        let steps = compute_funnel(&rows);
        assert_eq!(steps[0].conversion_from_start, 0.0);
        assert_eq!(steps[1].conversion_from_start, 0.0);
        assert_eq!(steps[1].conversion_from_previous, 0.0);
        assert_eq!(steps[1].dropoff, -10.0);
        assert_eq!(steps[1].dropoff_percent, 0.0);
    }

    #[test]
    fn test_bad_counts_become_zero() {
        let rows = vec![
            RawRow::new("Step 1", 100.0),
            RawRow::new("Step 2", f64::NAN),
            RawRow::new("Step 3", -3.0),
        ];
        let steps = compute_funnel(&rows);
        assert_eq!(steps[1].value, 0.0);
        assert_eq!(steps[1].dropoff, 100.0);
        assert_eq!(steps[2].value, 0.0);
        assert_eq!(steps[2].conversion_from_previous, 0.0);
        assert!(steps.iter().all(|s| s.dropoff_percent.is_finite()));
    }

    #[test]
    fn test_duplicate_labels_pass_through() {
        let rows = vec![RawRow::new("Step 1", 10.0), RawRow::new("Step 1", 8.0)];
        let steps = compute_funnel(&rows);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, steps[1].name);
        assert_eq!(steps[1].dropoff, 2.0);
    }

    #[test]
    fn test_from_value_rejects_non_collection() {
        let err = compute_funnel_from_value(&json!("not rows")).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_from_value_flat_rows() {
        let payload = json!([
            {"step": "Step 2: Signup", "users": 50},
            {"step": "Step 1: Visit", "users": 200},
        ]);
        let steps = compute_funnel_from_value(&payload).expect("valid payload");
        assert_eq!(steps[0].name, "Step 1: Visit");
        assert!(approx(steps[1].conversion_from_start, 25.0));
    }
}
