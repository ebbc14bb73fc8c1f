//! Tests for file-based inputs: row payloads and style configuration

use funnelviz::{compute_funnel, render_report, rows_from_file, FunnelError, StyleConfig};
use std::io::Write;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_rows_from_file_host_payload() {
    let file = write_temp(
        r#"{"tables": {"DEFAULT": [
            {"step": ["Step 2: Cart"], "users": [300]},
            {"step": ["Step 1: Browse"], "users": [1200]}
        ]}}"#,
    );
    let rows = rows_from_file(file.path()).expect("valid file");
    let steps = compute_funnel(&rows);
    assert_eq!(steps[0].name, "Step 1: Browse");
    assert_eq!(steps[1].conversion_from_start, 25.0);
}

#[test]
fn test_rows_from_missing_file() {
    let err = rows_from_file("/nonexistent/rows.json").unwrap_err();
    assert!(matches!(err, FunnelError::Io(_)));
}

#[test]
fn test_rows_from_file_wrong_shape() {
    let file = write_temp(r#"{"step": "Step 1", "users": 5}"#);
    let err = rows_from_file(file.path()).unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn test_style_file_drives_report() {
    let file = write_temp(r#"{"showValues": false, "showPercentages": false}"#);
    let style = StyleConfig::load_from_file(file.path()).expect("valid style");
    assert!(style.validate().is_ok());

    let rows = rows_from_file(
        write_temp(r#"[{"step": "Step 1: A", "users": 5000}, {"step": "Step 2: B", "users": 2500}]"#)
            .path(),
    )
    .expect("valid rows");
    let report = render_report(&compute_funnel(&rows), &style);
    assert!(report.contains("2. Step 2: B\n"));
    assert!(report.contains("Total Entries:      5,000"));
    assert!(!report.contains("of total"));
}

#[test]
fn test_invalid_style_file_fails_validation() {
    let file = write_temp(r#"{"stepSpacing": 80}"#);
    let style = StyleConfig::load_from_file(file.path()).expect("parses");
    let err = style.validate().unwrap_err();
    assert!(err.to_string().contains("stepSpacing"));
}
