//! Behavior of the batch run on captures it cannot process.
//!
//! Malformed input aborts the run with an error that points at the line;
//! nothing is retried or skipped.

use tagflow_tests::{
    annotated_capture, batch_config, run_batch, BatchConfig, CoreError, FAILURE_7, SUCCESS_7,
};
use tempfile::tempdir;

#[test]
fn broken_json_aborts_with_line_number() {
    // Given: A capture whose second payload was cut off
    let dir = tempdir().expect("tempdir");
    let content = annotated_capture(&[SUCCESS_7, r#"[{"success":tr"#]);
    let config = batch_config(dir.path(), &content, "broken");

    // When: The capture is processed
    let err = run_batch(&config).expect_err("must fail");

    // Then: The error names the filtered line
    assert!(matches!(err, CoreError::Json { line: 2, .. }), "got {err:?}");

    // And: No table is produced
    assert!(!config.table_path().exists());
}

#[test]
fn success_without_update_rate_aborts() {
    let dir = tempdir().expect("tempdir");
    let content = annotated_capture(&[r#"[{"success":true,"tagId":"7","timestamp":0}]"#]);
    let config = batch_config(dir.path(), &content, "norate");

    let err = run_batch(&config).expect_err("must fail");
    assert!(matches!(
        err,
        CoreError::MissingField {
            line: 1,
            field: "data.metrics.rates.update"
        }
    ));
}

#[test]
fn stray_status_text_is_not_silently_dropped() {
    // Given: A status line the filter does not know about
    let dir = tempdir().expect("tempdir");
    let content = format!("Connection Accepted.\nReconnecting...\nPositioning update: {SUCCESS_7}\n");
    let config = batch_config(dir.path(), &content, "stray");

    // When/Then: It reaches the parser and fails there
    let err = run_batch(&config).expect_err("must fail");
    assert!(matches!(err, CoreError::Json { line: 1, .. }));
}

#[test]
fn non_numeric_tag_id_aborts() {
    let dir = tempdir().expect("tempdir");
    let content = annotated_capture(&[r#"[{"success":false,"tagId":"north-door"}]"#]);
    let config = batch_config(dir.path(), &content, "badtag");

    let err = run_batch(&config).expect_err("must fail");
    assert!(err.to_string().contains("tag id must be an integer"), "got {err}");
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let config = BatchConfig::new(dir.path().join("absent.txt")).with_output_dir(dir.path());

    let err = run_batch(&config).expect_err("must fail");
    assert!(matches!(err, CoreError::Io { .. }));
}

#[test]
fn empty_capture_writes_empty_table_and_guarded_log() {
    // Given: A listener session that never received a payload
    let dir = tempdir().expect("tempdir");
    let config = batch_config(dir.path(), &annotated_capture(&[]), "idle");

    // When: The capture is processed
    let report = run_batch(&config).expect("empty capture is not an error");

    // Then: The log reports no measurements rather than dividing by zero
    let log = std::fs::read_to_string(config.log_path()).expect("log exists");
    assert!(log.contains("Total number of measurements: 0"));
    assert!(log.contains("n/a"));
    assert!(log.contains("no failures"));
    assert_eq!(report.rows, 0);
    assert_eq!(std::fs::read_to_string(config.table_path()).expect("table exists"), "");
}

#[test]
fn untagged_failure_points_at_its_own_line_and_leaves_no_log() {
    // Given: Two good successes followed by a failure without a tag id
    let dir = tempdir().expect("tempdir");
    let content = annotated_capture(&[SUCCESS_7, SUCCESS_7, r#"[{"success":false}]"#]);
    let config = batch_config(dir.path(), &content, "untagged");

    // When: The capture is processed
    let err = run_batch(&config).expect_err("must fail");

    // Then: The error names the third filtered line
    assert!(
        matches!(err, CoreError::MissingField { line: 3, field: "tagId" }),
        "got {err:?}"
    );

    // And: No partial statistics log is left behind
    assert!(!config.log_path().exists());
}

#[test]
fn success_without_timestamp_points_at_its_own_line() {
    let unstamped = r#"[{"success":true,"tagId":"7","data":{"metrics":{"rates":{"update":5}}}}]"#;
    let dir = tempdir().expect("tempdir");
    let content = annotated_capture(&[FAILURE_7, SUCCESS_7, unstamped]);
    let config = batch_config(dir.path(), &content, "unstamped");

    let err = run_batch(&config).expect_err("must fail");
    assert!(
        matches!(err, CoreError::MissingField { line: 3, field: "timestamp" }),
        "got {err:?}"
    );
}
