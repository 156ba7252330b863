// Shared fixtures for the batch processing tests
use std::path::{Path, PathBuf};

pub use tagflow_core::{run_batch, BatchConfig, BatchReport, ColumnPolicy, CoreError};
pub use time::UtcOffset;

/// Success record of tag 7 at epoch 0, located at (1, 2, 3) with update rate 5.
pub const SUCCESS_7: &str = r#"[{"success":true,"tagId":"7","timestamp":0,"data":{"coordinates":{"x":1,"y":2,"z":3},"metrics":{"rates":{"update":5}}}}]"#;
/// Failure record of tag 7.
pub const FAILURE_7: &str = r#"[{"success":false,"tagId":"7"}]"#;

/// Wrap payloads the way an annotating listener captures them.
pub fn annotated_capture(payloads: &[&str]) -> String {
    let mut capture = String::from("Connection Accepted.\nSubscribed to topic!\n");
    for payload in payloads {
        capture.push_str("Positioning update: ");
        capture.push_str(payload);
        capture.push('\n');
    }
    capture
}

/// Write `content` as `capture.txt` in `dir` and return a UTC batch config for it.
pub fn batch_config(dir: &Path, content: &str, experiment: &str) -> BatchConfig {
    let input: PathBuf = dir.join("capture.txt");
    std::fs::write(&input, content).expect("capture should be writable");
    BatchConfig::new(input)
        .with_experiment(experiment)
        .with_output_dir(dir)
        .with_utc_offset(UtcOffset::UTC)
}

/// Header and records of a written table.
pub fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .expect("table should be readable");
    let header = reader
        .headers()
        .expect("table should have a header")
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("row should parse")
                .iter()
                .map(str::to_owned)
                .collect()
        })
        .collect();
    (header, rows)
}
