//! End-to-end batch run: capture file in, statistics log and table out.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::classify::{split_records, write_summary, MeasurementSummary};
use crate::config::BatchConfig;
use crate::failures::{analyse_failures, append_failure_stats, FailureBreakdown};
use crate::filter::{clear_lines, read_lines};
use crate::flatten::flatten;
use crate::humanize::humanize;
use crate::table::write_table;
use crate::Result;

/// What a batch run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub experiment: String,
    pub input: PathBuf,
    pub log_path: PathBuf,
    pub table_path: PathBuf,
    pub summary: MeasurementSummary,
    pub failures: FailureBreakdown,
    pub columns: Vec<&'static str>,
    pub rows: usize,
}

pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    info!(input = %config.input.display(), experiment = %config.experiment, "starting batch run");

    let lines = clear_lines(read_lines(&config.input)?);
    let split = split_records(&lines)?;

    let failures = analyse_failures(&split.failures)?;

    let log_path = config.log_path();
    let summary = split.summary();
    write_summary(&log_path, &summary)?;
    append_failure_stats(&log_path, &failures)?;

    let humanized = humanize(&split.successes, config.utc_offset)?;
    let table = flatten(&humanized, config.columns);

    let table_path = config.table_path();
    write_table(&table_path, &table)?;

    Ok(BatchReport {
        experiment: config.experiment.clone(),
        input: config.input.clone(),
        log_path,
        table_path,
        summary,
        failures,
        rows: table.rows.len(),
        columns: table.columns,
    })
}
