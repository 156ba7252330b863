//! Success/failure split and the overall measurement summary.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::record::{TagId, TagRecord};
use crate::{CoreError, Result};

/// Records of one capture, partitioned by their `success` flag.
///
/// Both sides keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitRecords {
    pub failures: Vec<TagRecord>,
    pub successes: Vec<TagRecord>,
}

/// Parse filtered lines and partition them into failures and successes.
///
/// Successful records must expose `tagId` and `data.metrics.rates.update`.
pub fn split_records<I, S>(lines: I) -> Result<SplitRecords>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut split = SplitRecords::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let record = TagRecord::from_line(line.as_ref(), line_no)?;

        if record.success {
            if record.tag_id.is_none() {
                return Err(CoreError::MissingField {
                    line: line_no,
                    field: "tagId",
                });
            }
            if record.update_rate().is_none() {
                return Err(CoreError::MissingField {
                    line: line_no,
                    field: "data.metrics.rates.update",
                });
            }
            split.successes.push(record);
        } else {
            debug!(line = line_no, tag = ?record.tag_id, "failed measurement");
            split.failures.push(record);
        }
    }

    info!(
        successes = split.successes.len(),
        failures = split.failures.len(),
        "classified records"
    );
    Ok(split)
}

impl SplitRecords {
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn summary(&self) -> MeasurementSummary {
        let success = self.successes.len();
        let failure = self.failures.len();
        let total = self.total();

        let mut rates: BTreeMap<TagId, (f64, usize)> = BTreeMap::new();
        for record in &self.successes {
            if let (Some(tag_id), Some(rate)) = (record.tag_id, record.update_rate()) {
                let entry = rates.entry(tag_id).or_insert((0.0, 0));
                entry.0 += rate;
                entry.1 += 1;
            }
        }

        MeasurementSummary {
            success,
            failure,
            total,
            success_rate: percentage(success, total).map(round2),
            failure_rate: percentage(failure, total).map(round2),
            update_rates: rates
                .into_iter()
                .map(|(tag_id, (sum, samples))| TagUpdateRate {
                    tag_id,
                    mean: sum / samples as f64,
                    samples,
                })
                .collect(),
        }
    }
}

/// Counts, rates, and per-tag mean update rate of one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementSummary {
    pub success: usize,
    pub failure: usize,
    pub total: usize,
    /// Percent of all records, 2 decimals. `None` when there are no records.
    pub success_rate: Option<f64>,
    pub failure_rate: Option<f64>,
    /// Ascending by tag id.
    pub update_rates: Vec<TagUpdateRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUpdateRate {
    pub tag_id: TagId,
    pub mean: f64,
    pub samples: usize,
}

impl Display for MeasurementSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of successful measurements: {}", self.success)?;
        writeln!(f, "Number of unsuccessful measurements: {}", self.failure)?;
        writeln!(f, "Total number of measurements: {}", self.total)?;
        writeln!(f, "Success rate: {}", format_rate(self.success_rate))?;
        writeln!(f, "Failure rate: {}", format_rate(self.failure_rate))?;
        writeln!(f, "Mean update rate per tag:")?;
        if self.update_rates.is_empty() {
            writeln!(f, "  none")?;
        }
        for rate in &self.update_rates {
            writeln!(f, "  tag {}: {:.2}", rate.tag_id, rate.mean)?;
        }
        Ok(())
    }
}

/// Create (or truncate) the statistics log and write the summary block.
pub fn write_summary(path: &Path, summary: &MeasurementSummary) -> Result<()> {
    let file = File::create(path).map_err(|source| CoreError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{summary}").map_err(|source| CoreError::io(path, source))?;
    writer.flush().map_err(|source| CoreError::io(path, source))
}

pub(crate) fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate:.2} %"),
        None => String::from("n/a (no measurements)"),
    }
}
