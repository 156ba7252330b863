//! Wall-clock rendering of epoch timestamps.

use serde_json::Number;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::record::TagRecord;
use crate::{CoreError, Result};

const CLOCK_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second],[subsecond digits:6]");

/// A successful record together with its human-readable time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanizedRecord {
    pub record: TagRecord,
    pub date_time: String,
}

/// Attach `HH:MM:SS,ffffff` wall-clock strings to each record.
///
/// Input records are left untouched; the result owns copies.
pub fn humanize(records: &[TagRecord], offset: UtcOffset) -> Result<Vec<HumanizedRecord>> {
    records
        .iter()
        .map(|record| -> Result<HumanizedRecord> {
            let timestamp = record.timestamp.as_ref().ok_or(CoreError::MissingField {
                line: record.line,
                field: "timestamp",
            })?;
            Ok(HumanizedRecord {
                record: record.clone(),
                date_time: format_clock(timestamp, offset)?,
            })
        })
        .collect()
}

/// Format epoch seconds as a time of day in `offset`, rounded to the microsecond.
pub fn format_clock(epoch_seconds: &Number, offset: UtcOffset) -> Result<String> {
    let out_of_range = || CoreError::Timestamp {
        value: epoch_seconds.to_string(),
    };

    let micros: i128 = if let Some(seconds) = epoch_seconds.as_i64() {
        i128::from(seconds) * 1_000_000
    } else {
        let seconds = epoch_seconds.as_f64().ok_or_else(out_of_range)?;
        let micros = (seconds * 1_000_000.0).round();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(out_of_range());
        }
        micros as i128
    };

    let datetime = OffsetDateTime::from_unix_timestamp_nanos(micros * 1_000)
        .map_err(|_| out_of_range())?
        .to_offset(offset);

    datetime.format(CLOCK_FORMAT).map_err(|_| out_of_range())
}
