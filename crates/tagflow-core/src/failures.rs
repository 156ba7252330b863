//! Per-tag share of failed measurements.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::classify::percentage;
use crate::record::{TagId, TagRecord};
use crate::{CoreError, Result};

/// How the failed measurements of a capture distribute over tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FailureBreakdown {
    pub total: usize,
    /// Ascending by tag id.
    pub tags: Vec<TagFailureShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagFailureShare {
    pub tag_id: TagId,
    pub count: usize,
    /// Percent of all failures, rounded to whole percent with halves to even.
    pub share: f64,
}

pub fn analyse_failures(failures: &[TagRecord]) -> Result<FailureBreakdown> {
    let mut counts: BTreeMap<TagId, usize> = BTreeMap::new();
    for record in failures {
        let tag_id = record.tag_id.ok_or(CoreError::MissingField {
            line: record.line,
            field: "tagId",
        })?;
        *counts.entry(tag_id).or_default() += 1;
    }

    let total = failures.len();
    let tags = counts
        .into_iter()
        .filter_map(|(tag_id, count)| {
            percentage(count, total).map(|share| TagFailureShare {
                tag_id,
                count,
                share: share.round_ties_even(),
            })
        })
        .collect();

    Ok(FailureBreakdown { total, tags })
}

impl FailureBreakdown {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Display for FailureBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Failure statistics:")?;
        if self.is_empty() {
            return writeln!(f, "  no failures");
        }
        for tag in &self.tags {
            writeln!(
                f,
                "  Part rate of tag {}: {:.0} % ({} of {})",
                tag.tag_id, tag.share, tag.count, self.total
            )?;
        }
        Ok(())
    }
}

/// Append the breakdown to an existing statistics log.
pub fn append_failure_stats(path: &Path, breakdown: &FailureBreakdown) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CoreError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{breakdown}").map_err(|source| CoreError::io(path, source))?;
    writer.flush().map_err(|source| CoreError::io(path, source))
}
