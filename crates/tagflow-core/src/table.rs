use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::flatten::FlatTable;
use crate::{CoreError, Result};

/// Write the table as comma-separated values, replacing any existing file.
///
/// Rows are written as they are even when their length differs from the
/// header, which can happen under the first-record column policy.
pub fn write_table(path: &Path, table: &FlatTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .from_path(path)?;

    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush().map_err(|source| CoreError::io(path, source))?;

    info!(path = %path.display(), rows = table.rows.len(), "wrote table");
    Ok(())
}
