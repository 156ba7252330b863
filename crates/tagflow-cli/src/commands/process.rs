//! Batch processing of a captured feed file.

use tagflow_core::{run_batch, BatchConfig, ColumnPolicy, OffsetSetting};
use time::UtcOffset;
use tracing::{info, warn};

use crate::cli::{ColumnsArg, ProcessArgs};
use crate::error::CliError;
use crate::output;

pub fn run(args: &ProcessArgs) -> Result<(), CliError> {
    let report = run_batch(&batch_config(args))?;
    info!(
        rows = report.rows,
        log = %report.log_path.display(),
        table = %report.table_path.display(),
        "batch run finished"
    );

    output::render(&report, args.pretty)
}

fn batch_config(args: &ProcessArgs) -> BatchConfig {
    BatchConfig::new(&args.inputfile)
        .with_experiment(&args.experiment)
        .with_output_dir(&args.output_dir)
        .with_utc_offset(resolve_offset(args.utc_offset))
        .with_columns(to_column_policy(args.columns))
}

fn resolve_offset(setting: OffsetSetting) -> UtcOffset {
    setting.resolve().unwrap_or_else(|| {
        warn!("local UTC offset could not be determined, rendering times in UTC");
        UtcOffset::UTC
    })
}

fn to_column_policy(columns: ColumnsArg) -> ColumnPolicy {
    match columns {
        ColumnsArg::FirstRecord => ColumnPolicy::FirstRecord,
        ColumnsArg::Union => ColumnPolicy::Union,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn fixed_offset_resolves_to_itself() {
        assert_eq!(resolve_offset(OffsetSetting::Fixed(offset!(+1))), offset!(+1));
    }

    #[test]
    fn maps_column_arguments() {
        assert_eq!(to_column_policy(ColumnsArg::Union), ColumnPolicy::Union);
        assert_eq!(to_column_policy(ColumnsArg::FirstRecord), ColumnPolicy::FirstRecord);
    }

    #[test]
    fn processes_capture_and_renders_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("capture.txt");
        std::fs::write(
            &input,
            "Connection Accepted.\nSubscribed to topic!\n\
             Positioning update: [{\"success\":true,\"tagId\":\"7\",\"timestamp\":0,\"data\":{\"metrics\":{\"rates\":{\"update\":5}}}}]\n",
        )
        .expect("seed capture");

        let args = ProcessArgs {
            inputfile: input,
            experiment: String::from("unit"),
            output_dir: dir.path().to_path_buf(),
            utc_offset: OffsetSetting::Fixed(UtcOffset::UTC),
            columns: ColumnsArg::FirstRecord,
            pretty: false,
        };
        let config = batch_config(&args);
        assert_eq!(config.utc_offset, UtcOffset::UTC);
        let report = run_batch(&config).expect("batch run succeeds");

        let mut buffer = Vec::new();
        output::write_json(&mut buffer, &report, args.pretty).expect("in-memory write");
        let rendered: serde_json::Value = serde_json::from_slice(&buffer).expect("report is json");
        assert_eq!(rendered["experiment"], "unit");
        assert_eq!(rendered["rows"], 1);

        assert!(dir.path().join("unit_logdata.txt").exists());
        assert!(dir.path().join("unit_df.csv").exists());
    }
}
