//! # Tagflow Core
//!
//! Processing of captured RTLS positioning feeds.
//!
//! ## Overview
//!
//! A capture is the text a listener printed while subscribed to the tag
//! topic: connection chatter plus one JSON record array per line. This crate
//! turns such a capture into a statistics log and a flat table.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`filter`] | Boilerplate removal and capture reading |
//! | [`record`] | Record model (`TagRecord`, `TagId`) |
//! | [`classify`] | Success/failure split and summary statistics |
//! | [`failures`] | Per-tag failure shares |
//! | [`humanize`] | Epoch to wall-clock conversion |
//! | [`flatten`] | Nested record to table row reshaping |
//! | [`table`] | CSV output |
//! | [`config`] | Batch and listener configuration |
//! | [`pipeline`] | The whole batch run |
//!
//! ## Data flow
//!
//! ```text
//! capture ─▶ clear_lines ─▶ split_records ─┬─▶ write_summary
//!                                          ├─▶ analyse_failures ─▶ append_failure_stats
//!                                          └─▶ humanize ─▶ flatten ─▶ write_table
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tagflow_core::{run_batch, BatchConfig};
//!
//! let report = run_batch(&BatchConfig::new("capture.txt").with_experiment("hall-a"))?;
//! println!("{} rows written to {}", report.rows, report.table_path.display());
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod failures;
pub mod filter;
pub mod flatten;
pub mod humanize;
pub mod pipeline;
pub mod record;
pub mod table;

pub use classify::{split_records, write_summary, MeasurementSummary, SplitRecords, TagUpdateRate};
pub use config::{BatchConfig, ColumnPolicy, ListenerConfig, OffsetSetting};
pub use error::{CoreError, Result};
pub use failures::{analyse_failures, append_failure_stats, FailureBreakdown, TagFailureShare};
pub use filter::{clear_lines, read_lines, CONNECTION_ACCEPTED, POSITIONING_PREFIX, SUBSCRIBED};
pub use flatten::{flatten, Cell, Field, FlatTable};
pub use humanize::{format_clock, humanize, HumanizedRecord};
pub use pipeline::{run_batch, BatchReport};
pub use record::{TagId, TagRecord};
pub use table::write_table;
