//! Run configuration for the batch processor and the live listener.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::UtcOffset;

use crate::{CoreError, Result};

pub const DEFAULT_EXPERIMENT: &str = "test";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "tags";
pub const DEFAULT_DURATION_SECS: u64 = 300;

/// How the table header is derived from the successful records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnPolicy {
    /// Header from the first record only; later rows are not padded.
    #[default]
    FirstRecord,
    /// Header from every field seen in any record; gaps become empty cells.
    Union,
}

/// Settings for one batch run over a captured file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub experiment: String,
    pub output_dir: PathBuf,
    /// Offset used to render wall-clock times.
    pub utc_offset: UtcOffset,
    pub columns: ColumnPolicy,
}

impl BatchConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            experiment: String::from(DEFAULT_EXPERIMENT),
            output_dir: PathBuf::from("."),
            utc_offset: UtcOffset::UTC,
            columns: ColumnPolicy::default(),
        }
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = experiment.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    pub fn with_columns(mut self, columns: ColumnPolicy) -> Self {
        self.columns = columns;
        self
    }

    /// `<output_dir>/<experiment>_logdata.txt`
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_logdata.txt", self.experiment))
    }

    /// `<output_dir>/<experiment>_df.csv`
    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_df.csv", self.experiment))
    }
}

/// Which offset to render times in, before it is resolved against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSetting {
    Local,
    Fixed(UtcOffset),
}

impl FromStr for OffsetSetting {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::Fixed(UtcOffset::UTC));
        }

        UtcOffset::parse(
            trimmed,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map(Self::Fixed)
        .map_err(|_| {
            CoreError::Config(format!(
                "invalid UTC offset '{input}', expected 'local', 'UTC' or ±HH:MM"
            ))
        })
    }
}

impl OffsetSetting {
    /// Resolve to a concrete offset. `None` when the host offset is unknown.
    pub fn resolve(self) -> Option<UtcOffset> {
        match self {
            Self::Fixed(offset) => Some(offset),
            Self::Local => UtcOffset::current_local_offset().ok(),
        }
    }
}

/// Connection settings for the live listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    /// How long to collect messages before disconnecting.
    #[serde(rename = "duration_secs", with = "duration_secs")]
    pub duration: Duration,
    pub client_id: String,
    #[serde(rename = "keep_alive_secs", with = "duration_secs")]
    pub keep_alive: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            topic: String::from(DEFAULT_TOPIC),
            duration: Duration::from_secs(DEFAULT_DURATION_SECS),
            client_id: String::from("tagflow-listener"),
            keep_alive: Duration::from_secs(30),
        }
    }
}

impl ListenerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|error| CoreError::Config(error.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::io(path, source))?;
        Self::from_toml_str(&content)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
