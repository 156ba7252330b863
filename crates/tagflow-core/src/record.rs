use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{CoreError, Result};

/// Identifier of a tracking tag.
///
/// The feed sends ids either as JSON integers or as numeric strings; both
/// normalize to the same integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "i64")]
pub struct TagId(i64);

impl TagId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidTagId {
                value: input.to_owned(),
            })
    }
}

impl Display for TagId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Value> for TagId {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match &value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Ok(Self(int));
                }
                match number.as_f64() {
                    Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                        Ok(Self(float as i64))
                    }
                    _ => Err(CoreError::InvalidTagId {
                        value: number.to_string(),
                    }),
                }
            }
            Value::String(text) => Self::parse(text),
            other => Err(CoreError::InvalidTagId {
                value: other.to_string(),
            }),
        }
    }
}

impl From<TagId> for i64 {
    fn from(value: TagId) -> Self {
        value.0
    }
}

/// One positioning or status report from a tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagRecord {
    pub success: bool,
    #[serde(rename = "tagId", default)]
    pub tag_id: Option<TagId>,
    /// Epoch seconds, kept as the JSON number so it round-trips textually.
    #[serde(default)]
    pub timestamp: Option<Number>,
    #[serde(default)]
    pub data: Option<TagData>,
    /// 1-based position among the filtered capture lines.
    #[serde(skip)]
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagData {
    #[serde(default)]
    pub coordinates: Option<Vector3>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub acceleration: Option<Vector3>,
    #[serde(rename = "tagData", default)]
    pub sensors: Option<SensorData>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vector3 {
    pub x: Value,
    pub y: Value,
    pub z: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Orientation {
    pub yaw: Value,
    pub roll: Value,
    pub pitch: Value,
}

/// Raw IMU readings. Each member is reported independently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorData {
    #[serde(default)]
    pub gyro: Option<Value>,
    #[serde(default)]
    pub magnetic: Option<Value>,
    #[serde(default)]
    pub quaternion: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub rates: Option<Rates>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rates {
    #[serde(default)]
    pub update: Option<f64>,
}

impl TagRecord {
    /// Parse a filtered capture line: a JSON array whose first element is the record.
    pub fn from_line(line: &str, line_no: usize) -> Result<Self> {
        let value: Value =
            serde_json::from_str(line).map_err(|source| CoreError::Json { line: line_no, source })?;

        let first = match value {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            _ => return Err(CoreError::NotARecordArray { line: line_no }),
        };

        let mut record: Self = serde_json::from_value(first)
            .map_err(|source| CoreError::Json { line: line_no, source })?;
        record.line = line_no;
        Ok(record)
    }

    /// `data.metrics.rates.update`, when every level is present.
    pub fn update_rate(&self) -> Option<f64> {
        self.data.as_ref()?.metrics.as_ref()?.rates.as_ref()?.update
    }
}
