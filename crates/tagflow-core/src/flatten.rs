//! Reshaping of nested records into fixed-order table rows.
//!
//! Fields are always visited in the same order:
//!
//! | Group | Columns |
//! |-------|---------|
//! | tag | `tagId` |
//! | time | `timestamp`, `dateTime` |
//! | coordinates | `loc(x)`, `loc(y)`, `loc(z)` |
//! | orientation | `yaw`, `roll`, `pitch` |
//! | acceleration | `acc(x)`, `acc(y)`, `acc(z)` |
//! | tag data | `gyro`, `magnetic`, `quaternion` |
//!
//! Absent groups contribute nothing to a row. Which columns end up in the
//! header depends on [`ColumnPolicy`].

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde_json::{Number, Value};
use tracing::warn;

use crate::config::ColumnPolicy;
use crate::humanize::HumanizedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    TagId,
    Timestamp,
    DateTime,
    LocX,
    LocY,
    LocZ,
    Yaw,
    Roll,
    Pitch,
    AccX,
    AccY,
    AccZ,
    Gyro,
    Magnetic,
    Quaternion,
}

impl Field {
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::TagId => "tagId",
            Self::Timestamp => "timestamp",
            Self::DateTime => "dateTime",
            Self::LocX => "loc(x)",
            Self::LocY => "loc(y)",
            Self::LocZ => "loc(z)",
            Self::Yaw => "yaw",
            Self::Roll => "roll",
            Self::Pitch => "pitch",
            Self::AccX => "acc(x)",
            Self::AccY => "acc(y)",
            Self::AccZ => "acc(z)",
            Self::Gyro => "gyro",
            Self::Magnetic => "magnetic",
            Self::Quaternion => "quaternion",
        }
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Number(Number),
    Text(String),
    /// Non-scalar values such as IMU vectors, rendered as compact JSON.
    Json(Value),
    Empty,
}

impl Cell {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Number(number) => Self::Number(number.clone()),
            Value::String(text) => Self::Text(text.clone()),
            Value::Bool(flag) => Self::Text(flag.to_string()),
            other => Self::Json(other.clone()),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Json(value) => write!(f, "{value}"),
            Self::Empty => Ok(()),
        }
    }
}

/// Header plus rows, ready for the table writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Present fields of one record, in table order.
pub fn record_fields(humanized: &HumanizedRecord) -> Vec<(Field, Cell)> {
    let record = &humanized.record;
    let mut fields = Vec::new();

    if let Some(tag_id) = record.tag_id {
        fields.push((Field::TagId, Cell::Int(tag_id.get())));
    }
    if let Some(timestamp) = &record.timestamp {
        fields.push((Field::Timestamp, Cell::Number(timestamp.clone())));
        fields.push((Field::DateTime, Cell::Text(humanized.date_time.clone())));
    }

    let Some(data) = &record.data else {
        return fields;
    };

    if let Some(loc) = &data.coordinates {
        fields.push((Field::LocX, Cell::from_value(&loc.x)));
        fields.push((Field::LocY, Cell::from_value(&loc.y)));
        fields.push((Field::LocZ, Cell::from_value(&loc.z)));
    }
    if let Some(orientation) = &data.orientation {
        fields.push((Field::Yaw, Cell::from_value(&orientation.yaw)));
        fields.push((Field::Roll, Cell::from_value(&orientation.roll)));
        fields.push((Field::Pitch, Cell::from_value(&orientation.pitch)));
    }
    if let Some(acc) = &data.acceleration {
        fields.push((Field::AccX, Cell::from_value(&acc.x)));
        fields.push((Field::AccY, Cell::from_value(&acc.y)));
        fields.push((Field::AccZ, Cell::from_value(&acc.z)));
    }
    if let Some(sensors) = &data.sensors {
        let members = [
            (Field::Gyro, &sensors.gyro),
            (Field::Magnetic, &sensors.magnetic),
            (Field::Quaternion, &sensors.quaternion),
        ];
        for (field, value) in members {
            if let Some(value) = value {
                fields.push((field, Cell::from_value(value)));
            }
        }
    }

    fields
}

pub fn flatten(records: &[HumanizedRecord], policy: ColumnPolicy) -> FlatTable {
    let per_record: Vec<Vec<(Field, Cell)>> = records.iter().map(record_fields).collect();

    match policy {
        ColumnPolicy::FirstRecord => flatten_first_record(per_record),
        ColumnPolicy::Union => flatten_union(per_record),
    }
}

/// Header comes from record 0; every row carries only its own present fields.
fn flatten_first_record(per_record: Vec<Vec<(Field, Cell)>>) -> FlatTable {
    let Some(first) = per_record.first() else {
        return FlatTable::default();
    };
    let header: Vec<Field> = first.iter().map(|(field, _)| *field).collect();

    let mut misaligned = 0usize;
    let rows = per_record
        .into_iter()
        .map(|fields| {
            if !fields.iter().map(|(field, _)| field).eq(header.iter()) {
                misaligned += 1;
            }
            fields.into_iter().map(|(_, cell)| cell).collect()
        })
        .collect();

    if misaligned > 0 {
        warn!(
            rows = misaligned,
            "rows have a different field set than the first record and do not line up with the header"
        );
    }

    FlatTable {
        columns: header.into_iter().map(Field::column_name).collect(),
        rows,
    }
}

/// Header is every field seen in any record; missing cells are left empty.
fn flatten_union(per_record: Vec<Vec<(Field, Cell)>>) -> FlatTable {
    let header: BTreeSet<Field> = per_record
        .iter()
        .flat_map(|fields| fields.iter().map(|(field, _)| *field))
        .collect();

    let rows = per_record
        .into_iter()
        .map(|mut fields| {
            header
                .iter()
                .map(|column| {
                    fields
                        .iter()
                        .position(|(field, _)| field == column)
                        .map(|index| fields.swap_remove(index).1)
                        .unwrap_or(Cell::Empty)
                })
                .collect()
        })
        .collect();

    FlatTable {
        columns: header.into_iter().map(Field::column_name).collect(),
        rows,
    }
}
