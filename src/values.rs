use chrono::{
    naive::{NaiveDate, NaiveDateTime, NaiveTime},
    DateTime, Duration, Local, TimeZone,
};

use crate::errors::{SnowflakeError, SnowflakeResult};

/// Wire format tag for a result column, from the metadata `type` field.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Fixed,
    Real,
    Text,
    Binary,
    Boolean,
    Date,
    Time,
    TimestampLtz,
    TimestampNtz,
    TimestampTz,
}

impl ColumnKind {
    /// Decode one raw cell into a typed [`Value`].
    ///
    /// Snowflake serializes every value as a string; the column kind decides
    /// how the string is read back. NUMBER columns are decoded as `Int` when
    /// they fit, `Float` otherwise, so a single column can mix the two.
    pub(crate) fn decode(&self, raw: &Option<String>) -> SnowflakeResult<Value> {
        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(Value::Null),
        };
        let malformed = |expected: &str| {
            SnowflakeError::Malformed(format!("{expected} column held {raw:?}"))
        };
        Ok(match self {
            ColumnKind::Fixed => match raw.trim_end_matches(".0").parse() {
                Ok(value) => Value::Int(value),
                Err(_) => Value::Float(raw.parse().map_err(|_| malformed("NUMBER"))?),
            },
            ColumnKind::Real => Value::Float(raw.parse().map_err(|_| malformed("REAL"))?),
            ColumnKind::Text => Value::Text(raw.to_owned()),
            ColumnKind::Binary => {
                Value::Binary(hex::decode(raw).map_err(|_| malformed("BINARY"))?)
            }
            ColumnKind::Boolean => Value::Boolean(raw.parse().map_err(|_| malformed("BOOLEAN"))?),
            ColumnKind::Date => {
                // Dates travel as days since the Unix epoch.
                let days: i64 = raw.parse().map_err(|_| malformed("DATE"))?;
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                Value::Date(
                    epoch
                        .checked_add_signed(Duration::days(days))
                        .ok_or_else(|| malformed("DATE"))?,
                )
            }
            ColumnKind::Time => {
                let seconds: f64 = raw.parse().map_err(|_| malformed("TIME"))?;
                Value::Time(
                    NaiveTime::from_num_seconds_from_midnight_opt(
                        seconds as u32,
                        (seconds.fract() * 1e9) as u32,
                    )
                    .ok_or_else(|| malformed("TIME"))?,
                )
            }
            ColumnKind::TimestampLtz => {
                let (seconds, nanos) = split_epoch(raw).ok_or_else(|| malformed("TIMESTAMP_LTZ"))?;
                Value::TimestampLtz(
                    Local
                        .timestamp_opt(seconds, nanos)
                        .single()
                        .ok_or_else(|| malformed("TIMESTAMP_LTZ"))?,
                )
            }
            ColumnKind::TimestampNtz => {
                let (seconds, nanos) = split_epoch(raw).ok_or_else(|| malformed("TIMESTAMP_NTZ"))?;
                Value::TimestampNtz(
                    NaiveDateTime::from_timestamp_opt(seconds, nanos)
                        .ok_or_else(|| malformed("TIMESTAMP_NTZ"))?,
                )
            }
            ColumnKind::TimestampTz => {
                // Each value carries its own offset; nothing sensible to map it to yet.
                return Err(SnowflakeError::Unsupported("TIMESTAMP_TZ columns"));
            }
        })
    }
}

/// Split an "epoch.fraction" string into whole seconds and nanoseconds.
fn split_epoch(raw: &str) -> Option<(i64, u32)> {
    let seconds: f64 = raw.parse().ok()?;
    let total_nanos = (seconds * 1e9).round() as i64;
    Some((
        total_nanos.div_euclid(1_000_000_000),
        total_nanos.rem_euclid(1_000_000_000) as u32,
    ))
}

/// One typed value from a result row.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Int(i128),
    Float(f64),
    Text(String),
    Binary(Vec<u8>),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    TimestampLtz(DateTime<Local>),
    TimestampNtz(NaiveDateTime),
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::json;
        use Value::*;
        match value {
            Null => json!(null),
            Int(value) => json!(value),
            Float(value) => json!(value),
            Text(value) => json!(value),
            Binary(value) => json!(hex::encode(value)),
            Boolean(value) => json!(value),
            Date(value) => json!(value),
            Time(value) => json!(value),
            TimestampLtz(value) => json!(value),
            TimestampNtz(value) => json!(value),
        }
    }
}
