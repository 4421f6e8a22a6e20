//! Request and response bodies for the Snowflake SQL API v2.

use serde::{Deserialize, Serialize};

use crate::errors::{SnowflakeError, SnowflakeResult};
use crate::values::ColumnKind;

/// Rows exactly as Snowflake returns them: strings, with NULL as None.
pub type StringTable = Vec<Vec<Option<String>>>;

/// The body POSTed to `/api/v2/statements`.
#[derive(Serialize, Debug, Clone)]
pub(crate) struct WireStatement {
    pub statement: String,
    pub timeout: Option<u64>,
    pub database: String,
    pub schema: String,
    pub warehouse: String,
    pub role: Option<String>,
}

/// Either the expected payload or Snowflake's error envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum WireResult<T> {
    Ok(T),
    Error { code: String, message: String },
}

impl<T> WireResult<T> {
    pub fn into_result(self) -> SnowflakeResult<T> {
        match self {
            WireResult::Error { code, message } => Err(SnowflakeError::Query { code, message }),
            WireResult::Ok(t) => Ok(t),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireQueryResponse {
    pub result_set_meta_data: WireResultMetaData,
    pub data: StringTable,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireResultMetaData {
    pub num_rows: usize,
    pub row_type: Vec<ColumnType>,
    // Only the length matters: it is how many partitions the result spans.
    pub partition_info: Vec<WirePartitionInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct WirePartitionInfo {}

/// The type of a column in the result set.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ColumnType {
    /// The name of the column
    pub name: String,
    /// The database the column is in
    pub database: String,
    /// The schema the column is in
    pub schema: String,
    /// The table the column is in
    pub table: String,
    /// How many decimal digits of precision the column has
    pub precision: Option<u32>,
    /// The length of the column in bytes
    pub byte_length: Option<usize>,
    /// The wire format of the column's values
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    /// Decimal digits after the point, usually 0
    pub scale: Option<i32>,
    /// Whether the column can be null
    pub nullable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_envelope_becomes_a_query_error() {
        let wire: WireResult<WireQueryResponse> = serde_json::from_value(serde_json::json!({
            "code": "002003",
            "message": "SQL compilation error",
        }))
        .unwrap();
        let err = wire.into_result().unwrap_err();
        assert!(matches!(err, SnowflakeError::Query { code, .. } if code == "002003"));
    }

    #[test]
    fn statement_body_includes_the_full_context() {
        let wire = WireStatement {
            statement: "SELECT 1".into(),
            timeout: Some(30),
            database: "ANALYTICS_DB".into(),
            schema: "PUBLIC".into(),
            warehouse: "REPORTING_WH".into(),
            role: Some("REPORTER".into()),
        };
        let body = serde_json::to_value(&wire).unwrap();
        assert_eq!(body["statement"], "SELECT 1");
        assert_eq!(body["schema"], "PUBLIC");
        assert_eq!(body["timeout"], 30);
        assert_eq!(body["role"], "REPORTER");
    }
}
