use std::sync::Arc;

use crate::errors::SnowflakeResult;
use crate::values::Value;
use crate::wire::{ColumnType, WireQueryResponse};

/// The decoded result of one statement.
///
/// The first partition of the result set is buffered and decoded eagerly;
/// that is always the partition holding the first row. Results large enough
/// to span further partitions are truncated to the first one with a warning,
/// so `rows()` can hold fewer rows than `total_rows()`.
#[derive(Debug)]
pub struct ResultSet {
    columns: Arc<Vec<ColumnType>>,
    rows: Vec<Row>,
    total_rows: usize,
    partitions: usize,
}

impl ResultSet {
    pub(crate) fn from_wire(response: WireQueryResponse) -> SnowflakeResult<ResultSet> {
        let meta = response.result_set_meta_data;
        let columns = Arc::new(meta.row_type);
        let rows = response
            .data
            .iter()
            .map(|raw_row| Row::decode(raw_row, &columns))
            .collect::<SnowflakeResult<Vec<_>>>()?;
        let partitions = meta.partition_info.len();
        if partitions > 1 {
            log::warn!(
                "result spans {} partitions; only the first ({} of {} rows) is buffered",
                partitions,
                rows.len(),
                meta.num_rows,
            );
        }
        Ok(ResultSet {
            columns,
            rows,
            total_rows: meta.num_rows,
            partitions,
        })
    }

    /// The first row of the result set, or `None` when it is empty.
    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// The buffered rows, in result-set order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total rows in the result set across all partitions.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.columns
    }

    /// The buffered rows as JSON objects keyed by column name.
    pub fn json_objects(&self) -> Vec<serde_json::Value> {
        self.rows.iter().map(Row::json_object).collect()
    }
}

/// One record of a result set: ordered column values.
#[derive(Debug, Clone)]
pub struct Row {
    values: Vec<Value>,
    columns: Arc<Vec<ColumnType>>,
}

impl Row {
    fn decode(raw: &[Option<String>], columns: &Arc<Vec<ColumnType>>) -> SnowflakeResult<Row> {
        let values = raw
            .iter()
            .zip(columns.iter())
            .map(|(cell, column)| column.kind.decode(cell))
            .collect::<SnowflakeResult<Vec<_>>>()?;
        Ok(Row {
            values,
            columns: columns.clone(),
        })
    }

    /// The values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Look up a value by column name, as Snowflake reports it
    /// (upper case unless the column was quoted).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .map(|index| &self.values[index])
    }

    /// The row as a JSON object keyed by column name.
    pub fn json_object(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .enumerate()
                .map(|(index, value)| (self.columns[index].name.clone(), value.clone().into()))
                .collect(),
        )
    }
}
