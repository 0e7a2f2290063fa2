//! Fixed-column tabular results.
//!
//! Every query returns a [`Table`] whose columns are exactly the ones
//! documented for that operation, in that order. Cells keep the raw
//! gateway values; use [`Table::records`] for a typed view.

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use super::primitives::Row;
use crate::Result;

/// Columns of the account list table.
pub const ACC_LIST_COLUMNS: &[&str] = &["acc_id", "trd_env"];

/// Columns of the account funds table.
pub const ACC_INFO_COLUMNS: &[&str] = &["Power", "ZCJZ", "ZQSZ", "XJJY", "KQXJ", "DJZJ"];

/// Columns of the position table.
pub const POSITION_COLUMNS: &[&str] = &[
    "code",
    "stock_name",
    "qty",
    "can_sell_qty",
    "cost_price",
    "cost_price_valid",
    "market_val",
    "nominal_price",
    "pl_ratio",
    "pl_ratio_valid",
    "pl_val",
    "pl_val_valid",
    "today_buy_qty",
    "today_buy_val",
    "today_pl_val",
    "today_sell_qty",
    "today_sell_val",
    "position_side",
];

/// Columns of the order and history order tables.
pub const ORDER_COLUMNS: &[&str] = &[
    "code",
    "stock_name",
    "trd_side",
    "order_type",
    "order_status",
    "order_id",
    "qty",
    "price",
    "create_time",
    "updated_time",
    "dealt_qty",
    "dealt_avg_price",
    "last_err_msg",
];

/// Columns of the deal and history deal tables.
pub const DEAL_COLUMNS: &[&str] = &[
    "code",
    "stock_name",
    "deal_id",
    "order_id",
    "qty",
    "price",
    "trd_side",
    "create_time",
    "counter_broker_id",
    "counter_broker_name",
];

/// Columns of the place-order and modify-order tables.
pub const ORDER_ACK_COLUMNS: &[&str] = &["trd_env", "order_id"];

/// A table with a fixed column set.
///
/// # Example
///
/// ```
/// use futu_trade_rs::models::{Row, Table, ACC_LIST_COLUMNS};
/// use serde_json::json;
///
/// let row: Row = serde_json::from_value(json!({
///     "acc_id": 1001, "trd_env": "REAL", "extra": true
/// })).unwrap();
///
/// let table = Table::select(ACC_LIST_COLUMNS, vec![row]);
/// assert_eq!(table.columns(), ["acc_id", "trd_env"]);
/// assert_eq!(table.get(0, "acc_id"), Some(&json!(1001)));
/// assert_eq!(table.get(0, "extra"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table keeping only `columns` from each row.
    ///
    /// Missing cells become `null`; fields not listed are dropped.
    pub fn select<I>(columns: &[&str], rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                columns
                    .iter()
                    .map(|col| row.remove(*col).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// An empty table with the given columns.
    pub fn empty(columns: &[&str]) -> Self {
        Self::select(columns, std::iter::empty())
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw cell values, row by row.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Rows as column-name keyed maps.
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Deserialize every row into a typed record.
    ///
    /// `null` cells count as absent, so they fall back to the record's
    /// field defaults.
    pub fn records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.to_rows()
            .into_iter()
            .map(|row| {
                let present: Row = row.into_iter().filter(|(_, v)| !v.is_null()).collect();
                serde_json::from_value(Value::Object(present)).map_err(Into::into)
            })
            .collect()
    }
}

impl Serialize for Table {
    /// Serializes as a list of objects, one per row.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rows = self.to_rows();
        let mut seq = serializer.serialize_seq(Some(rows.len()))?;
        for row in &rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
