//! # dataset
//!
//! Validated transaction dataset contract for the salecast analytics core.
//!
//! Upstream loaders (CSV, Excel, JSON, all outside this workspace) hand over a
//! [`RawTable`] of named string columns. This crate validates the schema,
//! normalizes the date column, and produces a typed [`Dataset`] that every
//! analytics engine consumes. Engines never touch raw columns by name; they
//! go through the typed accessors defined here.
//!
//! ## Example
//!
//! ```rust
//! use dataset::{Dataset, RawTable};
//!
//! let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
//! table.push_row(vec!["2024-01-05", "SKU-1", "2", "59.80"]).unwrap();
//! table.push_row(vec!["2024-01-06", "SKU-2", "1", "14.95"]).unwrap();
//!
//! let ds = Dataset::from_table(&table).unwrap();
//! assert_eq!(ds.len(), 2);
//! ```

pub mod dates;
pub mod filter;
pub mod schema;
pub mod series;

mod error;
mod table;

pub use error::{DatasetError, Result};
pub use filter::DatasetFilter;
pub use schema::{ColumnKind, ColumnSpec, Schema};
pub use series::DailySeries;
pub use table::RawTable;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single validated sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Point in time of the sale
    pub timestamp: NaiveDateTime,
    /// Product identifier
    pub product: String,
    /// Units sold (negative for returns)
    pub quantity: f64,
    /// Revenue in the dataset's currency unit (negative for returns)
    pub revenue: f64,
    /// Customer identifier, when the source tracks customers
    pub customer: Option<String>,
    /// Order identifier, when the source tracks orders
    pub order_id: Option<String>,
    /// Product category, when the source tracks categories
    pub category: Option<String>,
}

impl Transaction {
    /// Calendar day of the transaction.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A validated, ordered collection of transactions.
///
/// Invariant: every record has a parsed timestamp and finite quantity and
/// revenue. This is the precondition all analytics engines rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Transaction>,
}

impl Dataset {
    /// Build a dataset from already-typed transactions.
    ///
    /// Rejects non-finite quantity or revenue; zero and negative values are
    /// kept (returns are data, not errors).
    pub fn new(records: Vec<Transaction>) -> Result<Self> {
        for (row, tx) in records.iter().enumerate() {
            if !tx.quantity.is_finite() {
                return Err(DatasetError::InvalidValue {
                    row,
                    column: schema::COL_QUANTITY.to_string(),
                    value: tx.quantity.to_string(),
                });
            }
            if !tx.revenue.is_finite() {
                return Err(DatasetError::InvalidValue {
                    row,
                    column: schema::COL_REVENUE.to_string(),
                    value: tx.revenue.to_string(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Validate and convert a raw table into a typed dataset.
    ///
    /// Runs schema validation first (fatal on missing columns), then date
    /// normalization over the whole date column, then numeric extraction.
    pub fn from_table(table: &RawTable) -> Result<Self> {
        Schema::sales().validate(table)?;

        let timestamps = dates::normalize_timestamps(table.column(schema::COL_DATE).unwrap())?;

        let products = table.column(schema::COL_PRODUCT).unwrap();
        let quantities = parse_numeric(table.column(schema::COL_QUANTITY).unwrap(), schema::COL_QUANTITY)?;
        let revenues = parse_numeric(table.column(schema::COL_REVENUE).unwrap(), schema::COL_REVENUE)?;

        let customers = table.column(schema::COL_CUSTOMER);
        let orders = table.column(schema::COL_ORDER);
        let categories = table.column(schema::COL_CATEGORY);

        let optional = |col: Option<&[String]>, row: usize| -> Option<String> {
            col.and_then(|c| {
                let cell = c[row].trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
        };

        let mut records = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            records.push(Transaction {
                timestamp: timestamps[row],
                product: products[row].trim().to_string(),
                quantity: quantities[row],
                revenue: revenues[row],
                customer: optional(customers, row),
                order_id: optional(orders, row),
                category: optional(categories, row),
            });
        }

        debug!(rows = records.len(), "dataset validated");
        Ok(Self { records })
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest timestamp in the dataset, `None` when empty.
    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|tx| tx.timestamp).max()
    }

    /// Latest calendar day in the dataset, `None` when empty.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_timestamp().map(|ts| ts.date())
    }

    /// Whether any record carries a customer identifier.
    pub fn has_customers(&self) -> bool {
        self.records.iter().any(|tx| tx.customer.is_some())
    }

    /// Whether any record carries an explicit order identifier.
    pub fn has_orders(&self) -> bool {
        self.records.iter().any(|tx| tx.order_id.is_some())
    }

    /// Whether any record carries a category.
    pub fn has_categories(&self) -> bool {
        self.records.iter().any(|tx| tx.category.is_some())
    }

    /// Revenue summed per calendar day, date-ascending.
    pub fn daily_revenue(&self) -> DailySeries {
        DailySeries::aggregate(self.records.iter().map(|tx| (tx.date(), tx.revenue)))
    }

    /// A new dataset containing only records accepted by the filter.
    ///
    /// Filtering is the caller's concern; engines receive the result and
    /// never filter further.
    pub fn filtered(&self, filter: &DatasetFilter) -> Dataset {
        Dataset {
            records: self
                .records
                .iter()
                .filter(|tx| filter.accepts(tx))
                .cloned()
                .collect(),
        }
    }
}

fn parse_numeric(cells: &[String], column: &str) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        let parsed: f64 = cell.trim().parse().map_err(|_| DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            value: cell.clone(),
        })?;
        if !parsed.is_finite() {
            return Err(DatasetError::InvalidValue {
                row,
                column: column.to_string(),
                value: cell.clone(),
            });
        }
        out.push(parsed);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RawTable {
        let mut table = RawTable::new(vec![
            "date",
            "product_id",
            "quantity",
            "revenue",
            "customer_id",
        ]);
        table
            .push_row(vec!["2024-03-01", "SKU-1", "2", "40.0", "C1"])
            .unwrap();
        table
            .push_row(vec!["2024-03-02", "SKU-2", "1", "15.5", "C2"])
            .unwrap();
        table
            .push_row(vec!["2024-03-02", "SKU-1", "3", "60.0", ""])
            .unwrap();
        table
    }

    #[test]
    fn test_from_table() {
        let ds = Dataset::from_table(&sample_table()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0].product, "SKU-1");
        assert_eq!(ds.records()[1].revenue, 15.5);
        assert_eq!(ds.records()[0].customer.as_deref(), Some("C1"));
        // Empty cell maps to None, not Some("")
        assert_eq!(ds.records()[2].customer, None);
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let table = RawTable::new(vec!["date", "quantity"]);
        let err = Dataset::from_table(&table).unwrap_err();
        match err {
            DatasetError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["product_id", "revenue"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_numeric_cell() {
        let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
        table
            .push_row(vec!["2024-03-01", "SKU-1", "two", "40.0"])
            .unwrap();
        let err = Dataset::from_table(&table).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn test_negative_quantities_accepted() {
        let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
        table
            .push_row(vec!["2024-03-01", "SKU-1", "-1", "-20.0"])
            .unwrap();
        let ds = Dataset::from_table(&table).unwrap();
        assert_eq!(ds.records()[0].quantity, -1.0);
        assert_eq!(ds.records()[0].revenue, -20.0);
    }

    #[test]
    fn test_max_date() {
        let ds = Dataset::from_table(&sample_table()).unwrap();
        assert_eq!(
            ds.max_date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
        );
        assert_eq!(Dataset::default().max_date(), None);
    }

    #[test]
    fn test_daily_revenue_aggregates_per_day() {
        let ds = Dataset::from_table(&sample_table()).unwrap();
        let series = ds.daily_revenue();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), vec![40.0, 75.5]);
    }

    #[test]
    fn test_presence_flags() {
        let ds = Dataset::from_table(&sample_table()).unwrap();
        assert!(ds.has_customers());
        assert!(!ds.has_orders());
        assert!(!ds.has_categories());
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let tx = Transaction {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            product: "SKU-1".into(),
            quantity: f64::NAN,
            revenue: 1.0,
            customer: None,
            order_id: None,
            category: None,
        };
        assert!(Dataset::new(vec![tx]).is_err());
    }
}
