//! Typed schema for the sales transaction table.
//!
//! The schema is validated once at the dataset boundary; downstream engines
//! operate on typed accessors and never look columns up by name.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};
use crate::table::RawTable;

pub const COL_DATE: &str = "date";
pub const COL_PRODUCT: &str = "product_id";
pub const COL_QUANTITY: &str = "quantity";
pub const COL_REVENUE: &str = "revenue";
pub const COL_CUSTOMER: &str = "customer_id";
pub const COL_ORDER: &str = "order_id";
pub const COL_CATEGORY: &str = "category";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Date,
    Text,
    Number,
}

/// One column of the expected table layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    pub required: bool,
}

impl ColumnSpec {
    fn new(name: &str, kind: ColumnKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
        }
    }
}

/// Mapping from column name to semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    /// The sales transaction schema all engines assume.
    pub fn sales() -> Self {
        Self {
            columns: vec![
                ColumnSpec::new(COL_DATE, ColumnKind::Date, true),
                ColumnSpec::new(COL_PRODUCT, ColumnKind::Text, true),
                ColumnSpec::new(COL_QUANTITY, ColumnKind::Number, true),
                ColumnSpec::new(COL_REVENUE, ColumnKind::Number, true),
                ColumnSpec::new(COL_CUSTOMER, ColumnKind::Text, false),
                ColumnSpec::new(COL_ORDER, ColumnKind::Text, false),
                ColumnSpec::new(COL_CATEGORY, ColumnKind::Text, false),
            ],
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Check that every required column is present.
    ///
    /// Collects all absent required columns so the caller sees the full
    /// shape problem at once instead of fixing one column per attempt.
    pub fn validate(&self, table: &RawTable) -> Result<()> {
        let missing: Vec<String> = self
            .columns
            .iter()
            .filter(|spec| spec.required && !table.has_column(&spec.name))
            .map(|spec| spec.name.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::MissingColumns { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_table_passes() {
        let table = RawTable::new(vec![COL_DATE, COL_PRODUCT, COL_QUANTITY, COL_REVENUE]);
        assert!(Schema::sales().validate(&table).is_ok());
    }

    #[test]
    fn test_optional_columns_not_required() {
        let table = RawTable::new(vec![
            COL_DATE,
            COL_PRODUCT,
            COL_QUANTITY,
            COL_REVENUE,
            COL_CATEGORY,
        ]);
        assert!(Schema::sales().validate(&table).is_ok());
    }

    #[test]
    fn test_all_missing_columns_listed_in_order() {
        let table = RawTable::new(vec![COL_CUSTOMER]);
        let err = Schema::sales().validate(&table).unwrap_err();
        assert_eq!(
            err,
            DatasetError::MissingColumns {
                missing: vec![
                    COL_DATE.to_string(),
                    COL_PRODUCT.to_string(),
                    COL_QUANTITY.to_string(),
                    COL_REVENUE.to_string(),
                ]
            }
        );
    }
}
