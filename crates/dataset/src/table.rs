//! Raw tabular input as handed over by upstream loaders.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// A column-named table of string cells.
///
/// This is the handoff format from the ingestion layer: cells are untyped
/// text, exactly as a CSV or spreadsheet reader produced them. All typing
/// happens at the [`crate::Dataset`] boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    /// Column-major cell storage, one vector per column
    cells: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given column names.
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let cells = columns.iter().map(|_| Vec::new()).collect();
        Self { columns, cells }
    }

    /// Append one row; the cell count must match the column count.
    pub fn push_row<S: Into<String>>(&mut self, row: Vec<S>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(DatasetError::RowShape {
                row: self.row_count(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        for (col, cell) in self.cells.iter_mut().zip(row) {
            col.push(cell.into());
        }
        Ok(())
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cells of a column, `None` when the column does not exist.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.cells[idx].as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}
