//! # segmentation
//!
//! RFM (Recency / Frequency / Monetary) customer segmentation.
//!
//! Each customer is scored 1–5 on three axes and assigned one of four fixed
//! segments. Scores come from the dataset alone: nothing is persisted and
//! every call recomputes from scratch.
//!
//! ## Example
//!
//! ```rust
//! use dataset::{Dataset, RawTable};
//! use segmentation::{analyze, Segment};
//!
//! let mut table = RawTable::new(vec![
//!     "date", "product_id", "quantity", "revenue", "customer_id",
//! ]);
//! table.push_row(vec!["2024-01-01", "SKU-1", "1", "100.0", "C1"]).unwrap();
//! table.push_row(vec!["2024-01-03", "SKU-1", "2", "250.0", "C1"]).unwrap();
//!
//! let ds = Dataset::from_table(&table).unwrap();
//! let rfm = analyze(&ds);
//! assert_eq!(rfm.len(), 1);
//! assert_eq!(rfm[0].frequency, 2);
//! ```

pub mod binning;
pub mod rfm;

pub use rfm::{analyze, RfmRecord, Segment};
