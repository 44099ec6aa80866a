//! Caller-side dataset filters.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Transaction;

/// Filter applied by the caller before engines run.
///
/// All criteria are conjunctive; an unset criterion accepts everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFilter {
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    /// Keep only this category
    pub category: Option<String>,
    /// Keep only these customers (e.g. one RFM segment's members)
    pub customers: Option<HashSet<String>>,
}

impl DatasetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn customers(mut self, customers: HashSet<String>) -> Self {
        self.customers = Some(customers);
        self
    }

    pub fn accepts(&self, tx: &Transaction) -> bool {
        let date = tx.date();
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if tx.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(customers) = &self.customers {
            match &tx.customer {
                Some(c) if customers.contains(c) => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(day: u32, category: Option<&str>, customer: Option<&str>) -> Transaction {
        Transaction {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            product: "SKU-1".into(),
            quantity: 1.0,
            revenue: 10.0,
            customer: customer.map(String::from),
            order_id: None,
            category: category.map(String::from),
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = DatasetFilter::new().date_range(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        );
        assert!(!filter.accepts(&tx(1, None, None)));
        assert!(filter.accepts(&tx(2, None, None)));
        assert!(filter.accepts(&tx(4, None, None)));
        assert!(!filter.accepts(&tx(5, None, None)));
    }

    #[test]
    fn test_category_filter() {
        let filter = DatasetFilter::new().category("Electronics");
        assert!(filter.accepts(&tx(1, Some("Electronics"), None)));
        assert!(!filter.accepts(&tx(1, Some("Garden"), None)));
        assert!(!filter.accepts(&tx(1, None, None)));
    }

    #[test]
    fn test_customer_filter() {
        let customers: HashSet<String> = ["C1".to_string()].into_iter().collect();
        let filter = DatasetFilter::new().customers(customers);
        assert!(filter.accepts(&tx(1, None, Some("C1"))));
        assert!(!filter.accepts(&tx(1, None, Some("C2"))));
        assert!(!filter.accepts(&tx(1, None, None)));
    }

    #[test]
    fn test_unset_filter_accepts_everything() {
        assert!(DatasetFilter::new().accepts(&tx(1, None, None)));
    }
}
