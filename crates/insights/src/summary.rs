//! Summary KPIs and product rankings.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use dataset::Dataset;

/// Headline figures for the report and dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryKpis {
    pub total_revenue: f64,
    pub transaction_count: usize,
    /// Distinct customers; zero when the dataset has no customer ids
    pub customer_count: usize,
    /// Distinct orders, or order-proxy groups when no order id exists
    pub order_count: usize,
    /// Revenue per order; zero when there are no orders
    pub average_order_value: f64,
    /// Revenue per distinct sales day; zero for the empty dataset
    pub daily_average_revenue: f64,
}

/// Compute the KPI block. Every figure on the empty dataset is zero; the
/// report layer renders zeros, never NaN.
pub fn summarize(dataset: &Dataset) -> SummaryKpis {
    if dataset.is_empty() {
        return SummaryKpis::default();
    }

    let total_revenue: f64 = dataset.records().iter().map(|tx| tx.revenue).sum();

    let customers: HashSet<&str> = dataset
        .records()
        .iter()
        .filter_map(|tx| tx.customer.as_deref())
        .collect();

    // Without an order id, one customer's transactions on one calendar day
    // form one proxy order; anonymous transactions group by day alone.
    let orders: HashSet<(&str, chrono::NaiveDate)> = dataset
        .records()
        .iter()
        .map(|tx| match &tx.order_id {
            Some(id) => (id.as_str(), chrono::NaiveDate::MIN),
            None => (tx.customer.as_deref().unwrap_or(""), tx.date()),
        })
        .collect();
    let order_count = orders.len();

    let days: HashSet<chrono::NaiveDate> = dataset.records().iter().map(|tx| tx.date()).collect();

    SummaryKpis {
        total_revenue,
        transaction_count: dataset.len(),
        customer_count: customers.len(),
        order_count,
        average_order_value: if order_count > 0 {
            total_revenue / order_count as f64
        } else {
            0.0
        },
        daily_average_revenue: total_revenue / days.len() as f64,
    }
}

/// One row of the product ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRank {
    pub product: String,
    pub total_quantity: f64,
    pub total_revenue: f64,
}

/// Top `limit` products by units sold, quantity-descending with product id
/// as the tie-break.
pub fn top_products(dataset: &Dataset, limit: usize) -> Vec<ProductRank> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for tx in dataset.records() {
        let entry = totals.entry(&tx.product).or_insert((0.0, 0.0));
        entry.0 += tx.quantity;
        entry.1 += tx.revenue;
    }

    let mut ranked: Vec<ProductRank> = totals
        .into_iter()
        .map(|(product, (quantity, revenue))| ProductRank {
            product: product.to_string(),
            total_quantity: quantity,
            total_revenue: revenue,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_quantity
            .partial_cmp(&a.total_quantity)
            .expect("finite quantities")
            .then_with(|| a.product.cmp(&b.product))
    });
    ranked.truncate(limit);
    ranked
}
