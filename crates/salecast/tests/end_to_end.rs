//! End-to-end test: raw table in, full analytics report out.

use salecast::prelude::*;
use salecast::{Segment, StockStatus};

/// Ninety days of sales across three products, three customers, and two
/// categories, with a weekly revenue shape.
fn sample_table() -> RawTable {
    let mut table = RawTable::new(vec![
        "date",
        "product_id",
        "quantity",
        "revenue",
        "customer_id",
        "category",
    ]);

    let products = [
        ("SKU-A", "Electronics", 30.0),
        ("SKU-B", "Electronics", 12.5),
        ("SKU-C", "Garden", 8.0),
    ];
    let customers = ["C1", "C2", "C3"];

    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for day in 0..90usize {
        let date = (start + chrono::Duration::days(day as i64))
            .format("%Y-%m-%d")
            .to_string();
        let weekly_units = 1 + (day % 7) / 2;
        for (i, (sku, category, unit_price)) in products.iter().enumerate() {
            // C3 only shows up in the first month
            let customer = customers[i];
            if customer == "C3" && day >= 30 {
                continue;
            }
            let quantity = weekly_units + i;
            table
                .push_row(vec![
                    date.clone(),
                    sku.to_string(),
                    quantity.to_string(),
                    format!("{}", quantity as f64 * unit_price),
                    customer.to_string(),
                    category.to_string(),
                ])
                .unwrap();
        }
    }
    table
}

#[test]
fn test_full_report() {
    let ds = Dataset::from_table(&sample_table()).unwrap();
    let report = salecast::analyze(&ds, &AnalyticsParams::default());

    // Summary
    assert!(report.summary.total_revenue > 0.0);
    assert_eq!(report.summary.customer_count, 3);

    // RFM: every customer scored, C3 lapsed after month one
    let rfm = report.rfm.expect("dataset has customer ids");
    assert_eq!(rfm.len(), 3);
    for record in &rfm {
        assert!((1..=5).contains(&record.recency_score));
        assert!(matches!(
            record.segment,
            Segment::Vip | Segment::Loyal | Segment::Potential | Segment::AtRisk
        ));
    }
    let c3 = rfm.iter().find(|r| r.customer == "C3").unwrap();
    let c1 = rfm.iter().find(|r| r.customer == "C1").unwrap();
    assert!(c3.recency_days > c1.recency_days);

    // Time series: 90 daily points, decomposition present (90 >= 60)
    assert_eq!(report.series.points.len(), 90);
    assert!(report.series.decomposition.is_some());

    // Forecast bundle: model A covers history + 30, model B exactly 30
    let bundle = report.forecast.expect("90 clean points fit both models");
    assert_eq!(bundle.seasonal_trend.values.len(), 120);
    assert!(bundle.seasonal_trend.bounds.is_some());
    assert_eq!(bundle.auto_arima.values.len(), 30);
    assert_eq!(bundle.future_dates().len(), 30);
    assert_eq!(bundle.anchor_date, ds.max_date().unwrap());

    // Inventory: one row per product, defined statuses
    assert_eq!(report.inventory.len(), 3);
    for stats in &report.inventory {
        assert!(matches!(
            stats.status,
            StockStatus::HighStock | StockStatus::ReorderRequired | StockStatus::NormalStock
        ));
    }

    // Categories and ranking
    let categories = report.categories.expect("dataset has categories");
    assert_eq!(categories.metrics.len(), 2);
    assert_eq!(report.top_products.len(), 3);
}

#[test]
fn test_report_on_sparse_dataset_degrades_gracefully() {
    let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
    for day in 1..=5 {
        table
            .push_row(vec![
                format!("2024-01-{day:02}"),
                "SKU-1".to_string(),
                "1".to_string(),
                "10.0".to_string(),
            ])
            .unwrap();
    }
    let ds = Dataset::from_table(&table).unwrap();
    let report = salecast::analyze(&ds, &AnalyticsParams::default());

    // No customers, no categories, too little data for the ARIMA search
    assert!(report.rfm.is_none());
    assert!(report.categories.is_none());
    assert!(report.series.decomposition.is_none());
    assert!(report.forecast.is_err());

    // But the rest of the report is intact
    assert_eq!(report.summary.transaction_count, 5);
    assert_eq!(report.inventory.len(), 1);
    assert_eq!(report.series.points.len(), 5);
}

#[test]
fn test_filtered_invocation() {
    let ds = Dataset::from_table(&sample_table()).unwrap();
    let filtered = ds.filtered(&DatasetFilter::new().category("Garden"));
    let report = salecast::analyze(&filtered, &AnalyticsParams::default());

    assert_eq!(report.inventory.len(), 1);
    assert_eq!(report.inventory[0].product, "SKU-C");
    let categories = report.categories.unwrap();
    assert_eq!(categories.metrics.len(), 1);
    assert_eq!(categories.metrics[0].category, "Garden");
}

#[test]
fn test_custom_horizon() {
    let ds = Dataset::from_table(&sample_table()).unwrap();
    let params = AnalyticsParams {
        horizon: 14,
        ..AnalyticsParams::default()
    };
    let report = salecast::analyze(&ds, &params);

    let bundle = report.forecast.unwrap();
    assert_eq!(bundle.auto_arima.values.len(), 14);
    assert_eq!(bundle.seasonal_trend.values.len(), 90 + 14);
}

#[test]
fn test_bundle_serializes_for_report_layer() {
    let ds = Dataset::from_table(&sample_table()).unwrap();
    let report = salecast::analyze(&ds, &AnalyticsParams::default());

    let bundle = report.forecast.unwrap();
    let json = serde_json::to_string(&bundle).unwrap();
    let back: salecast::ForecastBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bundle);
}
