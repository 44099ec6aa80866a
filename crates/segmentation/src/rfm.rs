//! RFM metric computation, scoring, and segment assignment.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use dataset::Dataset;

use crate::binning::{percentile_boundaries, quintile_boundaries, score_by_brackets};

/// Recency labels: the most recent quintile scores highest.
const RECENCY_LABELS: [u8; 5] = [5, 4, 3, 2, 1];
/// Monetary labels: the highest-spend bracket scores highest.
const MONETARY_LABELS: [u8; 5] = [1, 2, 3, 4, 5];

/// Customer segment, assigned by score thresholds in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Vip,
    Loyal,
    Potential,
    AtRisk,
}

impl Segment {
    /// Display label used by report and UI layers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Vip => "VIP Customers",
            Segment::Loyal => "Loyal Customers",
            Segment::Potential => "Potential Customers",
            Segment::AtRisk => "At-Risk Customers",
        }
    }

    /// First matching rule wins.
    fn assign(r: u8, f: u8, m: u8) -> Self {
        if r >= 4 && f >= 4 && m >= 4 {
            Segment::Vip
        } else if r >= 3 && f >= 3 && m >= 3 {
            Segment::Loyal
        } else if r >= 2 && f >= 2 && m >= 2 {
            Segment::Potential
        } else {
            Segment::AtRisk
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-customer RFM result.
///
/// Fully derived from the dataset on every call; the only identity is the
/// customer id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmRecord {
    pub customer: String,
    /// Whole days between the customer's last transaction and the dataset's
    /// latest timestamp
    pub recency_days: i64,
    /// Distinct orders (or order-proxy groups) for the customer
    pub frequency: usize,
    /// Revenue sum for the customer
    pub monetary: f64,
    pub recency_score: u8,
    pub frequency_score: u8,
    pub monetary_score: u8,
    /// Concatenated "RFM" digit string, display only
    pub score: String,
    pub segment: Segment,
}

/// Grouping key for the frequency metric.
///
/// An explicit order id counts as one order; without one, all of a
/// customer's transactions on the same calendar day collapse into a single
/// proxy order.
#[derive(PartialEq, Eq, Hash)]
enum OrderKey {
    Explicit(String),
    DayProxy(NaiveDate),
}

struct CustomerAccum {
    last_seen: NaiveDateTime,
    orders: HashSet<OrderKey>,
    monetary: f64,
}

/// Compute the RFM table for every customer in the dataset.
///
/// Callers skip this engine when the dataset has no customer ids; records
/// without a customer id are ignored here. The result is empty for an empty
/// dataset and never fails: degenerate score distributions fall back to
/// fixed-percentile binning.
pub fn analyze(dataset: &Dataset) -> Vec<RfmRecord> {
    let max_timestamp = match dataset.max_timestamp() {
        Some(ts) => ts,
        None => return Vec::new(),
    };

    let mut accums: BTreeMap<String, CustomerAccum> = BTreeMap::new();
    for tx in dataset.records() {
        let customer = match &tx.customer {
            Some(c) => c.clone(),
            None => continue,
        };
        let key = match &tx.order_id {
            Some(id) => OrderKey::Explicit(id.clone()),
            None => OrderKey::DayProxy(tx.date()),
        };
        let entry = accums.entry(customer).or_insert_with(|| CustomerAccum {
            last_seen: tx.timestamp,
            orders: HashSet::new(),
            monetary: 0.0,
        });
        entry.last_seen = entry.last_seen.max(tx.timestamp);
        entry.orders.insert(key);
        entry.monetary += tx.revenue;
    }

    if accums.is_empty() {
        return Vec::new();
    }

    let recencies: Vec<f64> = accums
        .values()
        .map(|a| (max_timestamp - a.last_seen).num_days() as f64)
        .collect();
    let monetaries: Vec<f64> = accums.values().map(|a| a.monetary).collect();

    let recency_boundaries = match quintile_boundaries(&recencies) {
        Some(b) => b,
        None => {
            debug!("recency distribution degenerate; using fixed-percentile binning");
            percentile_boundaries(&recencies)
        }
    };
    let monetary_boundaries = percentile_boundaries(&monetaries);

    accums
        .into_iter()
        .map(|(customer, accum)| {
            let recency_days = (max_timestamp - accum.last_seen).num_days();
            let frequency = accum.orders.len();
            let monetary = accum.monetary;

            let r = score_by_brackets(recency_days as f64, &recency_boundaries, &RECENCY_LABELS);
            let f = score_frequency(frequency);
            let m = score_by_brackets(monetary, &monetary_boundaries, &MONETARY_LABELS);

            RfmRecord {
                customer,
                recency_days,
                frequency,
                monetary,
                recency_score: r,
                frequency_score: f,
                monetary_score: m,
                score: format!("{r}{f}{m}"),
                segment: Segment::assign(r, f, m),
            }
        })
        .collect()
}

/// Fixed manual thresholds.
///
/// Frequency distributions are right-skewed with many repeated low integers,
/// which makes quantile binning unstable, so the brackets are hardcoded.
fn score_frequency(frequency: usize) -> u8 {
    match frequency {
        0..=1 => 1,
        2 => 2,
        3 => 3,
        4..=5 => 4,
        _ => 5,
    }
}
