//! Finance statistics aggregation
//!
//! Stats are a pure function of the ledger and the current date. Nothing is
//! cached; callers recompute on every read.
//!
//! Two spend totals are used:
//! - *net spend*: signed sum of every entry (agent savings pull it down)
//! - *gross spend*: sum of positive entries only, used for waste detection

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{ExpenseItem, FinanceStats, SeriesPoint, Severity, WasteAlert};

/// Revenue baseline credited to every month of the series
pub const BASELINE_REVENUE: i64 = 5000;

/// Synthetic revenue growth per month index
pub const MONTHLY_GROWTH: i64 = 200;

/// Revenue always exceeds net spend by at least this much
pub const REVENUE_MARGIN: i64 = 1000;

/// ROI reported when there is no spend at all
pub const DEFAULT_ROI: i64 = 42;

pub const MAX_ROI: i64 = 300;

/// Gross spend above this raises a waste alert
pub const WASTE_THRESHOLD: i64 = 3000;

/// Single-point series value for an empty ledger
pub const EMPTY_SERIES_VALUE: i64 = 5200;

pub const WASTE_MESSAGE: &str = "Overspending detected in Cloud Services";

/// Signed sum of all ledger amounts
pub fn net_spend(expenses: &[ExpenseItem]) -> i64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of positive ledger amounts
pub fn gross_spend(expenses: &[ExpenseItem]) -> i64 {
    expenses.iter().map(|e| e.amount).filter(|a| *a > 0).sum()
}

/// Negated ledger sums per calendar month, oldest month first
fn monthly_totals(expenses: &[ExpenseItem]) -> BTreeMap<(i32, u32), i64> {
    let mut by_month = BTreeMap::new();
    for expense in expenses {
        let key = (expense.date.year(), expense.date.month());
        *by_month.entry(key).or_insert(0) -= expense.amount;
    }
    by_month
}

/// Monthly profitability series with the baseline revenue trend added
///
/// Returns an empty vec for an empty ledger; `compute_stats` substitutes the
/// single placeholder point.
pub fn profitability_series(expenses: &[ExpenseItem]) -> Vec<SeriesPoint> {
    monthly_totals(expenses)
        .into_iter()
        .enumerate()
        .filter_map(|(index, ((year, month), total))| {
            let date = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(SeriesPoint {
                date,
                value: total + BASELINE_REVENUE + index as i64 * MONTHLY_GROWTH,
            })
        })
        .collect()
}

/// Synthetic revenue for a ledger spanning `months` calendar months
pub fn synthetic_revenue(months: usize, net_spend: i64) -> i64 {
    let trend = BASELINE_REVENUE + months as i64 * MONTHLY_GROWTH;
    trend.max(net_spend + REVENUE_MARGIN)
}

/// ROI percentage, clamped to `[0, MAX_ROI]`
pub fn roi_percent(revenue: i64, spend: i64) -> i64 {
    let roi = if spend == 0 {
        DEFAULT_ROI
    } else {
        ((revenue - spend) as f64 / spend.max(1) as f64 * 100.0).round() as i64
    };
    roi.clamp(0, MAX_ROI)
}

/// Waste alerts for the ledger (at most one)
pub fn waste_alerts(expenses: &[ExpenseItem]) -> Vec<WasteAlert> {
    if gross_spend(expenses) > WASTE_THRESHOLD {
        vec![WasteAlert {
            id: uuid::Uuid::new_v4().to_string(),
            message: WASTE_MESSAGE.to_string(),
            severity: Severity::High,
        }]
    } else {
        Vec::new()
    }
}

/// Compute the full stats payload
pub fn compute_stats(expenses: &[ExpenseItem], today: NaiveDate) -> FinanceStats {
    let series = profitability_series(expenses);
    let spend = net_spend(expenses);
    let revenue = synthetic_revenue(series.len(), spend);

    let profitability_series = if series.is_empty() {
        vec![SeriesPoint {
            date: today,
            value: EMPTY_SERIES_VALUE,
        }]
    } else {
        series
    };

    FinanceStats {
        roi_percent: roi_percent(revenue, spend),
        profitability_series,
        waste_alerts: waste_alerts(expenses),
    }
}
