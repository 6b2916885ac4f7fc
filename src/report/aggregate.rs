//! Aggregation over raw sale records: the daily/weekly income series and
//! summary figures shown by the dashboard and week commands. Pure
//! computation over whatever snapshot of records it is handed; no I/O,
//! no state of its own.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::config::{Product, SaleRecord};
use crate::report::model::{DailyIncome, DayTotals, WeekSummary};
use crate::sales::business_day;

/// Spanish weekday labels, indexed 0=Sunday..6=Saturday
const WEEKDAYS: [(&str, &str); 7] = [
    ("Dom", "Domingo"),
    ("Lun", "Lunes"),
    ("Mar", "Martes"),
    ("Mié", "Miércoles"),
    ("Jue", "Jueves"),
    ("Vie", "Viernes"),
    ("Sáb", "Sábado"),
];

/// Short and full weekday labels for a date
pub fn weekday_labels(date: NaiveDate) -> (&'static str, &'static str) {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Group records by business day and return the trailing `window_days`
/// days as an income series, oldest first.
///
/// The history may hold several records for the same day; their totals
/// add up. Days without any record are not zero-filled, so the series can
/// be shorter than the window.
pub fn weekly_series(records: &[SaleRecord], window_days: usize) -> Vec<DailyIncome> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *by_day.entry(record.date).or_insert(0.0) += record.total;
    }

    let skip = by_day.len().saturating_sub(window_days);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, income)| {
            let (day, full_day) = weekday_labels(date);
            DailyIncome {
                day: day.to_string(),
                date_label: date.format("%d/%m").to_string(),
                income,
                full_day: full_day.to_string(),
            }
        })
        .collect()
}

/// Total, daily average and best day for an income series. An empty
/// series yields zeros and an empty best-day name; ties go to the
/// earliest entry.
pub fn summarize(series: &[DailyIncome]) -> WeekSummary {
    let total: f64 = series.iter().map(|entry| entry.income).sum();
    let average = if series.is_empty() {
        0.0
    } else {
        total / series.len() as f64
    };

    let best_day = best_entry(series)
        .map(|entry| entry.full_day.clone())
        .unwrap_or_default();

    WeekSummary {
        total,
        average,
        best_day,
    }
}

fn best_entry(series: &[DailyIncome]) -> Option<&DailyIncome> {
    let mut best: Option<&DailyIncome> = None;
    for entry in series {
        match best {
            Some(current) if entry.income > current.income => best = Some(entry),
            None => best = Some(entry),
            _ => {}
        }
    }
    best
}

/// Income and units sold for one exact business day. No matching records
/// is a normal outcome and yields zeros.
pub fn day_totals(records: &[SaleRecord], day: NaiveDate) -> DayTotals {
    let mut income = 0.0;
    let mut units_sold = 0u32;

    for record in records.iter().filter(|record| record.date == day) {
        income += record.total;
        units_sold += record.units_sold();
    }

    DayTotals { income, units_sold }
}

/// Totals for the business day before `as_of`, evaluated in the shop's
/// fixed UTC-4 offset regardless of the host timezone
pub fn yesterday_totals(records: &[SaleRecord], as_of: DateTime<Utc>) -> DayTotals {
    day_totals(records, business_day::yesterday_of(as_of))
}

/// Running total of a draft tally against the catalog. Products without a
/// counter count as zero; counters for unknown products are ignored.
pub fn running_total(products: &HashMap<String, Product>, tally: &BTreeMap<String, u32>) -> f64 {
    products
        .iter()
        .map(|(id, product)| {
            let quantity = tally.get(id).copied().unwrap_or(0);
            product.price * quantity as f64
        })
        .sum()
}
