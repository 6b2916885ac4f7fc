use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    /// In-progress tally for the current sales-entry session,
    /// product id -> quantity. Cleared on commit or reset.
    #[serde(default)]
    pub draft: BTreeMap<String, u32>,
    #[serde(default)]
    pub history: Vec<SaleRecord>,
}

/// One committed sale entry: the line items sold together, tagged to the
/// shop's business day. Immutable once written; there is no edit or
/// delete path.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<SaleLine>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SaleLine {
    pub product: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

impl SaleRecord {
    /// Number of individual products sold across all line items
    pub fn units_sold(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, quantity: u32) -> SaleLine {
        SaleLine {
            product: product.to_string(),
            name: product.to_string(),
            category: "pollo".to_string(),
            price: 10.0,
            quantity,
        }
    }

    #[test]
    fn units_sold_sums_line_quantities() {
        let record = SaleRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            total: 50.0,
            created_at: Utc::now(),
            items: vec![line("porcion", 3), line("agua", 2)],
        };
        assert_eq!(record.units_sold(), 5);
    }

    #[test]
    fn units_sold_is_zero_without_items() {
        let record = SaleRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            total: 0.0,
            created_at: Utc::now(),
            items: vec![],
        };
        assert_eq!(record.units_sold(), 0);
    }
}
