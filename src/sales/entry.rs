use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::config::{load_products, load_state, save_state, Product, SaleLine, SaleRecord, State};
use crate::error::{PosError, Result};
use crate::sales::business_day;

/// Parse item input like "porcion:3" into (product_id, quantity)
pub fn parse_item_input(input: &str) -> Result<(&str, u32)> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 {
        return Err(PosError::InvalidItemFormat(input.to_string()));
    }

    let product_id = parts[0];
    let qty_str = parts[1];

    let quantity: u32 = qty_str.parse().map_err(|_| PosError::InvalidQuantity {
        product: product_id.to_string(),
        qty: qty_str.to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if quantity == 0 {
        return Err(PosError::InvalidQuantity {
            product: product_id.to_string(),
            qty: qty_str.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok((product_id, quantity))
}

/// Apply item inputs to the draft tally. With `remove` the quantities are
/// subtracted instead, flooring at 0 (the counter never goes negative).
/// Returns the updated state so callers can show the new running total.
pub fn tally_items(cfg_dir: &PathBuf, items: &[String], remove: bool) -> Result<State> {
    if items.is_empty() {
        return Err(PosError::NoItems);
    }

    let products = load_products(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;

    for input in items {
        let (product_id, quantity) = parse_item_input(input)?;

        if !products.contains_key(product_id) {
            return Err(PosError::ProductNotFound(product_id.to_string()));
        }

        let counter = state.draft.entry(product_id.to_string()).or_insert(0);
        if remove {
            *counter = counter.saturating_sub(quantity);
        } else {
            *counter = counter.saturating_add(quantity);
        }
    }

    // Drop counters that reached zero so the draft stays readable
    state.draft.retain(|_, qty| *qty > 0);

    save_state(cfg_dir, &state)?;
    Ok(state)
}

/// Commit the draft tally as one sale record for the given business day
/// (defaults to today in the shop's timezone) and clear the tally
pub fn commit_sale(cfg_dir: &PathBuf, date: Option<NaiveDate>) -> Result<SaleRecord> {
    let products = load_products(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;

    let lines = lines_from_tally(&products, &state.draft)?;
    if lines.is_empty() {
        return Err(PosError::EmptyDraft);
    }

    let record = build_record(lines, date);
    state.history.push(record.clone());
    state.draft.clear();
    save_state(cfg_dir, &state)?;

    Ok(record)
}

/// Record a sale directly from item inputs, bypassing the draft tally.
/// Useful for backfilling a past business day; the history may hold more
/// than one record for the same day.
pub fn record_sale(
    cfg_dir: &PathBuf,
    items: &[String],
    date: Option<NaiveDate>,
) -> Result<SaleRecord> {
    if items.is_empty() {
        return Err(PosError::NoItems);
    }

    let products = load_products(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;

    // Merge repeated inputs for the same product into one line
    let mut tally: BTreeMap<String, u32> = BTreeMap::new();
    for input in items {
        let (product_id, quantity) = parse_item_input(input)?;
        if !products.contains_key(product_id) {
            return Err(PosError::ProductNotFound(product_id.to_string()));
        }
        let counter = tally.entry(product_id.to_string()).or_insert(0);
        *counter = counter.saturating_add(quantity);
    }

    let lines = lines_from_tally(&products, &tally)?;
    let record = build_record(lines, date);
    state.history.push(record.clone());
    save_state(cfg_dir, &state)?;

    Ok(record)
}

/// Discard the draft tally without recording anything
pub fn reset_draft(cfg_dir: &PathBuf) -> Result<()> {
    let mut state = load_state(cfg_dir)?;
    state.draft.clear();
    save_state(cfg_dir, &state)?;
    Ok(())
}

/// Turn the non-zero tally counters into sale lines, in product-id order
fn lines_from_tally(
    products: &HashMap<String, Product>,
    tally: &BTreeMap<String, u32>,
) -> Result<Vec<SaleLine>> {
    let mut lines = Vec::new();

    for (product_id, &quantity) in tally {
        if quantity == 0 {
            continue;
        }

        let product = products
            .get(product_id)
            .ok_or_else(|| PosError::ProductNotFound(product_id.clone()))?;

        lines.push(SaleLine {
            product: product_id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity,
        });
    }

    Ok(lines)
}

fn build_record(items: Vec<SaleLine>, date: Option<NaiveDate>) -> SaleRecord {
    let total: f64 = items
        .iter()
        .map(|line| line.price * line.quantity as f64)
        .sum();

    SaleRecord {
        date: date.unwrap_or_else(business_day::business_today),
        total,
        created_at: Utc::now(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_item_input() {
        assert_eq!(parse_item_input("porcion:3").unwrap(), ("porcion", 3));
        assert_eq!(
            parse_item_input("pollo-entero:1").unwrap(),
            ("pollo-entero", 1)
        );
    }

    #[test]
    fn rejects_malformed_item_input() {
        assert!(matches!(
            parse_item_input("porcion"),
            Err(PosError::InvalidItemFormat(_))
        ));
        assert!(matches!(
            parse_item_input("porcion:2:3"),
            Err(PosError::InvalidItemFormat(_))
        ));
        assert!(matches!(
            parse_item_input("porcion:abc"),
            Err(PosError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_item_input("porcion:1.5"),
            Err(PosError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_item_input("porcion:0"),
            Err(PosError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_item_input("porcion:-2"),
            Err(PosError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn lines_skip_zero_counters_and_keep_id_order() {
        let mut products = HashMap::new();
        products.insert(
            "porcion".to_string(),
            Product {
                name: "Porción".to_string(),
                price: 12.0,
                category: "pollo".to_string(),
            },
        );
        products.insert(
            "agua".to_string(),
            Product {
                name: "Agua".to_string(),
                price: 5.0,
                category: "bebida".to_string(),
            },
        );

        let mut tally = BTreeMap::new();
        tally.insert("porcion".to_string(), 2);
        tally.insert("agua".to_string(), 0);

        let lines = lines_from_tally(&products, &tally).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product, "porcion");
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn record_total_matches_line_amounts() {
        let lines = vec![
            SaleLine {
                product: "porcion".to_string(),
                name: "Porción".to_string(),
                category: "pollo".to_string(),
                price: 12.0,
                quantity: 3,
            },
            SaleLine {
                product: "agua".to_string(),
                name: "Agua".to_string(),
                category: "bebida".to_string(),
                price: 5.0,
                quantity: 2,
            },
        ];

        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let record = build_record(lines, Some(date));
        assert_eq!(record.date, date);
        assert_eq!(record.total, 46.0);
        assert_eq!(record.units_sold(), 5);
    }
}
