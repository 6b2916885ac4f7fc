use serde::{Deserialize, Serialize};

/// Categories a product can be registered under. The original shop sells
/// chicken portions and drinks; extend this table to add more.
pub const CATEGORIES: &[&str] = &["pollo", "bebida"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Check a category against the known set
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Validate a product id: lowercase letters, digits and dashes
pub fn is_valid_product_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories() {
        assert!(is_known_category("pollo"));
        assert!(is_known_category("bebida"));
        assert!(!is_known_category("postre"));
        assert!(!is_known_category(""));
    }

    #[test]
    fn product_id_validation() {
        assert!(is_valid_product_id("porcion"));
        assert!(is_valid_product_id("pollo-entero"));
        assert!(is_valid_product_id("coca-cola-2l"));
        assert!(!is_valid_product_id(""));
        assert!(!is_valid_product_id("Pollo"));
        assert!(!is_valid_product_id("pollo entero"));
        assert!(!is_valid_product_id("-pollo"));
        assert!(!is_valid_product_id("pollo-"));
    }
}
