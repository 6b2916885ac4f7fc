use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("Config directory not found at {0}. Run 'polleria init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Product '{0}' not found in products.toml")]
    ProductNotFound(String),

    #[error("Product '{0}' already exists in products.toml")]
    DuplicateProduct(String),

    #[error("Invalid product id '{0}'. Use lowercase letters, digits and dashes (e.g., 'pollo-entero')")]
    InvalidProductId(String),

    #[error("Product name must not be empty")]
    EmptyProductName,

    #[error("Invalid price '{0}'. Price must be a non-negative amount (e.g., 85.00)")]
    InvalidPrice(String),

    #[error("Unknown category '{given}'. Valid categories: {valid}")]
    UnknownCategory { given: String, valid: String },

    #[error("Invalid quantity '{qty}' for product '{product}': {reason}")]
    InvalidQuantity {
        product: String,
        qty: String,
        reason: String,
    },

    #[error("Invalid item format '{0}'. Expected 'product:quantity' (e.g., 'porcion:3')")]
    InvalidItemFormat(String),

    #[error("No items specified. Use --item <product>:<quantity> to add line items.")]
    NoItems,

    #[error("Nothing tallied yet. Use 'polleria tally --item <product>:<quantity>' first.")]
    EmptyDraft,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD (e.g., 2026-08-06)")]
    InvalidDate(String),

    #[error("Invalid instant '{0}'. Expected an RFC 3339 timestamp (e.g., 2026-08-07T12:00:00Z)")]
    InvalidInstant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

pub type Result<T> = std::result::Result<T, PosError>;
