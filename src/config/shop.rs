use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub shop: Shop,
    pub sales: SalesSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Shop {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SalesSettings {
    pub currency: String,
    pub currency_symbol: String,
}
