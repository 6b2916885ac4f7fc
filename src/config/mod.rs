mod product;
mod shop;
mod state;

pub use product::{is_known_category, is_valid_product_id, Product, CATEGORIES};
pub use shop::{Config, SalesSettings, Shop};
pub use state::{SaleLine, SaleRecord, State};

use crate::error::{PosError, Result};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.polleria/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "polleria") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.polleria/
    let home = dirs_home().ok_or_else(|| {
        PosError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".polleria"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(PosError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PosError::ConfigParse { path, source: e })
}

/// Load products.toml as a HashMap keyed by product id
pub fn load_products(config_dir: &PathBuf) -> Result<HashMap<String, Product>> {
    let path = config_dir.join("products.toml");
    if !path.exists() {
        return Err(PosError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PosError::ConfigParse { path, source: e })
}

/// Save products.toml, sorted by product id
pub fn save_products(config_dir: &PathBuf, products: &HashMap<String, Product>) -> Result<()> {
    let path = config_dir.join("products.toml");
    let sorted: BTreeMap<&String, &Product> = products.iter().collect();
    let content = toml::to_string_pretty(&sorted).map_err(|e| {
        PosError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Load state.toml (defaults to empty if missing, so reports render
/// zero-valued output on a fresh install instead of erroring)
pub fn load_state(config_dir: &PathBuf) -> Result<State> {
    let path = config_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PosError::ConfigParse { path, source: e })
}

/// Save state.toml
pub fn save_state(config_dir: &PathBuf, state: &State) -> Result<()> {
    let path = config_dir.join("state.toml");
    let content = toml::to_string_pretty(state).map_err(|e| {
        PosError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[shop]
name = "Pollería Doña Carmen"
city = "Santa Cruz de la Sierra"
# phone = "+591-3-123-4567"    # optional

[sales]
currency = "BOB"
currency_symbol = "Bs. "
"#;

/// Template content for products.toml
pub const PRODUCTS_TEMPLATE: &str = r#"# Define your products here. The table name (e.g., [porcion]) is used
# as the product identifier in the tally and record commands.
#
# Example:
#   polleria tally --item porcion:3 --item coca-cola:2
#
# Valid categories: "pollo", "bebida"

[porcion]
name = "Porción"
price = 12.00
category = "pollo"

[cuarto]
name = "Cuarto"
price = 25.00
category = "pollo"

[medio-pollo]
name = "Medio Pollo"
price = 45.00
category = "pollo"

[pollo-entero]
name = "Pollo Entero"
price = 85.00
category = "pollo"

[coca-cola]
name = "Coca Cola"
price = 8.00
category = "bebida"

[fanta]
name = "Fanta"
price = 8.00
category = "bebida"

[sprite]
name = "Sprite"
price = 8.00
category = "bebida"

[agua]
name = "Agua"
price = 5.00
category = "bebida"
"#;
