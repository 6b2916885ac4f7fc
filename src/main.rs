mod chart;
mod config;
mod error;
mod report;
mod sales;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::chart::render_bar_chart;
use crate::config::{
    config_dir, is_known_category, is_valid_product_id, load_config, load_products, load_state,
    save_products, Config, Product, SaleRecord, CATEGORIES, CONFIG_TEMPLATE, PRODUCTS_TEMPLATE,
};
use crate::error::{PosError, Result};
use crate::report::{
    day_totals, running_total, summarize, weekday_labels, weekly_series, yesterday_totals,
};
use crate::sales::business_day;
use crate::sales::{commit_sale, record_sale, reset_draft, tally_items};

#[derive(Parser)]
#[command(name = "polleria")]
#[command(version, about = "Minimal CLI point-of-sale for a rotisserie chicken shop", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.polleria or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List the product catalog
    Products,

    /// Register a new product in the catalog
    AddProduct {
        /// Product identifier (e.g., 'pollo-entero')
        #[arg(long)]
        id: String,

        /// Display name (e.g., 'Pollo Entero')
        #[arg(long)]
        name: String,

        /// Unit price (e.g., 85.00)
        #[arg(long)]
        price: f64,

        /// Category: 'pollo' or 'bebida'
        #[arg(long)]
        category: String,
    },

    /// Add quantities to the day's draft tally
    Tally {
        /// Items in format "product:quantity" (can be repeated)
        #[arg(short, long, value_name = "PRODUCT:QTY")]
        item: Vec<String>,

        /// Subtract the quantities instead, flooring at 0
        #[arg(long)]
        remove: bool,
    },

    /// Show the draft tally and its running total
    Draft,

    /// Discard the draft tally
    Reset,

    /// Commit the draft tally as one sale record and clear it
    Commit {
        /// Business day to record under (default: today in shop time)
        #[arg(long)]
        date: Option<String>,
    },

    /// Record a sale directly, without touching the draft tally
    Record {
        /// Items in format "product:quantity" (can be repeated)
        #[arg(short, long, value_name = "PRODUCT:QTY")]
        item: Vec<String>,

        /// Business day to record under (default: today in shop time)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show yesterday's income and today's progress
    Dashboard {
        /// Reference instant, RFC 3339 (default: now)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show the income bar chart for the last days
    Week {
        /// Number of trailing business days to chart
        #[arg(short, long, default_value_t = 7)]
        days: usize,

        /// Reference instant, RFC 3339 (default: now)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// List recorded sales
    List {
        /// Number of sales to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show shop status and record counts
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Products => cmd_products(&cfg_dir),
        Commands::AddProduct {
            id,
            name,
            price,
            category,
        } => cmd_add_product(&cfg_dir, &id, &name, price, &category),
        Commands::Tally { item, remove } => cmd_tally(&cfg_dir, &item, remove),
        Commands::Draft => cmd_draft(&cfg_dir),
        Commands::Reset => cmd_reset(&cfg_dir),
        Commands::Commit { date } => cmd_commit(&cfg_dir, date),
        Commands::Record { item, date } => cmd_record(&cfg_dir, &item, date),
        Commands::Dashboard { as_of } => cmd_dashboard(&cfg_dir, as_of),
        Commands::Week { days, as_of } => cmd_week(&cfg_dir, days, as_of),
        Commands::List { limit } => cmd_list(&cfg_dir, limit),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(PosError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("products.toml"), PRODUCTS_TEMPLATE)?;

    println!("Initialized polleria config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your shop details:     $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Adjust your products:       $EDITOR {}/products.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then start tallying the day's sales:");
    println!("  polleria tally --item <product>:<quantity>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
}

#[derive(Tabled)]
struct DraftRow {
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "QTY")]
    qty: u32,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "SUBTOTAL")]
    subtotal: String,
}

#[derive(Tabled)]
struct SaleRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "DAY")]
    day: String,
    #[tabled(rename = "ITEMS")]
    items: u32,
    #[tabled(rename = "TOTAL")]
    total: String,
}

fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Fetch the current USD rate for the shop currency from the open
/// exchange-rate API. Returns None on any failure (network, timeout,
/// parse error) so the caller can silently skip the USD line.
fn fetch_usd_rate(currency: &str) -> Option<f64> {
    use std::time::Duration;
    use ureq::Agent;

    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(3)))
        .build()
        .into();

    let body: String = agent
        .get("https://open.er-api.com/v6/latest/USD")
        .call()
        .ok()?
        .body_mut()
        .read_to_string()
        .ok()?;

    let json: serde_json::Value = serde_json::from_str(&body).ok()?;
    json["rates"][currency].as_f64()
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| PosError::InvalidDate(input.to_string()))
}

fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| PosError::InvalidInstant(input.to_string()))
}

fn as_of_or_now(as_of: Option<String>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(s) => parse_instant(&s),
        None => Ok(Utc::now()),
    }
}

/// List the product catalog
fn cmd_products(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let products = load_products(cfg_dir)?;

    if products.is_empty() {
        println!("No products configured.");
        println!("Add products to: {}/products.toml", cfg_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = products.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<ProductRow> = sorted
        .iter()
        .map(|(id, product)| ProductRow {
            id: id.to_string(),
            name: product.name.clone(),
            price: format_money(&config.sales.currency_symbol, product.price),
            category: product.category.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Register a new product in the catalog
fn cmd_add_product(
    cfg_dir: &PathBuf,
    id: &str,
    name: &str,
    price: f64,
    category: &str,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let mut products = load_products(cfg_dir)?;

    if !is_valid_product_id(id) {
        return Err(PosError::InvalidProductId(id.to_string()));
    }
    if products.contains_key(id) {
        return Err(PosError::DuplicateProduct(id.to_string()));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(PosError::EmptyProductName);
    }

    if !price.is_finite() || price < 0.0 {
        return Err(PosError::InvalidPrice(format!("{price}")));
    }

    if !is_known_category(category) {
        return Err(PosError::UnknownCategory {
            given: category.to_string(),
            valid: CATEGORIES.join(", "),
        });
    }

    products.insert(
        id.to_string(),
        Product {
            name: name.to_string(),
            price,
            category: category.to_string(),
        },
    );
    save_products(cfg_dir, &products)?;

    println!("Registered '{id}'");
    println!("  Name:      {name}");
    println!(
        "  Price:     {}",
        format_money(&config.sales.currency_symbol, price)
    );
    println!("  Category:  {category}");

    Ok(())
}

/// Add quantities to the draft tally
fn cmd_tally(cfg_dir: &PathBuf, items: &[String], remove: bool) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let state = tally_items(cfg_dir, items, remove)?;

    let config = load_config(cfg_dir)?;
    let products = load_products(cfg_dir)?;
    let units: u32 = state.draft.values().sum();
    let running = running_total(&products, &state.draft);

    println!("Draft updated");
    println!("  Items:    {units} products");
    println!(
        "  Running:  {}",
        format_money(&config.sales.currency_symbol, running)
    );

    Ok(())
}

/// Show the draft tally and its running total
fn cmd_draft(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let products = load_products(cfg_dir)?;
    let state = load_state(cfg_dir)?;

    if state.draft.is_empty() {
        println!("Nothing tallied yet.");
        println!("Use 'polleria tally --item <product>:<quantity>' to start.");
        return Ok(());
    }

    let rows: Vec<DraftRow> = state
        .draft
        .iter()
        .filter_map(|(id, &qty)| {
            products.get(id).map(|product| DraftRow {
                product: product.name.clone(),
                qty,
                price: format_money(&config.sales.currency_symbol, product.price),
                subtotal: format_money(&config.sales.currency_symbol, product.price * qty as f64),
            })
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let units: u32 = state.draft.values().sum();
    let running = running_total(&products, &state.draft);
    println!();
    println!(
        "Running total: {} ({units} products)",
        format_money(&config.sales.currency_symbol, running)
    );

    Ok(())
}

/// Discard the draft tally
fn cmd_reset(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    reset_draft(cfg_dir)?;
    println!("Draft cleared.");

    Ok(())
}

fn print_sale_confirmation(config: &Config, record: &SaleRecord) {
    let (_, full_day) = weekday_labels(record.date);
    println!("Recorded sales for {} ({})", record.date, full_day);
    println!("  Items:  {} products", record.units_sold());
    println!(
        "  Total:  {}",
        format_money(&config.sales.currency_symbol, record.total)
    );
}

/// Commit the draft tally as one sale record
fn cmd_commit(cfg_dir: &PathBuf, date: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let date = date.as_deref().map(parse_date).transpose()?;
    let config = load_config(cfg_dir)?;
    let record = commit_sale(cfg_dir, date)?;

    print_sale_confirmation(&config, &record);

    Ok(())
}

/// Record a sale directly from item inputs
fn cmd_record(cfg_dir: &PathBuf, items: &[String], date: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let date = date.as_deref().map(parse_date).transpose()?;
    let config = load_config(cfg_dir)?;
    let record = record_sale(cfg_dir, items, date)?;

    print_sale_confirmation(&config, &record);

    Ok(())
}

/// Show yesterday's income and today's progress
fn cmd_dashboard(cfg_dir: &PathBuf, as_of: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;
    let as_of = as_of_or_now(as_of)?;

    let yesterday = business_day::yesterday_of(as_of);
    let today = business_day::business_day(as_of);
    let (_, yesterday_name) = weekday_labels(yesterday);
    let (_, today_name) = weekday_labels(today);

    let totals = yesterday_totals(&state.history, as_of);
    let today_so_far = day_totals(&state.history, today);

    let symbol = &config.sales.currency_symbol;

    println!("Dashboard - {}", config.shop.name);
    println!("{}", "-".repeat(50));
    println!(
        "Yesterday:     {} {}",
        yesterday_name,
        yesterday.format("%d/%m")
    );
    println!("  Income:      {}", format_money(symbol, totals.income));
    println!("  Items sold:  {}", totals.units_sold);

    // Best-effort USD equivalent, skipped on any fetch failure
    if totals.income > 0.0 {
        if let Some(rate) = fetch_usd_rate(&config.sales.currency) {
            println!(
                "  In USD:      $ {:.2} (1 USD = {:.2} {})",
                totals.income / rate,
                rate,
                config.sales.currency
            );
        }
    }

    println!(
        "Today so far:  {} ({} {})",
        format_money(symbol, today_so_far.income),
        today_name,
        today.format("%d/%m")
    );

    Ok(())
}

/// Show the weekly income bar chart and its summary
fn cmd_week(cfg_dir: &PathBuf, days: usize, as_of: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;
    let as_of = as_of_or_now(as_of)?;

    // The report window ends on the as-of business day
    let cutoff = business_day::business_day(as_of);
    let window: Vec<SaleRecord> = state
        .history
        .iter()
        .filter(|record| record.date <= cutoff)
        .cloned()
        .collect();

    let series = weekly_series(&window, days);

    println!("Sales by day - {}", config.shop.name);
    println!();

    if series.is_empty() {
        println!("No sales recorded in this window.");
        return Ok(());
    }

    print!(
        "{}",
        render_bar_chart(&series, &config.sales.currency_symbol)
    );

    let summary = summarize(&series);
    let symbol = &config.sales.currency_symbol;
    println!();
    println!("Week total:    {}", format_money(symbol, summary.total));
    println!("Daily average: {}", format_money(symbol, summary.average));
    println!("Best day:      {}", summary.best_day);

    Ok(())
}

/// List recorded sales, newest first
fn cmd_list(cfg_dir: &PathBuf, limit: Option<usize>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;

    if state.history.is_empty() {
        println!("No sales recorded yet.");
        return Ok(());
    }

    let sales: Vec<_> = state.history.iter().rev().enumerate().collect();
    let sales = match limit {
        Some(n) => &sales[..n.min(sales.len())],
        None => &sales[..],
    };

    let rows: Vec<SaleRow> = sales
        .iter()
        .map(|(idx, record)| {
            let (day, _) = weekday_labels(record.date);
            SaleRow {
                index: idx + 1,
                date: record.date.to_string(),
                day: day.to_string(),
                items: record.units_sold(),
                total: format_money(&config.sales.currency_symbol, record.total),
            }
        })
        .collect();

    let shown_total: f64 = sales.iter().map(|(_, record)| record.total).sum();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!(
        "Total: {} sales - {}",
        state.history.len(),
        format_money(&config.sales.currency_symbol, shown_total)
    );

    Ok(())
}

/// Show shop status and record counts
fn cmd_status(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PosError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let products = load_products(cfg_dir)?;
    let state = load_state(cfg_dir)?;

    println!("Pollería Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Shop:             {}", config.shop.name);
    println!("Products:         {}", products.len());
    println!("Sales recorded:   {}", state.history.len());

    if state.draft.is_empty() {
        println!("Draft:            empty");
    } else {
        let units: u32 = state.draft.values().sum();
        let running = running_total(&products, &state.draft);
        println!(
            "Draft:            {units} products ({})",
            format_money(&config.sales.currency_symbol, running)
        );
    }

    if let Some(last) = state.history.last() {
        println!(
            "Last sale:        {} - {}",
            last.date,
            format_money(&config.sales.currency_symbol, last.total)
        );
    }

    Ok(())
}
