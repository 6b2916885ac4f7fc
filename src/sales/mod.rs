pub mod business_day;
mod entry;

pub use entry::{commit_sale, parse_item_input, record_sale, reset_draft, tally_items};
