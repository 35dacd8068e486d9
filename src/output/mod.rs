mod json;
mod table;

pub use json::{listing_json, write_json};
pub use table::{format_table, TABLE_TITLES};
