//! Output formatting for CLI results.

pub mod abi;
pub mod report;

pub use abi::format_abi;
pub use report::{format_json, format_table, RateReport};
