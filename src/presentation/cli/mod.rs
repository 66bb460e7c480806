//! CLI module

mod commands;
mod output;

pub use commands::{Cli, Commands};
pub use output::{format_report_details, format_report_table};
