//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use veritas_client::Result;

pub mod json;
pub mod pretty;

/// Format and print a payload to stdout
pub fn print<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    let output = match format {
        OutputFormat::Json => json::format_json(data)?,
        OutputFormat::Pretty => pretty::render(&serde_json::to_value(data)?),
    };
    println!("{}", output);
    Ok(())
}

/// Notice shown when the client gave up reaching the API
pub fn print_offline_notice() {
    eprintln!();
    eprintln!("{}", "You are offline".bold().yellow());
    eprintln!("It looks like you've lost your connection to Veritas.");
    eprintln!("Check your network, then run the command again to retry.");
    eprintln!();
}
