//! Status command implementation

use colored::Colorize;
use serde_json::json;

use crate::cli::{CommandContext, OutputFormat};
use crate::output;
use veritas_client::{Result, SessionStore};

/// Run the status command to display configuration and session status
pub fn run(ctx: &CommandContext) -> Result<()> {
    let config_exists = ctx.config_path.exists();
    let signed_in = ctx.session.get().is_some();
    let updated_at = ctx.session.updated_at();

    if ctx.format == OutputFormat::Json {
        return output::print(
            &json!({
                "config_path": ctx.config_path.display().to_string(),
                "config_found": config_exists,
                "api_base_url": ctx.base_url,
                "session_path": ctx.session.path().display().to_string(),
                "signed_in": signed_in,
                "session_updated_at": updated_at,
            }),
            ctx.format,
        );
    }

    println!("{}\n", "Veritas Client Status".bold());

    if config_exists {
        println!("Config file: {}", ctx.config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            ctx.config_path.display(),
            "(not found, using defaults)".dimmed()
        );
    }
    println!("API: {}", ctx.base_url.cyan());
    println!();

    if signed_in {
        match updated_at {
            Some(at) => println!(
                "{} Signed in (session saved {})",
                "✓".green(),
                at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("{} Signed in", "✓".green()),
        }
    } else {
        println!("{} Not signed in", "✗".red());
        println!("  → Run 'veritas login' to sign in");
    }

    if let Some(timeout) = ctx.config.timeout() {
        println!("{} Request timeout: {}s", "○".dimmed(), timeout.as_secs());
    }

    println!();
    Ok(())
}
