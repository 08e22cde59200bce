//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use veritas_client::Role;
use veritas_client::client::EmployeeCounts;

pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod firm;
pub mod request;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Veritas CLI - command-line companion for the Veritas legal platform
#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "VERITAS_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "VERITAS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API host (e.g. http://localhost:8000)
    #[arg(long, global = true, env = "VERITAS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VERITAS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Register a new account
    Signup(SignupArgs),

    /// Configure your firm after registration
    SetupFirm(SetupFirmArgs),

    /// Sign out and forget the session token
    Logout,

    /// Send an authenticated request to any API path
    Request(RequestArgs),

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email (prompted if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted if omitted)
    #[arg(long, env = "VERITAS_PASSWORD", hide_env = true)]
    pub password: Option<String>,

    /// Your designation, used to pick the dashboard
    #[arg(long, value_enum)]
    pub role: Option<Role>,
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Professional designation
    #[arg(long, value_enum, default_value = "lawyer")]
    pub role: Role,

    /// Password (prompted if omitted)
    #[arg(long, env = "VERITAS_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetupFirmArgs {
    /// Firm name
    #[arg(long)]
    pub name: String,

    /// Governing jurisdiction
    #[arg(long)]
    pub jurisdiction: String,

    /// IANA timezone
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// Billing currency
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Practice area (repeatable)
    #[arg(long = "practice-area")]
    pub practice_areas: Vec<String>,

    #[arg(long, default_value_t = EmployeeCounts::default().lawyer)]
    pub lawyers: u32,

    #[arg(long, default_value_t = EmployeeCounts::default().paralegal)]
    pub paralegals: u32,

    #[arg(long, default_value_t = EmployeeCounts::default().admin)]
    pub admins: u32,

    #[arg(long, default_value_t = EmployeeCounts::default().other)]
    pub other: u32,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Path relative to /api/v1, e.g. /cases
    pub path: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,
}
