//! Veritas CLI - command-line companion for the Veritas legal platform

use clap::Parser;
use colored::Colorize;

mod cli;
mod output;

use cli::{Cli, CommandContext, Commands, GlobalOptions};
use veritas_client::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("veritas version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::print(shell);
            Ok(())
        }
        command => {
            let ctx = CommandContext::new(&opts)?;
            let result = dispatch(&ctx, command).await;

            if ctx.is_offline() {
                output::print_offline_notice();
            }
            result
        }
    }
}

async fn dispatch(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => cli::auth::login(ctx, args).await,
        Commands::Signup(args) => cli::auth::signup(ctx, args).await,
        Commands::SetupFirm(args) => cli::firm::setup(ctx, args).await,
        Commands::Logout => cli::auth::logout(ctx).await,
        Commands::Request(args) => cli::request::run(ctx, args).await,
        Commands::Status => cli::status::run(ctx),
        // Handled before a context is built
        Commands::Version | Commands::Completion { .. } => Ok(()),
    }
}
