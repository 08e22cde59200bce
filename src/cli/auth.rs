//! Login, signup and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde_json::json;

use crate::cli::{CommandContext, LoginArgs, OutputFormat, SignupArgs};
use crate::output;
use veritas_client::client::SignupRequest;
use veritas_client::navigation::dashboard_for;
use veritas_client::{AuthApi, Navigator, Result};

/// Run the login command
pub async fn login(ctx: &CommandContext, args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    if ctx.format == OutputFormat::Pretty {
        println!("{}", "Authenticating...".cyan());
    }

    let token = ctx.client.login(&email, &password).await?;
    let dashboard = args.role.map(dashboard_for);

    match ctx.format {
        OutputFormat::Json => output::print(
            &json!({
                "email": email,
                "token_type": token.token_type,
                "view": ctx.navigator.current(),
                "dashboard": dashboard,
            }),
            ctx.format,
        ),
        OutputFormat::Pretty => {
            println!("{} Signed in as {}", "✓".green(), email.bold());
            println!("  Session saved to: {}", ctx.session.path().display());
            if let Some(dashboard) = dashboard {
                println!("  Dashboard: {}", dashboard.label());
            }
            Ok(())
        }
    }
}

/// Run the signup command
pub async fn signup(ctx: &CommandContext, args: SignupArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose a password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let profile = SignupRequest {
        email: args.email,
        password,
        first_name: args.first_name,
        last_name: args.last_name,
        role: args.role,
    };

    let ack = ctx.client.signup(&profile).await?;

    match ctx.format {
        OutputFormat::Json => output::print(&ack, ctx.format),
        OutputFormat::Pretty => {
            println!(
                "{} Account created for {} ({})",
                "✓".green(),
                profile.email.bold(),
                profile.role.label()
            );
            println!("  Run {} to sign in.", "veritas login".cyan());
            Ok(())
        }
    }
}

/// Run the logout command
pub async fn logout(ctx: &CommandContext) -> Result<()> {
    ctx.client.logout().await?;

    match ctx.format {
        OutputFormat::Json => output::print(&json!({ "signed_out": true }), ctx.format),
        OutputFormat::Pretty => {
            println!("{} Signed out", "✓".green());
            Ok(())
        }
    }
}
