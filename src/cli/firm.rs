//! Firm setup command

use colored::Colorize;
use log::warn;

use crate::cli::{CommandContext, OutputFormat, SetupFirmArgs};
use crate::output;
use veritas_client::client::{EmployeeCounts, FirmSetup, PRACTICE_AREAS};
use veritas_client::{AuthApi, Result};

impl From<SetupFirmArgs> for FirmSetup {
    fn from(args: SetupFirmArgs) -> Self {
        let mut firm = FirmSetup::new(args.name, args.jurisdiction);
        firm.timezone = args.timezone;
        firm.currency = args.currency;
        for area in &args.practice_areas {
            if !firm.practice_areas.contains(area) {
                firm.toggle_practice_area(area);
            }
        }
        firm.employee_counts = EmployeeCounts {
            lawyer: args.lawyers,
            paralegal: args.paralegals,
            admin: args.admins,
            other: args.other,
        };
        firm
    }
}

/// Run the setup-firm command
pub async fn setup(ctx: &CommandContext, args: SetupFirmArgs) -> Result<()> {
    let firm = FirmSetup::from(args);

    for area in &firm.practice_areas {
        if !PRACTICE_AREAS.contains(&area.as_str()) {
            warn!("'{}' is not a standard practice area", area);
        }
    }

    let ack = ctx.client.setup_firm(&firm).await?;

    match ctx.format {
        OutputFormat::Json => output::print(&ack, ctx.format),
        OutputFormat::Pretty => {
            println!("{} Firm {} configured", "✓".green(), firm.name.bold());
            println!("{}", output::pretty::render(&ack));
            Ok(())
        }
    }
}
