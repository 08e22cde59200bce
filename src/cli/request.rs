//! Generic authenticated request command

use reqwest::Method;

use crate::cli::{CommandContext, RequestArgs};
use crate::output;
use veritas_client::{Error, RequestDescriptor, Result};

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| Error::Other(format!("Invalid HTTP method: {}", method)))
}

/// Build the descriptor for a raw request
fn descriptor_for(args: &RequestArgs) -> Result<RequestDescriptor> {
    let descriptor = RequestDescriptor::new(parse_method(&args.method)?, args.path.clone());

    match &args.data {
        Some(data) => Ok(descriptor.with_json(serde_json::from_str(data)?)),
        None => Ok(descriptor),
    }
}

/// Run the request command
pub async fn run(ctx: &CommandContext, args: RequestArgs) -> Result<()> {
    let descriptor = descriptor_for(&args)?;
    let response = ctx.client.request(descriptor).await?;
    output::print(&response.body, ctx.format)
}
