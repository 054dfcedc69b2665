//! Health command - check the server is reachable

use anyhow::{Context, Result};
use mosaic_client::MosaicClient;

use crate::output::OutputContext;

pub async fn health(client: &MosaicClient, ctx: &OutputContext) -> Result<()> {
    let status = client
        .health()
        .await
        .with_context(|| format!("Server at {} is not healthy", client.base_url()))?;

    if !ctx.quiet {
        println!("{}: {}", client.base_url(), status.trim());
    }
    Ok(())
}
