use anyhow::Result;

use crate::config::Config;

/// Authorize (or refresh) both vendor accounts without syncing anything.
pub async fn run(cfg: &Config) -> Result<()> {
    for vendor in [cfg.source_vendor(), cfg.destination_vendor()] {
        vendor.connect().await?;
        tracing::info!("{} is authorized", vendor.label);
    }

    Ok(())
}
