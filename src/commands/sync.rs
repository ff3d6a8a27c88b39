use anyhow::Result;
use calmirror_core::{StateStore, SyncEngine};

use crate::config::Config;

pub async fn run(cfg: &Config) -> Result<()> {
    let source = cfg.source_vendor().connect().await?;
    let destination = cfg.destination_vendor().connect().await?;

    let pair = cfg.vendor_pair();
    let engine = SyncEngine::new(pair.clone(), &source, &destination, cfg.sync.clone());
    let store = StateStore::new(&cfg.state_file);

    let report = engine.run(&store).await?;

    for direction in &report.directions {
        tracing::info!(
            "[{}] => [{}] {} imported",
            pair.label(direction.direction.from),
            pair.label(direction.direction.to),
            direction.imported
        );
    }

    Ok(())
}
