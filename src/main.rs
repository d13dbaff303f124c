use anyhow::Context;
use cryptorisk::config::ConfigManager;
use cryptorisk::data::{CsvConnector, SeriesAligner};
use cryptorisk::engines::metrics::MetricsEngine;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?;
    }
    let config = manager.get();

    let mut series = Vec::with_capacity(config.data.assets.len());
    for asset in &config.data.assets {
        let path = Path::new(&config.data.data_dir).join(format!("{}.csv", asset));
        let loaded = CsvConnector::load_series(&path, asset)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        log::info!("Loaded {} price points for {}", loaded.len(), asset);
        series.push(loaded);
    }

    let table = SeriesAligner::align(&series);
    if table.is_empty() {
        anyhow::bail!("No shared timestamps across the configured assets");
    }
    log::info!(
        "Aligned {} assets over {} shared timestamps",
        table.assets().len(),
        table.len()
    );

    let engine = MetricsEngine::new(config.analysis.clone())?;
    let report = engine.compute_table(&table)?;

    CsvConnector::write_metrics(&config.data.metrics_path, &report.records)?;
    log::info!(
        "Wrote {} metric records to {} ({} assets skipped)",
        report.records.len(),
        config.data.metrics_path,
        report.failures.len()
    );

    Ok(())
}
