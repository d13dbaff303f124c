use super::traits::ConfigSection;
use crate::error::CryptoRiskError;
use serde::{Deserialize, Serialize};

/// Where price CSVs live and which assets to analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory containing one `<asset>.csv` per asset.
    pub data_dir: String,
    /// Assets to load; must include the benchmark.
    pub assets: Vec<String>,
    /// Output path of the metrics report.
    pub metrics_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            assets: vec![
                "bitcoin".to_string(),
                "ethereum".to_string(),
                "solana".to_string(),
                "cardano".to_string(),
                "dogecoin".to_string(),
            ],
            metrics_path: "data/crypto_metrics.csv".to_string(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), CryptoRiskError> {
        if self.assets.is_empty() {
            return Err(CryptoRiskError::Configuration(
                "At least one asset must be configured".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for asset in &self.assets {
            if asset.trim().is_empty() {
                return Err(CryptoRiskError::Configuration(
                    "Asset names must not be empty".to_string(),
                ));
            }
            if !seen.insert(asset.as_str()) {
                return Err(CryptoRiskError::Configuration(format!(
                    "Duplicate asset in configuration: {}",
                    asset
                )));
            }
        }
        Ok(())
    }
}
