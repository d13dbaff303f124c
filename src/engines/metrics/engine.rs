use crate::config::AnalysisConfig;
use crate::data::AlignedTable;
use crate::error::{CryptoRiskError, Result};
use crate::types::{MetricsRecord, RollingVolatility};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::returns::ReturnMetrics;
use super::risk::RiskMetrics;

/// Outcome of computing metrics across an aligned table. Assets that failed
/// are reported individually so a dashboard can skip them without losing the
/// rest of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<MetricsRecord>,
    pub failures: Vec<AssetFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFailure {
    pub asset: String,
    pub reason: String,
}

impl BatchReport {
    /// JSON form of the report, for presentation layers that don't read CSV.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct MetricsEngine {
    config: AnalysisConfig,
}

impl MetricsEngine {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        use crate::config::traits::ConfigSection;
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute the full metrics record for one asset.
    ///
    /// `benchmark_prices` must cover the same timestamps as `prices` (the
    /// aligner guarantees this for table columns); a return-count mismatch is
    /// a `MisalignedSeries` error. When the asset is itself the configured
    /// benchmark its beta is 1 by definition, with no covariance computed.
    /// With no benchmark supplied, beta is absent.
    pub fn compute(
        &self,
        asset: &str,
        prices: &[f64],
        benchmark_prices: Option<&[f64]>,
    ) -> Result<MetricsRecord> {
        let returns = ReturnMetrics::log_returns(asset, prices)?;
        let daily_volatility = RiskMetrics::sample_std(asset, &returns)?;

        let scale = self.config.annualization_factor.sqrt();
        let annual_volatility = daily_volatility * scale;

        let sharpe_ratio = if daily_volatility == 0.0 {
            None
        } else {
            Some(ReturnMetrics::mean(&returns) / daily_volatility * scale)
        };

        let beta = match benchmark_prices {
            None => None,
            Some(_) if asset == self.config.benchmark => Some(1.0),
            Some(bench) => {
                let benchmark_returns =
                    ReturnMetrics::log_returns(&self.config.benchmark, bench)?;
                RiskMetrics::beta(asset, &returns, &benchmark_returns)?
            }
        };

        let value_at_risk = RiskMetrics::value_at_risk(asset, &returns, self.config.confidence)?;
        let risk_level = RiskMetrics::classify(annual_volatility, &self.config.risk_thresholds);

        Ok(MetricsRecord {
            asset: asset.to_string(),
            daily_volatility,
            annual_volatility,
            sharpe_ratio,
            beta,
            value_at_risk,
            risk_level,
        })
    }

    /// Rolling annualized volatility of one asset's prices, using the
    /// configured window.
    pub fn rolling_volatility(&self, asset: &str, prices: &[f64]) -> Result<RollingVolatility> {
        let returns = ReturnMetrics::log_returns(asset, prices)?;
        Ok(RiskMetrics::rolling_volatility(
            &returns,
            self.config.rolling_window,
            self.config.annualization_factor,
        ))
    }

    /// Compute records for every asset in an aligned table against the
    /// configured benchmark.
    ///
    /// Assets are independent, so the fan-out runs in parallel. A failing
    /// asset is logged and reported in `failures` rather than aborting the
    /// batch.
    pub fn compute_table(&self, table: &AlignedTable) -> Result<BatchReport> {
        if table.is_empty() {
            return Err(CryptoRiskError::InsufficientData(
                "Aligned table is empty; no shared timestamps".to_string(),
            ));
        }

        let benchmark_prices = table.column(&self.config.benchmark).ok_or_else(|| {
            CryptoRiskError::Configuration(format!(
                "Benchmark '{}' is not a column of the aligned table",
                self.config.benchmark
            ))
        })?;

        let results: Vec<(String, Result<MetricsRecord>)> = table
            .assets()
            .par_iter()
            .map(|asset| {
                // Every table asset has a column by construction.
                let prices = table.column(asset).unwrap();
                (
                    asset.clone(),
                    self.compute(asset, prices, Some(benchmark_prices)),
                )
            })
            .collect();

        let mut records = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (asset, result) in results {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping {}: {}", asset, e);
                    failures.push(AssetFailure {
                        asset,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchReport { records, failures })
    }
}
