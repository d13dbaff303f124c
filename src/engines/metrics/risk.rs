use crate::config::RiskThresholds;
use crate::error::{CryptoRiskError, Result};
use crate::types::{RiskLevel, RollingVolatility};

use super::returns::ReturnMetrics;

pub struct RiskMetrics;

impl RiskMetrics {
    /// Bessel-corrected (n-1) sample standard deviation.
    ///
    /// Needs at least two values; the standard deviation of a single sample
    /// has no convention here, so fewer is an error rather than zero.
    pub fn sample_std(asset: &str, values: &[f64]) -> Result<f64> {
        if values.len() < 2 {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: {} returns, at least 2 required for volatility",
                asset,
                values.len()
            )));
        }

        Ok(Self::std_of(values))
    }

    // Caller guarantees at least two values.
    fn std_of(values: &[f64]) -> f64 {
        let mean = ReturnMetrics::mean(values);
        let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;

        variance.sqrt()
    }

    /// Annualized sample stdev over each trailing window of the return series.
    ///
    /// Output starts at return index `window - 1`; a series shorter than the
    /// window yields no values.
    pub fn rolling_volatility(
        returns: &[f64],
        window: usize,
        annualization_factor: f64,
    ) -> RollingVolatility {
        let scale = annualization_factor.sqrt();
        let values = if returns.len() < window || window < 2 {
            Vec::new()
        } else {
            returns
                .windows(window)
                .map(|w| Self::std_of(w) * scale)
                .collect()
        };

        RollingVolatility { window, values }
    }

    /// Beta of an asset's returns against a benchmark's returns, as sample
    /// covariance over sample variance.
    ///
    /// Returns `None` when the benchmark has zero variance (the ratio is
    /// undefined, which is a data condition, not a failure). The caller is
    /// responsible for short-circuiting beta = 1 when asset and benchmark are
    /// the same series.
    pub fn beta(asset: &str, returns: &[f64], benchmark_returns: &[f64]) -> Result<Option<f64>> {
        if returns.len() != benchmark_returns.len() {
            return Err(CryptoRiskError::MisalignedSeries(format!(
                "{}: {} returns vs {} benchmark returns",
                asset,
                returns.len(),
                benchmark_returns.len()
            )));
        }
        if returns.len() < 2 {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: {} returns, at least 2 required for beta",
                asset,
                returns.len()
            )));
        }

        let mean_a = ReturnMetrics::mean(returns);
        let mean_b = ReturnMetrics::mean(benchmark_returns);
        let n = (returns.len() - 1) as f64;

        let covariance = returns
            .iter()
            .zip(benchmark_returns)
            .map(|(&a, &b)| (a - mean_a) * (b - mean_b))
            .sum::<f64>()
            / n;
        let variance = benchmark_returns
            .iter()
            .map(|&b| (b - mean_b).powi(2))
            .sum::<f64>()
            / n;

        if variance == 0.0 {
            return Ok(None);
        }

        Ok(Some(covariance / variance))
    }

    /// Historical Value-at-Risk at the given confidence level.
    ///
    /// Takes the linear-interpolated empirical quantile of the returns at
    /// position `confidence * (n - 1)` over the sorted sample, and reports it
    /// as a non-negative loss magnitude: `max(-quantile, 0)`. A quantile that
    /// is already a gain reports zero potential loss.
    pub fn value_at_risk(asset: &str, returns: &[f64], confidence: f64) -> Result<f64> {
        if returns.is_empty() {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: no returns for value at risk",
                asset
            )));
        }

        let mut sorted = returns.to_vec();
        // Log returns of validated prices are always finite.
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let position = confidence * (sorted.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        let quantile = if lower == upper {
            sorted[lower]
        } else {
            sorted[lower] + (position - lower as f64) * (sorted[upper] - sorted[lower])
        };

        Ok((-quantile).max(0.0))
    }

    /// Classify annualized volatility into {Low, Medium, High}.
    pub fn classify(annual_volatility: f64, thresholds: &RiskThresholds) -> RiskLevel {
        if annual_volatility <= thresholds.low {
            RiskLevel::Low
        } else if annual_volatility <= thresholds.high {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}
