use super::traits::ConfigSection;
use crate::error::CryptoRiskError;
use serde::{Deserialize, Serialize};

/// Cutoffs for the three-level risk classification, applied to annualized
/// volatility: `<= low` is Low, `<= high` is Medium, above is High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { low: 0.4, high: 0.7 }
    }
}

/// Parameters of the metrics computation. Both 365 and 252 are in live use as
/// annualization factors (calendar-day vs. trading-day markets), and risk
/// cutoffs differ between deployments, so none of these are hardcoded in the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Asset whose returns beta is measured against.
    pub benchmark: String,
    /// Window size for rolling volatility, in periods.
    pub rolling_window: usize,
    /// VaR confidence level, e.g. 0.05 for the 5% quantile.
    pub confidence: f64,
    /// Periods per year used to scale daily statistics.
    pub annualization_factor: f64,
    pub risk_thresholds: RiskThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            benchmark: "bitcoin".to_string(),
            rolling_window: 30,
            confidence: 0.05,
            annualization_factor: 365.0,
            risk_thresholds: RiskThresholds::default(),
        }
    }
}

impl ConfigSection for AnalysisConfig {
    fn section_name() -> &'static str {
        "analysis"
    }

    fn validate(&self) -> Result<(), CryptoRiskError> {
        if self.benchmark.trim().is_empty() {
            return Err(CryptoRiskError::Configuration(
                "Benchmark asset must not be empty".to_string(),
            ));
        }
        if self.rolling_window < 2 {
            return Err(CryptoRiskError::Configuration(
                "Rolling window must be at least 2".to_string(),
            ));
        }
        if self.confidence <= 0.0 || self.confidence >= 1.0 {
            return Err(CryptoRiskError::Configuration(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }
        if self.annualization_factor <= 0.0 || !self.annualization_factor.is_finite() {
            return Err(CryptoRiskError::Configuration(
                "Annualization factor must be positive and finite".to_string(),
            ));
        }
        let t = &self.risk_thresholds;
        if !(t.low > 0.0 && t.high > t.low && t.high.is_finite()) {
            return Err(CryptoRiskError::Configuration(
                "Risk thresholds must satisfy 0 < low < high".to_string(),
            ));
        }
        Ok(())
    }
}
