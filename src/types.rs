use crate::error::{CryptoRiskError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of an asset's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDate, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// A single asset's price history, sorted ascending by timestamp.
///
/// Construction validates the series: at least one point, strictly increasing
/// timestamps, every price positive and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    asset: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(asset: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let asset = asset.into();
        crate::data::SeriesValidator::validate_points(&asset, &points)?;
        Ok(Self { asset, points })
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.timestamp).collect()
    }
}

/// Discrete risk classification from annualized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(CryptoRiskError::DataLoading(format!(
                "Unknown risk level: {}",
                other
            ))),
        }
    }
}

/// Per-asset risk statistics.
///
/// `sharpe_ratio` and `beta` are `None` when the ratio is undefined: a
/// zero-volatility return series for Sharpe, a zero-variance benchmark (or no
/// benchmark supplied) for beta. This is a legitimate data condition, not an
/// error, and serializes as a null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub asset: String,
    pub daily_volatility: f64,
    pub annual_volatility: f64,
    pub sharpe_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub value_at_risk: f64,
    pub risk_level: RiskLevel,
}

/// Trailing-window annualized volatility over a return series.
///
/// `values[0]` corresponds to index `window - 1` of the return series; the
/// leading `window - 1` positions have no value (absent, not zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingVolatility {
    pub window: usize,
    pub values: Vec<f64>,
}

impl RollingVolatility {
    /// Number of leading return-series positions without a value.
    pub fn leading_gap(&self) -> usize {
        self.window - 1
    }
}
