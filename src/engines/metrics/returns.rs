use crate::error::{CryptoRiskError, Result};

pub struct ReturnMetrics;

impl ReturnMetrics {
    /// Log returns of a price series: `r[i] = ln(price[i] / price[i-1])`.
    ///
    /// The result has one fewer element than the input. Needs at least two
    /// prices, all positive and finite.
    pub fn log_returns(asset: &str, prices: &[f64]) -> Result<Vec<f64>> {
        if prices.len() < 2 {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: {} prices, at least 2 required for returns",
                asset,
                prices.len()
            )));
        }

        for (i, &price) in prices.iter().enumerate() {
            if !price.is_finite() || price <= 0.0 {
                return Err(CryptoRiskError::InvalidPrice(format!(
                    "{}: price {} at index {} must be positive and finite",
                    asset, price, i
                )));
            }
        }

        Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
    }

    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}
