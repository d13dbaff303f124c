use crate::error::{CryptoRiskError, Result};
use crate::types::PricePoint;

pub struct SeriesValidator;

impl SeriesValidator {
    /// Validate a raw price history before it becomes a `PriceSeries`.
    ///
    /// Checks: non-empty, strictly increasing timestamps (which also rules
    /// out duplicates), and every price positive and finite.
    pub fn validate_points(asset: &str, points: &[PricePoint]) -> Result<()> {
        if points.is_empty() {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: price series is empty",
                asset
            )));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(CryptoRiskError::InvalidPrice(format!(
                    "{}: price {} at row {} ({}) must be positive and finite",
                    asset, point.price, i, point.timestamp
                )));
            }
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(CryptoRiskError::MisalignedSeries(format!(
                    "{}: timestamps must be strictly increasing, got {} after {} at row {}",
                    asset,
                    pair[1].timestamp,
                    pair[0].timestamp,
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Check for a minimum number of observations.
    pub fn validate_minimum_points(asset: &str, points: &[PricePoint], min: usize) -> Result<()> {
        if points.len() < min {
            return Err(CryptoRiskError::InsufficientData(format!(
                "{}: {} points, minimum {} required",
                asset,
                points.len(),
                min
            )));
        }
        Ok(())
    }
}
