use crate::error::{CryptoRiskError, Result};
use crate::types::PriceSeries;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;

/// Price table with one row per timestamp and one column per asset.
///
/// Invariant: every asset has a price at every date. Rows where any asset was
/// missing are dropped during alignment, so all columns have the same length
/// as `dates`. Column order follows the order the series were supplied in.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    assets: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl AlignedTable {
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            assets: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Number of rows (shared timestamps).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn column(&self, asset: &str) -> Option<&[f64]> {
        self.assets
            .iter()
            .position(|a| a == asset)
            .map(|i| self.columns[i].as_slice())
    }

    /// Rebuild one asset's column as a standalone `PriceSeries`.
    pub fn series(&self, asset: &str) -> Result<PriceSeries> {
        let column = self.column(asset).ok_or_else(|| {
            CryptoRiskError::DataLoading(format!("Asset '{}' is not in the table", asset))
        })?;
        let points = self
            .dates
            .iter()
            .zip(column)
            .map(|(&d, &p)| crate::types::PricePoint::new(d, p))
            .collect();
        PriceSeries::new(asset, points)
    }

    /// Convert to a DataFrame with a string `Date` column, for CSV output.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self.dates.iter().map(|d| d.to_string()).collect();
        let mut cols: Vec<Column> = vec![Column::new("Date".into(), dates)];
        for (asset, prices) in self.assets.iter().zip(&self.columns) {
            cols.push(Column::new(asset.as_str().into(), prices.clone()));
        }
        Ok(DataFrame::new(cols)?)
    }
}

pub struct SeriesAligner;

impl SeriesAligner {
    /// Inner join of per-asset series on timestamp.
    ///
    /// Keeps exactly the dates present in every series, in ascending order.
    /// An empty input, or an empty intersection, yields an empty table;
    /// callers must check `is_empty` before computing metrics.
    pub fn align(series: &[PriceSeries]) -> AlignedTable {
        if series.is_empty() {
            return AlignedTable::empty();
        }

        let by_date: Vec<HashMap<NaiveDate, f64>> = series
            .iter()
            .map(|s| s.points().iter().map(|p| (p.timestamp, p.price)).collect())
            .collect();

        // Series are sorted, so walking the first one keeps dates ascending.
        let shared: Vec<NaiveDate> = series[0]
            .timestamps()
            .into_iter()
            .filter(|d| by_date.iter().all(|m| m.contains_key(d)))
            .collect();

        if shared.is_empty() {
            return AlignedTable::empty();
        }

        let assets: Vec<String> = series.iter().map(|s| s.asset().to_string()).collect();
        let columns: Vec<Vec<f64>> = by_date
            .iter()
            .map(|m| shared.iter().map(|d| m[d]).collect())
            .collect();

        AlignedTable {
            dates: shared,
            assets,
            columns,
        }
    }
}
