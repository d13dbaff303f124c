use crate::error::{CryptoRiskError, Result};
use crate::types::{MetricsRecord, PricePoint, PriceSeries, RiskLevel};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

const DATE_ALIASES: [&str; 4] = ["date", "Date", "timestamp", "Timestamp"];
const PRICE_ALIASES: [&str; 4] = ["price", "Price", "close", "Close"];

/// Metrics report columns, in the order downstream dashboards expect them.
const METRICS_COLUMNS: [&str; 7] = [
    "Asset",
    "Daily Volatility",
    "Annual Volatility",
    "Sharpe Ratio",
    "Beta",
    "Value at Risk",
    "Risk Level",
];

pub struct CsvConnector;

impl CsvConnector {
    /// Load a CSV file into a DataFrame.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| CryptoRiskError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load one asset's `date,price` CSV into a validated price series.
    pub fn load_series<P: AsRef<Path>>(path: P, asset: &str) -> Result<PriceSeries> {
        let df = Self::load(&path)?;

        let date_col = Self::find_column(&df, &DATE_ALIASES).ok_or_else(|| {
            CryptoRiskError::DataLoading(format!(
                "{}: missing date column (tried {:?})",
                asset, DATE_ALIASES
            ))
        })?;
        let price_col = Self::find_column(&df, &PRICE_ALIASES).ok_or_else(|| {
            CryptoRiskError::DataLoading(format!(
                "{}: missing price column (tried {:?})",
                asset, PRICE_ALIASES
            ))
        })?;

        let dates = df.column(date_col)?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let prices = df.column(price_col)?.cast(&DataType::Float64)?;
        let prices = prices.f64()?;

        let null_count = prices.null_count();
        if null_count > 0 {
            return Err(CryptoRiskError::InvalidPrice(format!(
                "{}: {} null prices in {}",
                asset,
                null_count,
                path.as_ref().display()
            )));
        }

        let mut points = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw_date = dates.get(i).ok_or_else(|| {
                CryptoRiskError::DataLoading(format!("{}: null date at row {}", asset, i))
            })?;
            let timestamp = Self::parse_date(raw_date).map_err(|_| {
                CryptoRiskError::DataLoading(format!(
                    "{}: unparseable date '{}' at row {}",
                    asset, raw_date, i
                ))
            })?;
            // Null prices were rejected above.
            let price = prices.get(i).unwrap();
            points.push(PricePoint::new(timestamp, price));
        }

        PriceSeries::new(asset, points)
    }

    /// Serialize metrics records into the flat report table.
    ///
    /// Undefined Sharpe/beta become nulls; all floats keep full precision.
    pub fn metrics_to_dataframe(records: &[MetricsRecord]) -> Result<DataFrame> {
        let assets: Vec<&str> = records.iter().map(|r| r.asset.as_str()).collect();
        let daily: Vec<f64> = records.iter().map(|r| r.daily_volatility).collect();
        let annual: Vec<f64> = records.iter().map(|r| r.annual_volatility).collect();
        let sharpe: Vec<Option<f64>> = records.iter().map(|r| r.sharpe_ratio).collect();
        let beta: Vec<Option<f64>> = records.iter().map(|r| r.beta).collect();
        let var: Vec<f64> = records.iter().map(|r| r.value_at_risk).collect();
        let risk: Vec<&str> = records.iter().map(|r| r.risk_level.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::new(METRICS_COLUMNS[0].into(), assets),
            Column::new(METRICS_COLUMNS[1].into(), daily),
            Column::new(METRICS_COLUMNS[2].into(), annual),
            Column::new(METRICS_COLUMNS[3].into(), sharpe),
            Column::new(METRICS_COLUMNS[4].into(), beta),
            Column::new(METRICS_COLUMNS[5].into(), var),
            Column::new(METRICS_COLUMNS[6].into(), risk),
        ])?;

        Ok(df)
    }

    /// Parse a report table back into metrics records.
    pub fn metrics_from_dataframe(df: &DataFrame) -> Result<Vec<MetricsRecord>> {
        for name in METRICS_COLUMNS {
            if !df.get_column_names().iter().any(|c| c.as_str() == name) {
                return Err(CryptoRiskError::DataLoading(format!(
                    "Metrics table is missing column '{}'",
                    name
                )));
            }
        }

        let assets = df.column(METRICS_COLUMNS[0])?.cast(&DataType::String)?;
        let assets = assets.str()?;
        let daily = df.column(METRICS_COLUMNS[1])?.cast(&DataType::Float64)?;
        let daily = daily.f64()?;
        let annual = df.column(METRICS_COLUMNS[2])?.cast(&DataType::Float64)?;
        let annual = annual.f64()?;
        let sharpe = df.column(METRICS_COLUMNS[3])?.cast(&DataType::Float64)?;
        let sharpe = sharpe.f64()?;
        let beta = df.column(METRICS_COLUMNS[4])?.cast(&DataType::Float64)?;
        let beta = beta.f64()?;
        let var = df.column(METRICS_COLUMNS[5])?.cast(&DataType::Float64)?;
        let var = var.f64()?;
        let risk = df.column(METRICS_COLUMNS[6])?.cast(&DataType::String)?;
        let risk = risk.str()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let missing = |col: &str| {
                CryptoRiskError::DataLoading(format!("Null '{}' at row {} of metrics table", col, i))
            };
            records.push(MetricsRecord {
                asset: assets.get(i).ok_or_else(|| missing("Asset"))?.to_string(),
                daily_volatility: daily.get(i).ok_or_else(|| missing("Daily Volatility"))?,
                annual_volatility: annual.get(i).ok_or_else(|| missing("Annual Volatility"))?,
                sharpe_ratio: sharpe.get(i),
                beta: beta.get(i),
                value_at_risk: var.get(i).ok_or_else(|| missing("Value at Risk"))?,
                risk_level: RiskLevel::parse(risk.get(i).ok_or_else(|| missing("Risk Level"))?)?,
            });
        }

        Ok(records)
    }

    /// Write the metrics report to a CSV file.
    pub fn write_metrics<P: AsRef<Path>>(path: P, records: &[MetricsRecord]) -> Result<()> {
        let mut df = Self::metrics_to_dataframe(records)?;
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| CryptoRiskError::DataLoading(format!("Failed to write CSV: {}", e)))?;
        Ok(())
    }

    /// Read a metrics report CSV back into records.
    pub fn read_metrics<P: AsRef<Path>>(path: P) -> Result<Vec<MetricsRecord>> {
        let df = Self::load(path)?;
        Self::metrics_from_dataframe(&df)
    }

    fn find_column<'a>(df: &'a DataFrame, aliases: &[&'a str]) -> Option<&'a str> {
        let columns = df.get_column_names();
        aliases
            .iter()
            .find(|&&alias| columns.iter().any(|col| col.as_str() == alias))
            .copied()
    }

    fn parse_date(raw: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
        // Accept bare dates and datetime strings with a time component.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
    }
}
