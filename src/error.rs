use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoRiskError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Misaligned series: {0}")]
    MisalignedSeries(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CryptoRiskError>;
