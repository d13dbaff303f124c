pub mod traits;
pub mod analysis;
pub mod data;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use analysis::{AnalysisConfig, RiskThresholds};
pub use data::DataConfig;
