pub mod returns;
pub mod risk;
pub mod engine;

pub use returns::ReturnMetrics;
pub use risk::RiskMetrics;
pub use engine::{AssetFailure, BatchReport, MetricsEngine};
