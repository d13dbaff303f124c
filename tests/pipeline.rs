use chrono::NaiveDate;
use cryptorisk::config::{AnalysisConfig, RiskThresholds};
use cryptorisk::data::{CsvConnector, SeriesAligner};
use cryptorisk::engines::metrics::MetricsEngine;
use cryptorisk::error::CryptoRiskError;
use cryptorisk::types::{PricePoint, PriceSeries, RiskLevel};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn series(asset: &str, prices: &[f64]) -> PriceSeries {
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PricePoint::new(day(i as u32 + 1), p))
        .collect();
    PriceSeries::new(asset, points).unwrap()
}

fn engine() -> MetricsEngine {
    MetricsEngine::new(AnalysisConfig::default()).unwrap()
}

#[test]
fn test_daily_volatility_concrete_values() {
    // Prices [100, 110, 99]: returns are ln(1.1) and ln(0.9), and the sample
    // stdev of those two is 0.1418957...
    let record = engine().compute("bitcoin", &[100.0, 110.0, 99.0], None).unwrap();

    assert!((record.daily_volatility - 0.1418957).abs() < 1e-6);
    assert!(
        (record.annual_volatility - record.daily_volatility * 365.0f64.sqrt()).abs() < 1e-12
    );
    assert!(record.annual_volatility >= 0.0);
    assert!(record.sharpe_ratio.is_some());
    assert_eq!(record.beta, None);
}

#[test]
fn test_constant_price_series() {
    // Constant prices: zero volatility, Sharpe undefined, Low risk at the
    // default (0.4, 0.7) thresholds.
    let record = engine().compute("bitcoin", &[50.0, 50.0, 50.0, 50.0], None).unwrap();

    assert_eq!(record.daily_volatility, 0.0);
    assert_eq!(record.annual_volatility, 0.0);
    assert_eq!(record.sharpe_ratio, None);
    assert_eq!(record.risk_level, RiskLevel::Low);
}

#[test]
fn test_two_prices_fail_volatility() {
    // Two prices give exactly one return, enough for a return series but not
    // for a sample standard deviation.
    let result = engine().compute("bitcoin", &[100.0, 110.0], None);
    assert!(matches!(result, Err(CryptoRiskError::InsufficientData(_))));
}

#[test]
fn test_non_positive_price_fails() {
    let result = engine().compute("bitcoin", &[100.0, 0.0, 99.0], None);
    assert!(matches!(result, Err(CryptoRiskError::InvalidPrice(_))));
}

#[test]
fn test_compute_is_deterministic() {
    let prices = [100.0, 103.5, 98.7, 101.2, 99.9, 104.4];
    let benchmark = [50.0, 51.0, 49.5, 50.2, 50.8, 52.0];
    let engine = engine();

    let first = engine.compute("ethereum", &prices, Some(&benchmark)).unwrap();
    let second = engine.compute("ethereum", &prices, Some(&benchmark)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_annualization_factor_is_configurable() {
    let mut config = AnalysisConfig::default();
    config.annualization_factor = 252.0;
    let trading_days = MetricsEngine::new(config).unwrap();
    let calendar_days = engine();

    let prices = [100.0, 110.0, 99.0];
    let a = trading_days.compute("bitcoin", &prices, None).unwrap();
    let b = calendar_days.compute("bitcoin", &prices, None).unwrap();

    assert_eq!(a.daily_volatility, b.daily_volatility);
    assert!((a.annual_volatility - a.daily_volatility * 252.0f64.sqrt()).abs() < 1e-12);
    assert!(a.annual_volatility < b.annual_volatility);
}

#[test]
fn test_risk_thresholds_are_configurable() {
    let mut config = AnalysisConfig::default();
    config.risk_thresholds = RiskThresholds { low: 0.4, high: 0.8 };
    let engine = MetricsEngine::new(config).unwrap();

    // Alternating +/-0.04 log returns: daily vol just above 0.04, annual
    // around 0.774, which sits between the two observed high cutoffs.
    let prices: Vec<f64> = (0..40)
        .map(|i| if i % 2 == 0 { 100.0 } else { 100.0 * 0.04f64.exp() })
        .collect();
    let record = engine.compute("bitcoin", &prices, None).unwrap();
    let default_level = cryptorisk::engines::metrics::RiskMetrics::classify(
        record.annual_volatility,
        &RiskThresholds { low: 0.4, high: 0.7 },
    );

    assert!(record.annual_volatility > 0.7 && record.annual_volatility <= 0.8);
    assert_eq!(record.risk_level, RiskLevel::Medium);
    assert_eq!(default_level, RiskLevel::High);
}

#[test]
fn test_benchmark_beta_is_exactly_one() {
    let btc = series("bitcoin", &[100.0, 110.0, 99.0, 105.0]);
    let eth = series("ethereum", &[10.0, 10.5, 9.8, 10.2]);
    let table = SeriesAligner::align(&[btc, eth]);

    let report = engine().compute_table(&table).unwrap();

    assert!(report.failures.is_empty());
    let btc_record = report.records.iter().find(|r| r.asset == "bitcoin").unwrap();
    assert_eq!(btc_record.beta, Some(1.0));

    let eth_record = report.records.iter().find(|r| r.asset == "ethereum").unwrap();
    assert!(eth_record.beta.is_some());
    assert_ne!(eth_record.beta, Some(1.0));
}

#[test]
fn test_batch_over_misaligned_inputs() {
    // Series only overlap on days 2 and 3, which leaves too few shared
    // prices for volatility; every asset is skipped, none aborts the batch.
    let btc = PriceSeries::new(
        "bitcoin",
        vec![
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(2), 110.0),
            PricePoint::new(day(3), 99.0),
        ],
    )
    .unwrap();
    let eth = PriceSeries::new(
        "ethereum",
        vec![
            PricePoint::new(day(2), 10.0),
            PricePoint::new(day(3), 10.5),
            PricePoint::new(day(4), 9.8),
        ],
    )
    .unwrap();

    let table = SeriesAligner::align(&[btc, eth]);
    assert_eq!(table.len(), 2);

    let report = engine().compute_table(&table).unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 2);
}

#[test]
fn test_empty_table_is_an_error() {
    let result = engine().compute_table(&SeriesAligner::align(&[]));
    assert!(matches!(result, Err(CryptoRiskError::InsufficientData(_))));
}

#[test]
fn test_missing_benchmark_column_is_an_error() {
    let eth = series("ethereum", &[10.0, 10.5, 9.8]);
    let sol = series("solana", &[1.0, 1.1, 0.9]);
    let table = SeriesAligner::align(&[eth, sol]);

    let result = engine().compute_table(&table);
    assert!(matches!(result, Err(CryptoRiskError::Configuration(_))));
}

#[test]
fn test_rolling_volatility_through_engine() {
    let mut config = AnalysisConfig::default();
    config.rolling_window = 3;
    let engine = MetricsEngine::new(config).unwrap();

    // 6 prices -> 5 returns -> 3 rolling values with window 3.
    let prices = [100.0, 101.0, 99.5, 100.2, 100.9, 99.8];
    let rolling = engine.rolling_volatility("bitcoin", &prices).unwrap();

    assert_eq!(rolling.values.len(), 3);
    assert_eq!(rolling.leading_gap(), 2);
    assert!(rolling.values.iter().all(|v| *v >= 0.0));
}

#[test]
fn test_report_json_and_csv_round_trip() {
    let btc = series("bitcoin", &[100.0, 110.0, 99.0, 105.0, 102.0]);
    let eth = series("ethereum", &[10.0, 10.5, 9.8, 10.2, 10.1]);
    let flat = series("tether", &[1.0, 1.0, 1.0, 1.0, 1.0]);
    let table = SeriesAligner::align(&[btc, eth, flat]);

    let report = engine().compute_table(&table).unwrap();
    assert_eq!(report.records.len(), 3);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"bitcoin\""));

    let path = std::env::temp_dir().join("cryptorisk_metrics_test.csv");
    CsvConnector::write_metrics(&path, &report.records).unwrap();
    let parsed = CsvConnector::read_metrics(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(parsed.len(), report.records.len());
    for (a, b) in parsed.iter().zip(&report.records) {
        assert_eq!(a.asset, b.asset);
        // CSV keeps full float precision, well past 6 significant digits.
        assert!((a.daily_volatility - b.daily_volatility).abs() < 1e-12);
        assert!((a.annual_volatility - b.annual_volatility).abs() < 1e-12);
        assert_eq!(a.sharpe_ratio.is_some(), b.sharpe_ratio.is_some());
        assert_eq!(a.beta.is_some(), b.beta.is_some());
        assert_eq!(a.risk_level, b.risk_level);
    }

    // The flat series exercises the undefined-Sharpe sentinel end to end.
    let tether = parsed.iter().find(|r| r.asset == "tether").unwrap();
    assert_eq!(tether.sharpe_ratio, None);
    assert_eq!(tether.risk_level, RiskLevel::Low);
}
