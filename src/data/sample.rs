//! Synthetic sales record generation.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::info;

use crate::domain::{Category, DatasetConfig, Shop, TransactionRecord};
use crate::error::AppError;

/// A generated dataset plus summary stats for headers and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<TransactionRecord>,
    pub stats: DatasetStats,
}

impl Dataset {
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        let stats = compute_stats(&records);
        Self { records, stats }
    }

    /// Latest date present in the records (`None` for an empty dataset).
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.stats.date_max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    pub amount_total: u64,
}

/// Generate `config.record_count` records from a seeded RNG.
///
/// The same config always yields the same dataset.
pub fn generate_sample(config: &DatasetConfig) -> Result<Dataset, AppError> {
    validate(config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let first_day = config.end_date - Duration::days(i64::from(config.history_days) - 1);

    let mut records = Vec::with_capacity(config.record_count);
    for _ in 0..config.record_count {
        let offset = rng.gen_range(0..config.history_days);
        let date = first_day + Duration::days(i64::from(offset));
        let shop = *Shop::ALL.choose(&mut rng).unwrap_or(&Shop::Tokyo);
        let category = *Category::ALL.choose(&mut rng).unwrap_or(&Category::Food);
        let product = rng.gen_range(1..=config.product_count);
        let amount = rng.gen_range(config.amount_min..=config.amount_max);

        records.push(TransactionRecord {
            date,
            shop,
            category,
            product_name: format!("Product {product}"),
            amount,
        });
    }

    let dataset = Dataset::from_records(records);
    info!(
        records = dataset.stats.n_records,
        seed = config.seed,
        from = %first_day,
        to = %config.end_date,
        "generated sample dataset"
    );

    Ok(dataset)
}

fn validate(config: &DatasetConfig) -> Result<(), AppError> {
    if config.record_count == 0 {
        return Err(AppError::config("Record count must be > 0."));
    }
    if config.history_days == 0 {
        return Err(AppError::config("History length must be at least one day."));
    }
    if config.product_count == 0 {
        return Err(AppError::config("Product count must be > 0."));
    }
    if config.amount_min > config.amount_max {
        return Err(AppError::config(format!(
            "Invalid amount range: {} > {}.",
            config.amount_min, config.amount_max
        )));
    }
    Ok(())
}

pub fn compute_stats(records: &[TransactionRecord]) -> DatasetStats {
    DatasetStats {
        n_records: records.len(),
        date_min: records.iter().map(|r| r.date).min(),
        date_max: records.iter().map(|r| r.date).max(),
        amount_total: records.iter().map(|r| r.amount).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DatasetConfig {
        DatasetConfig::new(500, 42, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_sample(&config()).unwrap();
        let b = generate_sample(&config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_changes_dataset() {
        let a = generate_sample(&config()).unwrap();
        let b = generate_sample(&DatasetConfig { seed: 7, ..config() }).unwrap();
        assert_ne!(a.records, b.records);
    }

    #[test]
    fn records_respect_configured_ranges() {
        let cfg = config();
        let data = generate_sample(&cfg).unwrap();
        assert_eq!(data.records.len(), 500);

        let first_day = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        for r in &data.records {
            assert!(r.date >= first_day && r.date <= cfg.end_date, "date out of range: {}", r.date);
            assert!((1_000..=30_000).contains(&r.amount), "amount out of range: {}", r.amount);
            let n: u32 = r.product_name.trim_start_matches("Product ").parse().unwrap();
            assert!((1..=50).contains(&n));
        }
        assert_eq!(data.stats.amount_total, data.records.iter().map(|r| r.amount).sum::<u64>());
    }

    #[test]
    fn rejects_invalid_settings() {
        let err = generate_sample(&DatasetConfig { record_count: 0, ..config() }).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);

        let err = generate_sample(&DatasetConfig {
            amount_min: 10,
            amount_max: 5,
            ..config()
        })
        .unwrap_err();
        assert!(err.to_string().contains("amount range"));
    }

    #[test]
    fn single_day_history_pins_every_date() {
        let cfg = DatasetConfig { history_days: 1, record_count: 20, ..config() };
        let data = generate_sample(&cfg).unwrap();
        assert!(data.records.iter().all(|r| r.date == cfg.end_date));
        assert_eq!(data.max_date(), Some(cfg.end_date));
    }
}
