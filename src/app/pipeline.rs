//! Shared "dashboard pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> filter criteria -> filtered records -> KPIs/pivot/ranking
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! `run` is pure: front-ends call it again after every selection change.

use tracing::debug;

use crate::data::Dataset;
use crate::domain::{Category, Shop, SortOrder, TransactionRecord};
use crate::filter::{self, FilterCriteria};
use crate::report::{self, AggregateResult};

/// All computed outputs of a single pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// `None` when the dataset is empty (no latest date to anchor the window).
    pub criteria: Option<FilterCriteria>,
    pub filtered: Vec<TransactionRecord>,
    pub result: AggregateResult,
}

/// Filter `dataset` by the given selection and aggregate what survives.
pub fn run(
    dataset: &Dataset,
    shops: impl IntoIterator<Item = Shop>,
    categories: impl IntoIterator<Item = Category>,
    sort_order: SortOrder,
) -> RunOutput {
    let criteria = FilterCriteria::derive(&dataset.records, shops, categories);
    run_with_criteria(&dataset.records, criteria, sort_order)
}

/// Execute the pipeline with pre-built criteria.
pub fn run_with_criteria(
    records: &[TransactionRecord],
    criteria: Option<FilterCriteria>,
    sort_order: SortOrder,
) -> RunOutput {
    let filtered = match &criteria {
        Some(c) => filter::apply(records, c),
        None => Vec::new(),
    };
    let result = report::aggregate(&filtered, sort_order);

    debug!(
        source = records.len(),
        filtered = filtered.len(),
        total = result.kpis.total_amount,
        sort = sort_order.display_name(),
        "pipeline run"
    );

    RunOutput {
        criteria,
        filtered,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::data::generate_sample;
    use crate::domain::DatasetConfig;

    fn dataset() -> Dataset {
        let config = DatasetConfig::new(500, 42, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        generate_sample(&config).unwrap()
    }

    #[test]
    fn all_selected_keeps_whole_window() {
        let data = dataset();
        let out = run(&data, Shop::ALL, Category::ALL, SortOrder::Descending);
        let criteria = out.criteria.as_ref().unwrap();
        assert_eq!(criteria.window_end(), data.max_date().unwrap());

        let in_window = data
            .records
            .iter()
            .filter(|r| criteria.window.contains(r.date))
            .count();
        assert_eq!(out.filtered.len(), in_window);
        assert_eq!(out.result.kpis.transaction_count, in_window);
        assert!(in_window < data.records.len());
    }

    #[test]
    fn missing_category_yields_empty_result() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let records: Vec<TransactionRecord> = [Shop::Tokyo, Shop::Osaka]
            .into_iter()
            .map(|shop| TransactionRecord {
                date,
                shop,
                category: Category::Food,
                product_name: "Product 2".to_string(),
                amount: 1000,
            })
            .collect();
        let data = Dataset::from_records(records);

        let out = run(&data, Shop::ALL, [Category::Household], SortOrder::Descending);
        assert!(out.filtered.is_empty());
        assert_eq!(out.result.kpis.total_amount, 0);
        assert_eq!(out.result.kpis.mean_amount, 0.0);
        assert!(out.result.ranking.is_empty());
    }

    #[test]
    fn empty_dataset_has_no_criteria() {
        let data = Dataset::from_records(Vec::new());
        let out = run(&data, Shop::ALL, Category::ALL, SortOrder::Ascending);
        assert!(out.criteria.is_none());
        assert!(out.filtered.is_empty());
        assert!(out.result.pivot.is_empty());
    }

    #[test]
    fn reruns_are_deterministic() {
        let data = dataset();
        let a = run(&data, [Shop::Osaka], Category::ALL, SortOrder::Ascending);
        let b = run(&data, [Shop::Osaka], Category::ALL, SortOrder::Ascending);
        assert_eq!(a, b);
    }
}
