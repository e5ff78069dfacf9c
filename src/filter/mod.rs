//! Trailing-window and shop/category filtering.
//!
//! Filtering runs in two steps:
//!
//! 1. keep records inside the trailing window that ends at the dataset's own
//!    latest date (not the wall clock)
//! 2. keep records whose shop and category are both selected
//!
//! An empty selection is a real filter that matches nothing.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Category, Shop, TransactionRecord};

/// Fixed look-back of the trailing window, in days.
pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window of `days` ending at the latest date in `records`.
    pub fn trailing(records: &[TransactionRecord], days: i64) -> Option<Self> {
        let end = records.iter().map(|r| r.date).max()?;
        Some(Self {
            start: end - Duration::days(days),
            end,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Everything needed to filter one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub window: DateWindow,
    pub selected_shops: BTreeSet<Shop>,
    pub selected_categories: BTreeSet<Category>,
}

impl FilterCriteria {
    /// Derive criteria for `records` with the fixed trailing window.
    ///
    /// Returns `None` when `records` is empty, since there is no latest date.
    pub fn derive(
        records: &[TransactionRecord],
        shops: impl IntoIterator<Item = Shop>,
        categories: impl IntoIterator<Item = Category>,
    ) -> Option<Self> {
        let window = DateWindow::trailing(records, TRAILING_WINDOW_DAYS)?;
        Some(Self {
            window,
            selected_shops: shops.into_iter().collect(),
            selected_categories: categories.into_iter().collect(),
        })
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window.start
    }

    pub fn window_end(&self) -> NaiveDate {
        self.window.end
    }

    fn matches_selection(&self, record: &TransactionRecord) -> bool {
        self.selected_shops.contains(&record.shop)
            && self.selected_categories.contains(&record.category)
    }
}

/// Records inside `window`, in source order.
pub fn within_window(records: &[TransactionRecord], window: &DateWindow) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.date))
        .cloned()
        .collect()
}

/// Apply both filter steps and return the surviving records as a new `Vec`.
pub fn apply(records: &[TransactionRecord], criteria: &FilterCriteria) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|r| criteria.window.contains(r.date))
        .filter(|r| criteria.matches_selection(r))
        .cloned()
        .collect()
}

/// Shops and categories offered for selection.
///
/// Both lists hold the values present in the trailing window, in the order
/// they are first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub shops: Vec<Shop>,
    pub categories: Vec<Category>,
}

impl FilterOptions {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let mut options = Self::default();
        let Some(window) = DateWindow::trailing(records, TRAILING_WINDOW_DAYS) else {
            return options;
        };
        for r in records.iter().filter(|r| window.contains(r.date)) {
            if !options.shops.contains(&r.shop) {
                options.shops.push(r.shop);
            }
            if !options.categories.contains(&r.category) {
                options.categories.push(r.category);
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate, shop: Shop, category: Category, amount: u64) -> TransactionRecord {
        TransactionRecord {
            date,
            shop,
            category,
            product_name: "Product 1".to_string(),
            amount,
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            rec(d(2024, 3, 31), Shop::Tokyo, Category::Food, 1000),
            rec(d(2024, 3, 1), Shop::Osaka, Category::Household, 2000),
            rec(d(2024, 2, 29), Shop::Fukuoka, Category::Food, 3000),
            rec(d(2024, 3, 15), Shop::Osaka, Category::Electronics, 4000),
            rec(d(2024, 1, 10), Shop::Tokyo, Category::Food, 5000),
        ]
    }

    #[test]
    fn window_is_inclusive_and_relative_to_max_date() {
        let records = sample();
        let window = DateWindow::trailing(&records, TRAILING_WINDOW_DAYS).unwrap();
        assert_eq!(window.end, d(2024, 3, 31));
        assert_eq!(window.start, d(2024, 3, 1));
        assert!(window.contains(d(2024, 3, 1)));
        assert!(window.contains(d(2024, 3, 31)));
        assert!(!window.contains(d(2024, 2, 29)));

        let kept = within_window(&records, &window);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn apply_matches_brute_force_count() {
        let records = sample();
        let criteria = FilterCriteria::derive(
            &records,
            [Shop::Osaka, Shop::Fukuoka],
            [Category::Household, Category::Electronics, Category::Food],
        )
        .unwrap();

        let expected = records
            .iter()
            .filter(|r| r.date >= criteria.window_start() && r.date <= criteria.window_end())
            .filter(|r| criteria.selected_shops.contains(&r.shop))
            .filter(|r| criteria.selected_categories.contains(&r.category))
            .count();

        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), expected);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.shop == Shop::Osaka));
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let records = sample();
        let no_shops = FilterCriteria::derive(&records, Vec::<Shop>::new(), Category::ALL).unwrap();
        assert!(apply(&records, &no_shops).is_empty());

        let no_categories = FilterCriteria::derive(&records, Shop::ALL, Vec::<Category>::new()).unwrap();
        assert!(apply(&records, &no_categories).is_empty());
    }

    #[test]
    fn apply_leaves_source_untouched() {
        let records = sample();
        let before = records.clone();
        let criteria = FilterCriteria::derive(&records, [Shop::Tokyo], [Category::Food]).unwrap();
        let filtered = apply(&records, &criteria);
        assert_eq!(records, before);
        assert_eq!(filtered, vec![records[0].clone()]);
    }

    #[test]
    fn no_criteria_for_empty_dataset() {
        assert!(FilterCriteria::derive(&[], Shop::ALL, Category::ALL).is_none());
        assert_eq!(FilterOptions::from_records(&[]), FilterOptions::default());
    }

    #[test]
    fn options_follow_first_encounter_inside_window() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.shops, vec![Shop::Tokyo, Shop::Osaka]);
        assert_eq!(
            options.categories,
            vec![Category::Food, Category::Household, Category::Electronics]
        );
    }
}
