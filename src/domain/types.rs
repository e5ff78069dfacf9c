//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the filter/aggregate pipeline
//! - exported to CSV/JSON
//! - selected from the command line (`ValueEnum`)

use std::fmt;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

/// Store that recorded a sale.
///
/// The set is closed: aggregation relies on every record carrying one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Shop {
    Tokyo,
    Osaka,
    Fukuoka,
}

impl Shop {
    /// Enumeration order. Also the column order of the pivot table.
    pub const ALL: [Shop; 3] = [Shop::Tokyo, Shop::Osaka, Shop::Fukuoka];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Shop::Tokyo => "Tokyo",
            Shop::Osaka => "Osaka",
            Shop::Fukuoka => "Fukuoka",
        }
    }
}

impl fmt::Display for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Product category of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Electronics,
    Household,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Electronics, Category::Household];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Electronics => "Electronics",
            Category::Household => "Household",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direction of the shop ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest amount first.
    #[default]
    #[value(name = "desc")]
    Descending,
    /// Lowest amount first.
    #[value(name = "asc")]
    Ascending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SortOrder::Descending => "descending",
            SortOrder::Ascending => "ascending",
        }
    }
}

/// One sales event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub shop: Shop,
    pub category: Category,
    /// Free-text label; never aggregated.
    pub product_name: String,
    /// Amount in whole yen.
    pub amount: u64,
}

impl TransactionRecord {
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// A calendar month (`date` truncated to year-month).
///
/// Ordering is chronological, so a `BTreeSet<YearMonth>` iterates oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Settings for the synthetic record generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub record_count: usize,
    pub seed: u64,
    /// Last day of the generated history (normally the process start date).
    pub end_date: NaiveDate,
    /// Length of the generated history in days, `end_date` included.
    pub history_days: u32,
    pub amount_min: u64,
    pub amount_max: u64,
    /// Product names are `Product 1` ..= `Product <product_count>`.
    pub product_count: u32,
}

impl DatasetConfig {
    pub const DEFAULT_RECORD_COUNT: usize = 500;
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_HISTORY_DAYS: u32 = 90;

    pub fn new(record_count: usize, seed: u64, end_date: NaiveDate) -> Self {
        Self {
            record_count,
            seed,
            end_date,
            history_days: Self::DEFAULT_HISTORY_DAYS,
            amount_min: 1_000,
            amount_max: 30_000,
            product_count: 50,
        }
    }
}

/// A full run's configuration as understood by the front-ends.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub dataset: DatasetConfig,
    /// `None` selects every shop offered by the trailing window.
    pub shops: Option<Vec<Shop>>,
    /// `None` selects every category offered by the trailing window.
    pub categories: Option<Vec<Category>>,
    pub sort_order: SortOrder,
    pub show_details: bool,
    pub chart_width: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_orders_chronologically() {
        let dec = YearMonth::new(2023, 12);
        let jan = YearMonth::new(2024, 1);
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn month_truncates_date() {
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            shop: Shop::Osaka,
            category: Category::Food,
            product_name: "Product 3".to_string(),
            amount: 1200,
        };
        assert_eq!(record.month(), YearMonth::new(2024, 2));
    }

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }

    #[test]
    fn year_month_serializes_as_string() {
        let json = serde_json::to_string(&YearMonth::new(2024, 3)).unwrap();
        assert_eq!(json, "\"2024-03\"");
    }
}
