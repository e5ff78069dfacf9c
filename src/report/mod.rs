//! Aggregation of filtered records: KPIs, month×shop pivot, shop ranking.
//!
//! Every function here is total: an empty record set yields zero KPIs, an
//! empty pivot and an empty ranking.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Shop, SortOrder, TransactionRecord, YearMonth};

pub mod format;

pub use format::*;

/// Scalar summary of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub total_amount: u64,
    /// Arithmetic mean of `amount`; `0.0` when there are no records.
    pub mean_amount: f64,
    pub transaction_count: usize,
}

impl Kpis {
    pub fn compute(records: &[TransactionRecord]) -> Self {
        let total_amount: u64 = records.iter().map(|r| r.amount).sum();
        let transaction_count = records.len();
        let mean_amount = if transaction_count == 0 {
            0.0
        } else {
            total_amount as f64 / transaction_count as f64
        };
        Self {
            total_amount,
            mean_amount,
            transaction_count,
        }
    }
}

/// Month×shop table of summed amounts.
///
/// Rows are the months present in the input (oldest first). Columns are the
/// shops present in the input, in `Shop::ALL` order. Every cell is filled;
/// combinations without records hold `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub months: Vec<YearMonth>,
    pub shops: Vec<Shop>,
    /// `cells[row][col]` is the total for `months[row]` and `shops[col]`.
    pub cells: Vec<Vec<u64>>,
}

impl PivotTable {
    pub fn build(records: &[TransactionRecord]) -> Self {
        let months: Vec<YearMonth> = records
            .iter()
            .map(TransactionRecord::month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let shops: Vec<Shop> = Shop::ALL
            .into_iter()
            .filter(|s| records.iter().any(|r| r.shop == *s))
            .collect();

        let mut cells = vec![vec![0u64; shops.len()]; months.len()];
        for r in records {
            let (Ok(row), Some(col)) = (
                months.binary_search(&r.month()),
                shops.iter().position(|s| *s == r.shop),
            ) else {
                continue;
            };
            cells[row][col] += r.amount;
        }

        Self { months, shops, cells }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn get(&self, month: YearMonth, shop: Shop) -> Option<u64> {
        let row = self.months.binary_search(&month).ok()?;
        let col = self.shops.iter().position(|s| *s == shop)?;
        Some(self.cells[row][col])
    }

    /// Amounts of one shop across all months (a bar series of the chart).
    pub fn column(&self, shop: Shop) -> Option<Vec<u64>> {
        let col = self.shops.iter().position(|s| *s == shop)?;
        Some(self.cells.iter().map(|row| row[col]).collect())
    }

    pub fn max_cell(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

/// One row of the shop ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopTotal {
    pub shop: Shop,
    pub amount: u64,
}

/// Sum `amount` per shop and sort by it.
///
/// Shops are grouped in first-encountered order and the sort is stable, so
/// ties keep that order.
pub fn rank_shops(records: &[TransactionRecord], order: SortOrder) -> Vec<ShopTotal> {
    let mut totals: Vec<ShopTotal> = Vec::new();
    for r in records {
        match totals.iter_mut().find(|t| t.shop == r.shop) {
            Some(t) => t.amount += r.amount,
            None => totals.push(ShopTotal {
                shop: r.shop,
                amount: r.amount,
            }),
        }
    }

    match order {
        SortOrder::Descending => totals.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortOrder::Ascending => totals.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }
    totals
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub kpis: Kpis,
    pub pivot: PivotTable,
    pub ranking: Vec<ShopTotal>,
    pub sort_order: SortOrder,
}

/// Compute KPIs, pivot and ranking for already-filtered records.
pub fn aggregate(records: &[TransactionRecord], order: SortOrder) -> AggregateResult {
    AggregateResult {
        kpis: Kpis::compute(records),
        pivot: PivotTable::build(records),
        ranking: rank_shops(records, order),
        sort_order: order,
    }
}
