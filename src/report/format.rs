//! Formatted terminal output for KPIs, pivot, ranking and record tables.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays numeric and testable
//! - currency/label changes are localized

use crate::data::Dataset;
use crate::domain::TransactionRecord;
use crate::filter::FilterCriteria;
use crate::report::{Kpis, PivotTable, ShopTotal};

/// `¥1,234,567`.
pub fn format_yen(amount: u64) -> String {
    format!("¥{}", group_thousands(amount))
}

/// Mean amounts are shown rounded to whole yen.
pub fn format_yen_mean(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return format_yen(0);
    }
    format_yen(amount.round() as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Header block: dataset size, window and active selection.
pub fn format_run_header(dataset: &Dataset, criteria: Option<&FilterCriteria>) -> String {
    let mut out = String::new();
    out.push_str("=== dash - Sales Dashboard ===\n");
    out.push_str(&format!("Records: n={}", dataset.stats.n_records));
    if let (Some(min), Some(max)) = (dataset.stats.date_min, dataset.stats.date_max) {
        out.push_str(&format!(" | dates=[{min}, {max}]"));
    }
    out.push('\n');

    let Some(criteria) = criteria else {
        out.push_str("Window: - (no records)\n");
        return out;
    };
    out.push_str(&format!(
        "Window: {} .. {} (last 30 days)\n",
        criteria.window_start(),
        criteria.window_end()
    ));
    let shops: Vec<&str> = criteria.selected_shops.iter().map(|s| s.display_name()).collect();
    let categories: Vec<&str> = criteria
        .selected_categories
        .iter()
        .map(|c| c.display_name())
        .collect();
    out.push_str(&format!("Shops: {}\n", join_or_none(&shops)));
    out.push_str(&format!("Categories: {}\n", join_or_none(&categories)));
    out
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

pub fn format_kpis(kpis: &Kpis) -> String {
    format!(
        "Total sales: {} | Average sale: {} | Transactions: {}\n",
        format_yen(kpis.total_amount),
        format_yen_mean(kpis.mean_amount),
        kpis.transaction_count
    )
}

/// Month rows × shop columns, zero cells included.
pub fn format_pivot(pivot: &PivotTable) -> String {
    if pivot.is_empty() {
        return "(no data)\n".to_string();
    }

    let mut out = String::new();
    let mut header = format!("{:<8}", "month");
    let mut rule = format!("{:-<8}", "");
    for shop in &pivot.shops {
        header.push_str(&format!(" {:>12}", shop.display_name()));
        rule.push_str(&format!(" {:-<12}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (month, row) in pivot.months.iter().zip(&pivot.cells) {
        let mut line = format!("{:<8}", month.to_string());
        for cell in row {
            line.push_str(&format!(" {:>12}", format_yen(*cell)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn format_ranking(ranking: &[ShopTotal]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>4} {:<10} {:>14}", "#", "shop", "sales").trim_end());
    out.push('\n');
    out.push_str(&format!("{:-<4} {:-<10} {:-<14}\n", "", "", ""));
    if ranking.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }
    for (i, row) in ranking.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:<10} {:>14}",
                i + 1,
                row.shop.display_name(),
                format_yen(row.amount)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Detail table of filtered records.
pub fn format_records(records: &[TransactionRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<8} {:<12} {:<14} {:>10}",
            "date", "shop", "category", "product", "amount"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:-<10} {:-<8} {:-<12} {:-<14} {:-<10}\n", "", "", "", "", ""));

    for r in records {
        out.push_str(
            format!(
                "{:<10} {:<8} {:<12} {:<14} {:>10}",
                r.date,
                r.shop.display_name(),
                r.category.display_name(),
                truncate(&r.product_name, 14),
                format_yen(r.amount)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
