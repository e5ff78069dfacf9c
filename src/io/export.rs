//! Export filtered records (CSV) and aggregate results (JSON).
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{Category, Shop, TransactionRecord};
use crate::error::AppError;
use crate::filter::{DateWindow, FilterCriteria};
use crate::report::AggregateResult;

/// Write filtered records to a CSV file (header + one row per record).
pub fn write_records_csv(path: &Path, records: &[TransactionRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    // Records serialize their own header; write it explicitly so an empty
    // export still has one.
    if records.is_empty() {
        writer
            .write_record(["date", "shop", "category", "product_name", "amount"])
            .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;
    }
    for r in records {
        writer
            .serialize(r)
            .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::config(format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = records.len(), "wrote records CSV");
    Ok(())
}

/// Portable JSON representation of one dashboard run.
#[derive(Debug, Serialize)]
pub struct ReportFile<'a> {
    pub tool: &'static str,
    pub seed: u64,
    pub window: Option<DateWindow>,
    pub selected_shops: Vec<Shop>,
    pub selected_categories: Vec<Category>,
    pub result: &'a AggregateResult,
}

impl<'a> ReportFile<'a> {
    pub fn new(seed: u64, criteria: Option<&FilterCriteria>, result: &'a AggregateResult) -> Self {
        Self {
            tool: "dash",
            seed,
            window: criteria.map(|c| c.window),
            selected_shops: criteria
                .map(|c| c.selected_shops.iter().copied().collect())
                .unwrap_or_default(),
            selected_categories: criteria
                .map(|c| c.selected_categories.iter().copied().collect())
                .unwrap_or_default(),
            result,
        }
    }
}

/// Write the aggregate result as pretty JSON.
pub fn write_report_json(path: &Path, report: &ReportFile<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::config(format!("Failed to write report JSON: {e}")))?;

    info!(path = %path.display(), "wrote report JSON");
    Ok(())
}
