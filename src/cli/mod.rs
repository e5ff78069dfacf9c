//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filter/aggregate code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{Category, DatasetConfig, Shop, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dash", version, about = "Sales dashboard over a synthetic, seeded dataset")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(DashArgs),
    /// Print KPIs, the month×shop table, a bar chart and the shop ranking.
    Summary(SummaryArgs),
    /// Write the filtered records (CSV) and/or the aggregate result (JSON).
    Export(ExportArgs),
}

/// Dataset and filter options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct DashArgs {
    /// Number of synthetic records to generate.
    #[arg(short = 'n', long, env = "DASH_COUNT", default_value_t = DatasetConfig::DEFAULT_RECORD_COUNT)]
    pub count: usize,

    /// Random seed for record generation.
    #[arg(long, env = "DASH_SEED", default_value_t = DatasetConfig::DEFAULT_SEED)]
    pub seed: u64,

    /// Last day of the generated history (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Shops to include (repeat or comma-separate). Defaults to every shop in the window.
    #[arg(long = "shop", value_enum, value_delimiter = ',')]
    pub shops: Vec<Shop>,

    /// Categories to include (repeat or comma-separate). Defaults to every category in the window.
    #[arg(long = "category", value_enum, value_delimiter = ',')]
    pub categories: Vec<Category>,

    /// Shop ranking direction.
    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    pub sort: SortOrder,
}

/// Options for the text summary.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Also print every filtered record.
    #[arg(long)]
    pub details: bool,

    /// Length of the longest chart bar (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Options for file exports.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Write filtered records to this CSV file.
    #[arg(long, value_name = "CSV")]
    pub records: Option<PathBuf>,

    /// Write the aggregate result to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub report: Option<PathBuf>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_with_filters() {
        let cli = Cli::try_parse_from([
            "dash",
            "summary",
            "--seed",
            "7",
            "--shop",
            "tokyo,osaka",
            "--category",
            "food",
            "--sort",
            "asc",
            "--end-date",
            "2024-03-31",
        ])
        .unwrap();

        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.dash.seed, 7);
        assert_eq!(args.dash.shops, vec![Shop::Tokyo, Shop::Osaka]);
        assert_eq!(args.dash.categories, vec![Category::Food]);
        assert_eq!(args.dash.sort, SortOrder::Ascending);
        assert_eq!(args.dash.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(args.width, 40);
    }

    #[test]
    fn rejects_bad_date_and_unknown_shop() {
        assert!(Cli::try_parse_from(["dash", "tui", "--end-date", "2024-13-01"]).is_err());
        assert!(Cli::try_parse_from(["dash", "tui", "--shop", "nagoya"]).is_err());
    }
}
