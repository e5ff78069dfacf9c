//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - generates the session dataset
//! - runs the filter/aggregate pipeline
//! - prints reports or writes exports, or hands over to the TUI

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Command, DashArgs, ExportArgs, SummaryArgs};
use crate::domain::{DashboardConfig, DatasetConfig};
use crate::error::AppError;
use crate::filter::FilterOptions;
use crate::logging::LogTarget;

pub mod pipeline;
pub mod session;

use session::Session;

/// Entry point for the `dash` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may provide DASH_SEED / DASH_COUNT / RUST_LOG.
    dotenvy::dotenv().ok();

    // We want `dash` and `dash --seed 7` to behave like `dash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => {
            crate::logging::init(&LogTarget::tui_default())?;
            crate::tui::run(dashboard_config_from_args(&args, false, 40))
        }
        Command::Summary(args) => {
            crate::logging::init(&LogTarget::Stderr)?;
            handle_summary(args)
        }
        Command::Export(args) => {
            crate::logging::init(&LogTarget::Stderr)?;
            handle_export(args)
        }
    }
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.dash, args.details, args.width);
    println!("{}", render_summary(&config)?);
    Ok(())
}

/// Build the full text report for one pipeline run.
pub fn render_summary(config: &DashboardConfig) -> Result<String, AppError> {
    let session = Session::new(config.dataset.clone());
    let dataset = session.dataset()?;
    let run = run_for_config(&dataset, config);

    let mut out = String::new();
    out.push_str(&crate::report::format_run_header(&dataset, run.criteria.as_ref()));
    out.push('\n');
    out.push_str(&crate::report::format_kpis(&run.result.kpis));
    out.push_str("\nMonthly sales by shop:\n");
    out.push_str(&crate::report::format_pivot(&run.result.pivot));
    out.push('\n');
    out.push_str(&crate::plot::render_grouped_bars(&run.result.pivot, config.chart_width));
    out.push_str(&format!(
        "\nShop ranking ({}):\n",
        config.sort_order.display_name()
    ));
    out.push_str(&crate::report::format_ranking(&run.result.ranking));

    if config.show_details {
        out.push_str(&format!("\nRecords ({}):\n", run.filtered.len()));
        out.push_str(&crate::report::format_records(&run.filtered));
    }

    Ok(out)
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.records.is_none() && args.report.is_none() {
        return Err(AppError::config(
            "Nothing to export: pass --records <CSV> and/or --report <JSON>.",
        ));
    }

    let config = dashboard_config_from_args(&args.dash, false, 40);
    let session = Session::new(config.dataset.clone());
    let dataset = session.dataset()?;
    let run = run_for_config(&dataset, &config);

    if let Some(path) = &args.records {
        crate::io::write_records_csv(path, &run.filtered)?;
    }
    if let Some(path) = &args.report {
        let report = crate::io::ReportFile::new(config.dataset.seed, run.criteria.as_ref(), &run.result);
        crate::io::write_report_json(path, &report)?;
    }

    info!(records = run.filtered.len(), "export finished");
    Ok(())
}

/// Run the pipeline with the selection in `config`.
///
/// Unset selections default to every option present in the trailing window.
pub fn run_for_config(dataset: &crate::data::Dataset, config: &DashboardConfig) -> pipeline::RunOutput {
    let options = FilterOptions::from_records(&dataset.records);
    let shops = config.shops.clone().unwrap_or(options.shops);
    let categories = config.categories.clone().unwrap_or(options.categories);
    if shops.is_empty() || categories.is_empty() {
        warn!("empty shop or category selection; result will be empty");
    }
    pipeline::run(dataset, shops, categories, config.sort_order)
}

pub fn dashboard_config_from_args(args: &DashArgs, show_details: bool, chart_width: usize) -> DashboardConfig {
    let end_date = args
        .end_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    DashboardConfig {
        dataset: DatasetConfig::new(args.count, args.seed, end_date),
        shops: (!args.shops.is_empty()).then(|| args.shops.clone()),
        categories: (!args.categories.is_empty()).then(|| args.categories.clone()),
        sort_order: args.sort,
        show_details,
        chart_width,
    }
}

/// Rewrite argv so `dash` defaults to `dash tui`.
///
/// Rules:
/// - `dash`                       -> `dash tui`
/// - `dash --seed 7 ...`          -> `dash tui --seed 7 ...`
/// - `dash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
