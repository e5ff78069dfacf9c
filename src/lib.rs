//! `sales-dashboard` library crate.
//!
//! The binary (`dash`) is a thin wrapper around this library so that:
//!
//! - the filter/aggregate pipeline is testable without a terminal
//! - the same pipeline serves the TUI, the text summary and the exports

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
