//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - closed enums for the aggregation keys (`Shop`, `Category`) and `SortOrder`
//! - the raw sales event (`TransactionRecord`) and its month key (`YearMonth`)
//! - generator and front-end configuration (`DatasetConfig`, `DashboardConfig`)

pub mod types;

pub use types::*;
