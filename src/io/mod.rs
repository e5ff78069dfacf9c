//! Input/output helpers.
//!
//! - filtered record export (CSV) and aggregate report export (JSON) (`export`)

pub mod export;

pub use export::*;
