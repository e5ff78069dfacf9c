//! Data sources.
//!
//! The dashboard has no real ingestion; everything comes from the seeded
//! generator in `sample`.

pub mod sample;

pub use sample::{Dataset, DatasetStats, generate_sample};
