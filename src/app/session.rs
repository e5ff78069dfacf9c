//! Session context that owns the generated dataset.
//!
//! The dataset is generated on first access and then shared read-only for
//! every pipeline run of the session. Nothing mutates it; a new seed means a
//! new `Session`.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::data::{Dataset, generate_sample};
use crate::domain::DatasetConfig;
use crate::error::AppError;

#[derive(Debug)]
pub struct Session {
    config: DatasetConfig,
    dataset: OnceCell<Arc<Dataset>>,
}

impl Session {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            dataset: OnceCell::new(),
        }
    }

    /// A session over an already generated dataset (e.g. shared across sessions).
    pub fn with_dataset(config: DatasetConfig, dataset: Arc<Dataset>) -> Self {
        Self {
            config,
            dataset: OnceCell::with_value(dataset),
        }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The session dataset, generated on first call.
    pub fn dataset(&self) -> Result<Arc<Dataset>, AppError> {
        self.dataset
            .get_or_try_init(|| generate_sample(&self.config).map(Arc::new))
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    /// A fresh session with the next seed.
    pub fn reseeded(&self) -> Self {
        Self::new(DatasetConfig {
            seed: self.config.seed.wrapping_add(1),
            ..self.config.clone()
        })
    }
}
