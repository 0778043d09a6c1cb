use std::sync::Arc;

use super::Generation;
use crate::{Result, arch::Model, dataset::Dataset};

/// Searches for a model that fits a dataset, one step at a time.
pub trait Optimizer {
    /// Runs a single optimization step against the given examples.
    ///
    /// # Arguments
    /// * `dataset` - The examples the candidates are scored with, it may change between steps.
    ///
    /// # Returns
    /// The statistics of the finished step.
    fn step(&mut self, dataset: &Dataset) -> Result<Generation>;

    /// The best model found by the last completed step.
    fn best(&self) -> Arc<Model>;
}
