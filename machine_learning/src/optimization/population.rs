use std::{cell::RefCell, num::NonZeroUsize, rc::Rc, sync::Arc};

use log::{debug, warn};
use rand::Rng;

use super::{Generation, Optimizer};
use crate::{
    Result,
    arch::{Model, ModelBuilder, loss::LossFn},
    dataset::Dataset,
    evaluation::score_model,
};

/// A mutate and select optimizer.
///
/// Each step scores every candidate, keeps the fittest one and replaces the rest of the batch
/// with mutated copies of it. The fittest candidate is carried over unmutated as the last
/// member of the next batch, so the best error never increases while the examples stay the same.
pub struct Population<R: Rng, L: LossFn> {
    builder: ModelBuilder,
    batch_size: NonZeroUsize,
    loss_fn: L,
    models: Vec<Arc<Model>>,
    best: Arc<Model>,
    generation: usize,
    rng: Rc<RefCell<R>>,
}

impl<R, L> Population<R, L>
where
    R: Rng + 'static,
    L: LossFn,
{
    /// Creates a new `Population` of `batch_size` random models.
    ///
    /// # Arguments
    /// * `builder` - The builder that fixes the layer sizes and the mutation rate.
    /// * `batch_size` - The amount of candidates scored per step.
    /// * `loss_fn` - The per example loss the candidates are scored with.
    /// * `rng` - A random number generator, seed it for reproducible runs.
    ///
    /// # Returns
    /// A new `Population` instance, its best model is the first candidate until the first step.
    pub fn new(
        builder: ModelBuilder,
        batch_size: NonZeroUsize,
        loss_fn: L,
        rng: R,
    ) -> Result<Self> {
        if batch_size.get() == 1 {
            warn!("a batch size of 1 never mutates the model, no exploration will take place");
        }

        let rng = Rc::new(RefCell::new(rng));
        let models = (0..batch_size.get())
            .map(|_| builder.build_random(&rng).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            best: models[0].clone(),
            builder,
            batch_size,
            loss_fn,
            models,
            generation: 0,
            rng,
        })
    }

    /// The candidates that the next step will score.
    pub fn models(&self) -> &[Arc<Model>] {
        &self.models
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// The amount of completed steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn builder(&self) -> &ModelBuilder {
        &self.builder
    }

    /// Replaces the batch with `batch_size - 1` mutations of the best model followed by the best
    /// model itself.
    fn repopulate(&mut self) -> Result<()> {
        let mut models = Vec::with_capacity(self.batch_size.get());

        for _ in 1..self.batch_size.get() {
            let child = self.builder.mutate(&self.best, &self.rng)?;
            models.push(Arc::new(child));
        }

        models.push(self.best.clone());
        self.models = models;
        Ok(())
    }
}

impl<R, L> Optimizer for Population<R, L>
where
    R: Rng + 'static,
    L: LossFn,
{
    fn step(&mut self, dataset: &Dataset) -> Result<Generation> {
        let scores = self
            .models
            .iter()
            .map(|model| score_model(dataset, model, &self.loss_fn))
            .collect::<Result<Vec<_>>>()?;

        let (best_index, best_error) = select_best(&scores);
        let mean_error = scores.iter().sum::<f32>() / scores.len() as f32;
        self.best = self.models[best_index].clone();

        debug!(
            generation = self.generation,
            best_index = best_index,
            best_error = best_error;
            "population scored"
        );

        self.repopulate()?;

        let generation = Generation {
            index: self.generation,
            best_index,
            best_error,
            mean_error,
        };

        self.generation += 1;
        Ok(generation)
    }

    fn best(&self) -> Arc<Model> {
        self.best.clone()
    }
}

/// Finds the lowest score, the first one wins ties and `NaN` loses against anything else.
fn select_best(scores: &[f32]) -> (usize, f32) {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold((0, scores[0]), |(best_i, best), (i, score)| {
            if score < best || (best.is_nan() && !score.is_nan()) {
                (i, score)
            } else {
                (best_i, best)
            }
        })
}
