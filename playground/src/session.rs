use std::{sync::Arc, time::Instant};

use log::{debug, info};
use machine_learning::{
    arch::{Model, loss::Sae},
    dataset::Dataset,
    evaluation::{Diagnostics, diagnose},
    optimization::{Generation, Optimizer},
};

use crate::{
    Result,
    configs::{DriverConfig, RunConfig},
    report::Report,
};

/// Why a call to `Session::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    MaxGenerations,
    TargetReached,
}

/// The outcome of a call to `Session::run`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Steps taken during the call.
    pub generations: usize,
    pub error: f32,
    pub reason: StopReason,
}

/// An ongoing run. It owns the examples and the optimizer and steps it on demand, so the
/// cadence and the termination of the training are decided by its owner.
pub struct Session<O: Optimizer> {
    config: RunConfig,
    dataset: Dataset,
    optimizer: O,
    last: Option<Generation>,
}

impl<O: Optimizer> Session<O> {
    /// Creates a new `Session`.
    ///
    /// # Arguments
    /// * `config` - The run configuration, validated before anything else.
    /// * `optimizer` - An optimizer for models shaped as `config` says.
    ///
    /// # Returns
    /// A new `Session` or an error if the configuration is invalid.
    pub fn new(config: RunConfig, optimizer: O) -> Result<Self> {
        config.validate()?;
        let dataset = config.dataset()?;

        Ok(Self {
            config,
            dataset,
            optimizer,
            last: None,
        })
    }

    /// Runs a single optimization step over the current examples.
    pub fn step(&mut self) -> Result<Generation> {
        let generation = self.optimizer.step(&self.dataset)?;
        self.last = Some(generation);
        Ok(generation)
    }

    /// The best model of the last completed step.
    pub fn best(&self) -> Arc<Model> {
        self.optimizer.best()
    }

    pub fn last_generation(&self) -> Option<Generation> {
        self.last
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Replaces the examples, the change takes effect on the next step.
    ///
    /// # Returns
    /// An error, leaving the current examples in place, if any row doesn't match the
    /// configured input and output sizes.
    pub fn set_examples(&mut self, rows: Vec<Vec<f32>>) -> Result<()> {
        self.dataset = Dataset::from_rows(
            rows,
            self.config.input_layer_size,
            self.config.output_layer_size,
        )?;

        debug!(examples = self.dataset.len(); "examples replaced");
        Ok(())
    }

    /// The predictions of the best model for every current example.
    pub fn diagnostics(&self) -> Result<Diagnostics> {
        Ok(diagnose(&self.dataset, &self.best(), &Sae)?)
    }

    /// A configuration that reproduces this run with its current examples.
    pub fn recipe(&self) -> RunConfig {
        self.config.with_examples(&self.dataset)
    }

    /// Steps the optimizer back to back until one of the stop conditions of `driver` holds.
    ///
    /// `on_report` is called at most once every `driver.report_interval` and always once more
    /// right before returning.
    ///
    /// Without any stop condition this only returns on error.
    pub fn run<F>(&mut self, driver: &DriverConfig, mut on_report: F) -> Result<Summary>
    where
        F: FnMut(&Report),
    {
        info!(
            layers:? = self.config.layer_sizes(),
            batch_size = self.config.batch_size,
            mutation_rate = self.config.mutation_rate;
            "training started"
        );

        let mut steps = 0;
        let mut last_report = Instant::now();

        let (generation, reason) = loop {
            let generation = self.step()?;
            steps += 1;

            if driver
                .target_error
                .is_some_and(|target| generation.best_error <= target)
            {
                break (generation, StopReason::TargetReached);
            }

            if driver
                .max_generations
                .is_some_and(|max| steps >= max.get())
            {
                break (generation, StopReason::MaxGenerations);
            }

            if last_report.elapsed() >= driver.report_interval {
                on_report(&self.report(generation)?);
                last_report = Instant::now();
            }
        };

        on_report(&self.report(generation)?);
        info!(
            generations = steps,
            error = generation.best_error;
            "training finished: {reason:?}"
        );

        Ok(Summary {
            generations: steps,
            error: generation.best_error,
            reason,
        })
    }

    fn report(&self, generation: Generation) -> Result<Report> {
        let diagnostics = self.diagnostics()?;
        info!(
            generation = generation.index,
            error = diagnostics.error;
            "progress"
        );

        Ok(Report {
            generation,
            diagnostics,
            model: self.best(),
        })
    }
}
