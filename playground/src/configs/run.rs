use std::{fs, num::NonZeroUsize, path::Path};

use machine_learning::{MlErr, arch::ModelBuilder, dataset::Dataset};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Everything needed to reproduce a run: the network shape, the search parameters and the
/// examples.
///
/// Missing fields take the value of `RunConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input_layer_size: usize,
    pub output_layer_size: usize,
    pub hidden_layer_sizes: Vec<usize>,
    pub mutation_rate: f32,
    pub batch_size: usize,
    pub examples: Vec<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    /// Two inputs, two hidden layers of four neurons and one output, learning XOR.
    fn default() -> Self {
        Self {
            input_layer_size: 2,
            output_layer_size: 1,
            hidden_layer_sizes: vec![4, 4],
            mutation_rate: 100.,
            batch_size: 10,
            examples: vec![
                vec![0., 0., 0.],
                vec![0., 1., 1.],
                vec![1., 0., 1.],
                vec![1., 1., 0.],
            ],
            seed: None,
        }
    }
}

impl RunConfig {
    /// The neuron count of every layer, input and output included.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layer_sizes.len() + 2);
        sizes.push(self.input_layer_size);
        sizes.extend(&self.hidden_layer_sizes);
        sizes.push(self.output_layer_size);
        sizes
    }

    /// Checks every field, no population should be created from a configuration that fails this.
    pub fn validate(&self) -> Result<()> {
        self.builder()?;
        self.batch_size()?;
        self.dataset()?;
        Ok(())
    }

    pub fn builder(&self) -> Result<ModelBuilder> {
        Ok(ModelBuilder::new(self.layer_sizes(), self.mutation_rate)?)
    }

    pub fn batch_size(&self) -> Result<NonZeroUsize> {
        Ok(NonZeroUsize::new(self.batch_size).ok_or(MlErr::InvalidBatchSize)?)
    }

    pub fn dataset(&self) -> Result<Dataset> {
        let dataset = Dataset::from_rows(
            self.examples.iter().cloned(),
            self.input_layer_size,
            self.output_layer_size,
        )?;

        Ok(dataset)
    }

    /// A seeded generator when `seed` is set, an os seeded one otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// The same configuration with its examples replaced by the ones in `dataset`.
    pub fn with_examples(&self, dataset: &Dataset) -> Self {
        Self {
            examples: dataset.rows().map(<[f32]>::to_vec).collect(),
            ..self.clone()
        }
    }

    /// Parses and validates a JSON recipe.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a JSON recipe from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Writes this configuration as a JSON recipe to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
