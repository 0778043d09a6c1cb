use std::{cell::RefCell, rc::Rc};

use ndarray::Array1;
use rand::Rng;

use super::Model;
use crate::{
    MlErr, Result,
    initialization::{ChainedParamGen, ConstParamGen, ParamGen, RandParamGen},
    matrix::Matrix,
};

/// Builds random models for a fixed layer configuration and derives mutated copies of them.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    layer_sizes: Vec<usize>,
    mutation_rate: f32,
}

impl ModelBuilder {
    /// Creates a new `ModelBuilder`.
    ///
    /// # Arguments
    /// * `layer_sizes` - The neuron count of every layer, `[input, hidden.., output]`.
    /// * `mutation_rate` - The half width of the uniform range parameters are drawn from.
    ///
    /// # Returns
    /// A new `ModelBuilder` or a configuration error.
    pub fn new(layer_sizes: Vec<usize>, mutation_rate: f32) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(MlErr::TooFewLayers {
                got: layer_sizes.len(),
            });
        }

        if let Some(layer) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(MlErr::InvalidLayerSize { layer });
        }

        if !mutation_rate.is_finite() || mutation_rate <= 0. {
            return Err(MlErr::InvalidMutationRate(mutation_rate));
        }

        Ok(Self {
            layer_sizes,
            mutation_rate,
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    /// Builds a model with every weight and bias drawn from `[-rate, rate]`, except for the
    /// output layer's biases which start at zero.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to draw from.
    pub fn build_random<R: Rng + 'static>(&self, rng: &Rc<RefCell<R>>) -> Result<Model> {
        let dims: Vec<_> = self.layer_sizes.windows(2).map(|d| (d[0], d[1])).collect();
        let last = dims.len() - 1;

        let mut param_gens: Vec<Box<dyn ParamGen>> = Vec::with_capacity(2 * dims.len());
        for (i, &(n, m)) in dims.iter().enumerate() {
            let weights = RandParamGen::symmetric(rng.clone(), n * m, self.mutation_rate)?;
            param_gens.push(Box::new(weights));

            if i == last {
                param_gens.push(Box::new(ConstParamGen::new(0., m)));
            } else {
                let biases = RandParamGen::symmetric(rng.clone(), m, self.mutation_rate)?;
                param_gens.push(Box::new(biases));
            }
        }

        let mut param_gen = ChainedParamGen::new(param_gens);
        let mut weights = Vec::with_capacity(dims.len());
        let mut biases = Vec::with_capacity(dims.len());

        for (n, m) in dims {
            let w = take(&mut param_gen, n * m)?;
            weights.push(Matrix::from_vec(m, n, w)?);
            biases.push(Array1::from(take(&mut param_gen, m)?));
        }

        Model::new(weights, biases)
    }

    /// Derives a new model from `model` by adding an independent perturbation drawn from
    /// `[-rate, rate]` to every weight and bias, the output biases included.
    ///
    /// # Arguments
    /// * `model` - The parent model, it's left untouched.
    /// * `rng` - The random number generator to draw from.
    pub fn mutate<R>(&self, model: &Model, rng: &Rc<RefCell<R>>) -> Result<Model>
    where
        R: Rng + 'static,
    {
        let mut param_gen =
            RandParamGen::symmetric(rng.clone(), model.size(), self.mutation_rate)?;

        let mut weights = Vec::with_capacity(model.weights().len());
        let mut biases = Vec::with_capacity(model.biases().len());

        for (w, b) in model.weights().iter().zip(model.biases()) {
            let dw = take(&mut param_gen, w.len())?;
            let data = w.iter().zip(dw).map(|(w, d)| w + d).collect();
            weights.push(Matrix::from_vec(w.width(), w.height(), data)?);

            let db = Array1::from(take(&mut param_gen, b.len())?);
            biases.push(b + &db);
        }

        Model::new(weights, biases)
    }
}

/// Samples exactly `n` parameters or fails.
fn take(param_gen: &mut dyn ParamGen, n: usize) -> Result<Vec<f32>> {
    let sample = param_gen.sample(n).unwrap_or_default();
    if sample.len() != n {
        return Err(MlErr::SizeMismatch {
            what: "generated parameters",
            got: sample.len(),
            expected: n,
        });
    }

    Ok(sample)
}
