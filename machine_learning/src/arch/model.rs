use ndarray::{Array1, ArrayView1};

use super::activations::Sigmoid;
use crate::{MlErr, Result, matrix::Matrix};

/// A feed forward network made of one weight matrix and one bias vector per layer transition.
///
/// `weights[i]` is `layer_sizes[i]` rows high and `layer_sizes[i + 1]` columns wide, so its
/// `k`-th column holds the incoming weights of neuron `k` of the next layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    weights: Vec<Matrix>,
    biases: Vec<Array1<f32>>,
}

impl Model {
    /// Creates a new `Model` after checking that all the layers chain together.
    ///
    /// # Arguments
    /// * `weights` - One matrix per layer transition.
    /// * `biases` - One vector per non input layer.
    ///
    /// # Returns
    /// A new `Model` or an error if the shapes are inconsistent.
    pub fn new(weights: Vec<Matrix>, biases: Vec<Array1<f32>>) -> Result<Self> {
        if weights.is_empty() {
            return Err(MlErr::EmptyModel);
        }

        if weights.len() != biases.len() {
            return Err(MlErr::SizeMismatch {
                what: "bias layers",
                got: biases.len(),
                expected: weights.len(),
            });
        }

        for (w, b) in weights.iter().zip(&biases) {
            if w.width() != b.len() {
                return Err(MlErr::SizeMismatch {
                    what: "layer biases",
                    got: b.len(),
                    expected: w.width(),
                });
            }
        }

        for pair in weights.windows(2) {
            if pair[0].width() != pair[1].height() {
                return Err(MlErr::SizeMismatch {
                    what: "layer inputs",
                    got: pair[1].height(),
                    expected: pair[0].width(),
                });
            }
        }

        Ok(Self { weights, biases })
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Array1<f32>] {
        &self.biases
    }

    /// The neuron count of every layer, input and output included.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let input = self.weights.first().map_or(0, Matrix::height);
        std::iter::once(input)
            .chain(self.weights.iter().map(Matrix::width))
            .collect()
    }

    pub fn input_size(&self) -> usize {
        self.weights[0].height()
    }

    pub fn output_size(&self) -> usize {
        self.weights[self.weights.len() - 1].width()
    }

    /// Returns the amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(w, b)| w.len() + b.len())
            .sum()
    }

    /// Makes a forward pass through the network, squashing every layer with the standard
    /// logistic sigmoid.
    ///
    /// # Arguments
    /// * `x` - The input layer values.
    ///
    /// # Returns
    /// The output layer values or `MlErr::SizeMismatch` if `x` isn't as long as the input layer.
    pub fn forward(&self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        if x.len() != self.input_size() {
            return Err(MlErr::SizeMismatch {
                what: "model input",
                got: x.len(),
                expected: self.input_size(),
            });
        }

        let act_fn = Sigmoid::default();
        let mut a = x.to_owned();

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = a.dot(&w.view()) + b;
            a = z.mapv_into(|z| act_fn.f(z));
        }

        Ok(a)
    }

    /// The largest absolute weight, used to normalize the weights when drawing them.
    pub fn weight_scale(&self) -> f32 {
        self.weights
            .iter()
            .map(Matrix::max_abs)
            .fold(0., f32::max)
    }

    /// The largest absolute bias, used to normalize the biases when drawing them.
    pub fn bias_scale(&self) -> f32 {
        self.biases
            .iter()
            .flatten()
            .fold(0., |acc, b| acc.max(b.abs()))
    }
}

/// Maps `value` into `[-255, 255]` relative to `scale`.
///
/// A zero or non finite `scale` (every weight being zero for instance) yields a neutral `0`.
pub fn intensity(value: f32, scale: f32) -> f32 {
    if !scale.is_finite() || scale <= 0. || !value.is_finite() {
        return 0.;
    }

    (value / scale * 255.).clamp(-255., 255.)
}
