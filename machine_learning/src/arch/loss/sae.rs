use ndarray::ArrayView1;

use super::LossFn;

/// Sum of absolute errors loss function.
#[derive(Default, Clone, Copy, Debug)]
pub struct Sae;

impl Sae {
    /// Returns a new `Sae`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Sae {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        y_pred
            .iter()
            .zip(y.iter())
            .map(|(p, e)| (p - e).abs())
            .sum()
    }
}
