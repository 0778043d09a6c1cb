use super::scorer::check_sizes;
use crate::{Result, arch::Model, arch::loss::LossFn, dataset::Dataset};

/// What a model answered for a single example.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub input: Vec<f32>,
    pub expected: Vec<f32>,
    pub predicted: Vec<f32>,
}

/// The per example predictions of a model together with its aggregate error.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub predictions: Vec<Prediction>,
    pub error: f32,
}

/// Evaluates `model` on every example of `dataset`.
///
/// The aggregate error is computed exactly as `score_model` does.
pub fn diagnose<L: LossFn>(dataset: &Dataset, model: &Model, loss_fn: &L) -> Result<Diagnostics> {
    check_sizes(dataset, model)?;

    let mut predictions = Vec::with_capacity(dataset.len());
    let mut error = 0.;

    for (x, y) in dataset.examples() {
        let y_pred = model.forward(x)?;
        error += loss_fn.loss(y_pred.view(), y);

        predictions.push(Prediction {
            input: x.to_vec(),
            expected: y.to_vec(),
            predicted: y_pred.to_vec(),
        });
    }

    Ok(Diagnostics { predictions, error })
}
