use crate::{MlErr, Result, arch::Model, arch::loss::LossFn, dataset::Dataset};

/// Runs the model over every example and accumulates the loss of each prediction.
///
/// # Arguments
/// * `dataset` - The examples to score against, an empty dataset scores `0`.
/// * `model` - The model being scored.
/// * `loss_fn` - The per example loss.
///
/// # Returns
/// The aggregate error, lower is better, or an error if the dataset and the model disagree on
/// the input or output sizes.
pub fn score_model<L: LossFn>(dataset: &Dataset, model: &Model, loss_fn: &L) -> Result<f32> {
    check_sizes(dataset, model)?;

    let mut total = 0.;
    for (x, y) in dataset.examples() {
        let y_pred = model.forward(x)?;
        total += loss_fn.loss(y_pred.view(), y);
    }

    Ok(total)
}

pub(super) fn check_sizes(dataset: &Dataset, model: &Model) -> Result<()> {
    if dataset.x_size() != model.input_size() {
        return Err(MlErr::SizeMismatch {
            what: "example inputs",
            got: dataset.x_size(),
            expected: model.input_size(),
        });
    }

    if dataset.y_size() != model.output_size() {
        return Err(MlErr::SizeMismatch {
            what: "example outputs",
            got: dataset.y_size(),
            expected: model.output_size(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arch::loss::Sae, matrix::Matrix};
    use ndarray::array;

    /// Every prediction is exactly `0.5` no matter the input.
    fn half_model() -> Model {
        Model::new(vec![Matrix::filled(1, 2, 0.)], vec![array![0.]]).unwrap()
    }

    #[test]
    fn sums_absolute_errors_over_examples() {
        let rows = vec![vec![0., 0., 0.], vec![0., 1., 1.], vec![1., 1., 0.25]];
        let dataset = Dataset::from_rows(rows, 2, 1).unwrap();

        let score = score_model(&dataset, &half_model(), &Sae).unwrap();
        assert_eq!(score, 0.5 + 0.5 + 0.25);
    }

    #[test]
    fn exact_predictions_score_zero() {
        let dataset = Dataset::from_rows(vec![vec![3., -2., 0.5]], 2, 1).unwrap();
        assert_eq!(score_model(&dataset, &half_model(), &Sae).unwrap(), 0.);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        let dataset = Dataset::from_rows(Vec::<Vec<f32>>::new(), 2, 1).unwrap();
        assert_eq!(score_model(&dataset, &half_model(), &Sae).unwrap(), 0.);
    }

    #[test]
    fn rejects_mismatched_examples() {
        let dataset = Dataset::from_rows(vec![vec![0., 0., 0., 0.]], 3, 1).unwrap();
        let err = score_model(&dataset, &half_model(), &Sae).unwrap_err();

        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "example inputs",
                got: 3,
                expected: 2
            }
        );

        let dataset = Dataset::from_rows(vec![vec![0., 0., 0., 0.]], 2, 2).unwrap();
        assert!(score_model(&dataset, &half_model(), &Sae).is_err());
    }
}
