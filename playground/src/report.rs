use std::{fmt::Write, sync::Arc};

use log::warn;
use machine_learning::{
    arch::{Model, intensity},
    evaluation::Diagnostics,
    optimization::Generation,
};

/// A snapshot of the run handed to whoever draws it.
#[derive(Debug, Clone)]
pub struct Report {
    pub generation: Generation,
    pub diagnostics: Diagnostics,
    pub model: Arc<Model>,
}

impl Report {
    /// The aggregate error followed by one `input | expected | predicted` line per example.
    pub fn render_predictions(&self) -> String {
        let mut out = format!(
            "generation {} error {:.19}\n",
            self.generation.index, self.diagnostics.error
        );

        for p in &self.diagnostics.predictions {
            let _ = writeln!(
                out,
                "{} | {} | {}",
                join(&p.input, None),
                join(&p.expected, None),
                join(&p.predicted, Some(3))
            );
        }

        out
    }

    /// The weights and biases of every layer as intensities in `[-255, 255]`, positive values
    /// being drawn red and negative ones blue.
    pub fn render_network(&self) -> String {
        let model = &self.model;
        let weight_scale = model.weight_scale();
        let bias_scale = model.bias_scale();

        if weight_scale == 0. {
            warn!("every weight is zero, drawing them with a neutral scale");
        }

        let mut out = String::new();
        let sizes = model.layer_sizes();

        for (i, (w, b)) in model.weights().iter().zip(model.biases()).enumerate() {
            let _ = writeln!(out, "layer {} -> {}", sizes[i], sizes[i + 1]);

            for row in w.view().rows() {
                let cells: Vec<_> = row.iter().map(|&x| intensity(x, weight_scale)).collect();
                let _ = writeln!(out, "  w [{}]", join(&cells, Some(0)));
            }

            let cells: Vec<_> = b.iter().map(|&x| intensity(x, bias_scale)).collect();
            let _ = writeln!(out, "  b [{}]", join(&cells, Some(0)));
        }

        out
    }
}

fn join(values: &[f32], decimals: Option<usize>) -> String {
    values
        .iter()
        .map(|v| match decimals {
            Some(d) => format!("{v:.d$}"),
            None => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use machine_learning::{
        arch::loss::Sae, dataset::Dataset, evaluation::diagnose, matrix::Matrix,
    };

    fn report(weights: Matrix, biases: Vec<f32>) -> Report {
        let model = Model::new(vec![weights], vec![biases.into()]).unwrap();
        let dataset = Dataset::from_rows(vec![vec![1., 0., 1.]], 2, 1).unwrap();
        let diagnostics = diagnose(&dataset, &model, &Sae).unwrap();

        Report {
            generation: Generation {
                index: 7,
                best_index: 0,
                best_error: diagnostics.error,
                mean_error: diagnostics.error,
            },
            diagnostics,
            model: Arc::new(model),
        }
    }

    #[test]
    fn predictions_table() {
        let report = report(Matrix::filled(1, 2, 0.), vec![0.]);

        assert_eq!(
            report.render_predictions(),
            "generation 7 error 0.5000000000000000000\n1,0 | 1 | 0.500\n"
        );
    }

    #[test]
    fn network_intensities() {
        let weights = Matrix::from_rows(vec![vec![2.], vec![-0.5]]).unwrap();
        let report = report(weights, vec![0.]);

        assert_eq!(
            report.render_network(),
            "layer 2 -> 1\n  w [255]\n  w [-64]\n  b [0]\n"
        );
    }

    #[test]
    fn zero_weights_render_neutral() {
        let report = report(Matrix::filled(1, 2, 0.), vec![0.]);
        let network = report.render_network();

        assert!(!network.contains("NaN"));
        assert!(!network.contains("inf"));
    }
}
