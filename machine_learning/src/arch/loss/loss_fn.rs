use ndarray::ArrayView1;

/// Measures how far a single prediction is from the expected output.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;
}
