mod diagnostics;
mod scorer;

pub use diagnostics::{Diagnostics, Prediction, diagnose};
pub use scorer::score_model;
