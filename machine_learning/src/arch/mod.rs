pub mod activations;
mod builder;
pub mod loss;
mod model;

pub use builder::ModelBuilder;
pub use model::{Model, intensity};
