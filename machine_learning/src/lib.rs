pub mod arch;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod initialization;
pub mod matrix;
pub mod optimization;

pub use error::{MlErr, Result};
