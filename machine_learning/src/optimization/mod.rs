mod generation;
mod optimizer;
mod population;

pub use generation::Generation;
pub use optimizer::Optimizer;
pub use population::Population;
