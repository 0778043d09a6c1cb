pub mod configs;
pub mod error;
pub mod report;
mod session;

use machine_learning::{arch::loss::Sae, optimization::Population};
use rand::rngs::StdRng;

pub use configs::{DriverConfig, RunConfig};
pub use error::{PlaygroundErr, Result};
pub use session::{Session, StopReason, Summary};

/// The session every binary entry point runs.
pub type DefaultSession = Session<Population<StdRng, Sae>>;

/// Validates the configuration and initializes a random population for it.
///
/// # Errors
/// Returns a `PlaygroundErr` if any field of the configuration is invalid, in which case no
/// population is created.
pub fn start(config: RunConfig) -> Result<DefaultSession> {
    config.validate()?;

    log::info!("initializing a population of {} models", config.batch_size);
    let population = Population::new(config.builder()?, config.batch_size()?, Sae, config.rng())?;
    Session::new(config, population)
}
