use std::env;

use anyhow::{Context, Result};
use log::info;
use playground::{DriverConfig, RunConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => RunConfig::load(&path).with_context(|| format!("cannot load '{path}'"))?,
        None => RunConfig::default(),
    };

    let driver = DriverConfig::from_env()?;
    let mut session = playground::start(config)?;

    let summary = session.run(&driver, |report| {
        println!("{}", report.render_predictions());
        println!("{}", report.render_network());
    })?;

    info!(
        "stopped after {} generations with an error of {}",
        summary.generations, summary.error
    );

    if let Ok(path) = env::var("EXPORT") {
        session
            .recipe()
            .save(&path)
            .with_context(|| format!("cannot write the recipe to '{path}'"))?;
        info!("recipe written to {path}");
    }

    Ok(())
}
