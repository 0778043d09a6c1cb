mod driver;
mod run;

pub use driver::DriverConfig;
pub use run::RunConfig;
