use std::{error::Error, fmt, io};

use machine_learning::MlErr;

/// The playground's result type.
pub type Result<T> = std::result::Result<T, PlaygroundErr>;

/// All errors that can occur while setting up or driving a run.
#[derive(Debug)]
pub enum PlaygroundErr {
    /// Invalid driver setting, caught before training starts.
    InvalidConfig(String),
    /// The run configuration or the examples were rejected by the model.
    Ml(MlErr),
    /// A recipe couldn't be parsed or written.
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for PlaygroundErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Ml(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid recipe: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for PlaygroundErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<MlErr> for PlaygroundErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<serde_json::Error> for PlaygroundErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for PlaygroundErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
