use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    EmptyModel,
    TooFewLayers {
        got: usize,
    },
    InvalidLayerSize {
        layer: usize,
    },
    InvalidBatchSize,
    InvalidMutationRate(f32),
    InvalidExampleSegment(&'static str),
    ExampleLength {
        example: usize,
        got: usize,
        expected: usize,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    RaggedMatrix {
        row: usize,
        got: usize,
        expected: usize,
    },
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    Distribution(String),
}

impl MlErr {
    /// Whether this error comes from an invalid run configuration, these must prevent the
    /// population from ever being initialized.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MlErr::TooFewLayers { .. }
                | MlErr::InvalidLayerSize { .. }
                | MlErr::InvalidBatchSize
                | MlErr::InvalidMutationRate(_)
                | MlErr::InvalidExampleSegment(_)
                | MlErr::ExampleLength { .. }
        )
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::EmptyModel => "A model needs at least one weight matrix".to_string(),
            MlErr::TooFewLayers { got } => format!(
                "The layer sizes must contain at least an input and an output layer, got {got} layers"
            ),
            MlErr::InvalidLayerSize { layer } => {
                format!("The size of layer {layer} must be greater than zero")
            }
            MlErr::InvalidBatchSize => "The batch size must be greater than zero".to_string(),
            MlErr::InvalidMutationRate(rate) => {
                format!("The mutation rate must be finite and greater than zero, got {rate}")
            }
            MlErr::InvalidExampleSegment(segment) => {
                format!("The {segment} segment of an example must not be empty")
            }
            MlErr::ExampleLength {
                example,
                got,
                expected,
            } => format!("Example {example} has {got} values, expected {expected}"),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => format!("There's a size mismatch in {what}, got {got} and expected {expected}"),
            MlErr::RaggedMatrix { row, got, expected } => format!(
                "Matrix row {row} has {got} elements while the matrix is {expected} columns wide"
            ),
            MlErr::IndexOutOfRange { what, index, len } => {
                format!("The {what} index {index} is out of range for a length of {len}")
            }
            MlErr::Distribution(detail) => format!("Invalid random distribution: {detail}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}
