use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the optimization module.
pub type Result<T> = std::result::Result<T, OptimizerErr>;

/// The optimization module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerErr {
    /// A hyperparameter is outside of its valid domain.
    InvalidConfig {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The gradient and the state vectors have different lengths.
    SizeMismatch { got: usize, expected: usize },
    /// The gradient holds a NaN or infinite entry.
    NonFinite { index: usize, value: f64 },
}

impl Display for OptimizerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerErr::InvalidConfig {
                param,
                value,
                reason,
            } => write!(f, "invalid optimizer config: {param} = {value}, {reason}"),
            OptimizerErr::SizeMismatch { got, expected } => write!(
                f,
                "gradient length mismatch: got {got}, expected {expected}"
            ),
            OptimizerErr::NonFinite { index, value } => write!(
                f,
                "numerical instability: gradient entry {index} is {value}"
            ),
        }
    }
}

impl Error for OptimizerErr {}
