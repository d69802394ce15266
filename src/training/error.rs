use std::{error::Error, fmt};

use crate::{loss::LossErr, optimization::OptimizerErr};

/// The training module's result type.
pub type Result<T> = std::result::Result<T, TrainingErr>;

/// Failures raised while building or pulling from a `BatchDriver`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingErr {
    /// Invalid driver configuration, caught at construction.
    InvalidConfig(String),
    /// The loss collaborator failed on one example, aborting the whole batch.
    Loss {
        epoch: usize,
        batch: usize,
        source: LossErr,
    },
    /// An example's gradient doesn't match the amount of weights.
    GradientLength {
        epoch: usize,
        batch: usize,
        got: usize,
        expected: usize,
    },
    Optimizer(OptimizerErr),
}

impl fmt::Display for TrainingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingErr::InvalidConfig(msg) => write!(f, "invalid driver config: {msg}"),
            TrainingErr::Loss {
                epoch,
                batch,
                source,
            } => write!(f, "loss failed at epoch {epoch} batch {batch}: {source}"),
            TrainingErr::GradientLength {
                epoch,
                batch,
                got,
                expected,
            } => write!(
                f,
                "gradient length mismatch at epoch {epoch} batch {batch}: got {got}, expected {expected}"
            ),
            TrainingErr::Optimizer(e) => write!(f, "optimizer error: {e}"),
        }
    }
}

impl Error for TrainingErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainingErr::Loss { source, .. } => Some(source),
            TrainingErr::Optimizer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OptimizerErr> for TrainingErr {
    fn from(value: OptimizerErr) -> Self {
        Self::Optimizer(value)
    }
}
