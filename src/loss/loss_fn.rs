use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::{Array1, ArrayView1};

use crate::dataset::Sample;

/// The result type returned by loss collaborators.
pub type Result<T> = std::result::Result<T, LossErr>;

/// Failure reported by a loss collaborator while evaluating a single example.
#[derive(Debug, Clone, PartialEq)]
pub struct LossErr(String);

impl LossErr {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl Display for LossErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for LossErr {}

/// A loss that admits a (sub)gradient at every point, evaluated one example at a time.
///
/// Implementations are shared across the threads reducing a batch, so they only get to read
/// the weights. The returned gradient must have the same length as `weights` and must not
/// include any regularization term.
pub trait SubDifferentiableLoss<T>: Sync {
    /// Returns the loss of `example` under `weights` together with its (sub)gradient.
    fn loss_and_gradient(
        &self,
        weights: ArrayView1<f64>,
        example: &T,
    ) -> Result<(f64, Array1<f64>)>;
}

impl<T, F> SubDifferentiableLoss<T> for F
where
    F: Fn(ArrayView1<f64>, &T) -> Result<(f64, Array1<f64>)> + Sync,
{
    fn loss_and_gradient(
        &self,
        weights: ArrayView1<f64>,
        example: &T,
    ) -> Result<(f64, Array1<f64>)> {
        self(weights, example)
    }
}

/// Checks that an example's features line up with the weights.
pub(super) fn check_dim(weights: ArrayView1<f64>, example: &Sample) -> Result<()> {
    if weights.len() != example.dim() {
        return Err(LossErr(format!(
            "example has {} features but there are {} weights",
            example.dim(),
            weights.len()
        )));
    }

    Ok(())
}
