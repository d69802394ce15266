use ndarray::{Array1, ArrayView1};

use super::{Result, SubDifferentiableLoss, loss_fn::check_dim};
use crate::dataset::Sample;

/// Squared error of a linear model, `(w·x - y)^2 / 2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquaredError;

impl SquaredError {
    /// Returns a new `SquaredError`.
    pub fn new() -> Self {
        Self
    }
}

impl SubDifferentiableLoss<Sample> for SquaredError {
    fn loss_and_gradient(
        &self,
        weights: ArrayView1<f64>,
        example: &Sample,
    ) -> Result<(f64, Array1<f64>)> {
        check_dim(weights, example)?;

        let residual = weights.dot(&example.x) - example.y;
        let grad = &example.x * residual;

        Ok((0.5 * residual * residual, grad))
    }
}
