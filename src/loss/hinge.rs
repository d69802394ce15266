use ndarray::{Array1, ArrayView1};

use super::{Result, SubDifferentiableLoss, loss_fn::check_dim};
use crate::dataset::Sample;

/// Hinge loss of a linear classifier, `max(0, 1 - y·(w·x))` with labels in `{-1, 1}`.
///
/// Not differentiable at the margin, where the zero subgradient is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hinge;

impl SubDifferentiableLoss<Sample> for Hinge {
    fn loss_and_gradient(
        &self,
        weights: ArrayView1<f64>,
        example: &Sample,
    ) -> Result<(f64, Array1<f64>)> {
        check_dim(weights, example)?;

        let margin = example.y * weights.dot(&example.x);
        if margin >= 1. {
            return Ok((0., Array1::zeros(weights.len())));
        }

        Ok((1. - margin, &example.x * -example.y))
    }
}
