use ndarray::{Array1, ArrayView1};

/// The buffers ADADELTA carries from one step to the next.
///
/// All three vectors share the same length, and both running averages are entrywise non
/// negative. Only `Adadelta::start` creates a state and only `Adadelta::step` changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerState {
    pub(super) weights: Array1<f64>,
    pub(super) avg_sq_grad: Array1<f64>,
    pub(super) avg_sq_delta: Array1<f64>,
    pub(super) regularization_loss: f64,
}

impl OptimizerState {
    /// Creates a state holding a copy of `weights` and zeroed running averages.
    pub(super) fn new(weights: ArrayView1<f64>) -> Self {
        let len = weights.len();
        Self {
            weights: weights.to_owned(),
            avg_sq_grad: Array1::zeros(len),
            avg_sq_delta: Array1::zeros(len),
            regularization_loss: 0.,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The current parameters.
    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Running average of the squared gradients.
    #[inline]
    pub fn avg_sq_grad(&self) -> ArrayView1<'_, f64> {
        self.avg_sq_grad.view()
    }

    /// Running average of the squared parameter updates.
    #[inline]
    pub fn avg_sq_delta(&self) -> ArrayView1<'_, f64> {
        self.avg_sq_delta.view()
    }

    /// The regularization penalty evaluated at the current weights.
    #[inline]
    pub fn regularization_loss(&self) -> f64 {
        self.regularization_loss
    }

    /// Consumes the state and hands back the weights buffer.
    pub fn into_weights(self) -> Array1<f64> {
        self.weights
    }
}
