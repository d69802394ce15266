use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

use super::{Result, TrainingErr};
use crate::loss::SubDifferentiableLoss;

/// Position of a batch in the stream, attached to the errors it raises.
#[derive(Debug, Clone, Copy)]
pub(super) struct BatchPos {
    pub epoch: usize,
    pub batch: usize,
}

/// Evaluates every example of `batch` in parallel and sums the losses and gradients, then
/// scales both by `1 / batch_size`.
///
/// The divisor is the configured batch size, not `batch.len()`, so a short trailing batch
/// gets a proportionally smaller step.
///
/// # Arguments
/// * `loss_fn` - The loss collaborator, only read by the workers.
/// * `weights` - The current weights, only read by the workers.
/// * `batch` - The examples of this batch.
/// * `batch_size` - The configured batch size.
/// * `pos` - Where this batch sits in the stream.
///
/// # Returns
/// The first error any worker hits, the rest of the batch is discarded.
pub(super) fn batch_loss_and_gradient<T, L>(
    loss_fn: &L,
    weights: ArrayView1<f64>,
    batch: &[T],
    batch_size: usize,
    pos: BatchPos,
) -> Result<(f64, Array1<f64>)>
where
    T: Sync,
    L: SubDifferentiableLoss<T>,
{
    let len = weights.len();

    let (loss, mut grad) = batch
        .par_iter()
        .map(|example| evaluate(loss_fn, weights, example, pos))
        .try_reduce(
            || (0., Array1::zeros(len)),
            |(loss_a, mut grad_a), (loss_b, grad_b)| {
                grad_a += &grad_b;
                Ok((loss_a + loss_b, grad_a))
            },
        )?;

    let scale = 1. / batch_size as f64;
    grad *= scale;

    Ok((loss * scale, grad))
}

fn evaluate<T, L>(
    loss_fn: &L,
    weights: ArrayView1<f64>,
    example: &T,
    pos: BatchPos,
) -> Result<(f64, Array1<f64>)>
where
    L: SubDifferentiableLoss<T>,
{
    let BatchPos { epoch, batch } = pos;

    let (loss, grad) = loss_fn
        .loss_and_gradient(weights, example)
        .map_err(|source| TrainingErr::Loss {
            epoch,
            batch,
            source,
        })?;

    if grad.len() != weights.len() {
        return Err(TrainingErr::GradientLength {
            epoch,
            batch,
            got: grad.len(),
            expected: weights.len(),
        });
    }

    Ok((loss, grad))
}
