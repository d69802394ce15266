use std::time::Instant;

use log::{debug, info, trace};
use ndarray::ArrayView1;
use rand::{Rng, seq::SliceRandom};

use super::{
    DriverMetrics, Result, TrainingErr,
    reduce::{BatchPos, batch_loss_and_gradient},
};
use crate::{
    loss::SubDifferentiableLoss,
    optimization::{Adadelta, OptimizerState},
};

/// One element of the stream produced by a `BatchDriver`.
///
/// `state` borrows the driver's own buffers, so it has to be copied before pulling again
/// if a snapshot is needed.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub state: &'a OptimizerState,
    /// Averaged data loss of the batch, without the regularization penalty.
    pub loss: f64,
    pub epoch: usize,
    /// Position of the batch within its epoch.
    pub batch: usize,
}

impl<'a> Step<'a> {
    #[inline]
    pub fn weights(&self) -> ArrayView1<'a, f64> {
        self.state.weights()
    }

    /// The batch loss plus the regularization penalty of the updated weights.
    #[inline]
    pub fn total_loss(&self) -> f64 {
        self.loss + self.state.regularization_loss()
    }
}

/// Drives an `Adadelta` optimizer with minibatches drawn from an in-memory training set.
///
/// Every call to `next_step` reshuffles the data if a new epoch begins, reduces the next
/// batch in parallel and performs a single optimizer step. The stream never ends on its own
/// and can't be rewound.
pub struct BatchDriver<T, L, R> {
    data: Vec<T>,
    loss_fn: L,
    batch_size: usize,
    optimizer: Adadelta,
    state: OptimizerState,
    rng: R,

    epoch: usize,
    batch: usize,
    cursor: usize,
    epoch_loss: f64,
    metrics: DriverMetrics,
}

impl<T, L, R> BatchDriver<T, L, R>
where
    T: Sync,
    L: SubDifferentiableLoss<T>,
    R: Rng,
{
    /// Creates a new `BatchDriver`.
    ///
    /// # Arguments
    /// * `data` - The training examples, reordered in place every epoch.
    /// * `loss_fn` - Computes the loss and gradient of a single example.
    /// * `optimizer` - The optimizer fed with the averaged batch gradients.
    /// * `initial_weights` - The starting point, copied into the optimizer state.
    /// * `batch_size` - The amount of examples per batch.
    /// * `rng` - The source of the per-epoch permutations.
    ///
    /// # Returns
    /// An error if `batch_size` is zero or there is no training data.
    pub fn new<'w>(
        data: Vec<T>,
        loss_fn: L,
        optimizer: Adadelta,
        initial_weights: impl Into<ArrayView1<'w, f64>>,
        batch_size: usize,
        rng: R,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(TrainingErr::InvalidConfig(
                "batch size must be greater than zero".into(),
            ));
        }

        if data.is_empty() {
            return Err(TrainingErr::InvalidConfig(
                "training data must not be empty".into(),
            ));
        }

        let state = optimizer.start(initial_weights);

        Ok(Self {
            data,
            loss_fn,
            batch_size,
            optimizer,
            state,
            rng,
            epoch: 0,
            batch: 0,
            cursor: 0,
            epoch_loss: 0.,
            metrics: DriverMetrics::default(),
        })
    }

    /// Creates a new `BatchDriver` whose optimizer uses the default decay and smoothing.
    ///
    /// # Arguments
    /// * `l1_strength`, `l2_strength` - The regularization strengths of the optimizer.
    /// * The rest, as in `new`.
    pub fn with_regularization<'w>(
        data: Vec<T>,
        loss_fn: L,
        l1_strength: f64,
        l2_strength: f64,
        initial_weights: impl Into<ArrayView1<'w, f64>>,
        batch_size: usize,
        rng: R,
    ) -> Result<Self> {
        let optimizer = Adadelta::with_regularization(l1_strength, l2_strength)?;
        Self::new(data, loss_fn, optimizer, initial_weights, batch_size, rng)
    }

    /// Pulls the next step out of the stream.
    ///
    /// # Returns
    /// The updated state with the averaged batch loss and its position, or the first error
    /// raised while reducing the batch or stepping the optimizer. On error the state and the
    /// position are left as they were.
    pub fn next_step(&mut self) -> Result<Step<'_>> {
        if self.cursor == 0 {
            self.data.shuffle(&mut self.rng);
            trace!(epoch = self.epoch; "reshuffled training data");
        }

        let epoch = self.epoch;
        let batch = self.batch;
        let end = (self.cursor + self.batch_size).min(self.data.len());
        let examples = &self.data[self.cursor..end];

        let start = Instant::now();
        let (loss, grad) = batch_loss_and_gradient(
            &self.loss_fn,
            self.state.weights(),
            examples,
            self.batch_size,
            BatchPos { epoch, batch },
        )?;
        self.metrics.reduce_time += start.elapsed();

        let start = Instant::now();
        self.optimizer.step_in_place(&mut self.state, &grad)?;
        self.metrics.step_time += start.elapsed();

        self.metrics.bump_step();
        self.metrics.add_samples(end - self.cursor);
        debug!(epoch = epoch, batch = batch, loss = loss; "step");

        self.epoch_loss += loss;
        self.cursor = end;
        self.batch += 1;

        if self.cursor == self.data.len() {
            let mean_loss = self.epoch_loss / self.batch as f64;
            info!(epoch = epoch, batches = self.batch, mean_loss = mean_loss; "epoch finished");

            self.metrics.bump_epoch();
            self.epoch += 1;
            self.batch = 0;
            self.cursor = 0;
            self.epoch_loss = 0.;
        }

        Ok(Step {
            state: &self.state,
            loss,
            epoch,
            batch,
        })
    }
}

impl<T, L, R> BatchDriver<T, L, R> {
    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    pub fn optimizer(&self) -> &Adadelta {
        &self.optimizer
    }

    pub fn metrics(&self) -> &DriverMetrics {
        &self.metrics
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The amount of batches per epoch, counting a short trailing one.
    #[inline]
    pub fn batches_per_epoch(&self) -> usize {
        self.data.len().div_ceil(self.batch_size)
    }

    /// Stops the stream and hands back the last state.
    pub fn into_state(self) -> OptimizerState {
        self.state
    }
}
