use log::warn;
use ndarray::{ArrayView1, Axis, Zip, parallel::prelude::*};

use super::{
    OptimizerState,
    error::{OptimizerErr, Result},
    proximal::{combined_proximal, decaying_avg, regularization},
};

/// Amount of weights summed by each task when evaluating the penalty. Fixed chunks keep the
/// summation order, and therefore the result, independent of thread scheduling.
const PENALTY_CHUNK: usize = 1024;

/// Hyperparameters of the regularized ADADELTA optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Weight of the newest sample in both running averages, in `(0, 1)`.
    pub decay: f64,
    /// Added under both square roots of the learning rate, must be positive.
    pub smoothing: f64,
    pub l1_strength: f64,
    pub l2_strength: f64,
    /// Rejects gradients holding NaN or infinite entries before touching the state.
    pub check_finite: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            decay: 0.05,
            smoothing: 1e-6,
            l1_strength: 0.,
            l2_strength: 0.,
            check_finite: true,
        }
    }
}

impl OptimizerConfig {
    fn validate(&self) -> Result<()> {
        let invalid = |param, value, reason| {
            Err(OptimizerErr::InvalidConfig {
                param,
                value,
                reason,
            })
        };

        if !(self.decay > 0. && self.decay < 1.) {
            return invalid("decay", self.decay, "must lie strictly between 0 and 1");
        }

        if !(self.smoothing > 0. && self.smoothing.is_finite()) {
            return invalid("smoothing", self.smoothing, "must be positive and finite");
        }

        if !(self.l1_strength >= 0. && self.l1_strength.is_finite()) {
            return invalid("l1_strength", self.l1_strength, "must be non negative and finite");
        }

        if !(self.l2_strength >= 0. && self.l2_strength.is_finite()) {
            return invalid("l2_strength", self.l2_strength, "must be non negative and finite");
        }

        Ok(())
    }
}

/// ADADELTA with L1/L2 regularization applied through proximal steps.
///
/// The optimizer itself is immutable, every piece of evolving data lives in an
/// `OptimizerState` that is moved (or exclusively borrowed) through each `step`.
#[derive(Debug, Clone)]
pub struct Adadelta {
    config: OptimizerConfig,
}

impl Adadelta {
    /// Creates a new `Adadelta` optimizer.
    ///
    /// # Arguments
    /// * `config` - The hyperparameters of the algorithm.
    ///
    /// # Returns
    /// An error if `decay` is outside `(0, 1)`, `smoothing` isn't positive or any strength
    /// is negative. Non finite values are rejected as well.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a new `Adadelta` optimizer with default decay and smoothing.
    ///
    /// # Arguments
    /// * `l1_strength` - The L1 regularization strength.
    /// * `l2_strength` - The L2 regularization strength.
    pub fn with_regularization(l1_strength: f64, l2_strength: f64) -> Result<Self> {
        Self::new(OptimizerConfig {
            l1_strength,
            l2_strength,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Creates the initial state: a copy of `initial_weights` and zeroed running averages.
    pub fn start<'a>(&self, initial_weights: impl Into<ArrayView1<'a, f64>>) -> OptimizerState {
        let mut state = OptimizerState::new(initial_weights.into());
        state.regularization_loss = self.penalty(state.weights());
        state
    }

    /// Performs one optimization step, consuming the previous state and returning the next.
    ///
    /// `gradient` must not include any regularization term, those are handled by the
    /// proximal mappings.
    ///
    /// # Returns
    /// An error if the gradient length doesn't match the state or, when `check_finite` is
    /// set, if the gradient holds a non finite entry.
    pub fn step<'a>(
        &self,
        mut state: OptimizerState,
        gradient: impl Into<ArrayView1<'a, f64>>,
    ) -> Result<OptimizerState> {
        self.step_in_place(&mut state, gradient)?;
        Ok(state)
    }

    /// Same as `step` but updates an exclusively borrowed state. On error the state is left
    /// untouched.
    pub fn step_in_place<'a>(
        &self,
        state: &mut OptimizerState,
        gradient: impl Into<ArrayView1<'a, f64>>,
    ) -> Result<()> {
        let gradient = gradient.into();

        if gradient.len() != state.len() {
            return Err(OptimizerErr::SizeMismatch {
                got: gradient.len(),
                expected: state.len(),
            });
        }

        if self.config.check_finite {
            let non_finite = gradient.iter().enumerate().find(|(_, g)| !g.is_finite());
            if let Some((index, &value)) = non_finite {
                warn!(index = index, value = value; "rejecting non finite gradient");
                return Err(OptimizerErr::NonFinite { index, value });
            }
        }

        let OptimizerConfig {
            decay,
            smoothing,
            l1_strength: l1,
            l2_strength: l2,
            ..
        } = self.config;

        Zip::from(&mut state.weights)
            .and(&mut state.avg_sq_grad)
            .and(&mut state.avg_sq_delta)
            .and(gradient)
            .par_for_each(|w, sq_grad, sq_delta, &g| {
                *sq_grad = decaying_avg(decay, *sq_grad, g * g);

                let rate = (*sq_delta + smoothing).sqrt() / (*sq_grad + smoothing).sqrt();
                let delta = rate * g;

                *sq_delta = decaying_avg(decay, *sq_delta, delta * delta);
                *w = combined_proximal(l1, l2, rate, *w - delta);
            });

        state.regularization_loss = self.penalty(state.weights());
        Ok(())
    }

    /// The regularization penalty of `weights`, summed in parallel.
    pub fn penalty(&self, weights: ArrayView1<f64>) -> f64 {
        let OptimizerConfig {
            l1_strength: l1,
            l2_strength: l2,
            ..
        } = self.config;

        if l1 == 0. && l2 == 0. {
            return 0.;
        }

        let partials: Vec<f64> = weights
            .axis_chunks_iter(Axis(0), PENALTY_CHUNK)
            .into_par_iter()
            .map(|chunk| chunk.iter().map(|&w| regularization(l1, l2, w)).sum::<f64>())
            .collect();

        partials.iter().sum()
    }
}
