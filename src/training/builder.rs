use ndarray::ArrayView1;
use rand::{SeedableRng, rngs::StdRng};

use super::{BatchDriver, Result};
use crate::{loss::SubDifferentiableLoss, optimization::Adadelta, specs::TrainingSpec};

/// Builds `BatchDriver`s given a specification.
#[derive(Default)]
pub struct DriverBuilder;

impl DriverBuilder {
    /// Creates a new `DriverBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `BatchDriver` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the run.
    /// * `data` - The training examples.
    /// * `loss_fn` - The loss collaborator.
    /// * `initial_weights` - The starting point of the optimization.
    ///
    /// # Returns
    /// An error if the spec holds an invalid optimizer or batch configuration.
    pub fn build<'w, T, L>(
        &self,
        spec: &TrainingSpec,
        data: Vec<T>,
        loss_fn: L,
        initial_weights: impl Into<ArrayView1<'w, f64>>,
    ) -> Result<BatchDriver<T, L, StdRng>>
    where
        T: Sync,
        L: SubDifferentiableLoss<T>,
    {
        let optimizer = Adadelta::new(spec.optimizer.into())?;
        let rng = self.generate_rng(spec.seed);

        BatchDriver::new(
            data,
            loss_fn,
            optimizer,
            initial_weights,
            spec.batch_size,
            rng,
        )
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, array};

    use super::*;
    use crate::{
        loss::Result as LossResult, optimization::OptimizerErr, specs::OptimizerSpec,
        training::TrainingErr,
    };

    struct Ones;

    impl SubDifferentiableLoss<()> for Ones {
        fn loss_and_gradient(&self, w: ArrayView1<f64>, _: &()) -> LossResult<(f64, Array1<f64>)> {
            Ok((1., Array1::ones(w.len())))
        }
    }

    fn spec(decay: f64, batch_size: usize) -> TrainingSpec {
        TrainingSpec {
            optimizer: OptimizerSpec {
                decay,
                ..Default::default()
            },
            batch_size,
            seed: Some(1),
        }
    }

    #[test]
    fn builds_from_spec() {
        let driver = DriverBuilder::new()
            .build(&spec(0.1, 2), vec![(); 3], Ones, &[1., 2.][..])
            .unwrap();

        assert_eq!(driver.batch_size(), 2);
        assert_eq!(driver.optimizer().config().decay, 0.1);
        assert_eq!(driver.state().weights(), array![1., 2.]);
    }

    #[test]
    fn invalid_decay_is_reported() {
        let res = DriverBuilder::new().build(&spec(1., 2), vec![()], Ones, &[0.][..]);

        assert!(matches!(
            res,
            Err(TrainingErr::Optimizer(OptimizerErr::InvalidConfig {
                param: "decay",
                ..
            }))
        ));
    }

    #[test]
    fn zero_batch_size_is_reported() {
        let res = DriverBuilder::new().build(&spec(0.1, 0), vec![()], Ones, &[0.][..]);
        assert!(matches!(res, Err(TrainingErr::InvalidConfig(_))));
    }
}
