//! ADADELTA with L1/L2 proximal regularization, fed by a parallel minibatch driver.

pub mod dataset;
pub mod loss;
pub mod optimization;
pub mod specs;
pub mod training;

pub use optimization::{Adadelta, OptimizerConfig, OptimizerErr, OptimizerState};
pub use training::{BatchDriver, DriverBuilder, Step, TrainingErr};
