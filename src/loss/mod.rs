mod hinge;
mod loss_fn;
mod squared;

pub use hinge::Hinge;
pub use loss_fn::{LossErr, Result, SubDifferentiableLoss};
pub use squared::SquaredError;
