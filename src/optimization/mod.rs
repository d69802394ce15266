mod adadelta;
mod error;
pub mod proximal;
mod state;

pub use adadelta::{Adadelta, OptimizerConfig};
pub use error::{OptimizerErr, Result};
pub use state::OptimizerState;
