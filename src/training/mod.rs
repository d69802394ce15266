mod builder;
mod driver;
mod error;
mod metrics;
mod reduce;

pub use builder::DriverBuilder;
pub use driver::{BatchDriver, Step};
pub use error::{Result, TrainingErr};
pub use metrics::DriverMetrics;
