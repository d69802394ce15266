use std::time::Duration;

/// Counters accumulated by a `BatchDriver` across pulls.
#[derive(Debug, Default, Clone)]
pub struct DriverMetrics {
    pub reduce_time: Duration,
    pub step_time: Duration,

    pub steps: u64,
    pub samples: u64,
    pub epochs: u64,
}

impl DriverMetrics {
    #[inline]
    pub fn bump_step(&mut self) {
        self.steps += 1;
    }

    #[inline]
    pub fn bump_epoch(&mut self) {
        self.epochs += 1;
    }

    #[inline]
    pub fn add_samples(&mut self, n: usize) {
        self.samples += n as u64;
    }
}
