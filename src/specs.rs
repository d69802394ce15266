//! Serializable descriptions of a training run, loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::optimization::OptimizerConfig;

/// The optimizer's hyperparameters. Omitted fields take the `OptimizerConfig` defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSpec {
    pub decay: f64,
    pub smoothing: f64,
    pub l1_strength: f64,
    pub l2_strength: f64,
    pub check_finite: bool,
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        OptimizerConfig::default().into()
    }
}

impl From<OptimizerConfig> for OptimizerSpec {
    fn from(value: OptimizerConfig) -> Self {
        Self {
            decay: value.decay,
            smoothing: value.smoothing,
            l1_strength: value.l1_strength,
            l2_strength: value.l2_strength,
            check_finite: value.check_finite,
        }
    }
}

impl From<OptimizerSpec> for OptimizerConfig {
    fn from(value: OptimizerSpec) -> Self {
        Self {
            decay: value.decay,
            smoothing: value.smoothing,
            l1_strength: value.l1_strength,
            l2_strength: value.l2_strength,
            check_finite: value.check_finite,
        }
    }
}

/// Everything a `DriverBuilder` needs besides the data, the loss and the initial weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSpec {
    #[serde(default)]
    pub optimizer: OptimizerSpec,
    pub batch_size: usize,
    /// Seeds the shuffling, `None` draws a seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TrainingSpec {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_spec() {
        let json = r#"{
            "optimizer": {
                "decay": 0.1,
                "smoothing": 1e-8,
                "l1_strength": 0.01,
                "l2_strength": 0.001,
                "check_finite": false
            },
            "batch_size": 32,
            "seed": 7
        }"#;

        let spec = TrainingSpec::from_json(json).unwrap();

        assert_eq!(spec.batch_size, 32);
        assert_eq!(spec.seed, Some(7));
        assert_eq!(spec.optimizer.decay, 0.1);
        assert_eq!(spec.optimizer.l1_strength, 0.01);
        assert!(!spec.optimizer.check_finite);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{ "batch_size": 4, "optimizer": { "l1_strength": 0.5 } }"#;
        let spec = TrainingSpec::from_json(json).unwrap();

        let config = OptimizerConfig::from(spec.optimizer);
        assert_eq!(
            config,
            OptimizerConfig {
                l1_strength: 0.5,
                ..Default::default()
            }
        );
        assert_eq!(spec.seed, None);
    }

    #[test]
    fn batch_size_is_required() {
        assert!(TrainingSpec::from_json("{}").is_err());
    }
}
