use std::{env, fs};

use anyhow::Context;
use log::info;
use ndarray::{Array1, Array2};
use prox_adadelta::{
    DriverBuilder,
    dataset::InMemoryDataset,
    loss::SquaredError,
    specs::{OptimizerSpec, TrainingSpec},
};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

const DIM: usize = 20;
const SAMPLES: usize = 512;
const DEFAULT_STEPS: usize = 2000;

fn default_spec() -> TrainingSpec {
    TrainingSpec {
        optimizer: OptimizerSpec {
            l1_strength: 0.01,
            ..Default::default()
        },
        batch_size: 32,
        seed: Some(42),
    }
}

/// A linear regression problem where only every fifth feature matters.
fn sparse_regression(rng: &mut StdRng) -> anyhow::Result<(InMemoryDataset, Array1<f64>)> {
    let feature = Normal::new(0., 1.)?;
    let noise = Normal::new(0., 0.1)?;

    let truth = Array1::from_shape_fn(DIM, |i| {
        if i % 5 == 0 { (i / 5 + 1) as f64 } else { 0. }
    });

    let xs = Array2::from_shape_fn((SAMPLES, DIM), |_| feature.sample(rng));
    let ys = xs.dot(&truth) + Array1::from_shape_fn(SAMPLES, |_| noise.sample(rng));

    Ok((InMemoryDataset::new(xs, ys), truth))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let spec = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            TrainingSpec::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => default_spec(),
    };

    let steps = match args.next() {
        Some(steps) => steps
            .parse::<usize>()
            .context("the amount of steps must be a non negative integer")?,
        None => DEFAULT_STEPS,
    };

    let mut rng = StdRng::seed_from_u64(spec.seed.unwrap_or_default());
    let (dataset, truth) = sparse_regression(&mut rng)?;
    info!(
        "training on {} samples with {} features",
        dataset.len(),
        dataset.dim()
    );

    let initial = Array1::<f64>::zeros(DIM);
    let mut driver =
        DriverBuilder::new().build(&spec, dataset.into_samples(), SquaredError, &initial)?;

    let mut objective = f64::NAN;
    for _ in 0..steps {
        objective = driver.next_step()?.total_loss();
    }

    let metrics = driver.metrics().clone();
    info!(
        "{} steps over {} epochs, reduce {:?}, step {:?}",
        metrics.steps, metrics.epochs, metrics.reduce_time, metrics.step_time
    );

    let weights = driver.into_state().into_weights();
    println!("objective after {steps} steps: {objective:.6}");
    println!("learned: {weights:.3}");
    println!("truth:   {truth:.3}");

    Ok(())
}
