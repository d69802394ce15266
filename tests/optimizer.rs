use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{Array1, array};
use prox_adadelta::{Adadelta, OptimizerConfig};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn adadelta(decay: f64, smoothing: f64, l1: f64, l2: f64) -> Adadelta {
    Adadelta::new(OptimizerConfig {
        decay,
        smoothing,
        l1_strength: l1,
        l2_strength: l2,
        check_finite: true,
    })
    .unwrap()
}

fn random_vec(rng: &mut StdRng, len: usize) -> Array1<f64> {
    Array1::from_shape_fn(len, |_| rng.random_range(-5.0..5.0))
}

#[test]
fn single_step_from_origin() {
    let opt = adadelta(0.5, 1e-6, 0., 0.);
    let state = opt.start(&[0., 0.][..]);

    let state = opt.step(state, &[1., -1.][..]).unwrap();

    assert_eq!(state.avg_sq_grad(), array![0.5, 0.5]);
    assert_relative_eq!(state.weights()[0], -0.001414, max_relative = 1e-3);
    assert_relative_eq!(state.weights()[1], 0.001414, max_relative = 1e-3);
    assert_relative_eq!(state.avg_sq_delta()[0], 1e-6, max_relative = 1e-5);
    assert_relative_eq!(state.avg_sq_delta()[1], 1e-6, max_relative = 1e-5);
    assert_eq!(state.regularization_loss(), 0.);
}

#[test]
fn step_is_deterministic() {
    let opt = adadelta(0.1, 1e-6, 0.05, 0.02);
    let mut rng = StdRng::seed_from_u64(42);
    let initial = random_vec(&mut rng, 3000);
    let grads: Vec<_> = (0..5).map(|_| random_vec(&mut rng, 3000)).collect();

    let run = || {
        grads
            .iter()
            .fold(opt.start(&initial), |state, g| opt.step(state, g).unwrap())
    };

    let a = run();
    let b = run();

    assert_eq!(a, b);
    assert_eq!(
        a.regularization_loss().to_bits(),
        b.regularization_loss().to_bits()
    );
}

#[test]
fn invariants_hold_along_random_steps() {
    let opt = adadelta(0.05, 1e-6, 0.1, 0.1);
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = opt.start(&random_vec(&mut rng, 64));

    for _ in 0..200 {
        let grad = random_vec(&mut rng, 64);
        state = opt.step(state, &grad).unwrap();

        assert_eq!(state.len(), 64);
        assert_eq!(state.avg_sq_grad().len(), 64);
        assert_eq!(state.avg_sq_delta().len(), 64);
        assert!(state.avg_sq_grad().iter().all(|&v| v >= 0.));
        assert!(state.avg_sq_delta().iter().all(|&v| v >= 0.));
        assert!(state.regularization_loss() >= 0.);
    }
}

#[test]
fn regularization_loss_matches_weights() {
    let opt = adadelta(0.5, 1e-6, 0.3, 0.2);
    let state = opt.start(&[2., -1., 0.5][..]);
    let state = opt.step(state, &[0.1, 0.2, -0.3][..]).unwrap();

    let expected: f64 = state
        .weights()
        .iter()
        .map(|w| 0.3 * w.abs() + 0.5 * 0.2 * w * w)
        .sum();
    assert_abs_diff_eq!(state.regularization_loss(), expected, epsilon = 1e-12);
}

#[test]
fn minimizes_a_quadratic() {
    // f(w) = |w - c|^2 / 2, gradient w - c
    let target = array![3., -2., 0.5];
    let opt = adadelta(0.05, 1e-4, 0., 0.);
    let mut state = opt.start(&Array1::<f64>::zeros(3));

    for _ in 0..20_000 {
        let grad = state.weights().to_owned() - &target;
        state = opt.step(state, &grad).unwrap();
    }

    assert_abs_diff_eq!(state.weights(), target.view(), epsilon = 1e-2);
}

#[test]
fn l1_drives_weak_coordinates_to_zero() {
    // The second coordinate's pull towards 0.05 is weaker than the L1 penalty.
    let target = array![3., 0.05];
    let opt = adadelta(0.05, 1e-4, 0.5, 0.);
    let mut state = opt.start(&array![1., 1.]);

    for _ in 0..20_000 {
        let grad = state.weights().to_owned() - &target;
        state = opt.step(state, &grad).unwrap();
    }

    assert_eq!(state.weights()[1], 0.);
    assert!(state.weights()[0] > 2.);
}
