//! Scalar building blocks of the regularized ADADELTA update.

/// Exponential moving average: blends `new` into `old` with weight `decay`.
///
/// `decay = 0` keeps `old`, `decay = 1` replaces it with `new`.
#[inline]
pub fn decaying_avg(decay: f64, old: f64, new: f64) -> f64 {
    (1. - decay) * old + decay * new
}

/// Soft thresholding, the proximal mapping of `scale * |x|`.
///
/// # Arguments
/// * `scale` - The threshold, a non negative number.
/// * `x` - The value to shrink.
#[inline]
pub fn l1_proximal(scale: f64, x: f64) -> f64 {
    if x > scale {
        x - scale
    } else if x < -scale {
        x + scale
    } else {
        0.
    }
}

/// Shrinkage towards zero, the proximal mapping of `scale * x^2 / 2`.
#[inline]
pub fn l2_proximal(scale: f64, x: f64) -> f64 {
    x / (scale + 1.)
}

/// Applies the L1 proximal mapping followed by the L2 one, each scaled by `rate` times its
/// strength. A zero strength skips its mapping, so both zero is the identity.
///
/// # Arguments
/// * `l1_strength` - The L1 regularization strength.
/// * `l2_strength` - The L2 regularization strength.
/// * `rate` - The component's current adaptive learning rate.
/// * `x` - The candidate weight.
#[inline]
pub fn combined_proximal(l1_strength: f64, l2_strength: f64, rate: f64, x: f64) -> f64 {
    let mut x = x;

    if l1_strength != 0. {
        x = l1_proximal(rate * l1_strength, x);
    }

    if l2_strength != 0. {
        x = l2_proximal(rate * l2_strength, x);
    }

    x
}

/// The penalty `l1 * |w| + l2 * w^2 / 2` of a single weight.
#[inline]
pub fn regularization(l1_strength: f64, l2_strength: f64, w: f64) -> f64 {
    l1_strength * w.abs() + 0.5 * l2_strength * w * w
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 9] = [-3.5, -1.0, -0.5, -0.1, 0.0, 0.1, 0.5, 1.0, 3.5];

    #[test]
    fn decaying_avg_extremes() {
        for (a, b) in [(0., 1.), (-2.5, 7.), (1e9, -1e-9)] {
            assert_eq!(decaying_avg(0., a, b), a);
            assert_eq!(decaying_avg(1., a, b), b);
        }
    }

    #[test]
    fn decaying_avg_midpoint() {
        assert_eq!(decaying_avg(0.5, 2., 4.), 3.);
    }

    #[test]
    fn l1_thresholds() {
        assert_eq!(l1_proximal(0.5, 0.3), 0.);
        assert_eq!(l1_proximal(0.5, -0.5), 0.);
        assert_eq!(l1_proximal(0.5, 0.5), 0.);
        assert_eq!(l1_proximal(0.5, 2.), 1.5);
        assert_eq!(l1_proximal(0.5, -2.), -1.5);
    }

    #[test]
    fn l1_is_odd_and_non_decreasing() {
        let scale = 0.5;
        for x in XS {
            assert_eq!(l1_proximal(scale, -x), -l1_proximal(scale, x));
        }

        for pair in XS.windows(2) {
            assert!(l1_proximal(scale, pair[0]) <= l1_proximal(scale, pair[1]));
        }
    }

    #[test]
    fn l2_shrinks() {
        assert_eq!(l2_proximal(1., 4.), 2.);
        assert_eq!(l2_proximal(0., 4.), 4.);
    }

    #[test]
    fn combined_without_strengths_is_identity() {
        for x in XS {
            assert_eq!(combined_proximal(0., 0., 0.7, x), x);
        }
    }

    #[test]
    fn combined_applies_l1_then_l2() {
        // l1 scale = 1, l2 scale = 1: (3 - 1) / 2
        assert_eq!(combined_proximal(0.5, 0.5, 2., 3.), 1.);
    }

    #[test]
    fn regularization_is_non_negative() {
        for w in XS {
            assert!(regularization(0.3, 0.2, w) >= 0.);
        }
        assert_eq!(regularization(1., 2., -2.), 2. + 4.);
    }
}
