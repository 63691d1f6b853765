//! Analytic field model around the coil
//!
//! The magnet's field at the coil falls off with a bell-shaped profile along
//! the coil axis and a Lorentzian factor for lateral (off-axis) offset. The
//! coil centre sits at x = 0. Everything here is pure.

use crate::consts::{AXIAL_SIGMA, RADIAL_SIGMA};

/// Signed source strength after applying polarity
#[inline]
pub fn effective_strength(field_strength: f64, is_reversed: bool) -> f64 {
    if is_reversed { -field_strength } else { field_strength }
}

/// Off-axis coupling factor in (0, 1], equal to 1 on axis
#[inline]
pub fn radial_factor(lateral_offset: f64) -> f64 {
    let r = lateral_offset / RADIAL_SIGMA;
    1.0 / (1.0 + r * r)
}

/// Axial profile term `1 + (x/σ)²`, always >= 1
#[inline]
fn axial_term(position: f64) -> f64 {
    let u = position / AXIAL_SIGMA;
    1.0 + u * u
}

/// Field strength at the coil for a magnet at `position` (axial) and
/// `lateral_offset`, given the signed source strength `b0`
pub fn field_at(position: f64, lateral_offset: f64, b0: f64) -> f64 {
    b0 * axial_term(position).powf(-1.5) * radial_factor(lateral_offset)
}

/// Closed-form dB/dx of [`field_at`]
pub fn field_gradient_at(position: f64, lateral_offset: f64, b0: f64) -> f64 {
    -1.5 * b0
        * axial_term(position).powf(-2.5)
        * (2.0 * position / (AXIAL_SIGMA * AXIAL_SIGMA))
        * radial_factor(lateral_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_field_peak_at_center() {
        assert_eq!(field_at(0.0, 0.0, 1.5), 1.5);
        assert_eq!(field_gradient_at(0.0, 0.0, 1.5), 0.0);
        assert_eq!(field_gradient_at(0.0, 40.0, -3.0), 0.0);
    }

    #[test]
    fn test_radial_factor_bounds() {
        assert_eq!(radial_factor(0.0), 1.0);
        // One sigma off-axis halves the coupling
        assert_relative_eq!(radial_factor(RADIAL_SIGMA), 0.5);
        assert_relative_eq!(radial_factor(-RADIAL_SIGMA), 0.5);
        assert!(radial_factor(100.0) > 0.0);
    }

    #[test]
    fn test_effective_strength_polarity() {
        assert_eq!(effective_strength(2.0, false), 2.0);
        assert_eq!(effective_strength(2.0, true), -2.0);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let h = 1e-5;
        for &x in &[-150.0, -45.0, -10.0, 3.0, 30.0, 120.0] {
            let numeric = (field_at(x + h, 12.0, 2.5) - field_at(x - h, 12.0, 2.5)) / (2.0 * h);
            assert_relative_eq!(field_gradient_at(x, 12.0, 2.5), numeric, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_field_approaching_center_grows() {
        // Left of the coil the gradient is positive for a positive source
        assert!(field_gradient_at(-79.0, 0.0, 1.5) > 0.0);
        assert!(field_gradient_at(79.0, 0.0, 1.5) < 0.0);
        assert!(field_at(-79.0, 0.0, 1.5) > field_at(-80.0, 0.0, 1.5));
    }

    proptest! {
        #[test]
        fn prop_polarity_antisymmetry(
            x in -200.0f64..200.0,
            y in -100.0f64..100.0,
            b0 in 0.1f64..5.0,
        ) {
            prop_assert_eq!(field_at(-x, y, -b0), -field_at(x, y, b0));
            prop_assert_eq!(field_gradient_at(-x, y, -b0), field_gradient_at(x, y, b0));
        }

        #[test]
        fn prop_radial_factor_in_unit_interval(y in -100.0f64..100.0) {
            let f = radial_factor(y);
            prop_assert!(f > 0.0 && f <= 1.0);
        }

        #[test]
        fn prop_radial_factor_decreasing(a in 0.0f64..100.0, gap in 0.01f64..50.0) {
            let b = a + gap;
            prop_assume!(b <= 100.0);
            prop_assert!(radial_factor(b) < radial_factor(a));
            prop_assert!(radial_factor(-b) < radial_factor(-a));
        }

        #[test]
        fn prop_field_is_finite(x in -200.0f64..200.0, y in -100.0f64..100.0) {
            prop_assert!(field_at(x, y, 5.0).is_finite());
            prop_assert!(field_gradient_at(x, y, 5.0).is_finite());
        }
    }
}
