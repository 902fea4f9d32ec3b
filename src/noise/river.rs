//! River strength from local height gradients.

use super::height::height;

/// Seed offset decorrelating the coarse river band from the terrain.
pub const RIVER_SEED_OFFSET: i32 = 69;

/// Offset of the diagonal stencil samples.
const STENCIL_STEP: f64 = 0.01;
/// Offset of the lower stencil sample.
const STENCIL_DROP: f64 = 0.5;
/// Coordinate divisor for the coarse river band.
const RIVER_ZOOM: f64 = 1.5;

/// Intermediate quantities of a river evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverTerms {
    /// Gradient magnitude proxy, offset so flat ground goes negative.
    pub grad_d: f64,
    /// Amplified distance of the coarse river band from mid-height.
    pub smt: f64,
}

impl RiverTerms {
    /// River strength in [0, 1]; 1 means no river.
    ///
    /// A river only forms while `smt < grad_d`, which also keeps the
    /// division away from zero. Every other case, including `grad_d <= 0`,
    /// is exactly 1.
    pub fn strength(&self) -> f64 {
        if self.smt < self.grad_d {
            self.smt / self.grad_d
        } else {
            1.0
        }
    }
}

/// Evaluates the gradient and band terms that drive [`river`].
///
/// The stencil samples `(x, y)`, `(x + 0.01, y + 0.01)` twice and
/// `(x, y + 0.5)`; the repeated diagonal sample is part of the established
/// noise and is evaluated once and reused.
pub fn river_terms(x: f64, y: f64, depth: u32, seed: i32) -> RiverTerms {
    let p_0_0 = height(x, y, depth, seed);
    let p_0_1 = height(x + STENCIL_STEP, y + STENCIL_STEP, depth, seed);
    let p_1_0 = height(x, y + STENCIL_DROP, depth, seed);
    let p_1_1 = p_0_1;
    let band = height(
        x / RIVER_ZOOM,
        y / RIVER_ZOOM,
        depth / 2,
        seed.wrapping_add(RIVER_SEED_OFFSET),
    );

    let grad_x = (p_0_0 + p_0_1) - (p_1_0 + p_1_1);
    let grad_y = (p_0_0 + p_1_0) - (p_0_1 + p_1_1);
    let grad_d = (grad_x * grad_x + grad_y * grad_y).sqrt() * 0.5 - 0.1;

    let mut smt = (band - 0.5).abs();
    smt *= 3.0;

    RiverTerms { grad_d, smt }
}

/// Samples river strength at `(x, y)`.
///
/// Rivers carve where the coarse band sits near mid-height and the local
/// slope is shallow. 0 is the strongest river, 1 is no river.
pub fn river(x: f64, y: f64, depth: u32, seed: i32) -> f64 {
    river_terms(x, y, depth, seed).strength()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_river_known_values() {
        assert_eq!(river(0.25, 0.75, 18, 10), 1.0);
        assert_eq!(river(1.3, -2.7, 18, 42), 1.0);
    }

    #[test]
    fn test_river_known_value_inside_channel() {
        let terms = river_terms(0.0, 0.1, 18, 10);
        assert!(terms.smt < terms.grad_d, "{:?}", terms);
        assert_eq!(river(0.0, 0.1, 18, 10), 0.7623640145428445);
        assert_eq!(terms.strength(), river(0.0, 0.1, 18, 10));
    }

    #[test]
    fn test_no_river_when_band_exceeds_gradient() {
        let cases = [
            RiverTerms { grad_d: 0.2, smt: 0.2 },
            RiverTerms { grad_d: 0.2, smt: 0.9 },
            RiverTerms { grad_d: 0.0, smt: 0.0 },
            RiverTerms { grad_d: -0.1, smt: 0.0 },
            RiverTerms { grad_d: -0.05, smt: 0.3 },
        ];
        for terms in cases {
            assert_eq!(terms.strength(), 1.0, "{:?}", terms);
        }
    }

    #[test]
    fn test_strength_ratio_below_gradient() {
        let terms = RiverTerms { grad_d: 0.4, smt: 0.1 };
        assert_eq!(terms.strength(), 0.25);
        let terms = RiverTerms { grad_d: 0.4, smt: 0.0 };
        assert_eq!(terms.strength(), 0.0);
    }

    #[test]
    fn test_river_matches_terms_and_range() {
        for i in 0..100 {
            let x = i as f64 * 0.097 + 3.0;
            let y = i as f64 * 0.041 - 1.0;
            let terms = river_terms(x, y, 18, 3);
            let r = river(x, y, 18, 3);
            assert_eq!(r, terms.strength());
            assert!((0.0..=1.0).contains(&r), "river {} out of range", r);
            if terms.smt >= terms.grad_d {
                assert_eq!(r, 1.0);
            }
        }
    }

    #[test]
    fn test_flat_field_has_no_river() {
        // Depth 0 flattens the field: zero gradient, grad_d = -0.1.
        let terms = river_terms(4.2, 1.7, 0, 5);
        assert_eq!(terms.grad_d, -0.1);
        assert_eq!(terms.smt, 0.0);
        assert_eq!(river(4.2, 1.7, 0, 5), 1.0);
    }
}
