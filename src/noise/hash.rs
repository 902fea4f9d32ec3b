//! Xorshift-style coordinate hashing.

/// Prime modulus used to reduce a cell hash to a value in [0, 1).
pub const CELL_MODULUS: u64 = 6_700_417;

/// Mixes two coordinates into a pseudo-random 64-bit value.
///
/// Each step reads the operands as already overwritten by the previous step.
/// The shift amount of every step depends on `y` (`x << (13 + y) << 13`
/// rather than `(x << 13) + (y << 13)`), with the count taken modulo 64 and
/// all arithmetic wrapping. This matches the noise the generator has always
/// produced, so existing seeds keep their maps.
#[allow(unused_assignments)]
pub fn hash(mut x: u64, mut y: u64) -> u64 {
    x ^= shl(shl(x, y.wrapping_add(13)), 13);
    y ^= shr(shr(x, y.wrapping_add(7)), 7);
    x ^= shl(shl(x, y.wrapping_add(17)), 17);
    y ^= shl(shl(x, y.wrapping_add(13)), 13);
    x ^= shr(shr(x, y.wrapping_add(7)), 7);
    // Last write to `y` is never read.
    y ^= shl(shl(x, y.wrapping_add(17)), 17);
    x
}

#[inline]
fn shl(value: u64, count: u64) -> u64 {
    // wrapping_shl masks the count to the low 6 bits.
    value.wrapping_shl(count as u32)
}

#[inline]
fn shr(value: u64, count: u64) -> u64 {
    value.wrapping_shr(count as u32)
}

/// Returns the pseudo-random value in [0, 1) attached to grid cell `(xi, yi)`.
///
/// Coordinates are mixed in wrapping 32-bit arithmetic and sign-extended
/// before hashing.
pub fn cell_value(xi: i32, yi: i32, seed: i32) -> f64 {
    let a = xi
        .wrapping_mul(7919)
        .wrapping_add(yi.wrapping_mul(7907))
        .wrapping_add(seed);
    let b = yi
        .wrapping_mul(6277)
        .wrapping_sub(xi.wrapping_mul(6053))
        .wrapping_add(seed);

    let h = hash(a as i64 as u64, b as i64 as u64);
    (h % CELL_MODULUS) as f64 / CELL_MODULUS as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash(0, 0), 0);
        assert_eq!(hash(1, 0), 1_152_991_890_599_055_361);
        assert_eq!(hash(0, 1), 0);
        assert_eq!(hash(u64::MAX, 1), 576_320_018_976_833_536);
        assert_eq!(hash(1 << 63, 63), 9_224_497_936_761_618_432);
    }

    #[test]
    fn test_hash_oversized_shift_wraps() {
        // 13 + 678 = 691 = 51 (mod 64); shifting a further 13 clears x.
        assert_eq!(hash(12345, 678), 12345);
    }

    #[test]
    fn test_cell_value_known_values() {
        assert_eq!(cell_value(0, 0, 0), 0.0);
        assert_eq!(cell_value(0, 0, 1), 0.9334639918679688);
        assert_eq!(cell_value(3, -2, 7), 0.8197412190912894);
        assert_eq!(cell_value(-1, -1, 0), 0.6991048467580451);
    }

    #[test]
    fn test_cell_value_range() {
        for xi in -20..20 {
            for yi in -20..20 {
                let v = cell_value(xi, yi, 1234);
                assert!((0.0..1.0).contains(&v), "cell ({}, {}) gave {}", xi, yi, v);
            }
        }
    }

    #[test]
    fn test_cell_value_extreme_coordinates_do_not_panic() {
        let v = cell_value(i32::MAX, i32::MIN, i32::MAX);
        assert!((0.0..1.0).contains(&v));
    }
}
