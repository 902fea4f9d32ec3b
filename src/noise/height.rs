//! Recursive multi-octave height field.

use super::hash::cell_value;

/// Height returned once the octave budget is exhausted.
pub const NEUTRAL_HEIGHT: f64 = 0.5;

/// Largest octave count evaluated. Deeper requests are clamped to it.
///
/// Each octave is blended in at a weight of at most the product of the
/// previous `1 - dist` terms, so past a few dozen octaves the contribution is
/// far below anything visible in an 8-bit channel.
pub const MAX_DEPTH: u32 = 64;

/// Zoom applied to the coordinates of each successive octave.
const OCTAVE_ZOOM: f64 = 1.5;
/// Rotation term mixed into each successive octave.
const OCTAVE_TWIST: f64 = 0.2;
/// Attenuation of the cell-centre weight.
const CENTER_WEIGHT: f64 = 0.9;

/// Samples the height field at `(x, y)`.
///
/// Each octave blends the value of the grid cell containing the point with
/// the next octave, evaluated at zoomed and slightly rotated coordinates
/// with `seed + 1`. The local value dominates near cell centres and the
/// finer octave near cell edges, which keeps the field continuous across
/// cell boundaries. `depth == 0` yields [`NEUTRAL_HEIGHT`]; depths above
/// [`MAX_DEPTH`] are evaluated as [`MAX_DEPTH`].
///
/// The octaves are walked iteratively and folded back from the innermost
/// one, so the result is bit-identical to the nested definition
/// `out * dist + height(x', y', depth - 1, seed + 1) * (1 - dist)`.
///
/// # Returns
/// A value in [0, 1]; not clamped.
pub fn height(x: f64, y: f64, depth: u32, seed: i32) -> f64 {
    if depth == 0 {
        return NEUTRAL_HEIGHT;
    }

    let depth = depth.min(MAX_DEPTH) as usize;
    let mut octaves = [(0.0f64, 0.0f64); MAX_DEPTH as usize];
    let (mut x, mut y, mut seed) = (x, y, seed);

    for octave in octaves.iter_mut().take(depth) {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;

        let out = cell_value(xi, yi, seed);
        let dist = center_weight(x - xi as f64, y - yi as f64);
        *octave = (out, dist);

        let next_x = x * OCTAVE_ZOOM + y * OCTAVE_TWIST;
        let next_y = y * OCTAVE_ZOOM - x * OCTAVE_TWIST;
        x = next_x;
        y = next_y;
        seed = seed.wrapping_add(1);
    }

    octaves[..depth]
        .iter()
        .rev()
        .fold(NEUTRAL_HEIGHT, |child, &(out, dist)| out * dist + child * (1.0 - dist))
}

/// Tent weight over a cell: 0.9 at the centre, 0 on every edge.
///
/// `fx` and `fy` are the offsets of the point inside its cell.
fn center_weight(fx: f64, fy: f64) -> f64 {
    let mut dist = (0.5 - (fx - 0.5).abs()) * (0.5 - (fy - 0.5).abs()) * 4.0;
    dist *= CENTER_WEIGHT;
    dist
}
