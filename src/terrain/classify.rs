//! Per-pixel terrain classification.

use serde::{Deserialize, Serialize};

use crate::noise::{height, river};

/// World units spanned by 3000 pixels at scale 1.
pub const WORLD_SPAN: f64 = 3000.0;
/// Octave count used for production renders.
pub const PRODUCTION_DEPTH: u32 = 18;
/// Heights above this are candidates for river carving.
pub const LAND_THRESHOLD: f64 = 0.58;
/// River strengths below this mark a pixel as river.
pub const RIVER_THRESHOLD: f64 = 0.85;
/// Upper clamp for the final pixel value.
pub const MAX_VALUE: f64 = 0.99;

/// Depth a river can carve into land.
const RIVER_CUT: f64 = 0.2;

/// Classification of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSample {
    /// Raw height field value.
    pub height: f64,
    /// River strength, only evaluated above [`LAND_THRESHOLD`].
    pub river: Option<f64>,
    /// Final terrain value after river carving and clamping.
    pub value: f64,
    /// Whether the river overlay claimed this pixel.
    pub is_river: bool,
}

/// Maps pixels to world coordinates and classifies them.
///
/// Holds only the parameters shared by every pixel; each call is independent
/// of every other pixel and of the output mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    /// World detail multiplier.
    pub scale: f64,
    /// Noise seed.
    pub seed: i32,
    /// Octave count.
    pub depth: u32,
}

impl Sampler {
    /// Creates a sampler at production depth.
    pub fn new(scale: f64, seed: i32) -> Self {
        Self {
            scale,
            seed,
            depth: PRODUCTION_DEPTH,
        }
    }

    /// Converts a pixel position to world coordinates.
    ///
    /// The row index drives world `x` and the column drives world `y`, so
    /// the image is the transposed view of the field.
    pub fn world_coords(&self, row: u32, col: u32) -> (f64, f64) {
        let x = row as f64 / WORLD_SPAN * self.scale;
        let y = col as f64 / WORLD_SPAN * self.scale;
        (x, y)
    }

    /// Classifies the pixel at `(row, col)`.
    pub fn sample(&self, row: u32, col: u32) -> PixelSample {
        let (x, y) = self.world_coords(row, col);
        self.sample_world(x, y)
    }

    /// Classifies an arbitrary world position.
    pub fn sample_world(&self, x: f64, y: f64) -> PixelSample {
        let raw = height(x, y, self.depth, self.seed);
        let mut value = raw;
        let mut strength = None;
        let mut is_river = false;

        if value > LAND_THRESHOLD {
            let r = river(x, y, self.depth, self.seed);
            value = value - RIVER_CUT + RIVER_CUT * r;
            is_river = r < RIVER_THRESHOLD;
            strength = Some(r);
        }

        // Only the top is clamped.
        if value > MAX_VALUE {
            value = MAX_VALUE;
        }

        PixelSample {
            height: raw,
            river: strength,
            value,
            is_river,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_coords() {
        let sampler = Sampler::new(2.0, 0);
        assert_eq!(sampler.world_coords(0, 0), (0.0, 0.0));
        assert_eq!(sampler.world_coords(1500, 3000), (1.0, 2.0));
    }

    #[test]
    fn test_origin_pixel() {
        let sample = Sampler::new(1.0, 10).sample(0, 0);
        assert_eq!(sample.height, 0.5);
        assert_eq!(sample.value, 0.5);
        assert_eq!(sample.river, None);
        assert!(!sample.is_river);
    }

    #[test]
    fn test_river_pixel() {
        let sample = Sampler::new(300.0, 10).sample(1, 7);
        assert!(sample.is_river);
        assert_eq!(sample.river, Some(0.3214561159950897));
        assert_eq!(sample.value, 0.5668663860463644);
    }

    #[test]
    fn test_value_never_exceeds_clamp() {
        let sampler = Sampler::new(300.0, 10);
        for row in 0..32 {
            for col in 0..32 {
                let s = sampler.sample(row, col);
                assert!(s.value <= MAX_VALUE, "value {} at ({}, {})", s.value, row, col);
            }
        }
    }

    #[test]
    fn test_river_only_evaluated_on_land() {
        let sampler = Sampler::new(300.0, 10);
        let mut rivers = 0;
        for row in 0..32 {
            for col in 0..32 {
                let s = sampler.sample(row, col);
                match s.river {
                    Some(r) => {
                        assert!(s.height > LAND_THRESHOLD);
                        assert_eq!(s.is_river, r < RIVER_THRESHOLD);
                        rivers += s.is_river as u32;
                    }
                    None => {
                        assert!(s.height <= LAND_THRESHOLD);
                        assert!(!s.is_river);
                        assert_eq!(s.value, s.height.min(MAX_VALUE));
                    }
                }
            }
        }
        assert!(rivers > 0, "expected river pixels in the test window");
    }

    #[test]
    fn test_river_carves_value() {
        let sampler = Sampler::new(300.0, 10);
        for row in 0..32 {
            for col in 0..32 {
                let s = sampler.sample(row, col);
                if let Some(r) = s.river {
                    let carved = (s.height - 0.2 + 0.2 * r).min(MAX_VALUE);
                    assert_eq!(s.value, carved);
                }
            }
        }
    }
}
