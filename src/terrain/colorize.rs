//! Pixel colour encoders for the two output modes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::classify::PixelSample;

/// Biome green-channel flag: land without river.
pub const BIOME_LAND_BIT: u8 = 1 << 7;
/// Biome green-channel flag: land carved by a river.
pub const BIOME_RIVER_BIT: u8 = 1 << 6;
/// Biome green-channel flag: shoreline band without river.
pub const BIOME_BEACH_BIT: u8 = 1 << 5;

/// Values above this are land.
const SHORE_LOW: f64 = 0.6;
/// Values below this (and above [`SHORE_LOW`]) form the beach band.
const SHORE_HIGH: f64 = 0.64;

/// Output encoding of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Shaded preview image (legacy mode 0).
    #[default]
    Rendered,
    /// Terrain value in red, classification flags in green (legacy mode 1).
    Biome,
}

impl ColorMode {
    /// Returns the name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Rendered => "rendered",
            ColorMode::Biome => "biome",
        }
    }
}

impl From<i32> for ColorMode {
    /// Legacy numeric modes: 1 is biome, anything else renders.
    fn from(mode: i32) -> Self {
        if mode == 1 {
            ColorMode::Biome
        } else {
            ColorMode::Rendered
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encodes a classified pixel as RGBA in the given mode.
pub fn colorize(sample: &PixelSample, mode: ColorMode) -> [u8; 4] {
    match mode {
        ColorMode::Rendered => rendered_rgba(sample.value, sample.is_river),
        ColorMode::Biome => biome_rgba(sample.value, sample.is_river),
    }
}

/// Biome encoding: value in red, flags in the high bits of green.
///
/// Blue stays 0. The beach bit is only ever set together with the land bit.
pub fn biome_rgba(val: f64, is_river: bool) -> [u8; 4] {
    let land = val > SHORE_LOW;

    let mut flags = 0u8;
    if !is_river && land {
        flags |= BIOME_LAND_BIT;
    }
    if is_river && land {
        flags |= BIOME_RIVER_BIT;
    }
    if !is_river && land && val < SHORE_HIGH {
        flags |= BIOME_BEACH_BIT;
    }

    [(val * 255.0) as u8, flags, 0, 255]
}

/// Shaded encoding: land/water base blended with a height grey, then
/// darkened on alternate value steps to break up banding.
///
/// Red is 255 on the beach band and otherwise the truncated value itself,
/// which is 0 for every value below 1; the preview is tinted through green
/// and blue only.
pub fn rendered_rgba(val: f64, is_river: bool) -> [u8; 4] {
    let land = val > SHORE_LOW && !is_river;
    let beach = val > SHORE_LOW && val < SHORE_HIGH && !is_river;

    let red = if beach { 255 } else { val as u8 };
    let base_green = if land { 255.0 } else { 0.0 };
    let base_blue = if land { 0.0 } else { 255.0 };
    let green = (base_green * 0.7 + val * 255.0 * 0.3) as u8;
    let blue = (base_blue * 0.3 + val * 255.0 * 0.7) as u8;

    let dec = if ((val * 256.0) as i32) % 2 != 0 { 1.0 } else { 0.9 };
    let shade = |channel: u8| (channel as f64 * dec) as u8;

    [shade(red), shade(green), shade(blue), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_legacy_integer() {
        assert_eq!(ColorMode::from(0), ColorMode::Rendered);
        assert_eq!(ColorMode::from(1), ColorMode::Biome);
        assert_eq!(ColorMode::from(7), ColorMode::Rendered);
        assert_eq!(ColorMode::from(-1), ColorMode::Rendered);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ColorMode::Biome.to_string(), "biome");
        assert_eq!(ColorMode::default(), ColorMode::Rendered);
    }

    #[test]
    fn test_biome_water() {
        assert_eq!(biome_rgba(0.5, false), [127, 0, 0, 255]);
    }

    #[test]
    fn test_biome_flags() {
        assert_eq!(biome_rgba(0.7, false)[1], BIOME_LAND_BIT);
        assert_eq!(biome_rgba(0.7, true)[1], BIOME_RIVER_BIT);
        assert_eq!(biome_rgba(0.62, false)[1], BIOME_LAND_BIT | BIOME_BEACH_BIT);
        assert_eq!(biome_rgba(0.62, true)[1], BIOME_RIVER_BIT);
        assert_eq!(biome_rgba(0.6, false)[1], 0);
        assert_eq!(biome_rgba(0.64, false)[1], BIOME_LAND_BIT);
    }

    #[test]
    fn test_biome_red_channel() {
        assert_eq!(biome_rgba(0.99, false)[0], 252);
        assert_eq!(biome_rgba(0.0, false)[0], 0);
    }

    #[test]
    fn test_rendered_water() {
        // 0.5 * 256 = 128 is even, so the 0.9 shade applies.
        assert_eq!(rendered_rgba(0.5, false), [0, 34, 148, 255]);
    }

    #[test]
    fn test_rendered_beach_highlight() {
        let px = rendered_rgba(0.62, false);
        // floor(0.62 * 256) = 158 is even.
        assert_eq!(px[0], (255.0 * 0.9) as u8);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_rendered_river_is_water_coloured() {
        let land = rendered_rgba(0.7, false);
        let river = rendered_rgba(0.7, true);
        assert!(land[1] > river[1]);
        assert!(land[2] < river[2]);
        assert_eq!(river[0], 0);
    }

    #[test]
    fn test_rendered_dither_parity() {
        // floor(0.5 * 256) = 128 (even), floor(0.503 * 256) = 128, 0.504 -> 129 (odd).
        let even = rendered_rgba(0.503, false);
        let odd = rendered_rgba(0.504, false);
        assert_eq!(odd[2], (255.0 * 0.3 + 0.504 * 255.0 * 0.7) as u8);
        assert_eq!(even[2], (((255.0 * 0.3 + 0.503 * 255.0 * 0.7) as u8) as f64 * 0.9) as u8);
    }

    #[test]
    fn test_colorize_dispatch() {
        let sample = PixelSample {
            height: 0.5,
            river: None,
            value: 0.5,
            is_river: false,
        };
        assert_eq!(colorize(&sample, ColorMode::Biome), biome_rgba(0.5, false));
        assert_eq!(colorize(&sample, ColorMode::Rendered), rendered_rgba(0.5, false));
    }
}
