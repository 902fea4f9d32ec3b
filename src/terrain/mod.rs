//! Terrain classification and rasterization.
//!
//! Provides the per-pixel classifier that turns noise samples into terrain
//! values, the colour encoders for each output mode, and the RGBA image and
//! sample-field containers they fill.

mod classify;
mod colorize;
mod field;
mod raster;

pub use classify::{
    PixelSample, Sampler, LAND_THRESHOLD, MAX_VALUE, PRODUCTION_DEPTH, RIVER_THRESHOLD,
    WORLD_SPAN,
};
pub use colorize::{
    biome_rgba, colorize, rendered_rgba, ColorMode, BIOME_BEACH_BIT, BIOME_LAND_BIT,
    BIOME_RIVER_BIT,
};
pub use field::{sample_field, FieldStats, TerrainField};
pub use raster::{TerrainImage, CHANNELS};
