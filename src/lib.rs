//! Procedural terrain image generator.
//!
//! This crate renders 2D terrain from a deterministic, seed-parameterized
//! recursive noise field, carves rivers where the terrain is flat near the
//! mid-height band, and encodes the result as an RGBA buffer ready for PNG
//! export.

pub mod noise;
pub mod terrain;
pub mod pipeline;
pub mod export;

pub use noise::{hash, height, river};
pub use terrain::{ColorMode, PixelSample, Sampler, TerrainField, TerrainImage};
pub use pipeline::{render_image, CancelFlag, RenderConfig, RenderError, Renderer};
