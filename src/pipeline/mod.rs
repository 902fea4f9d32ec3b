//! Render pipeline: configuration and the parallel pixel loop.
//!
//! A [`RenderConfig`] carries every generation parameter explicitly; the
//! [`Renderer`] partitions the output buffer by rows and fills it in
//! parallel, producing identical bytes for any worker count.

mod config;
mod render;

pub use config::{ConfigError, RenderConfig};
pub use crate::noise::MAX_DEPTH;
pub use render::{render_image, CancelFlag, RenderError, Renderer};
