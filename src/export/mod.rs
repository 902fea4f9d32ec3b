//! Export module for writing rendered terrain to disk.
//!
//! The RGBA render is written as an 8-bit PNG; the height field and river
//! mask can be written alongside it as grayscale debug maps.

mod png;

pub use png::{
    export_height_png,
    export_image_png,
    export_mask_png_u8,
    export_river_mask_png,
    export_rgba_png,
    export_scalar_png_f32,
    PngExportError,
    PngExportOptions,
};
