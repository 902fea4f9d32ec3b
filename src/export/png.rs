//! PNG export for rendered images and scalar debug maps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::terrain::{TerrainField, TerrainImage, CHANNELS};

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Buffer length {0} != expected {1}")]
    BufferSize(usize, usize),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Fastest encoding, for previews and tests.
    pub fn fast() -> Self {
        Self {
            compression: CompressionType::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

fn check_len(actual: usize, width: u32, height: u32, channels: usize) -> Result<(), PngExportError> {
    let expected = (width as usize) * (height as usize) * channels;
    if actual != expected {
        return Err(PngExportError::BufferSize(actual, expected));
    }
    Ok(())
}

fn encoder(path: &Path, options: &PngExportOptions) -> Result<PngEncoder<BufWriter<File>>, PngExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    Ok(PngEncoder::new_with_quality(writer, options.compression, options.filter))
}

/// Writes a raw RGBA buffer (stride `width * 4`, row-major) as an 8-bit PNG.
pub fn export_rgba_png(
    width: u32,
    height: u32,
    data: &[u8],
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    check_len(data.len(), width, height, CHANNELS)?;

    encoder(path, options)?.write_image(data, width, height, image::ExtendedColorType::Rgba8)?;
    Ok(())
}

/// Writes a rendered terrain image as an RGBA PNG.
pub fn export_image_png(
    image: &TerrainImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    export_rgba_png(image.width, image.height, &image.pixels, path, options)
}

/// Export an arbitrary scalar field (f32) as a 16-bit grayscale PNG.
///
/// `data` must be length `width*height` in row-major order.
pub fn export_scalar_png_f32(
    width: u32,
    height: u32,
    data: &[f32],
    path: &Path,
    min_value: f32,
    max_value: f32,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if min_value >= max_value {
        return Err(PngExportError::InvalidRange(min_value, max_value));
    }
    check_len(data.len(), width, height, 1)?;

    let range = max_value - min_value;
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(width, height, |x, y| {
        let v = data[(y as usize) * (width as usize) + x as usize];
        let normalized = ((v - min_value) / range).clamp(0.0, 1.0);
        Luma([(normalized * 65535.0) as u16])
    });

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder(path, options)?.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;
    Ok(())
}

/// Export a byte mask (u8) as an 8-bit grayscale PNG.
///
/// `data` must be length `width*height` in row-major order.
pub fn export_mask_png_u8(
    width: u32,
    height: u32,
    data: &[u8],
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    check_len(data.len(), width, height, 1)?;

    encoder(path, options)?.write_image(data, width, height, image::ExtendedColorType::L8)?;
    Ok(())
}

/// Writes the raw height field of `field` as 16-bit grayscale over [0, 1].
pub fn export_height_png(
    field: &TerrainField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    export_scalar_png_f32(field.width, field.height, &field.heights(), path, 0.0, 1.0, options)
}

/// Writes the river overlay of `field` as an 8-bit 0/255 mask.
pub fn export_river_mask_png(
    field: &TerrainField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    export_mask_png_u8(field.width, field.height, &field.river_mask(), path, options)
}
