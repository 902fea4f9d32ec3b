//! Whole-image classification kept in memory for analysis and debug maps.

use rayon::prelude::*;

use super::classify::{PixelSample, Sampler};
use super::colorize::{colorize, ColorMode};
use super::raster::{TerrainImage, CHANNELS};

/// Classified samples for every pixel of an image.
#[derive(Debug, Clone)]
pub struct TerrainField {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples stored in row-major order.
    pub samples: Vec<PixelSample>,
}

/// Summary counts over a [`TerrainField`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStats {
    /// Pixels at or below the shoreline.
    pub water: usize,
    /// Land pixels without river (beach included).
    pub land: usize,
    /// Land pixels inside the beach band.
    pub beach: usize,
    /// Pixels claimed by the river overlay.
    pub river: usize,
    /// Smallest final value.
    pub min_value: f64,
    /// Largest final value.
    pub max_value: f64,
}

/// Classifies every pixel of a `width` x `height` image in parallel.
pub fn sample_field(width: u32, height: u32, sampler: &Sampler) -> TerrainField {
    let size = (width as usize) * (height as usize);
    let mut samples = Vec::with_capacity(size);

    (0..size)
        .into_par_iter()
        .map(|i| {
            let row = (i / width as usize) as u32;
            let col = (i % width as usize) as u32;
            sampler.sample(row, col)
        })
        .collect_into_vec(&mut samples);

    TerrainField {
        width,
        height,
        samples,
    }
}

impl TerrainField {
    /// Returns the sample at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> &PixelSample {
        debug_assert!(x < self.width && y < self.height);
        &self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Encodes every sample into an RGBA image.
    pub fn colorize(&self, mode: ColorMode) -> TerrainImage {
        let mut image = TerrainImage::new(self.width, self.height);
        image
            .pixels
            .par_chunks_mut(CHANNELS)
            .zip(self.samples.par_iter())
            .for_each(|(px, sample)| px.copy_from_slice(&colorize(sample, mode)));
        image
    }

    /// Raw height values, row-major.
    pub fn heights(&self) -> Vec<f32> {
        self.samples.iter().map(|s| s.height as f32).collect()
    }

    /// River mask (0 or 255), row-major.
    pub fn river_mask(&self) -> Vec<u8> {
        self.samples
            .iter()
            .map(|s| if s.is_river { 255 } else { 0 })
            .collect()
    }

    /// Counts terrain classes and the value range.
    pub fn stats(&self) -> FieldStats {
        let mut stats = FieldStats {
            min_value: f64::MAX,
            max_value: f64::MIN,
            ..Default::default()
        };

        for s in &self.samples {
            stats.min_value = stats.min_value.min(s.value);
            stats.max_value = stats.max_value.max(s.value);

            if s.is_river {
                stats.river += 1;
            } else if s.value > 0.6 {
                stats.land += 1;
                if s.value < 0.64 {
                    stats.beach += 1;
                }
            } else {
                stats.water += 1;
            }
        }

        if self.samples.is_empty() {
            stats.min_value = 0.0;
            stats.max_value = 0.0;
        }

        stats
    }
}
