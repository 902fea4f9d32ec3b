//! Parallel row renderer.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use super::config::{ConfigError, RenderConfig};
use crate::terrain::{colorize, sample_field, Sampler, TerrainField, TerrainImage, CHANNELS};

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Render cancelled")]
    Cancelled,
    #[error("Buffer length {0} does not match expected {1}")]
    BufferSize(usize, usize),
    #[error("Partition count must be positive")]
    NoPartitions,
}

/// Shared flag that stops a render at the next row boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Renders terrain images for a validated [`RenderConfig`].
///
/// Every row depends only on its own index and the configuration, so rows
/// are distributed over rayon workers, each writing a disjoint slice of the
/// output buffer. The bytes produced never depend on the number of workers
/// or the order rows finish in.
pub struct Renderer {
    config: RenderConfig,
    sampler: Sampler,
    cancel: Option<CancelFlag>,
}

impl Renderer {
    /// Creates a renderer, validating the configuration.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let sampler = config.sampler();
        Ok(Self {
            config,
            sampler,
            cancel: None,
        })
    }

    /// Attaches a cancellation flag, checked once per row.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns the configuration being rendered.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the full image.
    pub fn run(&self) -> Result<TerrainImage, RenderError> {
        self.run_with_progress(|_, _| {})
    }

    /// Renders the full image, calling `on_row(done, total)` as rows finish.
    ///
    /// The callback runs on worker threads; `done` counts finished rows, not
    /// the index of the row that just finished.
    pub fn run_with_progress<F>(&self, on_row: F) -> Result<TerrainImage, RenderError>
    where
        F: Fn(usize, usize) + Sync,
    {
        let mut image = TerrainImage::new(self.config.width, self.config.height);
        self.render_into_with_progress(&mut image.pixels, on_row)?;
        Ok(image)
    }

    /// Renders into a caller-provided RGBA buffer of exactly
    /// `width * height * 4` bytes.
    pub fn render_into(&self, buffer: &mut [u8]) -> Result<(), RenderError> {
        self.render_into_with_progress(buffer, |_, _| {})
    }

    fn render_into_with_progress<F>(&self, buffer: &mut [u8], on_row: F) -> Result<(), RenderError>
    where
        F: Fn(usize, usize) + Sync,
    {
        self.check_buffer(buffer)?;

        let total = self.config.height as usize;
        let done = AtomicUsize::new(0);
        let start = Instant::now();
        log::info!(
            "rendering {}x{} {} image (scale {}, seed {}, depth {})",
            self.config.width,
            self.config.height,
            self.config.mode,
            self.config.scale,
            self.config.seed,
            self.config.depth
        );

        buffer
            .par_chunks_mut(self.config.row_stride())
            .enumerate()
            .try_for_each(|(row, out)| {
                self.render_row(row as u32, out)?;
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                on_row(finished, total);
                Ok::<(), RenderError>(())
            })?;

        log::info!("rendered {} rows in {:.2?}", total, start.elapsed());
        Ok(())
    }

    /// Renders the image as `partitions` contiguous row ranges, one task per
    /// range.
    ///
    /// Ranges are as even as possible. Requests for more partitions than rows
    /// use one partition per row. The output is byte-identical to [`run`].
    ///
    /// [`run`]: Renderer::run
    pub fn run_partitioned(&self, partitions: usize) -> Result<TerrainImage, RenderError> {
        if partitions == 0 {
            return Err(RenderError::NoPartitions);
        }

        let mut image = TerrainImage::new(self.config.width, self.config.height);
        let stride = self.config.row_stride();
        let rows = self.config.height as usize;
        let partitions = partitions.min(rows.max(1));

        let mut ranges: Vec<(usize, &mut [u8])> = Vec::with_capacity(partitions);
        let mut rest: &mut [u8] = &mut image.pixels;
        let mut first = 0;
        for k in 0..partitions {
            let end = (k + 1) * rows / partitions;
            let (head, tail) = std::mem::take(&mut rest).split_at_mut((end - first) * stride);
            ranges.push((first, head));
            rest = tail;
            first = end;
        }

        let start = Instant::now();
        ranges.into_par_iter().try_for_each(|(first_row, slice)| {
            log::debug!(
                "partition rows {}..{}",
                first_row,
                first_row + slice.len() / stride.max(1)
            );
            for (i, out) in slice.chunks_mut(stride).enumerate() {
                self.render_row((first_row + i) as u32, out)?;
            }
            Ok::<(), RenderError>(())
        })?;
        log::info!(
            "rendered {} rows in {} partitions in {:.2?}",
            rows,
            partitions,
            start.elapsed()
        );

        Ok(image)
    }

    /// Classifies every pixel without encoding colours.
    pub fn sample_field(&self) -> TerrainField {
        let start = Instant::now();
        let field = sample_field(self.config.width, self.config.height, &self.sampler);
        log::info!("sampled terrain field in {:.2?}", start.elapsed());
        field
    }

    fn render_row(&self, row: u32, out: &mut [u8]) -> Result<(), RenderError> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(RenderError::Cancelled);
        }

        for (col, px) in out.chunks_exact_mut(CHANNELS).enumerate() {
            let sample = self.sampler.sample(row, col as u32);
            px.copy_from_slice(&colorize(&sample, self.config.mode));
        }
        Ok(())
    }

    fn check_buffer(&self, buffer: &[u8]) -> Result<(), RenderError> {
        let expected = self.config.width as usize * self.config.height as usize * CHANNELS;
        if buffer.len() != expected {
            return Err(RenderError::BufferSize(buffer.len(), expected));
        }
        Ok(())
    }
}

/// Validates `config` and renders it on the global rayon pool.
pub fn render_image(config: &RenderConfig) -> Result<TerrainImage, RenderError> {
    Renderer::new(config.clone())?.run()
}
