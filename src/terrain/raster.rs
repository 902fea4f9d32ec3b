//! RGBA raster produced by a render.

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A rendered terrain image.
///
/// Pixels are stored row-major, top to bottom, four bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA bytes, `width * height * 4` long.
    pub pixels: Vec<u8>,
}

impl TerrainImage {
    /// Creates a zeroed image.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * CHANNELS;
        Self {
            width,
            height,
            pixels: vec![0; size],
        }
    }

    /// Wraps an existing buffer, or returns `None` if its length does not
    /// match the dimensions.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * CHANNELS;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the RGBA value at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let i = y as usize * self.row_stride() + x as usize * CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Returns one row of RGBA bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Consumes the image, returning the raw buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}
