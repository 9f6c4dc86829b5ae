//! PixelSource - image provider interface for engine bridges.
//!
//! The pipeline only needs dimensions, a per-pixel read and a readability
//! flag. Engine bridges wrap their own texture type; [`RasterImage`] covers
//! plain decoded files.

use std::path::Path;

use image::RgbaImage;

use crate::error::{BeadError, Result};
use crate::types::Rgba;

/// Read access to a 2D grid of RGBA pixels.
///
/// `pixel` is only called with `x < width()` and `y < height()`, and only
/// after `is_readable()` returned true.
pub trait PixelSource {
  /// Human readable name used in diagnostics.
  fn name(&self) -> &str;

  fn width(&self) -> u32;

  fn height(&self) -> u32;

  /// Whether pixel data is available on the CPU.
  fn is_readable(&self) -> bool;

  /// Read one pixel, channels normalized to [0, 1].
  fn pixel(&self, x: u32, y: u32) -> Rgba;

  /// Ask the provider to display the image with nearest-neighbor filtering,
  /// so one pixel maps to exactly one bead.
  fn request_point_filtering(&mut self) {}
}

/// Decoded RGBA8 image held in memory.
#[derive(Clone, Debug)]
pub struct RasterImage {
  name: String,
  pixels: RgbaImage,
  readable: bool,
}

impl RasterImage {
  /// Wrap an already decoded image.
  pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
    Self {
      name: name.into(),
      pixels,
      readable: true,
    }
  }

  /// Build an image from a per-pixel function.
  pub fn from_fn(
    name: impl Into<String>,
    width: u32,
    height: u32,
    mut f: impl FnMut(u32, u32) -> Rgba,
  ) -> Self {
    let pixels = RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y).to_u8()));
    Self::new(name, pixels)
  }

  /// Decode an image file (PNG). The file stem becomes the image name.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| BeadError::ImageLoad {
      path: path.to_path_buf(),
      source,
    })?;
    let name = path
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());

    Ok(Self::new(name, decoded.into_rgba8()))
  }

  /// Mark the image readable or not (simulates textures without CPU data).
  pub fn set_readable(&mut self, readable: bool) {
    self.readable = readable;
  }

  pub fn with_readable(mut self, readable: bool) -> Self {
    self.readable = readable;
    self
  }

  /// Underlying pixel buffer.
  pub fn pixels(&self) -> &RgbaImage {
    &self.pixels
  }
}

impl PixelSource for RasterImage {
  fn name(&self) -> &str {
    &self.name
  }

  fn width(&self) -> u32 {
    self.pixels.width()
  }

  fn height(&self) -> u32 {
    self.pixels.height()
  }

  fn is_readable(&self) -> bool {
    self.readable
  }

  #[inline]
  fn pixel(&self, x: u32, y: u32) -> Rgba {
    Rgba::from_u8(self.pixels.get_pixel(x, y).0)
  }
}

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;
