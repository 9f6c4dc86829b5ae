//! Pixel sampling into parallel coordinate/color arrays.
//!
//! Results are always stored at flat index `x + y * width`. The scan order
//! only decides the sequence of reads issued to the image backend.

use crate::error::{BeadError, Result};
use crate::raster::PixelSource;
use crate::types::{PixelCoord, Rgba};

/// Traversal order for pixel reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOrder {
  /// Outer loop over x, inner loop over y.
  ColumnMajor,
  /// Outer loop over y, inner loop over x.
  RowMajor,
}

impl ScanOrder {
  /// Wide images scan column by column, everything else row by row.
  pub fn for_dimensions(width: u32, height: u32) -> Self {
    if width > height {
      ScanOrder::ColumnMajor
    } else {
      ScanOrder::RowMajor
    }
  }
}

/// Sampled image: parallel coordinate and color arrays of length W×H.
#[derive(Clone, Debug, Default)]
pub struct PixelSamples {
  width: u32,
  height: u32,
  coords: Vec<PixelCoord>,
  colors: Vec<Rgba>,
}

impl PixelSamples {
  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn len(&self) -> usize {
    self.coords.len()
  }

  pub fn is_empty(&self) -> bool {
    self.coords.is_empty()
  }

  pub fn coords(&self) -> &[PixelCoord] {
    &self.coords
  }

  pub fn colors(&self) -> &[Rgba] {
    &self.colors
  }

  /// Flat index of a coordinate.
  #[inline]
  pub fn index_of(&self, coord: PixelCoord) -> usize {
    coord.x as usize + coord.y as usize * self.width as usize
  }

  /// (coordinate, color) pairs in index order.
  pub fn iter(&self) -> impl Iterator<Item = (PixelCoord, Rgba)> + '_ {
    self.coords.iter().copied().zip(self.colors.iter().copied())
  }
}

/// Read every pixel of `image`.
///
/// Fails with [`BeadError::UnreadableImage`] before issuing any read when the
/// image has no CPU-side data.
pub fn sample_pixels<S: PixelSource + ?Sized>(image: &S) -> Result<PixelSamples> {
  if !image.is_readable() {
    return Err(BeadError::UnreadableImage {
      name: image.name().to_owned(),
    });
  }

  let width = image.width();
  let height = image.height();
  let len = width as usize * height as usize;

  let mut samples = PixelSamples {
    width,
    height,
    coords: vec![PixelCoord::default(); len],
    colors: vec![Rgba::TRANSPARENT; len],
  };

  let mut read = |x: u32, y: u32| {
    let idx = x as usize + y as usize * width as usize;
    samples.colors[idx] = image.pixel(x, y);
    samples.coords[idx] = PixelCoord::new(x, y);
  };

  match ScanOrder::for_dimensions(width, height) {
    ScanOrder::ColumnMajor => {
      for x in 0..width {
        for y in 0..height {
          read(x, y);
        }
      }
    }
    ScanOrder::RowMajor => {
      for y in 0..height {
        for x in 0..width {
          read(x, y);
        }
      }
    }
  }

  Ok(samples)
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;
