//! `PixelSource` over a Bevy `Image` asset.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use perler_core::{PixelSource, Rgba};

/// Borrowed view of an `Image` for bead generation.
///
/// Pixel (x, y) is texel column x, row y of the stored data.
pub struct BevyImageSource<'a> {
  name: String,
  image: &'a mut Image,
}

impl<'a> BevyImageSource<'a> {
  pub fn new(name: impl Into<String>, image: &'a mut Image) -> Self {
    Self {
      name: name.into(),
      image,
    }
  }
}

/// Diagnostic name for an image handle: its asset path, or the id for
/// runtime-created images.
pub fn image_name(handle: &Handle<Image>) -> String {
  match handle.path() {
    Some(path) => path.to_string(),
    None => format!("{:?}", handle.id()),
  }
}

impl PixelSource for BevyImageSource<'_> {
  fn name(&self) -> &str {
    &self.name
  }

  fn width(&self) -> u32 {
    self.image.width()
  }

  fn height(&self) -> u32 {
    self.image.height()
  }

  /// Images without `MAIN_WORLD` usage lose their data once uploaded.
  fn is_readable(&self) -> bool {
    self.image.data.is_some() && self.image.asset_usage.contains(RenderAssetUsages::MAIN_WORLD)
  }

  fn pixel(&self, x: u32, y: u32) -> Rgba {
    match self.image.get_color_at(x, y) {
      Ok(color) => {
        let c = color.to_srgba();
        Rgba::new(c.red, c.green, c.blue, c.alpha)
      }
      // Formats without CPU decoding read as empty
      Err(_) => Rgba::TRANSPARENT,
    }
  }

  fn request_point_filtering(&mut self) {
    self.image.sampler = ImageSampler::nearest();
  }
}

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;
