//! Image assets for the viewer: the built-in sprite and decoded files.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use perler_core::{PixelSource, RasterImage};

#[rustfmt::skip]
const HEART: [&str; 12] = [
  "..KK....KK..",
  ".KRRK..KRRK.",
  "KRWRRKKRRRRK",
  "KRRRRRRRRRRK",
  "KRRRRRRRRRRK",
  ".KRRRRRRRRK.",
  "..KRRRRRRK..",
  "...KRRRRK...",
  "....KRRK....",
  ".....KK.....",
  "............",
  "............",
];

fn palette(c: u8) -> [u8; 4] {
  match c {
    b'K' => [20, 20, 28, 255],
    b'R' => [220, 40, 60, 255],
    b'W' => [255, 255, 255, 255],
    _ => [0, 0, 0, 0],
  }
}

/// 12x12 heart with an outline; '.' cells are transparent.
pub fn heart() -> Image {
  let data: Vec<u8> = HEART
    .iter()
    .flat_map(|row| row.bytes().flat_map(palette))
    .collect();
  rgba8_image(12, HEART.len() as u32, data)
}

/// Upload a decoded file as a CPU-readable asset.
pub fn from_raster(raster: &RasterImage) -> Image {
  rgba8_image(raster.width(), raster.height(), raster.pixels().as_raw().clone())
}

fn rgba8_image(width: u32, height: u32, data: Vec<u8>) -> Image {
  Image::new(
    Extent3d {
      width,
      height,
      depth_or_array_layers: 1,
    },
    TextureDimension::D2,
    data,
    TextureFormat::Rgba8UnormSrgb,
    // Beads are generated from the CPU copy
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
  )
}
