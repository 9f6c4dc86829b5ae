//! Core value types for bead generation.

use glam::Vec3;

/// Alpha below this value marks a pixel as empty.
///
/// This is the smallest positive `f32`, so only fully transparent pixels are
/// dropped; any visible alpha produces a bead.
pub const ALPHA_EPSILON: f32 = f32::from_bits(1);

/// RGBA color as read from the image, channels normalized to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgba {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  pub a: f32,
}

impl Rgba {
  pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
  pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

  pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Opaque color from RGB channels.
  pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
    Self::new(r, g, b, 1.0)
  }

  /// Convert 8-bit channels to normalized floats.
  #[inline]
  pub fn from_u8(rgba: [u8; 4]) -> Self {
    const INV: f32 = 1.0 / 255.0;
    Self::new(
      rgba[0] as f32 * INV,
      rgba[1] as f32 * INV,
      rgba[2] as f32 * INV,
      rgba[3] as f32 * INV,
    )
  }

  /// Quantize back to 8-bit channels (clamped, rounded).
  #[inline]
  pub fn to_u8(self) -> [u8; 4] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(self.r), q(self.g), q(self.b), q(self.a)]
  }

  #[inline]
  pub fn to_array(self) -> [f32; 4] {
    [self.r, self.g, self.b, self.a]
  }

  /// True when the pixel should not produce a bead.
  #[inline]
  pub fn is_transparent(&self) -> bool {
    self.a < ALPHA_EPSILON
  }
}

/// Integer pixel coordinate inside an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PixelCoord {
  pub x: u32,
  pub y: u32,
}

impl PixelCoord {
  pub const fn new(x: u32, y: u32) -> Self {
    Self { x, y }
  }

  /// Offset of this pixel on the horizontal bead plane.
  ///
  /// Image x maps to world x, image y maps to world z; height stays at the
  /// origin's y.
  #[inline]
  pub fn plane_offset(&self) -> Vec3 {
    Vec3::new(self.x as f32, 0.0, self.y as f32)
  }
}

/// Per-bead surface parameters.
///
/// Every bead owns its own copy; beads never share a mutable surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceParams {
  pub color: Rgba,
  pub metallic: f32,
  pub smoothness: f32,
}

impl Default for SurfaceParams {
  fn default() -> Self {
    Self {
      color: Rgba::WHITE,
      metallic: 0.0,
      smoothness: 0.5,
    }
  }
}

/// Blueprint every bead is instantiated from.
///
/// The generator only reads it; per-bead state starts as a copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeadTemplate {
  /// Visible scale of an unmodified bead. Size settings multiply this.
  pub scale: Vec3,
  /// Default surface before the pixel color is applied.
  pub surface: SurfaceParams,
}

impl Default for BeadTemplate {
  fn default() -> Self {
    Self {
      scale: Vec3::ONE,
      surface: SurfaceParams::default(),
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
