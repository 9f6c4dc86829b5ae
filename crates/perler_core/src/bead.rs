//! Bead entity: one placed bead and the engine handle it owns.

use glam::Vec3;

use crate::types::{BeadTemplate, Rgba, SurfaceParams};

/// Snapshot of everything an engine needs to present a bead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeadState {
  /// World-space position.
  pub position: Vec3,
  /// Current visible scale.
  pub scale: Vec3,
  /// The bead's own surface parameters.
  pub surface: SurfaceParams,
}

impl BeadState {
  /// Initial state for a bead built from `template` and tinted `color`.
  pub fn initial(template: &BeadTemplate, position: Vec3, color: Rgba) -> Self {
    Self {
      position,
      scale: template.scale,
      surface: SurfaceParams {
        color,
        ..template.surface
      },
    }
  }
}

/// A placed bead.
///
/// Owns its engine handle `H` (entity plus per-instance material, or
/// whatever the bridge uses). Handles are never shared between beads.
#[derive(Debug)]
pub struct Bead<H> {
  handle: H,
  position: Vec3,
  base_scale: Vec3,
  scale: Vec3,
  surface: SurfaceParams,
}

impl<H> Bead<H> {
  pub(crate) fn new(handle: H, template: &BeadTemplate, state: BeadState) -> Self {
    Self {
      handle,
      position: state.position,
      base_scale: template.scale,
      scale: state.scale,
      surface: state.surface,
    }
  }

  pub fn handle(&self) -> &H {
    &self.handle
  }

  pub fn position(&self) -> Vec3 {
    self.position
  }

  pub fn scale(&self) -> Vec3 {
    self.scale
  }

  pub fn color(&self) -> Rgba {
    self.surface.color
  }

  pub fn surface(&self) -> &SurfaceParams {
    &self.surface
  }

  pub fn state(&self) -> BeadState {
    BeadState {
      position: self.position,
      scale: self.scale,
      surface: self.surface,
    }
  }

  /// Scale relative to the template scale. Ignored unless `size > 0`.
  ///
  /// Returns whether the scale was written.
  pub fn set_size(&mut self, size: f32) -> bool {
    if size > 0.0 {
      self.scale = self.base_scale * size;
      true
    } else {
      false
    }
  }

  pub fn set_color(&mut self, color: Rgba) {
    self.surface.color = color;
  }

  pub fn set_metallic(&mut self, metallic: f32) {
    self.surface.metallic = metallic;
  }

  pub fn set_smoothness(&mut self, smoothness: f32) {
    self.surface.smoothness = smoothness;
  }

  pub(crate) fn into_handle(self) -> H {
    self.handle
  }
}
