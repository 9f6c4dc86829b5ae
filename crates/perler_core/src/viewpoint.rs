//! Viewpoint positioning over a generated grid.

use glam::Vec3;

/// Camera position for an image of the given size.
///
/// `(w / 2, (w + h) / 2, h / 2)` with truncating integer division: centered
/// over the grid, raised by the average side length.
pub fn viewpoint_position(width: u32, height: u32) -> Vec3 {
  let (w, h) = (width as u64, height as u64);
  Vec3::new((w / 2) as f32, ((w + h) / 2) as f32, (h / 2) as f32)
}
