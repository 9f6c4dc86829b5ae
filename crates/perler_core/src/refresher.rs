//! Parameter refresh: re-apply size and surface settings to live beads.
//!
//! Writes are plain overwrites, so refreshing every frame never accumulates.
//! Geometry and placement are never touched.

use crate::factory::BeadFactory;
use crate::generator::BeadGrid;

/// Live bead parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeadParams {
  /// Scale multiplier over the template scale. Ignored unless > 0.
  pub size: f32,
  pub metallicness: f32,
  pub smoothness: f32,
}

impl Default for BeadParams {
  fn default() -> Self {
    Self {
      size: 1.0,
      metallicness: 0.0,
      smoothness: 0.5,
    }
  }
}

/// Statistics from one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
  /// Beads whose state was re-applied.
  pub beads_refreshed: usize,
  /// Whether the size parameter was positive and therefore written.
  pub scale_applied: bool,
}

/// Apply `params` to every bead of `grid`. No-op without beads.
pub fn refresh<F: BeadFactory>(
  factory: &mut F,
  grid: Option<&mut BeadGrid<F::Handle>>,
  params: &BeadParams,
) -> RefreshStats {
  let Some(grid) = grid.filter(|g| !g.is_empty()) else {
    return RefreshStats::default();
  };

  let mut scale_applied = false;
  for bead in grid.beads_mut() {
    scale_applied = bead.set_size(params.size);
    bead.set_metallic(params.metallicness);
    bead.set_smoothness(params.smoothness);
    factory.apply_bead(bead.handle(), &bead.state());
  }

  RefreshStats {
    beads_refreshed: grid.len(),
    scale_applied,
  }
}

#[cfg(test)]
#[path = "refresher_test.rs"]
mod refresher_test;
