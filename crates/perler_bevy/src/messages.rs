//! Commands a host sends to a beadizer.

use bevy::prelude::*;

/// Rebuild the bead grid of `beadizer` from its image.
#[derive(Message, Clone, Copy, Debug)]
pub struct GenerateBeads {
  pub beadizer: Entity,
}

/// Re-apply the current bead settings of `beadizer`, even with
/// auto-refresh off.
#[derive(Message, Clone, Copy, Debug)]
pub struct RefreshBeads {
  pub beadizer: Entity,
}
