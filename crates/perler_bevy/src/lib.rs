//! Bevy bridge for perler_core.
//!
//! Beads become entities under a per-beadizer container, each with its own
//! `StandardMaterial`. Generation and manual refresh are driven by messages;
//! auto-refresh runs every frame.

pub mod components;
pub mod factory;
pub mod image;
pub mod messages;
pub mod systems;

use bevy::prelude::*;
pub use components::*;
pub use factory::BevyBeadFactory;
pub use image::BevyImageSource;
pub use messages::{GenerateBeads, RefreshBeads};

/// Ordering label for the beadizer systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeadizerSet;

/// Registers bead messages and the beadizer lifecycle systems.
pub struct PerlerBevyPlugin;

impl Plugin for PerlerBevyPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_message::<GenerateBeads>()
      .add_message::<RefreshBeads>()
      .add_systems(
        Update,
        (
          systems::setup_beadizers,
          systems::handle_generate_requests,
          systems::handle_refresh_requests,
          systems::tick_beadizers,
        )
          .chain()
          .in_set(BeadizerSet),
      );
  }
}
