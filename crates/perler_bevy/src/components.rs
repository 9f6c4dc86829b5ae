//! Bevy components for bead grids.

use bevy::prelude::*;
use perler_core::{BeadTemplate, BeadizerConfig, BeadizerController, SurfaceParams};

use crate::factory::to_core;

/// Handle to a spawned bead: the entity plus the material only it uses.
#[derive(Clone, Debug)]
pub struct BevyBead {
  pub entity: Entity,
  pub material: Handle<StandardMaterial>,
}

/// Controller specialised to Bevy handles: beads, container entity and
/// camera entity.
pub type BevyBeadizerController = BeadizerController<BevyBead, Entity, Entity>;

/// Marker for bead entities.
#[derive(Component, Default)]
pub struct PerlerBead;

/// Marker for the entity all beads of one beadizer are parented to.
#[derive(Component, Default)]
pub struct BeadContainer;

/// What every bead is cloned from.
#[derive(Clone, Debug)]
pub struct BeadPrefab {
  pub mesh: Handle<Mesh>,
  /// Copied per bead, never edited in place.
  pub material: Handle<StandardMaterial>,
  /// Scale of a bead at size 1.
  pub scale: Vec3,
}

impl BeadPrefab {
  pub fn new(mesh: Handle<Mesh>, material: Handle<StandardMaterial>) -> Self {
    Self {
      mesh,
      material,
      scale: Vec3::ONE,
    }
  }

  pub fn with_scale(mut self, scale: Vec3) -> Self {
    self.scale = scale;
    self
  }

  pub(crate) fn template(&self) -> BeadTemplate {
    BeadTemplate {
      scale: to_core(self.scale),
      surface: SurfaceParams::default(),
    }
  }
}

/// Turns an image into a grid of beads.
///
/// The entity's `Transform` is the grid origin: pixel (0, 0) sits at its
/// translation. A child named `Camera` is used as the viewpoint when
/// auto-positioning is enabled.
///
/// # Example
/// ```ignore
/// commands
///   .spawn((Transform::default(), Beadizer::new(image, prefab, config)))
///   .with_child((Name::new("Camera"), Camera3d::default()));
/// ```
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct Beadizer {
  pub image: Handle<Image>,
  pub prefab: BeadPrefab,
  pub controller: BevyBeadizerController,
}

impl Beadizer {
  pub fn new(image: Handle<Image>, prefab: BeadPrefab, config: BeadizerConfig) -> Self {
    let controller = BeadizerController::new(config, prefab.template());
    Self {
      image,
      prefab,
      controller,
    }
  }

  pub fn config(&self) -> &BeadizerConfig {
    self.controller.config()
  }

  /// Settings take effect on the next refresh.
  pub fn config_mut(&mut self) -> &mut BeadizerConfig {
    self.controller.config_mut()
  }

  /// Swap the prefab; beads pick it up on the next generation.
  pub fn set_prefab(&mut self, prefab: BeadPrefab) {
    self.controller.set_template(prefab.template());
    self.prefab = prefab;
  }

  pub fn bead_count(&self) -> usize {
    self.controller.bead_count()
  }
}
