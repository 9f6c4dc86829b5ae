//! `BeadFactory` over Bevy commands and material assets.
//!
//! Built per system run: it borrows `Commands` and `Assets<StandardMaterial>`
//! for the duration of one controller call.

use bevy::prelude::*;
use perler_core::glam;
use perler_core::{BeadFactory, BeadState, BeadTemplate, Rgba, SurfaceParams};

use crate::components::{BeadContainer, BeadPrefab, BevyBead, PerlerBead};

/// Name given to every bead entity.
pub const BEAD_NAME: &str = "Bead";
/// Name of the entity beads are parented to.
pub const CONTAINER_NAME: &str = "Bead Container";

pub(crate) fn to_core(v: Vec3) -> glam::Vec3 {
  glam::Vec3::from_array(v.to_array())
}

pub(crate) fn to_bevy(v: glam::Vec3) -> Vec3 {
  Vec3::from_array(v.to_array())
}

fn to_color(c: Rgba) -> Color {
  Color::srgba(c.r, c.g, c.b, c.a)
}

/// Perceptual roughness for a smoothness value.
fn roughness(smoothness: f32) -> f32 {
  (1.0 - smoothness).clamp(0.0, 1.0)
}

fn surface_matches(material: &StandardMaterial, surface: &SurfaceParams) -> bool {
  material.base_color == to_color(surface.color)
    && material.metallic == surface.metallic
    && material.perceptual_roughness == roughness(surface.smoothness)
}

fn apply_surface(material: &mut StandardMaterial, surface: &SurfaceParams) {
  material.base_color = to_color(surface.color);
  material.metallic = surface.metallic;
  material.perceptual_roughness = roughness(surface.smoothness);
}

/// Spawns beads as children of a container under the beadizer `root`.
///
/// Core positions are world space. Beads are placed relative to `origin`,
/// the root's world translation when the grid was generated; the viewpoint
/// relative to the root's current world translation. Root rotation and scale
/// are not applied to either.
pub struct BevyBeadFactory<'a, 'w, 's> {
  commands: &'a mut Commands<'w, 's>,
  materials: &'a mut Assets<StandardMaterial>,
  prefab: &'a BeadPrefab,
  root: Entity,
  origin: Vec3,
  root_translation: Vec3,
  camera: Option<Entity>,
}

impl<'a, 'w, 's> BevyBeadFactory<'a, 'w, 's> {
  pub fn new(
    commands: &'a mut Commands<'w, 's>,
    materials: &'a mut Assets<StandardMaterial>,
    prefab: &'a BeadPrefab,
    root: Entity,
    origin: Vec3,
  ) -> Self {
    Self {
      commands,
      materials,
      prefab,
      root,
      origin,
      root_translation: origin,
      camera: None,
    }
  }

  /// Current world translation of the root, when it has moved away from
  /// `origin` since generation.
  pub fn with_root_translation(mut self, translation: Vec3) -> Self {
    self.root_translation = translation;
    self
  }

  /// Entity returned from `find_viewpoint`.
  pub fn with_camera(mut self, camera: Option<Entity>) -> Self {
    self.camera = camera;
    self
  }

  fn local_transform(&self, state: &BeadState) -> Transform {
    Transform::from_translation(to_bevy(state.position) - self.origin)
      .with_scale(to_bevy(state.scale))
  }
}

impl BeadFactory for BevyBeadFactory<'_, '_, '_> {
  type Handle = BevyBead;
  type Container = Entity;
  type Viewpoint = Entity;

  fn create_container(&mut self) -> Entity {
    self
      .commands
      .spawn((
        Name::new(CONTAINER_NAME),
        BeadContainer,
        Transform::default(),
        Visibility::default(),
        ChildOf(self.root),
      ))
      .id()
  }

  fn destroy_container(&mut self, container: Entity) {
    self.commands.entity(container).despawn();
  }

  fn create_bead(
    &mut self,
    container: &Entity,
    _template: &BeadTemplate,
    state: &BeadState,
  ) -> BevyBead {
    // Each bead gets its own copy so colors never bleed between beads
    let mut material = self
      .materials
      .get(&self.prefab.material)
      .cloned()
      .unwrap_or_default();
    apply_surface(&mut material, &state.surface);
    let material = self.materials.add(material);

    let entity = self
      .commands
      .spawn((
        Name::new(BEAD_NAME),
        PerlerBead,
        Mesh3d(self.prefab.mesh.clone()),
        MeshMaterial3d(material.clone()),
        self.local_transform(state),
        ChildOf(*container),
      ))
      .id();

    BevyBead { entity, material }
  }

  fn apply_bead(&mut self, handle: &BevyBead, state: &BeadState) {
    // Skip unchanged materials so auto-refresh doesn't re-upload every frame
    let stale = self
      .materials
      .get(&handle.material)
      .is_some_and(|m| !surface_matches(m, &state.surface));
    if stale {
      if let Some(material) = self.materials.get_mut(&handle.material) {
        apply_surface(material, &state.surface);
      }
    }

    let transform = self.local_transform(state);
    self
      .commands
      .entity(handle.entity)
      .queue(move |mut entity_mut: EntityWorldMut| {
        if let Some(mut current) = entity_mut.get_mut::<Transform>() {
          current.set_if_neq(transform);
        }
      });
  }

  fn destroy_bead(&mut self, handle: BevyBead) {
    self.commands.entity(handle.entity).despawn();
    self.materials.remove(&handle.material);
  }

  fn find_viewpoint(&mut self) -> Option<Entity> {
    self.camera
  }

  fn place_viewpoint(&mut self, viewpoint: &Entity, position: glam::Vec3) {
    let translation = to_bevy(position) - self.root_translation;
    self
      .commands
      .entity(*viewpoint)
      .queue(move |mut entity_mut: EntityWorldMut| {
        if let Some(mut transform) = entity_mut.get_mut::<Transform>() {
          if transform.translation != translation {
            transform.translation = translation;
          }
        }
      });
  }
}

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;
