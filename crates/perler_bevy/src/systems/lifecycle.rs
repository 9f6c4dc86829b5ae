//! Setup, generation, refresh and per-frame tick for every `Beadizer`.

use bevy::prelude::*;

use crate::components::Beadizer;
use crate::factory::{to_bevy, to_core, BevyBeadFactory};
use crate::image::{image_name, BevyImageSource};
use crate::messages::{GenerateBeads, RefreshBeads};

/// Name of the beadizer child used as the viewpoint.
pub const VIEWPOINT_NAME: &str = "Camera";

/// Direct child of `root` named [`VIEWPOINT_NAME`], if any.
pub fn find_viewpoint_child(
  root: Entity,
  children: &Query<&Children>,
  names: &Query<&Name>,
) -> Option<Entity> {
  let kids: &[Entity] = children.get(root).ok()?;
  kids
    .iter()
    .copied()
    .find(|&child| names.get(child).is_ok_and(|name| name.as_str() == VIEWPOINT_NAME))
}

/// Start hook: run setup once for each newly added beadizer.
pub fn setup_beadizers(
  mut commands: Commands,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut beadizers: Query<(Entity, &mut Beadizer, &GlobalTransform), Added<Beadizer>>,
  children: Query<&Children>,
  names: Query<&Name>,
) {
  for (root, mut beadizer, transform) in &mut beadizers {
    let camera = find_viewpoint_child(root, &children, &names);
    let Beadizer {
      prefab, controller, ..
    } = &mut *beadizer;

    let origin = transform.translation();
    controller.set_origin(to_core(origin));
    let mut factory = BevyBeadFactory::new(&mut commands, &mut materials, prefab, root, origin)
      .with_camera(camera);
    controller.setup(&mut factory);

    debug!("Beadizer {root:?} set up (camera: {camera:?})");
  }
}

/// Rebuild grids for every `GenerateBeads` request.
pub fn handle_generate_requests(
  mut requests: MessageReader<GenerateBeads>,
  mut commands: Commands,
  mut images: ResMut<Assets<Image>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut beadizers: Query<(&mut Beadizer, &GlobalTransform)>,
  children: Query<&Children>,
  names: Query<&Name>,
) {
  for request in requests.read() {
    let root = request.beadizer;
    let Ok((mut beadizer, transform)) = beadizers.get_mut(root) else {
      warn!("GenerateBeads: {root:?} has no Beadizer");
      continue;
    };
    let camera = find_viewpoint_child(root, &children, &names);
    let Beadizer {
      image,
      prefab,
      controller,
    } = &mut *beadizer;

    let name = image_name(image);
    let Some(pixels) = images.get_mut(&*image) else {
      warn!("Cannot generate beads: image \"{name}\" is not loaded");
      continue;
    };

    // World space, so nested beadizers still report world bead positions
    let origin = transform.translation();
    controller.set_origin(to_core(origin));
    let mut source = BevyImageSource::new(name, pixels);
    let mut factory = BevyBeadFactory::new(&mut commands, &mut materials, prefab, root, origin)
      .with_camera(camera);

    // Failures are already logged by the controller
    if let Ok(stats) = controller.generate(&mut factory, &mut source) {
      info!(
        "Beadizer {root:?}: {} beads from {} pixels",
        stats.beads_created, stats.pixels_sampled
      );
    }
  }
}

/// Apply current settings for every `RefreshBeads` request.
pub fn handle_refresh_requests(
  mut requests: MessageReader<RefreshBeads>,
  mut commands: Commands,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut beadizers: Query<(&mut Beadizer, &GlobalTransform)>,
) {
  for request in requests.read() {
    let root = request.beadizer;
    let Ok((mut beadizer, transform)) = beadizers.get_mut(root) else {
      warn!("RefreshBeads: {root:?} has no Beadizer");
      continue;
    };
    let Beadizer {
      prefab, controller, ..
    } = &mut *beadizer;

    // Beads stay relative to the origin they were generated at
    let origin = to_bevy(controller.origin());
    let mut factory = BevyBeadFactory::new(&mut commands, &mut materials, prefab, root, origin)
      .with_root_translation(transform.translation());
    let stats = controller.refresh_beads(&mut factory);
    debug!("Beadizer {root:?}: refreshed {} beads", stats.beads_refreshed);
  }
}

/// Per-frame step; refreshes beadizers that have auto-refresh on.
pub fn tick_beadizers(
  mut commands: Commands,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut beadizers: Query<(Entity, &mut Beadizer, &GlobalTransform)>,
) {
  for (root, mut beadizer, transform) in &mut beadizers {
    if !beadizer.config().auto_refresh {
      continue;
    }
    let Beadizer {
      prefab, controller, ..
    } = &mut *beadizer;

    let origin = to_bevy(controller.origin());
    let mut factory = BevyBeadFactory::new(&mut commands, &mut materials, prefab, root, origin)
      .with_root_translation(transform.translation());
    controller.tick(&mut factory);
  }
}
