//! BeadFactory - entity lifecycle interface for engine bridges.
//!
//! This trait allows the core bead pipeline to create, update and destroy
//! engine objects (Bevy entities, scene nodes, ...) without depending
//! on any specific engine.

use glam::Vec3;

use crate::bead::BeadState;
use crate::types::BeadTemplate;

/// Entity factory injected by the host.
///
/// The core owns every handle it receives and hands each one back exactly
/// once through a `destroy_*` call. Calls arrive from a single thread, one
/// pipeline step at a time.
///
/// # Example (Bevy)
///
/// ```ignore
/// impl BeadFactory for BevyBeadFactory<'_, '_, '_> {
///     type Handle = BevyBead;
///     type Container = Entity;
///     type Viewpoint = Entity;
///
///     fn create_bead(&mut self, container: &Entity, _t: &BeadTemplate, state: &BeadState) -> BevyBead {
///         let material = self.materials.add(self.bead_material(state));
///         let entity = self.commands.spawn((/* mesh, material, transform */ ChildOf(*container))).id();
///         BevyBead { entity, material }
///     }
///     // ...
/// }
/// ```
pub trait BeadFactory {
  /// Handle to one bead and its exclusively owned visual resource.
  type Handle;
  /// Handle to the grouping node that parents a grid.
  type Container;
  /// Handle to the camera/viewpoint object.
  type Viewpoint;

  /// Create an empty grouping node.
  fn create_container(&mut self) -> Self::Container;

  /// Destroy a grouping node. Its beads have already been destroyed.
  fn destroy_container(&mut self, container: Self::Container);

  /// Instantiate a bead under `container` in its initial state.
  ///
  /// The template is read-only; the bead gets its own copy of the surface.
  fn create_bead(
    &mut self,
    container: &Self::Container,
    template: &BeadTemplate,
    state: &BeadState,
  ) -> Self::Handle;

  /// Write a bead's current state (scale, surface) to the engine.
  ///
  /// Must be a plain overwrite: called every frame with auto-refresh.
  fn apply_bead(&mut self, handle: &Self::Handle, state: &BeadState);

  /// Destroy a bead and release its visual resource.
  fn destroy_bead(&mut self, handle: Self::Handle);

  /// Look up the viewpoint object, if the scene has one.
  fn find_viewpoint(&mut self) -> Option<Self::Viewpoint>;

  /// Move the viewpoint to a world-space position.
  fn place_viewpoint(&mut self, viewpoint: &Self::Viewpoint, position: Vec3);
}

/// No-op implementation for benchmarks and headless operation.
pub struct NullFactory;

impl BeadFactory for NullFactory {
  type Handle = ();
  type Container = ();
  type Viewpoint = ();

  fn create_container(&mut self) {}

  fn destroy_container(&mut self, _container: ()) {}

  fn create_bead(&mut self, _container: &(), _template: &BeadTemplate, _state: &BeadState) {}

  fn apply_bead(&mut self, _handle: &(), _state: &BeadState) {}

  fn destroy_bead(&mut self, _handle: ()) {}

  fn find_viewpoint(&mut self) -> Option<()> {
    None
  }

  fn place_viewpoint(&mut self, _viewpoint: &(), _position: Vec3) {}
}
