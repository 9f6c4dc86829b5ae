//! Test utilities: an in-memory factory that tracks live entities, and
//! image fixtures.

use std::cell::RefCell;
use std::collections::HashMap;

use glam::Vec3;

use crate::bead::BeadState;
use crate::factory::BeadFactory;
use crate::raster::{PixelSource, RasterImage};
use crate::types::{BeadTemplate, Rgba};

pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
pub const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);

// =============================================================================
// Mock factory
// =============================================================================

/// Fake entity ID for testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MockEntity(pub u64);

/// What the mock "engine" knows about a spawned bead.
#[derive(Clone, Debug)]
pub struct MockBead {
  pub container: MockEntity,
  pub state: BeadState,
}

/// Simulates an engine scene: spawns, despawns and per-bead state writes.
#[derive(Default)]
pub struct RecordingFactory {
  next_entity: u64,
  pub beads: HashMap<MockEntity, MockBead>,
  pub containers: Vec<MockEntity>,
  pub viewpoint: Option<MockEntity>,
  pub viewpoint_position: Option<Vec3>,
  pub created: usize,
  pub destroyed: usize,
  pub applies: usize,
  pub containers_created: usize,
  /// Operations on entities that were not alive.
  pub violations: Vec<String>,
}

impl RecordingFactory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Factory whose scene has a camera to position.
  pub fn with_viewpoint() -> Self {
    let mut factory = Self::new();
    factory.viewpoint = Some(factory.spawn());
    factory
  }

  fn spawn(&mut self) -> MockEntity {
    self.next_entity += 1;
    MockEntity(self.next_entity)
  }

  pub fn live_beads(&self) -> usize {
    self.beads.len()
  }

  /// Live (position, color) pairs sorted for multiset comparison.
  pub fn snapshot(&self) -> Vec<([u32; 3], [u8; 4])> {
    let mut out: Vec<_> = self
      .beads
      .values()
      .map(|b| {
        let p = b.state.position;
        (
          [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()],
          b.state.surface.color.to_u8(),
        )
      })
      .collect();
    out.sort();
    out
  }
}

impl BeadFactory for RecordingFactory {
  type Handle = MockEntity;
  type Container = MockEntity;
  type Viewpoint = MockEntity;

  fn create_container(&mut self) -> MockEntity {
    let entity = self.spawn();
    self.containers.push(entity);
    self.containers_created += 1;
    entity
  }

  fn destroy_container(&mut self, container: MockEntity) {
    let before = self.containers.len();
    self.containers.retain(|c| *c != container);
    if self.containers.len() == before {
      self.violations.push(format!("destroyed unknown container {container:?}"));
    }
    if self.beads.values().any(|b| b.container == container) {
      self.violations.push(format!("container {container:?} destroyed with live beads"));
    }
  }

  fn create_bead(
    &mut self,
    container: &MockEntity,
    _template: &BeadTemplate,
    state: &BeadState,
  ) -> MockEntity {
    if !self.containers.contains(container) {
      self.violations.push(format!("bead parented to dead container {container:?}"));
    }
    let entity = self.spawn();
    self.beads.insert(
      entity,
      MockBead {
        container: *container,
        state: *state,
      },
    );
    self.created += 1;
    entity
  }

  fn apply_bead(&mut self, handle: &MockEntity, state: &BeadState) {
    self.applies += 1;
    match self.beads.get_mut(handle) {
      Some(bead) => bead.state = *state,
      None => self.violations.push(format!("applied to dead bead {handle:?}")),
    }
  }

  fn destroy_bead(&mut self, handle: MockEntity) {
    if self.beads.remove(&handle).is_none() {
      self.violations.push(format!("destroyed dead bead {handle:?}"));
    }
    self.destroyed += 1;
  }

  fn find_viewpoint(&mut self) -> Option<MockEntity> {
    self.viewpoint
  }

  fn place_viewpoint(&mut self, viewpoint: &MockEntity, position: Vec3) {
    if Some(*viewpoint) != self.viewpoint {
      self.violations.push(format!("placed unknown viewpoint {viewpoint:?}"));
    }
    self.viewpoint_position = Some(position);
  }
}

// =============================================================================
// Image fixtures
// =============================================================================

/// 2×2 image: red at (0,0), blue at (0,1), the rest transparent.
pub fn red_blue_column() -> RasterImage {
  RasterImage::from_fn("red_blue", 2, 2, |x, y| match (x, y) {
    (0, 0) => RED,
    (0, 1) => BLUE,
    _ => Rgba::TRANSPARENT,
  })
}

/// Fully opaque image with a distinct color per pixel.
pub fn opaque(width: u32, height: u32) -> RasterImage {
  RasterImage::from_fn("opaque", width, height, |x, y| {
    Rgba::from_u8([(x % 256) as u8, (y % 256) as u8, 128, 255])
  })
}

/// Checkerboard where odd cells are transparent.
pub fn checker(width: u32, height: u32) -> RasterImage {
  RasterImage::from_fn("checker", width, height, |x, y| {
    if (x + y) % 2 == 0 {
      Rgba::rgb(0.2, 0.8, 0.2)
    } else {
      Rgba::TRANSPARENT
    }
  })
}

/// Wraps an image and records the order of pixel reads.
pub struct ReadLog<'a> {
  pub inner: &'a RasterImage,
  pub reads: RefCell<Vec<(u32, u32)>>,
}

impl<'a> ReadLog<'a> {
  pub fn new(inner: &'a RasterImage) -> Self {
    Self {
      inner,
      reads: RefCell::new(Vec::new()),
    }
  }
}

impl PixelSource for ReadLog<'_> {
  fn name(&self) -> &str {
    self.inner.name()
  }

  fn width(&self) -> u32 {
    self.inner.width()
  }

  fn height(&self) -> u32 {
    self.inner.height()
  }

  fn is_readable(&self) -> bool {
    self.inner.is_readable()
  }

  fn pixel(&self, x: u32, y: u32) -> Rgba {
    self.reads.borrow_mut().push((x, y));
    self.inner.pixel(x, y)
  }
}
