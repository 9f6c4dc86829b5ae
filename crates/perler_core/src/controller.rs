//! Lifecycle controller: owns the grid and drives setup, generation and
//! refresh on behalf of a host.
//!
//! The controller never holds the factory. Hosts build one per step (it
//! usually borrows engine state) and pass it in, so the controller only
//! stores handles.
//!
//! # Usage
//!
//! ```ignore
//! let mut controller = BeadizerController::new(config, template);
//!
//! // Once, from the host's start hook
//! controller.setup(&mut factory);
//!
//! // "Generate" command
//! controller.generate(&mut factory, &mut image)?;
//!
//! // Every frame (refreshes only when auto-refresh is on)
//! controller.tick(&mut factory);
//!
//! // "Refresh" command
//! controller.refresh_beads(&mut factory);
//! ```

use glam::Vec3;
use tracing::{debug, warn};

use crate::config::BeadizerConfig;
use crate::error::Result;
use crate::factory::BeadFactory;
use crate::generator::{self, destroy_grid, BeadGrid, GenerationStats};
use crate::raster::PixelSource;
use crate::refresher::{self, RefreshStats};
use crate::types::BeadTemplate;
use crate::viewpoint::viewpoint_position;

/// Coarse controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
  /// `setup()` has not run.
  Uninitialized,
  /// Set up, no grid.
  Ready,
  /// Set up with a live grid.
  Populated,
}

/// Orchestrates one bead grid for a host.
///
/// Type parameters are the factory's handle types: `H` bead, `C` container,
/// `V` viewpoint.
#[derive(Debug)]
pub struct BeadizerController<H, C, V> {
  config: BeadizerConfig,
  template: BeadTemplate,
  origin: Vec3,
  container: Option<C>,
  viewpoint: Option<V>,
  grid: Option<BeadGrid<H>>,
  set_up: bool,
  /// Set by a successful generation, cleared by a failed one.
  running: bool,
}

impl<H, C, V> BeadizerController<H, C, V> {
  pub fn new(config: BeadizerConfig, template: BeadTemplate) -> Self {
    Self {
      config,
      template,
      origin: Vec3::ZERO,
      container: None,
      viewpoint: None,
      grid: None,
      set_up: false,
      running: false,
    }
  }

  /// Set the world position of pixel (0, 0).
  pub fn with_origin(mut self, origin: Vec3) -> Self {
    self.origin = origin;
    self
  }

  pub fn set_origin(&mut self, origin: Vec3) {
    self.origin = origin;
  }

  pub fn origin(&self) -> Vec3 {
    self.origin
  }

  pub fn config(&self) -> &BeadizerConfig {
    &self.config
  }

  /// Mutable settings. Changes reach the beads on the next refresh.
  pub fn config_mut(&mut self) -> &mut BeadizerConfig {
    &mut self.config
  }

  pub fn set_config(&mut self, config: BeadizerConfig) {
    self.config = config;
  }

  pub fn template(&self) -> &BeadTemplate {
    &self.template
  }

  /// Replace the template. Applies from the next generation on.
  pub fn set_template(&mut self, template: BeadTemplate) {
    self.template = template;
  }

  pub fn state(&self) -> LifecycleState {
    match (self.set_up, self.grid.is_some()) {
      (false, _) => LifecycleState::Uninitialized,
      (true, false) => LifecycleState::Ready,
      (true, true) => LifecycleState::Populated,
    }
  }

  pub fn is_set_up(&self) -> bool {
    self.set_up
  }

  /// True after a successful generation, false after a failed one.
  pub fn is_running(&self) -> bool {
    self.running
  }

  pub fn grid(&self) -> Option<&BeadGrid<H>> {
    self.grid.as_ref()
  }

  pub fn bead_count(&self) -> usize {
    self.grid.as_ref().map_or(0, BeadGrid::len)
  }

  pub fn container(&self) -> Option<&C> {
    self.container.as_ref()
  }

  pub fn viewpoint(&self) -> Option<&V> {
    self.viewpoint.as_ref()
  }

  /// Acquire the viewpoint and a fresh container.
  ///
  /// Safe to call repeatedly. An idle container is replaced; one holding a
  /// live grid is kept, since that grid still belongs to it.
  pub fn setup<F>(&mut self, factory: &mut F)
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
  {
    self.viewpoint = factory.find_viewpoint();
    if self.viewpoint.is_none() {
      debug!("No viewpoint found; camera positioning is skipped");
    }

    if self.grid.is_none() {
      if let Some(stale) = self.container.take() {
        factory.destroy_container(stale);
      }
      self.container = Some(factory.create_container());
    }

    self.set_up = true;
  }

  /// Replace the grid with one built from `image`, then refresh it.
  ///
  /// Runs setup first if needed. An unreadable image is reported, stops
  /// auto-refresh, and leaves the current grid as it was.
  pub fn generate<F, S>(&mut self, factory: &mut F, image: &mut S) -> Result<GenerationStats>
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
    S: PixelSource + ?Sized,
  {
    // No grid exists before setup, so this never disturbs live beads
    if !self.set_up {
      self.setup(factory);
    }

    let stats = match generator::generate(
      factory,
      &mut self.container,
      &mut self.grid,
      image,
      &self.template,
      self.origin,
    ) {
      Ok(stats) => stats,
      Err(err) => {
        warn!("{err}");
        self.running = false;
        return Err(err);
      }
    };

    self.running = true;
    // Also places the viewpoint when auto-camera is on
    self.refresh_beads(factory);

    Ok(stats)
  }

  /// Periodic step. Refreshes only when set up, running and auto-refresh
  /// is enabled; otherwise does nothing.
  pub fn tick<F>(&mut self, factory: &mut F) -> Option<RefreshStats>
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
  {
    if !self.set_up || !self.running || !self.config.auto_refresh {
      return None;
    }
    Some(self.refresh_beads(factory))
  }

  /// Re-apply current parameters to every bead, regardless of auto-refresh.
  pub fn refresh_beads<F>(&mut self, factory: &mut F) -> RefreshStats
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
  {
    if self.grid.is_none() {
      return RefreshStats::default();
    }
    if self.config.auto_position_camera {
      self.position_viewpoint(factory);
    }
    refresher::refresh(factory, self.grid.as_mut(), &self.config.bead_params())
  }

  /// Destroy every bead and the container; back to `Uninitialized`.
  pub fn teardown<F>(&mut self, factory: &mut F)
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
  {
    if let Some(grid) = self.grid.take() {
      destroy_grid(factory, grid);
    }
    if let Some(container) = self.container.take() {
      factory.destroy_container(container);
    }
    self.viewpoint = None;
    self.set_up = false;
    self.running = false;
  }

  fn position_viewpoint<F>(&self, factory: &mut F)
  where
    F: BeadFactory<Handle = H, Container = C, Viewpoint = V>,
  {
    let (Some(viewpoint), Some(grid)) = (&self.viewpoint, &self.grid) else {
      return;
    };
    let (width, height) = grid.dimensions();
    factory.place_viewpoint(viewpoint, viewpoint_position(width, height));
  }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
