//! Bead grid generation: sample, filter, place, instantiate.
//!
//! Generation either fully replaces the previous grid or, when the image is
//! unreadable, leaves it untouched. Prior beads are always destroyed before
//! the first new bead is created.

use glam::Vec3;
use rayon::prelude::*;
use tracing::{debug, info};
// WASM compat: std::time::Instant panics on wasm32
use web_time::Instant;

use crate::bead::{Bead, BeadState};
use crate::error::{BeadError, Result};
use crate::factory::BeadFactory;
use crate::raster::PixelSource;
use crate::sampler::sample_pixels;
use crate::types::{BeadTemplate, PixelCoord, Rgba};

/// All live beads built from one image pass.
#[derive(Debug)]
pub struct BeadGrid<H> {
  beads: Vec<Bead<H>>,
  width: u32,
  height: u32,
}

impl<H> BeadGrid<H> {
  pub fn beads(&self) -> &[Bead<H>] {
    &self.beads
  }

  pub fn beads_mut(&mut self) -> &mut [Bead<H>] {
    &mut self.beads
  }

  pub fn len(&self) -> usize {
    self.beads.len()
  }

  pub fn is_empty(&self) -> bool {
    self.beads.is_empty()
  }

  /// Dimensions of the source image.
  pub fn dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Bead<H>> {
    self.beads.iter()
  }
}

/// Statistics from one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
  /// Pixels read from the image (W×H).
  pub pixels_sampled: usize,
  /// Beads instantiated.
  pub beads_created: usize,
  /// Pixels dropped for having no alpha.
  pub transparent_skipped: usize,
  /// Beads of the previous grid that were destroyed.
  pub beads_destroyed: usize,
  /// Time spent in microseconds.
  pub elapsed_us: u64,
}

/// World position of a pixel's bead.
#[inline]
pub fn placement(origin: Vec3, coord: PixelCoord) -> Vec3 {
  origin + coord.plane_offset()
}

/// Build a new grid from `image`, replacing `grid`.
///
/// Steps, in order:
/// 1. readability check (error leaves `grid` and `container` untouched)
/// 2. destroy every bead of the previous grid
/// 3. ensure an (now empty) container exists
/// 4. sample pixels
/// 5. create one bead per pixel with visible alpha, in sample order
pub fn generate<F, S>(
  factory: &mut F,
  container: &mut Option<F::Container>,
  grid: &mut Option<BeadGrid<F::Handle>>,
  image: &mut S,
  template: &BeadTemplate,
  origin: Vec3,
) -> Result<GenerationStats>
where
  F: BeadFactory,
  S: PixelSource + ?Sized,
{
  let start = Instant::now();

  if !image.is_readable() {
    return Err(BeadError::UnreadableImage {
      name: image.name().to_owned(),
    });
  }
  image.request_point_filtering();

  let beads_destroyed = grid.take().map_or(0, |old| destroy_grid(factory, old));
  let container = container.get_or_insert_with(|| factory.create_container());

  let samples = sample_pixels(&*image)?;

  // Parallel: alpha filter and placement (order preserved)
  let placed: Vec<(Vec3, Rgba)> = samples
    .coords()
    .par_iter()
    .zip(samples.colors().par_iter())
    .filter(|(_, color)| !color.is_transparent())
    .map(|(coord, color)| (placement(origin, *coord), *color))
    .collect();

  // Sequential: the factory is not thread-safe
  let beads: Vec<_> = placed
    .into_iter()
    .map(|(position, color)| {
      let state = BeadState::initial(template, position, color);
      let handle = factory.create_bead(container, template, &state);
      Bead::new(handle, template, state)
    })
    .collect();

  let stats = GenerationStats {
    pixels_sampled: samples.len(),
    beads_created: beads.len(),
    transparent_skipped: samples.len() - beads.len(),
    beads_destroyed,
    elapsed_us: start.elapsed().as_micros() as u64,
  };

  *grid = Some(BeadGrid {
    beads,
    width: samples.width(),
    height: samples.height(),
  });

  info!(
    "Generated {} beads from \"{}\" ({}x{}, {} transparent, {} replaced) in {}us",
    stats.beads_created,
    image.name(),
    samples.width(),
    samples.height(),
    stats.transparent_skipped,
    stats.beads_destroyed,
    stats.elapsed_us
  );

  Ok(stats)
}

/// Destroy every bead of `grid`, returning how many were destroyed.
pub fn destroy_grid<F: BeadFactory>(factory: &mut F, grid: BeadGrid<F::Handle>) -> usize {
  let count = grid.beads.len();
  for bead in grid.beads {
    factory.destroy_bead(bead.into_handle());
  }
  debug!("Destroyed {} beads", count);
  count
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;
