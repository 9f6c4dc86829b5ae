//! perler_core - Framework/engine independent perler bead generation
//!
//! Turns a small pixel-art image into a grid of placed beads, one per opaque
//! pixel, and keeps the beads' size and surface parameters in sync with a
//! live configuration.
//!
//! # Features
//!
//! - **Pixel Sampler**: deterministic scan of an image into coordinate/color
//!   pairs
//! - **Grid Generator**: alpha filtering, placement on the horizontal plane,
//!   idempotent teardown and rebuild
//! - **Parameter Refresher**: cheap, non-accumulating re-application of size,
//!   metallic and smoothness settings
//! - **Lifecycle Controller**: setup/generate/tick orchestration driven by an
//!   engine bridge through the [`BeadFactory`] trait
//!
//! # Example
//!
//! ```ignore
//! use perler_core::{BeadTemplate, BeadizerConfig, BeadizerController, RasterImage};
//!
//! let mut image = RasterImage::open("assets/heart.png")?;
//! let mut controller = BeadizerController::new(BeadizerConfig::default(), BeadTemplate::default());
//!
//! controller.setup(&mut factory);
//! let stats = controller.generate(&mut factory, &mut image)?;
//! println!("Placed {} beads", stats.beads_created);
//!
//! // Every frame:
//! controller.tick(&mut factory);
//! ```

pub mod bead;
pub mod config;
pub mod controller;
pub mod error;
pub mod factory;
pub mod generator;
pub mod raster;
pub mod refresher;
pub mod sampler;
pub mod types;
pub mod viewpoint;

#[cfg(test)]
pub(crate) mod test_utils;

// Same glam as the engine bridges, for Vec3 interop
pub use glam;

// Re-export commonly used items
pub use bead::{Bead, BeadState};
pub use config::BeadizerConfig;
pub use controller::{BeadizerController, LifecycleState};
pub use error::{BeadError, Result};
pub use factory::{BeadFactory, NullFactory};
pub use generator::{BeadGrid, GenerationStats};
pub use raster::{PixelSource, RasterImage};
pub use refresher::{BeadParams, RefreshStats};
pub use sampler::{sample_pixels, PixelSamples, ScanOrder};
pub use types::{BeadTemplate, PixelCoord, Rgba, SurfaceParams, ALPHA_EPSILON};
pub use viewpoint::viewpoint_position;
