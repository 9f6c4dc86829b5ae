//! perler - turns a sprite into a grid of 3D beads.
//!
//! Controls:
//! - G: Generate beads from the image
//! - R: Refresh beads with the current settings
//! - A: Toggle auto-refresh
//! - Up/Down: Grow/shrink beads
//! - M: Cycle metallicness

mod textures;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use perler_bevy::{
  BeadPrefab, Beadizer, BeadizerSet, GenerateBeads, PerlerBevyPlugin, RefreshBeads,
};
use perler_core::{BeadizerConfig, RasterImage};

/// Bead grid viewer.
#[derive(Parser, Debug)]
#[command(name = "perler")]
#[command(about = "Turns a sprite into a grid of 3D beads")]
struct Args {
  /// PNG to beadize. A built-in sprite is used when omitted.
  #[arg(short, long)]
  image: Option<PathBuf>,

  /// Bead settings TOML file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Re-apply bead settings every frame.
  #[arg(long)]
  auto_refresh: bool,

  /// World position of pixel (0, 0), as `x,y,z`.
  #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
  origin: Option<Vec<f32>>,
}

/// Startup parameters for the scene.
#[derive(Resource, Debug)]
struct SceneSettings {
  image: Option<RasterImage>,
  config: BeadizerConfig,
  origin: Vec3,
}

/// The single beadizer of the scene.
#[derive(Resource)]
struct SceneBeadizer(Entity);

fn main() -> Result<()> {
  let args = Args::parse();

  let mut config = match &args.config {
    Some(path) => BeadizerConfig::load(path)
      .with_context(|| format!("Failed to load bead config: {}", path.display()))?,
    None => BeadizerConfig::default(),
  };
  if args.auto_refresh {
    config.auto_refresh = true;
  }

  let image = args
    .image
    .as_deref()
    .map(|path| {
      RasterImage::open(path).with_context(|| format!("Failed to load image: {}", path.display()))
    })
    .transpose()?;

  let origin = match args.origin.as_deref() {
    None => Vec3::ZERO,
    Some(values) => {
      ensure!(values.len() == 3, "--origin needs three values, got {}", values.len());
      Vec3::new(values[0], values[1], values[2])
    }
  };

  App::new()
    .add_plugins(DefaultPlugins.set(WindowPlugin {
      primary_window: Some(Window {
        title: "Perler".into(),
        resolution: (1280, 800).into(),
        ..default()
      }),
      ..default()
    }))
    .add_plugins(PerlerBevyPlugin)
    .insert_resource(SceneSettings {
      image,
      config,
      origin,
    })
    .add_systems(Startup, spawn_scene)
    // Read next frame, once the beadizer's GlobalTransform has propagated
    .add_systems(Update, generate_when_loaded.after(BeadizerSet))
    .add_systems(Update, keyboard_controls)
    .run();

  Ok(())
}

fn spawn_scene(
  mut commands: Commands,
  settings: Res<SceneSettings>,
  mut images: ResMut<Assets<Image>>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  let image = images.add(match &settings.image {
    Some(raster) => textures::from_raster(raster),
    None => textures::heart(),
  });

  let prefab = BeadPrefab::new(
    meshes.add(Cylinder::new(0.45, 0.6)),
    materials.add(StandardMaterial::default()),
  );

  let beadizer = commands
    .spawn((
      Name::new("Beadizer"),
      Transform::from_translation(settings.origin),
      Beadizer::new(image, prefab, settings.config.clone()),
    ))
    .with_child((
      Name::new("Camera"),
      Camera3d::default(),
      // Straight down; only the translation is moved afterwards
      Transform::default().looking_to(Vec3::NEG_Y, Vec3::NEG_Z),
    ))
    .id();
  commands.insert_resource(SceneBeadizer(beadizer));

  commands.spawn((
    DirectionalLight {
      shadows_enabled: true,
      ..default()
    },
    Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
  ));

  info!("Press G to generate beads, R to refresh, A to toggle auto-refresh");
}

/// Generate once, on the first frame the image asset is available.
fn generate_when_loaded(
  mut done: Local<bool>,
  scene: Option<Res<SceneBeadizer>>,
  beadizers: Query<&Beadizer>,
  images: Res<Assets<Image>>,
  mut generate: MessageWriter<GenerateBeads>,
) {
  if *done {
    return;
  }
  let Some(scene) = scene else {
    return;
  };
  let Ok(beadizer) = beadizers.get(scene.0) else {
    return;
  };
  if images.contains(&beadizer.image) {
    generate.write(GenerateBeads { beadizer: scene.0 });
    *done = true;
  }
}

fn keyboard_controls(
  keys: Res<ButtonInput<KeyCode>>,
  scene: Option<Res<SceneBeadizer>>,
  mut beadizers: Query<&mut Beadizer>,
  mut generate: MessageWriter<GenerateBeads>,
  mut refresh: MessageWriter<RefreshBeads>,
) {
  let Some(scene) = scene else {
    return;
  };
  let target = scene.0;

  if keys.just_pressed(KeyCode::KeyG) {
    generate.write(GenerateBeads { beadizer: target });
  }
  if keys.just_pressed(KeyCode::KeyR) {
    refresh.write(RefreshBeads { beadizer: target });
  }

  let Ok(mut beadizer) = beadizers.get_mut(target) else {
    return;
  };
  if keys.just_pressed(KeyCode::KeyA) {
    let config = beadizer.config_mut();
    config.auto_refresh = !config.auto_refresh;
    info!("Auto-refresh {}", if config.auto_refresh { "on" } else { "off" });
  }
  if keys.just_pressed(KeyCode::ArrowUp) {
    beadizer.config_mut().bead_size += 0.1;
  }
  if keys.just_pressed(KeyCode::ArrowDown) {
    let config = beadizer.config_mut();
    config.bead_size = (config.bead_size - 0.1).max(0.1);
  }
  if keys.just_pressed(KeyCode::KeyM) {
    let config = beadizer.config_mut();
    config.bead_metallicness = (config.bead_metallicness + 0.25) % 1.25;
  }
}
