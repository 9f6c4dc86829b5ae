use super::*;
use crate::test_utils::{checker, opaque, red_blue_column, MockEntity, RecordingFactory};

type TestController = BeadizerController<MockEntity, MockEntity, MockEntity>;

fn controller(config: BeadizerConfig) -> TestController {
  BeadizerController::new(config, BeadTemplate::default())
}

fn auto_refresh() -> BeadizerConfig {
  BeadizerConfig {
    auto_refresh: true,
    ..Default::default()
  }
}

#[test]
fn test_state_transitions() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());
  assert_eq!(c.state(), LifecycleState::Uninitialized);

  c.setup(&mut factory);
  assert_eq!(c.state(), LifecycleState::Ready);

  c.generate(&mut factory, &mut opaque(2, 2)).unwrap();
  assert_eq!(c.state(), LifecycleState::Populated);

  c.teardown(&mut factory);
  assert_eq!(c.state(), LifecycleState::Uninitialized);
  assert_eq!(factory.live_beads(), 0);
  assert!(factory.containers.is_empty());
  assert!(factory.violations.is_empty(), "{:?}", factory.violations);
}

#[test]
fn test_setup_is_idempotent() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());

  c.setup(&mut factory);
  c.setup(&mut factory);
  c.setup(&mut factory);

  // Stale containers never persist
  assert_eq!(factory.containers.len(), 1);
  assert_eq!(c.container(), factory.containers.first());
  assert!(c.is_set_up());
}

#[test]
fn test_setup_keeps_container_of_live_grid() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());
  c.generate(&mut factory, &mut opaque(2, 2)).unwrap();
  let container = *c.container().unwrap();

  c.setup(&mut factory);

  assert_eq!(c.container(), Some(&container));
  assert_eq!(factory.live_beads(), 4);
  assert!(factory.violations.is_empty(), "{:?}", factory.violations);
}

#[test]
fn test_generate_runs_setup_and_refresh() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig {
    bead_size: 2.0,
    bead_metallicness: 0.6,
    ..Default::default()
  });

  let stats = c.generate(&mut factory, &mut red_blue_column()).unwrap();

  assert!(c.is_set_up());
  assert!(c.is_running());
  assert_eq!(stats.beads_created, 2);
  assert_eq!(factory.applies, 2);
  for bead in factory.beads.values() {
    assert_eq!(bead.state.scale, Vec3::splat(2.0));
    assert_eq!(bead.state.surface.metallic, 0.6);
  }
}

#[test]
fn test_tick_requires_auto_refresh() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());
  c.generate(&mut factory, &mut opaque(2, 2)).unwrap();
  let applies = factory.applies;

  assert!(c.tick(&mut factory).is_none());
  assert_eq!(factory.applies, applies);

  c.config_mut().auto_refresh = true;
  let stats = c.tick(&mut factory).unwrap();
  assert_eq!(stats.beads_refreshed, 4);
}

#[test]
fn test_tick_before_setup_is_noop() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(auto_refresh());

  assert!(c.tick(&mut factory).is_none());

  // Set up but never generated
  c.setup(&mut factory);
  assert!(c.tick(&mut factory).is_none());
  assert_eq!(factory.applies, 0);
}

#[test]
fn test_tick_picks_up_parameter_changes() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(auto_refresh());
  c.generate(&mut factory, &mut checker(3, 3)).unwrap();

  c.config_mut().bead_smoothness = 0.9;
  c.config_mut().bead_size = 0.5;
  c.tick(&mut factory);

  for bead in factory.beads.values() {
    assert_eq!(bead.state.surface.smoothness, 0.9);
    assert_eq!(bead.state.scale, Vec3::splat(0.5));
  }
}

#[test]
fn test_unreadable_image_stops_ticks_but_keeps_grid() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(auto_refresh());
  c.generate(&mut factory, &mut opaque(3, 3)).unwrap();
  let before = factory.snapshot();
  let created = factory.created;

  let err = c
    .generate(&mut factory, &mut opaque(4, 4).with_readable(false))
    .unwrap_err();

  assert!(err.is_unreadable_image());
  assert!(!c.is_running());
  assert_eq!(c.bead_count(), 9);
  assert_eq!(factory.snapshot(), before);
  assert_eq!(factory.created, created);

  // Auto-refresh is suspended until a successful generation
  let applies = factory.applies;
  assert!(c.tick(&mut factory).is_none());
  assert_eq!(factory.applies, applies);

  // Manual refresh still reaches the surviving grid
  assert_eq!(c.refresh_beads(&mut factory).beads_refreshed, 9);

  c.generate(&mut factory, &mut opaque(2, 2)).unwrap();
  assert!(c.is_running());
  assert!(c.tick(&mut factory).is_some());
}

#[test]
fn test_unreadable_first_generation_still_sets_up() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());

  assert!(c
    .generate(&mut factory, &mut opaque(2, 2).with_readable(false))
    .is_err());

  assert_eq!(c.state(), LifecycleState::Ready);
  assert!(!c.is_running());
  assert_eq!(factory.created, 0);
  assert_eq!(factory.containers_created, 1);

  // The next readable image reuses that container
  c.generate(&mut factory, &mut opaque(2, 2)).unwrap();
  assert_eq!(c.state(), LifecycleState::Populated);
  assert_eq!(factory.containers_created, 1);
  assert!(factory.violations.is_empty(), "{:?}", factory.violations);
}

#[test]
fn test_manual_refresh_ignores_auto_refresh_flag() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());
  c.generate(&mut factory, &mut opaque(2, 3)).unwrap();

  c.config_mut().bead_metallicness = 1.0;
  let stats = c.refresh_beads(&mut factory);

  assert_eq!(stats.beads_refreshed, 6);
  assert!(factory.beads.values().all(|b| b.state.surface.metallic == 1.0));
}

#[test]
fn test_manual_refresh_without_grid() {
  let mut factory = RecordingFactory::with_viewpoint();
  let mut c = controller(BeadizerConfig::default());
  c.setup(&mut factory);

  assert_eq!(c.refresh_beads(&mut factory), RefreshStats::default());
  assert!(factory.viewpoint_position.is_none());
}

#[test]
fn test_regenerate_replaces_previous_beads() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());

  c.generate(&mut factory, &mut opaque(3, 3)).unwrap();
  let old: Vec<_> = c.grid().unwrap().iter().map(|b| *b.handle()).collect();
  let once = factory.snapshot();

  c.generate(&mut factory, &mut opaque(3, 3)).unwrap();

  assert_eq!(factory.snapshot(), once);
  for handle in old {
    assert!(!factory.beads.contains_key(&handle));
  }
  assert!(factory.violations.is_empty(), "{:?}", factory.violations);
}

#[test]
fn test_auto_camera_positions_viewpoint() {
  let mut factory = RecordingFactory::with_viewpoint();
  let mut c = controller(BeadizerConfig::default());

  c.generate(&mut factory, &mut opaque(4, 2)).unwrap();

  assert!(c.viewpoint().is_some());
  assert_eq!(factory.viewpoint_position, Some(Vec3::new(2.0, 3.0, 1.0)));
}

#[test]
fn test_camera_left_alone_when_disabled() {
  let mut factory = RecordingFactory::with_viewpoint();
  let mut c = controller(BeadizerConfig {
    auto_position_camera: false,
    ..Default::default()
  });

  c.generate(&mut factory, &mut opaque(10, 10)).unwrap();
  c.refresh_beads(&mut factory);

  assert!(factory.viewpoint_position.is_none());
}

#[test]
fn test_missing_viewpoint_is_tolerated() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());

  c.generate(&mut factory, &mut opaque(10, 10)).unwrap();

  assert!(c.viewpoint().is_none());
  assert!(factory.violations.is_empty());
}

#[test]
fn test_origin_offsets_beads() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default()).with_origin(Vec3::new(5.0, 1.0, 5.0));

  c.generate(&mut factory, &mut red_blue_column()).unwrap();

  let positions: Vec<_> = c.grid().unwrap().iter().map(|b| b.position()).collect();
  assert_eq!(
    positions,
    vec![Vec3::new(5.0, 1.0, 5.0), Vec3::new(5.0, 1.0, 6.0)]
  );
}

#[test]
fn test_template_change_applies_on_next_generation() {
  let mut factory = RecordingFactory::new();
  let mut c = controller(BeadizerConfig::default());
  c.generate(&mut factory, &mut opaque(1, 1)).unwrap();

  c.set_template(BeadTemplate {
    scale: Vec3::new(1.0, 2.0, 1.0),
    ..Default::default()
  });
  c.generate(&mut factory, &mut opaque(1, 1)).unwrap();

  assert_eq!(c.grid().unwrap().beads()[0].scale(), Vec3::new(1.0, 2.0, 1.0));
}
