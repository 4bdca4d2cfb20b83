use super::*;
use crate::animation::clip::ClipName;
use crate::foundation::core::Transform3D;
use crate::interaction::badge::{BadgeId, SpinPhase};
use crate::scene::model::SceneObject;

fn world_with_object() -> (World, Property) {
    let mut world = World::default();
    let id = world
        .scene
        .spawn(
            SceneObject::new("box").with_transform(Transform3D::at(DVec3::new(1.0, 2.0, 3.0))),
            None,
        )
        .unwrap();
    (world, Property::object(id, Channel::PositionZ))
}

#[test]
fn object_channels_read_and_write() {
    let (mut world, z) = world_with_object();
    assert_eq!(world.read(z).unwrap(), 3.0);
    world.write(z, -0.5).unwrap();
    assert_eq!(world.read(z).unwrap(), -0.5);

    let yaw = Property { channel: Channel::RotationY, ..z };
    world.write(yaw, 1.57).unwrap();
    assert_eq!(world.read(yaw).unwrap(), 1.57);
    assert_eq!(world.read(z).unwrap(), -0.5);
}

#[test]
fn camera_and_page_targets() {
    let mut world = World::default();
    let cam_x = Property::camera(Channel::PositionX);
    assert_eq!(world.read(cam_x).unwrap(), 1.3);
    world.write(cam_x, 6.0).unwrap();
    assert_eq!(world.scene.camera.position.x, 6.0);

    assert_eq!(world.read(Property::opacity(Target::LoadingOverlay)).unwrap(), 1.0);
    world.write(Property::opacity(Target::Panel), 1.0).unwrap();
    assert_eq!(world.overlay.panel_opacity, 1.0);
}

#[test]
fn mismatched_channels_are_scene_errors() {
    let (mut world, z) = world_with_object();
    let opacity = Property { channel: Channel::Opacity, ..z };
    assert!(matches!(world.read(opacity), Err(FolioError::Scene(_))));
    assert!(world.write(Property::opacity(Target::Camera), 0.0).is_err());
    let bad = Property {
        target: Target::Canvas,
        channel: Channel::PositionX,
    };
    assert!(world.read(bad).is_err());
}

#[test]
fn cues_update_flags_player_and_spins() {
    let mut world = World::default();
    world
        .player
        .register(ClipName::Walking, ClipName::Walking.reference_clip())
        .unwrap();

    world.apply_cue(&Cue::BeginMixer).unwrap();
    world.apply_cue(&Cue::Walking).unwrap();
    world.apply_cue(&Cue::SetAction(ClipName::Walking)).unwrap();
    world
        .apply_cue(&Cue::Spin(BadgeId::Css3, SpinPhase::Pausing))
        .unwrap();
    world.apply_cue(&Cue::RevealOverlay).unwrap();

    assert!(world.director.flags().mixer_running());
    assert!(world.director.flags().is_walking());
    assert_eq!(world.player.active(), Some(ClipName::Walking));
    assert_eq!(world.spins.phase(BadgeId::Css3), SpinPhase::Pausing);
    assert!(world.overlay.has_class("animated"));

    assert!(world.apply_cue(&Cue::Play(ClipName::Running)).is_err());
}

#[test]
fn clip_gate_follows_player() {
    let mut world = World::default();
    world
        .player
        .register(ClipName::HandWaving, ClipName::HandWaving.reference_clip())
        .unwrap();
    let gate = Gate::ClipFinished(ClipName::HandWaving);
    world.player.start(ClipName::HandWaving).unwrap();
    assert!(!world.gate_open(&gate));
    world.player.update(10.0);
    assert!(world.gate_open(&gate));
}
