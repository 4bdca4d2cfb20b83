use super::*;
use crate::scene::layout::SKILLS_BUTTON;

const FRAME: Duration = Duration::from_millis(16);

fn loaded_stage() -> Stage {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.load_all(&[]).unwrap();
    stage
}

#[test]
fn intro_waits_for_every_required_asset() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    assert_eq!(stage.phase(), Phase::Idle);
    assert_eq!(stage.load_progress(), 0.0);

    stage.asset_loaded(AssetKey::Avatar).unwrap();
    stage.asset_loaded(AssetKey::Typeface).unwrap();
    assert_eq!(stage.phase(), Phase::Idle);
    assert!(stage.load_progress() > 0.0);
    assert!(stage.is_idle());

    stage.load_all(&[]).unwrap();
    assert_eq!(stage.phase(), Phase::IntroRevealing);
    assert_eq!(stage.load_progress(), 100.0);
    assert_eq!(stage.load_outcome(), LoadOutcome::Ready);
    assert_eq!(
        stage.running(),
        vec!["intro.loading", "intro.texts", "intro.avatar"]
    );
}

#[test]
fn intro_settles_into_standing_pose() {
    let mut stage = loaded_stage();
    let spent = stage.settle(FRAME, Duration::from_secs(30)).unwrap();
    assert!(spent < Duration::from_secs(30));

    assert_eq!(stage.phase(), Phase::IntroDone);
    assert_eq!(stage.player().active(), Some(ClipName::Standing));
    assert!(stage.flags().avatar_settled());
    assert!(stage.flags().mixer_running());
    assert_eq!(stage.overlay().loading_opacity, 0.0);

    for name in stage.layout().text_names() {
        assert_eq!(stage.position(name).unwrap().z, 0.0);
    }
    let button = stage.position(SKILLS_BUTTON).unwrap();
    assert_eq!(button, DVec3::new(2.9, 0.25, 0.0));
    assert_eq!(
        stage.position(AVATAR).unwrap(),
        DVec3::new(0.0, AVATAR_Y, 0.0)
    );
}

#[test]
fn required_failure_keeps_stage_idle() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.asset_failed(AssetKey::Avatar, "404").unwrap();
    stage.load_all(&[]).unwrap();

    assert_eq!(stage.phase(), Phase::Idle);
    assert!(stage.is_idle());
    assert_eq!(
        stage.load_failures(),
        vec![(AssetKey::Avatar, "404".to_owned())]
    );
    stage.run_for(Duration::from_secs(2), FRAME).unwrap();
    assert_eq!(stage.phase(), Phase::Idle);
}

#[test]
fn retried_asset_starts_intro() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.asset_failed(AssetKey::Typeface, "network").unwrap();
    stage.load_all(&[]).unwrap();
    assert_eq!(stage.phase(), Phase::Idle);
    assert_eq!(stage.load_failures().len(), 1);

    stage.asset_loaded(AssetKey::Typeface).unwrap();
    assert!(stage.load_failures().is_empty());
    assert_eq!(stage.load_outcome(), LoadOutcome::Ready);
    assert_eq!(stage.phase(), Phase::IntroRevealing);
    assert!(stage.scene().find("akif").is_some());
}

#[test]
fn duplicate_delivery_is_rejected_without_side_effects() {
    let mut stage = loaded_stage();
    stage.settle(FRAME, Duration::from_secs(30)).unwrap();
    let before = stage.player().state(ClipName::Standing).unwrap();
    assert_eq!(stage.player().steady_clips(), vec![ClipName::Standing]);

    assert!(matches!(
        stage.asset_loaded(AssetKey::Clip(ClipName::Standing)),
        Err(FolioError::Asset(_))
    ));
    assert!(matches!(
        stage.clip_loaded(ClipName::Standing, &[AnimationClip::new("Standing", 2.0)]),
        Err(FolioError::Asset(_))
    ));
    assert!(matches!(
        stage.asset_loaded(AssetKey::Typeface),
        Err(FolioError::Asset(_))
    ));
    assert_eq!(stage.player().state(ClipName::Standing).unwrap(), before);
    assert_eq!(stage.player().steady_clips(), vec![ClipName::Standing]);
    assert_eq!(stage.phase(), Phase::IntroDone);
}

#[test]
fn optional_backdrop_failure_still_starts_intro() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.asset_failed(AssetKey::StudioBackground, "timeout").unwrap();
    stage.load_all(&[]).unwrap();
    assert_eq!(stage.phase(), Phase::IntroRevealing);
    assert!(stage.scene().find(crate::scene::layout::STUDIO).is_none());
}

#[test]
fn clip_file_without_track_is_a_failure() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage
        .clip_loaded(ClipName::Running, &[AnimationClip::new("mixamo.com", 1.0)])
        .unwrap();
    assert!(!stage.player().has_clip(ClipName::Running));
    assert_eq!(stage.load_failures().len(), 1);

    stage
        .clip_loaded(ClipName::Walking, &[AnimationClip::new("Walking", 1.25)])
        .unwrap();
    assert!(stage.player().has_clip(ClipName::Walking));
}

#[test]
fn clicks_before_intro_finish_are_ignored() {
    let mut stage = loaded_stage();
    stage.run_for(Duration::from_millis(100), FRAME).unwrap();
    assert!(!stage.click_object(SKILLS_BUTTON).unwrap_or(false));
    assert_eq!(stage.phase(), Phase::IntroRevealing);
}

#[test]
fn run_for_and_settle_reject_zero_frames() {
    let mut stage = loaded_stage();
    assert!(stage.run_for(Duration::from_secs(1), Duration::ZERO).is_err());
    assert!(stage.settle(Duration::ZERO, Duration::from_secs(1)).is_err());
}

#[test]
fn run_for_counts_frames_and_time() {
    let mut stage = loaded_stage();
    stage
        .run_for(Duration::from_millis(50), Duration::from_millis(20))
        .unwrap();
    let snap = stage.snapshot();
    assert_eq!(snap.frames, 3);
    assert_eq!(snap.time_ms, 50);
    assert_eq!(stage.now(), Duration::from_millis(50));
}

#[test]
fn resize_updates_camera_aspect() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.resize(800.0, 400.0).unwrap();
    assert_eq!(stage.camera().aspect, 2.0);
    assert_eq!(stage.viewport().width, 800.0);
    assert!(stage.resize(0.0, 400.0).is_err());
}

#[test]
fn desktop_page_load_fades_canvas() {
    let mut stage = Stage::new(StageLayout::default()).unwrap();
    stage.page_loaded();
    assert_eq!(stage.surface().canvas_opacity, 0.0);
    stage.settle(FRAME, Duration::from_secs(5)).unwrap();
    assert_eq!(stage.surface().canvas_opacity, 1.0);

    stage.orientation_changed(Orientation::Portrait);
    assert_eq!(stage.surface().canvas_opacity, 1.0);
    assert_eq!(stage.platform(), Platform::Desktop);
}

#[test]
fn mobile_page_tracks_orientation() {
    let layout = StageLayout {
        platform: Platform::Mobile {
            orientation: Orientation::Portrait,
        },
        ..StageLayout::default()
    };
    let mut stage = Stage::new(layout).unwrap();
    stage.page_loaded();
    assert_eq!(stage.surface().prompt_opacity, 1.0);
    assert!(!stage.surface().prompt_hidden);
    assert_eq!(stage.surface().canvas_opacity, 0.0);
    assert!(stage.is_idle());

    stage.orientation_changed(Orientation::Landscape);
    assert!(stage.surface().prompt_hidden);
    assert_eq!(stage.surface().canvas_opacity, 1.0);
    assert_eq!(
        stage.platform(),
        Platform::Mobile {
            orientation: Orientation::Landscape
        }
    );
    assert!(!stage.overlay().has_class("landscape"));
}

#[test]
fn snapshot_lists_every_object() {
    let stage = loaded_stage();
    let snap = stage.snapshot();
    assert_eq!(snap.objects.len(), stage.scene().len());
    assert_eq!(snap.phase, Phase::IntroRevealing);
    assert_eq!(snap.load_progress, 100.0);
    assert!(snap.objects.contains_key(AVATAR));
    assert_eq!(snap.running.len(), 3);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["phase"], "intro_revealing");
}
