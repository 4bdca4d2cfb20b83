//! The scripted step lists of the cutscene.
//!
//! Each function resolves the objects it drives once, then returns plain data for the stage
//! timeline. Timings and targets are the page's fixed choreography.

use std::f64::consts::FRAC_PI_2;

use crate::animation::clip::ClipName;
use crate::animation::ease::Ease;
use crate::animation::sequence::Sequence;
use crate::animation::tween::{Channel, Property, Target, TweenSpec};
use crate::director::machine::{Act, Cue, CutsceneSequence, Gate};
use crate::foundation::core::ObjectId;
use crate::foundation::error::FolioResult;
use crate::interaction::badge::{BadgeId, SpinPhase};
use crate::scene::layout::{AVATAR, AVATAR_BODY, CREDITS_BUTTON, SKILLS_BUTTON};
use crate::scene::model::Scene;

/// Loading overlay fade-out, in milliseconds.
pub const LOADING_FADE_MS: u64 = 1000;
/// Per-text slide-in, in milliseconds.
pub const TEXT_SLIDE_MS: u64 = 500;
/// Avatar run-in, in milliseconds.
pub const RUN_IN_MS: u64 = 2500;
/// Yaw the avatar holds while running in.
pub const RUN_IN_YAW: f64 = 1.57;
/// Height the avatar root is pinned at.
pub const AVATAR_Y: f64 = -0.01;
/// Wave fade in and out, in seconds.
pub const WAVE_FADE_SECS: f64 = 0.5;
/// Where the skills button comes to rest after the intro.
pub const SKILLS_BUTTON_REST: [f64; 3] = [2.9, 0.25, 0.0];
/// Depth the intro texts and the skills button retreat to.
pub const RETREAT_Z: f64 = -0.5;
/// Yaw that faces the avatar along the walk.
pub const FACE_WALK: f64 = FRAC_PI_2;
/// Yaw that turns the avatar back to the camera.
pub const FACE_CAMERA: f64 = -0.005;
/// Turn duration, in milliseconds.
pub const TURN_MS: u64 = 350;
/// Walk duration, in milliseconds.
pub const WALK_MS: u64 = 3500;
/// Camera x after the skills walk.
pub const CAMERA_SKILLS_X: f64 = 6.0;
/// Avatar body x after the skills walk.
pub const BODY_SKILLS_X: f64 = 4.0;
/// Camera x after the credits walk.
pub const CAMERA_CREDITS_X: f64 = 12.0;
/// Avatar body x after the credits walk.
pub const BODY_CREDITS_X: f64 = 10.0;
/// Credits button x on the skills screen.
pub const CREDITS_BUTTON_X: f64 = 8.35;
/// Delay before the overlay panel becomes opaque, in milliseconds.
pub const PANEL_DELAY_MS: u64 = 1000;
/// Yaw of a badge at the end of its first turn.
pub const SPIN_TURN: f64 = 6.28;
/// Yaw a badge returns to.
pub const SPIN_REST: f64 = 0.0001;
/// Each half of a badge spin, in milliseconds.
pub const SPIN_HALF_MS: u64 = 1500;
/// Pause between the two halves, in milliseconds.
pub const SPIN_PAUSE_MS: u64 = 500;

fn prop(id: ObjectId, channel: Channel) -> Property {
    Property::object(id, channel)
}

fn resolve_all(scene: &Scene, names: &[&str]) -> FolioResult<Vec<ObjectId>> {
    names.iter().map(|n| scene.require(n)).collect()
}

/// The three concurrent intro chains: loading fade, text reveal, avatar run-in.
pub fn intro(scene: &Scene, texts: &[&str]) -> FolioResult<Vec<CutsceneSequence>> {
    let text_ids = resolve_all(scene, texts)?;
    let avatar = scene.require(AVATAR)?;
    let button = scene.require(SKILLS_BUTTON)?;

    let loading = Sequence::new("intro.loading").tween(TweenSpec::new(
        Property::opacity(Target::LoadingOverlay),
        0.0,
        LOADING_FADE_MS,
    ));

    let reveal = text_ids
        .iter()
        .fold(Sequence::new("intro.texts"), |seq, id| {
            seq.tween(TweenSpec::new(prop(*id, Channel::PositionZ), 0.0, TEXT_SLIDE_MS).ease(Ease::OutQuart))
        })
        .cue(Cue::ActDone(Act::IntroText));

    let [bx, by, bz] = SKILLS_BUTTON_REST;
    let run_in = Sequence::new("intro.avatar")
        .cue(Cue::BeginMixer)
        .cue(Cue::Play(ClipName::Running))
        .set(prop(avatar, Channel::RotationY), RUN_IN_YAW)
        .set(prop(avatar, Channel::PositionY), AVATAR_Y)
        .tween(TweenSpec::new(prop(avatar, Channel::PositionX), 0.0, RUN_IN_MS))
        .set(prop(avatar, Channel::PositionY), AVATAR_Y)
        .cue(Cue::FadeTo {
            to: ClipName::HandWaving,
            fade_secs: WAVE_FADE_SECS,
            reset_outgoing: false,
        })
        .cue(Cue::Standing)
        .spawn(
            Sequence::new("intro.avatar.turn")
                .tween(TweenSpec::new(prop(avatar, Channel::RotationY), 0.0, 300))
                .cue(Cue::AvatarSettled),
        )
        .until(Gate::ClipFinished(ClipName::HandWaving))
        .cue(Cue::FadeTo {
            to: ClipName::Standing,
            fade_secs: WAVE_FADE_SECS,
            reset_outgoing: true,
        })
        .cue(Cue::Standing)
        .together(vec![
            TweenSpec::new(prop(button, Channel::PositionX), bx, 1000).ease(Ease::OutQuint),
            TweenSpec::new(prop(button, Channel::PositionY), by, 1000).ease(Ease::OutQuint),
            TweenSpec::new(prop(button, Channel::PositionZ), bz, 1000).ease(Ease::OutQuint),
        ])
        .cue(Cue::ActDone(Act::IntroAvatar));

    Ok(vec![loading, reveal, run_in])
}

fn walk(seq: CutsceneSequence, body: ObjectId, camera_x: f64, body_x: f64) -> CutsceneSequence {
    seq.cue(Cue::Walking)
        .cue(Cue::SetAction(ClipName::Walking))
        .tween(TweenSpec::new(prop(body, Channel::RotationY), FACE_WALK, TURN_MS))
        .together(vec![
            TweenSpec::new(Property::camera(Channel::PositionX), camera_x, WALK_MS),
            TweenSpec::new(prop(body, Channel::PositionX), body_x, WALK_MS),
        ])
        .cue(Cue::SetAction(ClipName::Standing))
        .tween(TweenSpec::new(prop(body, Channel::RotationY), FACE_CAMERA, TURN_MS))
        .cue(Cue::Standing)
}

/// The skills act, strictly sequential.
pub fn skills(scene: &Scene, texts: &[&str]) -> FolioResult<CutsceneSequence> {
    let text_ids = resolve_all(scene, texts)?;
    let body = scene.require(AVATAR_BODY)?;
    let skills_button = scene.require(SKILLS_BUTTON)?;
    let credits_button = scene.require(CREDITS_BUTTON)?;
    let badges = BadgeId::ALL
        .into_iter()
        .map(|b| Ok((b, scene.require(b.name())?)))
        .collect::<FolioResult<Vec<_>>>()?;

    let last = text_ids.len().saturating_sub(1);
    let mut seq = Sequence::new("skills");
    for (i, id) in text_ids.iter().enumerate() {
        let ease = if i == last { Ease::Linear } else { Ease::OutCubic };
        seq = seq.tween(TweenSpec::new(prop(*id, Channel::PositionZ), RETREAT_Z, 300).ease(ease));
    }
    seq = seq.tween(TweenSpec::new(
        prop(skills_button, Channel::PositionZ),
        RETREAT_Z,
        300,
    ));
    seq = walk(seq, body, CAMERA_SKILLS_X, BODY_SKILLS_X).cue(Cue::SkillsShown);
    for (badge, id) in badges {
        seq = seq.tween(
            TweenSpec::new(prop(id, Channel::PositionX), badge.slide_target_x(), 350)
                .ease(Ease::OutQuint),
        );
    }
    Ok(seq
        .tween(
            TweenSpec::new(prop(credits_button, Channel::PositionX), CREDITS_BUTTON_X, 250)
                .ease(Ease::OutQuint),
        )
        .cue(Cue::ActDone(Act::Skills)))
}

/// The credits act.
pub fn credits(scene: &Scene) -> FolioResult<CutsceneSequence> {
    let body = scene.require(AVATAR_BODY)?;
    Ok(walk(
        Sequence::new("credits"),
        body,
        CAMERA_CREDITS_X,
        BODY_CREDITS_X,
    )
    .cue(Cue::CreditsShown)
    .cue(Cue::RevealOverlay)
    .wait_ms(PANEL_DELAY_MS)
    .set(Property::opacity(Target::Panel), 1.0)
    .cue(Cue::ActDone(Act::Credits)))
}

/// One hover spin of `badge`. The caller has already moved it out of [`SpinPhase::Idle`].
pub fn badge_spin(scene: &Scene, badge: BadgeId) -> FolioResult<CutsceneSequence> {
    let id = scene.require(badge.name())?;
    let yaw = prop(id, Channel::RotationY);
    Ok(Sequence::new(format!("spin.{}", badge.name()))
        .tween(TweenSpec::new(yaw, SPIN_TURN, SPIN_HALF_MS))
        .cue(Cue::Spin(badge, SpinPhase::Pausing))
        .wait_ms(SPIN_PAUSE_MS)
        .cue(Cue::Spin(badge, SpinPhase::Returning))
        .tween(TweenSpec::new(yaw, SPIN_REST, SPIN_HALF_MS))
        .cue(Cue::Spin(badge, SpinPhase::Idle)))
}

/// Desktop canvas fade-in on page load.
pub fn page_fade_in() -> CutsceneSequence {
    Sequence::new("page.fade_in").tween(TweenSpec::new(Property::opacity(Target::Canvas), 1.0, 1000))
}

#[cfg(test)]
#[path = "../../tests/unit/director/chains.rs"]
mod tests;
