//! Folio is the headless engine behind an interactive 3D portfolio landing page.
//!
//! A rendering host loads the models, feeds pointer input, and calls [`Stage::tick`] once per
//! displayed frame. Folio owns everything else: which objects sit where, when the avatar runs,
//! waves, and walks, which clip is blending in, and which clicks are allowed to start the next
//! act.
//!
//! # Model
//!
//! 1. **Load**: assets answer through [`Stage::asset_loaded`] and friends; a [`LoadTracker`]
//!    decides when the intro may start.
//! 2. **Sequence**: each act is a [`Sequence`] of tweens, cues, waits, and gates run by a
//!    [`Timeline`] against the stage.
//! 3. **Interact**: [`Picker`] turns pointer positions into hits; [`HoverState`] and the
//!    [`Director`] turn hits into highlights, badge spins, and acts.
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: time only moves when the host ticks, so a [`Script`] replays exactly.
//! - **Headless**: page elements around the canvas are plain state ([`Overlay`], [`Surface`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod assets;
mod director;
mod foundation;
mod interaction;
mod scene;
mod stage;

/// Fixed timings and targets of the cutscene, and the builders for its step lists.
pub mod choreography {
    pub use crate::director::chains::*;
}

pub use animation::clip::{
    ActionState, AnimationClip, CROSS_FADE_SECS, ClipLoop, ClipName, ClipPlayer, MixerEvent,
};
pub use animation::ease::Ease;
pub use animation::sequence::{Sequence, SequenceHost, SequenceId, Step, Timeline};
pub use animation::tween::{ActiveTween, Channel, Property, PropertyAccess, Target, TweenSpec};
pub use assets::load::{AssetKey, AssetState, LoadOutcome, LoadTracker};
pub use director::flags::CutsceneFlags;
pub use director::machine::{Act, Cue, CutsceneSequence, Director, Gate, Phase};
pub use foundation::core::{
    DAffine3, DQuat, DVec2, DVec3, EulerRot, ObjectId, Point, Rgb, Size, Transform3D, Viewport,
};
pub use foundation::error::{FolioError, FolioResult};
pub use foundation::math::{Aabb, Ray};
pub use interaction::badge::{BadgeId, BadgeSpins, SpinPhase};
pub use interaction::hover::{Button, Cursor, HoverState};
pub use scene::layout::{
    AVATAR, AVATAR_BODY, CREDITS_BUTTON, CREDITS_BUTTON_BODY, CREDITS_BUTTON_TEXT, Palette,
    SKILLS_BUTTON, SKILLS_BUTTON_BODY, SKILLS_BUTTON_TEXT, STUDIO, StageLayout, TextPlacement,
    TextStyle,
};
pub use scene::model::{Camera, Material, Scene, SceneObject};
pub use scene::overlay::{Orientation, Overlay, Platform, Surface, apply_orientation};
pub use scene::picking::{Hit, Picker};
pub use stage::script::{DEFAULT_SETTLE_LIMIT_MS, Script, ScriptEvent, run_script};
pub use stage::session::{ObjectSnapshot, Stage, StageSnapshot};
