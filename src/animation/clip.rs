use std::collections::BTreeMap;

use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::lerp;

/// Fade used by [`ClipPlayer::set_action`], in seconds.
pub const CROSS_FADE_SECS: f64 = 0.2;

/// The avatar's skeletal clips.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClipName {
    /// Run-in at the start of the intro.
    Running,
    /// One-shot greeting.
    HandWaving,
    /// Walk cycle used between screens.
    Walking,
    /// Idle loop.
    Standing,
}

impl ClipName {
    /// Every clip, in load order.
    pub const ALL: [ClipName; 4] = [
        ClipName::Running,
        ClipName::HandWaving,
        ClipName::Walking,
        ClipName::Standing,
    ];

    /// Name of the track inside the animation file.
    pub fn source_name(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::HandWaving => "HandWaving",
            Self::Walking => "Walking",
            Self::Standing => "Standing",
        }
    }

    /// Inverse of [`ClipName::source_name`].
    pub fn from_source_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.source_name() == name)
    }

    /// Loop mode the avatar uses for this clip. Only the wave plays once.
    pub fn default_loop(self) -> ClipLoop {
        match self {
            Self::HandWaving => ClipLoop::Once,
            _ => ClipLoop::Repeat,
        }
    }

    /// Stand-in length, in seconds, for replays that carry no animation files.
    pub fn reference_duration(self) -> f64 {
        match self {
            Self::Running => 0.7,
            Self::HandWaving => 2.4,
            Self::Walking => 1.1,
            Self::Standing => 4.0,
        }
    }

    /// Stand-in clip built from [`ClipName::reference_duration`] and
    /// [`ClipName::default_loop`].
    pub fn reference_clip(self) -> AnimationClip {
        AnimationClip {
            name: self.source_name().to_owned(),
            duration: self.reference_duration(),
            looping: self.default_loop(),
        }
    }
}

/// How a clip behaves at its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipLoop {
    /// Wrap to the start.
    Repeat,
    /// Stop, disable, and report [`MixerEvent::Finished`].
    Once,
}

/// Decoded clip metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationClip {
    /// Track name as authored.
    pub name: String,
    /// Length in seconds (> 0).
    pub duration: f64,
    /// Loop mode.
    #[serde(default = "default_clip_loop")]
    pub looping: ClipLoop,
}

fn default_clip_loop() -> ClipLoop {
    ClipLoop::Repeat
}

impl AnimationClip {
    /// Clip named `name` with the given duration, repeating.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            looping: ClipLoop::Repeat,
        }
    }

    /// Find a track by name in one animation file.
    pub fn find_by_name<'a>(clips: &'a [AnimationClip], name: &str) -> Option<&'a AnimationClip> {
        clips.iter().find(|c| c.name == name)
    }

    fn validate(&self) -> FolioResult<()> {
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            return Err(FolioError::animation(format!(
                "clip '{}' must have a finite duration > 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Notifications produced by [`ClipPlayer::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MixerEvent {
    /// A one-shot clip reached its end.
    Finished(ClipName),
    /// A repeating clip wrapped around.
    Looped(ClipName),
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

#[derive(Clone, Debug)]
struct Action {
    clip: AnimationClip,
    time: f64,
    weight: f64,
    enabled: bool,
    running: bool,
    finished: bool,
    fade: Option<Fade>,
}

impl Action {
    fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            weight: 1.0,
            enabled: true,
            running: false,
            finished: false,
            fade: None,
        }
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.enabled = true;
        self.finished = false;
        self.fade = None;
        self.weight = 1.0;
    }

    fn schedule_fade(&mut self, now: f64, duration: f64, from: f64, to: f64) {
        self.weight = from;
        self.fade = Some(Fade {
            from,
            to,
            start: now,
            duration,
        });
    }

    fn update_weight(&mut self, now: f64) {
        let Some(fade) = self.fade else {
            return;
        };
        let t = if fade.duration <= 0.0 {
            1.0
        } else {
            ((now - fade.start) / fade.duration).clamp(0.0, 1.0)
        };
        self.weight = lerp(fade.from, fade.to, t);
        if t >= 1.0 {
            self.fade = None;
            if self.weight == 0.0 {
                self.enabled = false;
            }
        }
    }

    fn update_time(&mut self, name: ClipName, dt: f64, events: &mut Vec<MixerEvent>) {
        let duration = self.clip.duration;
        self.time += dt;
        match self.clip.looping {
            ClipLoop::Repeat => {
                if self.time >= duration {
                    self.time %= duration;
                    events.push(MixerEvent::Looped(name));
                }
            }
            ClipLoop::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.enabled = false;
                    self.finished = true;
                    events.push(MixerEvent::Finished(name));
                }
            }
        }
    }
}

/// Per-clip playback state exposed for inspection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActionState {
    /// Local clip time in seconds.
    pub time: f64,
    /// Blend weight in `[0, 1]`.
    pub weight: f64,
    /// Whether the action still contributes.
    pub enabled: bool,
    /// Whether `play` has been called.
    pub running: bool,
    /// Whether a weight fade is in progress.
    pub fading: bool,
}

/// Mixer over the avatar's clips: one action per clip, weights blended by fades.
#[derive(Clone, Debug, Default)]
pub struct ClipPlayer {
    actions: BTreeMap<ClipName, Action>,
    active: Option<ClipName>,
    last: Option<ClipName>,
    time: f64,
    cross_fades: u64,
}

impl ClipPlayer {
    /// Player with no clips.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the clip played for `name`.
    pub fn register(&mut self, name: ClipName, clip: AnimationClip) -> FolioResult<()> {
        clip.validate()?;
        self.actions.insert(name, Action::new(clip));
        Ok(())
    }

    /// Whether `name` has been registered.
    pub fn has_clip(&self, name: ClipName) -> bool {
        self.actions.contains_key(&name)
    }

    /// Currently active clip.
    pub fn active(&self) -> Option<ClipName> {
        self.active
    }

    /// Clip that was active before the last switch.
    pub fn last(&self) -> Option<ClipName> {
        self.last
    }

    /// Number of switches performed so far.
    pub fn cross_fade_count(&self) -> u64 {
        self.cross_fades
    }

    /// Mixer time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    fn action_mut(&mut self, name: ClipName) -> FolioResult<&mut Action> {
        self.actions
            .get_mut(&name)
            .ok_or_else(|| FolioError::animation(format!("clip {name:?} is not loaded")))
    }

    /// Inspect one action.
    pub fn state(&self, name: ClipName) -> Option<ActionState> {
        self.actions.get(&name).map(|a| ActionState {
            time: a.time,
            weight: a.weight,
            enabled: a.enabled,
            running: a.running,
            fading: a.fade.is_some(),
        })
    }

    /// Rewind `name`, re-enable it, and cancel any fade.
    pub fn reset(&mut self, name: ClipName) -> FolioResult<()> {
        self.action_mut(name)?.reset();
        Ok(())
    }

    /// Start advancing `name` on [`ClipPlayer::update`].
    pub fn play(&mut self, name: ClipName) -> FolioResult<()> {
        self.action_mut(name)?.running = true;
        Ok(())
    }

    /// Ramp `name`'s weight 0 → 1 over `secs`.
    pub fn fade_in(&mut self, name: ClipName, secs: f64) -> FolioResult<()> {
        let now = self.time;
        self.action_mut(name)?.schedule_fade(now, secs, 0.0, 1.0);
        Ok(())
    }

    /// Ramp `name`'s weight 1 → 0 over `secs`; the action disables when it reaches zero.
    pub fn fade_out(&mut self, name: ClipName, secs: f64) -> FolioResult<()> {
        let now = self.time;
        self.action_mut(name)?.schedule_fade(now, secs, 1.0, 0.0);
        Ok(())
    }

    /// Make `name` active and play it at full weight, without fading.
    pub fn start(&mut self, name: ClipName) -> FolioResult<()> {
        self.play(name)?;
        self.active = Some(name);
        self.last = Some(name);
        Ok(())
    }

    /// Fade the active clip out and `next` in over `secs`, then play `next`.
    ///
    /// With `reset_outgoing` the outgoing action is rewound before fading out. The incoming
    /// action is not rewound.
    pub fn fade_to(&mut self, next: ClipName, secs: f64, reset_outgoing: bool) -> FolioResult<()> {
        if !self.has_clip(next) {
            return Err(FolioError::animation(format!("clip {next:?} is not loaded")));
        }
        if let Some(current) = self.active {
            if reset_outgoing {
                self.reset(current)?;
            }
            self.fade_out(current, secs)?;
        }
        self.last = self.active;
        self.active = Some(next);
        self.fade_in(next, secs)?;
        self.play(next)?;
        self.cross_fades += 1;
        Ok(())
    }

    /// Switch to `next` with a [`CROSS_FADE_SECS`] cross-fade.
    ///
    /// Returns `false` (and does nothing) when `next` is already active.
    pub fn set_action(&mut self, next: ClipName) -> FolioResult<bool> {
        if self.active == Some(next) {
            return Ok(false);
        }
        if !self.has_clip(next) {
            return Err(FolioError::animation(format!("clip {next:?} is not loaded")));
        }
        self.last = self.active;
        self.active = Some(next);
        if let Some(last) = self.last {
            self.fade_out(last, CROSS_FADE_SECS)?;
        }
        self.reset(next)?;
        self.fade_in(next, CROSS_FADE_SECS)?;
        self.play(next)?;
        self.cross_fades += 1;
        tracing::debug!(from = ?self.last, to = ?next, "clip cross-fade");
        Ok(true)
    }

    /// Whether `name` is a one-shot that has reached its end since its last reset.
    pub fn has_finished(&self, name: ClipName) -> bool {
        self.actions.get(&name).is_some_and(|a| a.finished)
    }

    /// Running, enabled clips at full weight with no fade in progress.
    pub fn steady_clips(&self) -> Vec<ClipName> {
        self.actions
            .iter()
            .filter(|(_, a)| a.running && a.enabled && a.fade.is_none() && a.weight > 0.0)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Advance mixer time by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> Vec<MixerEvent> {
        self.time += dt;
        let now = self.time;
        let mut events = Vec::new();
        for (name, action) in self.actions.iter_mut() {
            if !action.running || !action.enabled {
                continue;
            }
            action.update_weight(now);
            action.update_time(*name, dt, &mut events);
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clip.rs"]
mod tests;
