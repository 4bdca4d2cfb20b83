use crate::animation::clip::ClipName;
use crate::animation::sequence::Sequence;
use crate::director::chains;
use crate::director::flags::CutsceneFlags;
use crate::foundation::error::FolioResult;
use crate::interaction::badge::{BadgeId, SpinPhase};
use crate::scene::layout::{CREDITS_BUTTON_BODY, SKILLS_BUTTON_BODY};
use crate::scene::model::Scene;
use crate::scene::picking::Hit;

/// Where the cutscene is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for assets.
    #[default]
    Idle,
    /// Intro chains running.
    IntroRevealing,
    /// Intro finished; the skills button is clickable.
    IntroDone,
    /// Skills act running.
    SkillsWalk,
    /// Badges and the credits button are on screen.
    SkillsRevealed,
    /// Credits act running.
    CreditsWalk,
    /// Overlay shown. Terminal.
    CreditsRevealed,
}

/// A scripted chain whose completion the director waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Act {
    /// The five text meshes sliding in.
    IntroText,
    /// The avatar run-in, wave, and skills button slide.
    IntroAvatar,
    /// The walk to the skills screen.
    Skills,
    /// The walk to the credits screen.
    Credits,
}

/// Instant effects the cutscene chains ask the stage to apply.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Start advancing the clip player every frame.
    BeginMixer,
    /// Make a clip active and play it without fading.
    Play(ClipName),
    /// Fade from the active clip to `to`.
    FadeTo {
        /// Incoming clip.
        to: ClipName,
        /// Fade length in seconds.
        fade_secs: f64,
        /// Rewind the outgoing clip before fading it out.
        reset_outgoing: bool,
    },
    /// Cross-fade switch, no-op when already active.
    SetAction(ClipName),
    /// Avatar is standing.
    Standing,
    /// Avatar is walking.
    Walking,
    /// Badges are on screen.
    SkillsShown,
    /// Credits are on screen; completes the second screen.
    CreditsShown,
    /// Pin the avatar root from now on.
    AvatarSettled,
    /// Animate the overlay in.
    RevealOverlay,
    /// Move a badge's spin state.
    Spin(BadgeId, SpinPhase),
    /// A chain the director tracks has finished.
    ActDone(Act),
}

/// Conditions a chain can wait on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// The one-shot clip has reported `Finished`.
    ClipFinished(ClipName),
}

/// Sequence type run by the stage timeline.
pub type CutsceneSequence = Sequence<Cue, Gate>;

/// The cutscene state machine: phase, flags, and the guards that start each act.
#[derive(Clone, Debug, Default)]
pub struct Director {
    phase: Phase,
    flags: CutsceneFlags,
    intro_text_done: bool,
    intro_avatar_done: bool,
}

impl Director {
    /// Director in [`Phase::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current flags.
    pub fn flags(&self) -> &CutsceneFlags {
        &self.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut CutsceneFlags {
        &mut self.flags
    }

    fn enter(&mut self, phase: Phase) {
        tracing::info!(from = ?self.phase, to = ?phase, "cutscene phase change");
        self.phase = phase;
    }

    /// Start the intro once assets are ready. Returns `None` unless the director is idle.
    pub fn begin_intro(
        &mut self,
        scene: &Scene,
        texts: &[&str],
    ) -> FolioResult<Option<Vec<CutsceneSequence>>> {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = ?self.phase, "intro already started");
            return Ok(None);
        }
        let sequences = chains::intro(scene, texts)?;
        self.enter(Phase::IntroRevealing);
        Ok(Some(sequences))
    }

    /// Handle a click's pick list. Returns the act to run when a guard passes.
    ///
    /// The busy flag is set before returning, so a second click in the same frame is ignored.
    pub fn on_click(
        &mut self,
        hits: &[Hit],
        scene: &Scene,
        texts: &[&str],
    ) -> FolioResult<Option<CutsceneSequence>> {
        let picked = |name: &str| hits.iter().any(|h| h.name == name);

        if picked(SKILLS_BUTTON_BODY) {
            if let Some(reason) = self.skills_rejection() {
                tracing::debug!(phase = ?self.phase, reason, "skills click ignored");
            } else {
                let chain = chains::skills(scene, texts)?;
                self.flags.begin_walk();
                self.enter(Phase::SkillsWalk);
                return Ok(Some(chain));
            }
        }

        if picked(CREDITS_BUTTON_BODY) {
            if let Some(reason) = self.credits_rejection() {
                tracing::debug!(phase = ?self.phase, reason, "credits click ignored");
            } else {
                let chain = chains::credits(scene)?;
                self.flags.begin_walk();
                self.enter(Phase::CreditsWalk);
                return Ok(Some(chain));
            }
        }

        Ok(None)
    }

    fn skills_rejection(&self) -> Option<&'static str> {
        if self.phase != Phase::IntroDone {
            Some("intro not finished")
        } else if self.flags.walking_animation_started() {
            Some("walk in progress")
        } else if self.flags.first_screen_completed() {
            Some("skills already shown")
        } else {
            None
        }
    }

    fn credits_rejection(&self) -> Option<&'static str> {
        if self.phase != Phase::SkillsRevealed {
            Some("skills not revealed")
        } else if self.flags.walking_animation_started() {
            Some("walk in progress")
        } else if self.flags.credits_visible() || self.flags.second_screen_completed() {
            Some("credits already shown")
        } else {
            None
        }
    }

    /// Record that a tracked chain has finished.
    pub(crate) fn complete(&mut self, act: Act) {
        match act {
            Act::IntroText => self.intro_text_done = true,
            Act::IntroAvatar => self.intro_avatar_done = true,
            Act::Skills => {
                self.flags.end_walk();
                self.flags.complete_first_screen();
                self.enter(Phase::SkillsRevealed);
            }
            Act::Credits => {
                self.flags.end_walk();
                self.enter(Phase::CreditsRevealed);
            }
        }
        if self.phase == Phase::IntroRevealing && self.intro_text_done && self.intro_avatar_done {
            self.enter(Phase::IntroDone);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/machine.rs"]
mod tests;
