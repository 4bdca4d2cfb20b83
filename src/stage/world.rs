use crate::animation::clip::ClipPlayer;
use crate::animation::sequence::SequenceHost;
use crate::animation::tween::{Channel, Property, PropertyAccess, Target};
use crate::director::machine::{Cue, Director, Gate};
use crate::foundation::core::DVec3;
use crate::foundation::error::{FolioError, FolioResult};
use crate::interaction::badge::BadgeSpins;
use crate::scene::model::Scene;
use crate::scene::overlay::{Overlay, Platform, Surface};

/// Everything the timeline mutates, in one place so sequences borrow it as a unit.
#[derive(Clone, Debug, Default)]
pub(crate) struct World {
    pub(crate) scene: Scene,
    pub(crate) overlay: Overlay,
    pub(crate) surface: Surface,
    pub(crate) platform: Platform,
    pub(crate) player: ClipPlayer,
    pub(crate) director: Director,
    pub(crate) spins: BadgeSpins,
}

fn vector_slot(v: &mut DVec3, channel: Channel) -> Option<&mut f64> {
    match channel {
        Channel::PositionX | Channel::RotationX => Some(&mut v.x),
        Channel::PositionY | Channel::RotationY => Some(&mut v.y),
        Channel::PositionZ | Channel::RotationZ => Some(&mut v.z),
        Channel::Opacity => None,
    }
}

fn is_rotation(channel: Channel) -> bool {
    matches!(
        channel,
        Channel::RotationX | Channel::RotationY | Channel::RotationZ
    )
}

fn unsupported(prop: Property) -> FolioError {
    FolioError::scene(format!(
        "{:?} has no {:?} channel",
        prop.target, prop.channel
    ))
}

impl World {
    fn slot(&mut self, prop: Property) -> FolioResult<&mut f64> {
        let channel = prop.channel;
        match prop.target {
            Target::Object(id) => {
                let t = &mut self.scene.get_mut(id)?.transform;
                let v = if is_rotation(channel) {
                    &mut t.rotation
                } else {
                    &mut t.position
                };
                vector_slot(v, channel).ok_or_else(|| unsupported(prop))
            }
            Target::Camera => {
                let cam = &mut self.scene.camera;
                let v = if is_rotation(channel) {
                    &mut cam.rotation
                } else {
                    &mut cam.position
                };
                vector_slot(v, channel).ok_or_else(|| unsupported(prop))
            }
            Target::LoadingOverlay | Target::Panel | Target::Canvas
                if channel != Channel::Opacity =>
            {
                Err(unsupported(prop))
            }
            Target::LoadingOverlay => Ok(&mut self.overlay.loading_opacity),
            Target::Panel => Ok(&mut self.overlay.panel_opacity),
            Target::Canvas => Ok(&mut self.surface.canvas_opacity),
        }
    }
}

impl PropertyAccess for World {
    fn read(&self, prop: Property) -> FolioResult<f64> {
        let channel = prop.channel;
        let pick = |v: DVec3| match channel {
            Channel::PositionX | Channel::RotationX => Ok(v.x),
            Channel::PositionY | Channel::RotationY => Ok(v.y),
            Channel::PositionZ | Channel::RotationZ => Ok(v.z),
            Channel::Opacity => Err(unsupported(prop)),
        };
        match prop.target {
            Target::Object(id) => {
                let t = self.scene.get(id)?.transform;
                pick(if is_rotation(channel) { t.rotation } else { t.position })
            }
            Target::Camera => {
                let cam = &self.scene.camera;
                pick(if is_rotation(channel) { cam.rotation } else { cam.position })
            }
            Target::LoadingOverlay | Target::Panel | Target::Canvas
                if channel != Channel::Opacity =>
            {
                Err(unsupported(prop))
            }
            Target::LoadingOverlay => Ok(self.overlay.loading_opacity),
            Target::Panel => Ok(self.overlay.panel_opacity),
            Target::Canvas => Ok(self.surface.canvas_opacity),
        }
    }

    fn write(&mut self, prop: Property, value: f64) -> FolioResult<()> {
        *self.slot(prop)? = value;
        Ok(())
    }
}

impl SequenceHost for World {
    type Cue = Cue;
    type Gate = Gate;

    fn apply_cue(&mut self, cue: &Cue) -> FolioResult<()> {
        tracing::debug!(?cue, "cue");
        match *cue {
            Cue::BeginMixer => self.director.flags_mut().start_mixer(),
            Cue::Play(clip) => self.player.start(clip)?,
            Cue::FadeTo {
                to,
                fade_secs,
                reset_outgoing,
            } => self.player.fade_to(to, fade_secs, reset_outgoing)?,
            Cue::SetAction(clip) => {
                self.player.set_action(clip)?;
            }
            Cue::Standing => self.director.flags_mut().mark_standing(),
            Cue::Walking => self.director.flags_mut().mark_walking(),
            Cue::SkillsShown => self.director.flags_mut().mark_skills_shown(),
            Cue::CreditsShown => self.director.flags_mut().mark_credits_shown(),
            Cue::AvatarSettled => self.director.flags_mut().settle_avatar(),
            Cue::RevealOverlay => self.overlay.reveal(self.platform),
            Cue::Spin(badge, phase) => self.spins.set(badge, phase),
            Cue::ActDone(act) => self.director.complete(act),
        }
        Ok(())
    }

    fn gate_open(&self, gate: &Gate) -> bool {
        match gate {
            Gate::ClipFinished(clip) => self.player.has_finished(*clip),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/world.rs"]
mod tests;
