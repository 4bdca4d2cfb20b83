/// Cutscene progress flags.
///
/// `first_screen_completed` and `second_screen_completed` only ever go from false to true.
/// `walking_animation_started` is the busy flag: set synchronously when an act is accepted and
/// cleared by that act's last step, so at most one walking act is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CutsceneFlags {
    first_screen_completed: bool,
    second_screen_completed: bool,
    walking_animation_started: bool,
    is_standing: bool,
    is_walking: bool,
    skills_visible: bool,
    credits_visible: bool,
    mixer_running: bool,
    avatar_settled: bool,
}

impl CutsceneFlags {
    /// The skills act has finished.
    pub fn first_screen_completed(&self) -> bool {
        self.first_screen_completed
    }

    /// The credits act has finished.
    pub fn second_screen_completed(&self) -> bool {
        self.second_screen_completed
    }

    /// A walking act is in progress.
    pub fn walking_animation_started(&self) -> bool {
        self.walking_animation_started
    }

    /// The avatar is in its standing pose.
    pub fn is_standing(&self) -> bool {
        self.is_standing
    }

    /// The avatar is walking.
    pub fn is_walking(&self) -> bool {
        self.is_walking
    }

    /// The badges have been revealed.
    pub fn skills_visible(&self) -> bool {
        self.skills_visible
    }

    /// The credits overlay has been revealed.
    pub fn credits_visible(&self) -> bool {
        self.credits_visible
    }

    /// The clip player advances on every frame.
    pub fn mixer_running(&self) -> bool {
        self.mixer_running
    }

    /// The avatar root is pinned in place every frame.
    pub fn avatar_settled(&self) -> bool {
        self.avatar_settled
    }

    pub(crate) fn begin_walk(&mut self) {
        self.walking_animation_started = true;
    }

    pub(crate) fn end_walk(&mut self) {
        self.walking_animation_started = false;
    }

    pub(crate) fn mark_walking(&mut self) {
        self.is_walking = true;
        self.is_standing = false;
    }

    pub(crate) fn mark_standing(&mut self) {
        self.is_standing = true;
        self.is_walking = false;
    }

    pub(crate) fn mark_skills_shown(&mut self) {
        self.skills_visible = true;
    }

    pub(crate) fn mark_credits_shown(&mut self) {
        self.credits_visible = true;
        self.second_screen_completed = true;
    }

    pub(crate) fn complete_first_screen(&mut self) {
        self.first_screen_completed = true;
    }

    pub(crate) fn start_mixer(&mut self) {
        self.mixer_running = true;
    }

    pub(crate) fn settle_avatar(&mut self) {
        self.avatar_settled = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/flags.rs"]
mod tests;
