use crate::foundation::core::DVec3;

/// The seven technology badges of the skills screen.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    /// HTML5 logo.
    Html5,
    /// CSS3 logo.
    Css3,
    /// JavaScript logo.
    Javascript,
    /// React logo.
    React,
    /// TypeScript logo.
    Typescript,
    /// Node.js logo.
    Nodejs,
    /// three.js logo.
    Threejs,
}

const TOP_ROW_Y: f64 = 1.66;
const BOTTOM_ROW_Y: f64 = 0.58;
const OFFSTAGE_X: f64 = 25.0;
const DEPTH_Z: f64 = -0.21;

impl BadgeId {
    /// Every badge in slide-in order.
    pub const ALL: [BadgeId; 7] = [
        BadgeId::Html5,
        BadgeId::Css3,
        BadgeId::Javascript,
        BadgeId::React,
        BadgeId::Typescript,
        BadgeId::Nodejs,
        BadgeId::Threejs,
    ];

    /// Scene object name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Html5 => "html5",
            Self::Css3 => "css3",
            Self::Javascript => "javascript",
            Self::React => "react",
            Self::Typescript => "typescript",
            Self::Nodejs => "nodejs",
            Self::Threejs => "threejs",
        }
    }

    /// Inverse of [`BadgeId::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Dense index into per-badge arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Where the badge waits before the skills screen.
    pub fn start_position(self) -> DVec3 {
        let y = match self {
            Self::Html5 | Self::Css3 | Self::Javascript | Self::React => TOP_ROW_Y,
            Self::Typescript | Self::Nodejs | Self::Threejs => BOTTOM_ROW_Y,
        };
        DVec3::new(OFFSTAGE_X, y, DEPTH_Z)
    }

    /// X the badge slides to on the skills screen.
    pub fn slide_target_x(self) -> f64 {
        match self {
            Self::Html5 => 4.96,
            Self::Css3 => 5.94,
            Self::Javascript => 6.99,
            Self::React => 8.16,
            Self::Typescript => 4.96,
            Self::Nodejs => 5.97,
            Self::Threejs => 6.99,
        }
    }
}

/// Where a badge is in its hover spin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    /// At rest; a hover starts a spin.
    #[default]
    Idle,
    /// First full turn.
    Turning,
    /// Holding between the two halves.
    Pausing,
    /// Turning back to rest.
    Returning,
}

/// Spin state of every badge.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BadgeSpins {
    phases: [SpinPhase; 7],
    started: [u32; 7],
}

impl BadgeSpins {
    /// Current phase of `badge`.
    pub fn phase(&self, badge: BadgeId) -> SpinPhase {
        self.phases[badge.index()]
    }

    /// Move `badge` to `phase`.
    pub fn set(&mut self, badge: BadgeId, phase: SpinPhase) {
        self.phases[badge.index()] = phase;
    }

    /// Claim `badge` for a new spin. Returns `false` while a previous spin is unfinished.
    pub fn try_begin(&mut self, badge: BadgeId) -> bool {
        let i = badge.index();
        if self.phases[i] != SpinPhase::Idle {
            return false;
        }
        self.phases[i] = SpinPhase::Turning;
        self.started[i] += 1;
        true
    }

    /// Number of spins `badge` has started this session.
    pub fn spin_count(&self, badge: BadgeId) -> u32 {
        self.started[badge.index()]
    }

    /// Badges that are mid-spin.
    pub fn spinning(&self) -> Vec<BadgeId> {
        BadgeId::ALL
            .into_iter()
            .filter(|b| self.phase(*b) != SpinPhase::Idle)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/badge.rs"]
mod tests;
