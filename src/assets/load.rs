use std::collections::BTreeMap;

use crate::animation::clip::ClipName;
use crate::foundation::error::{FolioError, FolioResult};
use crate::interaction::badge::BadgeId;

/// Everything the page loads before the intro can start.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    /// Font used by the five text meshes.
    Typeface,
    /// Backdrop model.
    StudioBackground,
    /// Skills button model.
    SkillsButton,
    /// Credits button model.
    CreditsButton,
    /// Avatar skeleton and mesh.
    Avatar,
    /// One of the avatar's animation files.
    Clip(ClipName),
    /// One badge model.
    Badge(BadgeId),
}

impl AssetKey {
    /// The full manifest, in request order.
    pub fn manifest() -> Vec<AssetKey> {
        let mut keys = vec![
            AssetKey::Typeface,
            AssetKey::StudioBackground,
            AssetKey::SkillsButton,
            AssetKey::CreditsButton,
            AssetKey::Avatar,
        ];
        keys.extend(ClipName::ALL.into_iter().map(AssetKey::Clip));
        keys.extend(BadgeId::ALL.into_iter().map(AssetKey::Badge));
        keys
    }

    /// Whether a failure of this asset blocks the intro.
    pub fn is_required(self) -> bool {
        !matches!(self, AssetKey::StudioBackground)
    }
}

/// Load state of a single asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    /// Requested, no answer yet.
    Pending,
    /// Delivered.
    Loaded,
    /// The loader reported an error.
    Failed(String),
}

/// Aggregate result once every asset has answered.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Some assets are still outstanding.
    Pending,
    /// Every required asset loaded.
    Ready,
    /// Required assets failed, with the loader's reasons.
    Failed(Vec<(AssetKey, String)>),
}

/// Load-manager aggregate: tracks progress and signals readiness once.
#[derive(Clone, Debug)]
pub struct LoadTracker {
    assets: BTreeMap<AssetKey, AssetState>,
    completion_taken: bool,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self::with_keys(AssetKey::manifest())
    }
}

impl LoadTracker {
    /// Tracker expecting the full manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker expecting exactly `keys`.
    pub fn with_keys(keys: impl IntoIterator<Item = AssetKey>) -> Self {
        Self {
            assets: keys.into_iter().map(|k| (k, AssetState::Pending)).collect(),
            completion_taken: false,
        }
    }

    /// Add `key` to the expected set.
    pub fn expect(&mut self, key: AssetKey) {
        self.assets.entry(key).or_insert(AssetState::Pending);
    }

    /// Error unless `key` is expected and not loaded yet. Failed keys may be retried.
    pub fn check_open(&self, key: AssetKey) -> FolioResult<()> {
        match self.assets.get(&key) {
            None => Err(FolioError::asset(format!("asset {key:?} was never requested"))),
            Some(AssetState::Loaded) => {
                Err(FolioError::asset(format!("asset {key:?} is already loaded")))
            }
            Some(_) => Ok(()),
        }
    }

    fn slot(&mut self, key: AssetKey) -> FolioResult<&mut AssetState> {
        self.check_open(key)?;
        self.assets
            .get_mut(&key)
            .ok_or_else(|| FolioError::asset(format!("asset {key:?} was never requested")))
    }

    /// Record a successful load, possibly a retry of a failed one.
    pub fn mark_loaded(&mut self, key: AssetKey) -> FolioResult<()> {
        *self.slot(key)? = AssetState::Loaded;
        tracing::debug!(asset = ?key, progress = self.progress(), "asset loaded");
        Ok(())
    }

    /// Record a failed load. Failures are reported, never fatal.
    pub fn mark_failed(&mut self, key: AssetKey, reason: impl Into<String>) -> FolioResult<()> {
        let reason = reason.into();
        tracing::warn!(asset = ?key, required = key.is_required(), %reason, "asset failed to load");
        *self.slot(key)? = AssetState::Failed(reason);
        Ok(())
    }

    /// State of `key`, if expected.
    pub fn state(&self, key: AssetKey) -> Option<&AssetState> {
        self.assets.get(&key)
    }

    /// Whether `key` has been delivered.
    pub fn is_loaded(&self, key: AssetKey) -> bool {
        matches!(self.assets.get(&key), Some(AssetState::Loaded))
    }

    /// Percentage of expected assets that have answered, in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        if self.assets.is_empty() {
            return 100.0;
        }
        let settled = self
            .assets
            .values()
            .filter(|s| !matches!(s, AssetState::Pending))
            .count();
        settled as f64 / self.assets.len() as f64 * 100.0
    }

    /// Current aggregate state.
    pub fn outcome(&self) -> LoadOutcome {
        if self
            .assets
            .values()
            .any(|s| matches!(s, AssetState::Pending))
        {
            return LoadOutcome::Pending;
        }
        let failures = self.failures();
        if failures.is_empty() {
            LoadOutcome::Ready
        } else {
            LoadOutcome::Failed(failures)
        }
    }

    /// Failed required assets with their reasons.
    pub fn failures(&self) -> Vec<(AssetKey, String)> {
        self.assets
            .iter()
            .filter_map(|(key, state)| match state {
                AssetState::Failed(reason) if key.is_required() => Some((*key, reason.clone())),
                _ => None,
            })
            .collect()
    }

    /// The settled outcome once every asset has answered, `None` while pending.
    ///
    /// `Ready` is reported once. `Failed` is reported on every call until retries clear it.
    pub fn take_completion(&mut self) -> Option<LoadOutcome> {
        if self.completion_taken {
            return None;
        }
        match self.outcome() {
            LoadOutcome::Pending => None,
            LoadOutcome::Ready => {
                self.completion_taken = true;
                Some(LoadOutcome::Ready)
            }
            failed => Some(failed),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
