//! Replayable host input: a JSON list of events fed to a [`Stage`] in order.
//!
//! Scripts stand in for the browser. Load callbacks, pointer input, and frame time all come
//! from the event list, so a run is fully deterministic.

use std::time::Duration;

use crate::animation::clip::{AnimationClip, ClipName};
use crate::assets::load::AssetKey;
use crate::foundation::error::{FolioError, FolioResult};
use crate::scene::overlay::Orientation;
use crate::stage::session::{Stage, StageSnapshot};

/// Default cap for [`ScriptEvent::Settle`], in milliseconds.
pub const DEFAULT_SETTLE_LIMIT_MS: u64 = 60_000;

/// One host event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Deliver every asset still pending. Clips found in `clips` are used as decoded tracks.
    LoadAll {
        /// Decoded animation tracks, matched by track name.
        #[serde(default)]
        clips: Vec<AnimationClip>,
    },
    /// One asset finished loading.
    AssetLoaded {
        /// Which asset.
        key: AssetKey,
    },
    /// One asset failed.
    AssetFailed {
        /// Which asset.
        key: AssetKey,
        /// Loader message.
        #[serde(default)]
        reason: String,
    },
    /// An animation file finished loading with these tracks.
    ClipLoaded {
        /// Which clip the file was requested for.
        clip: ClipName,
        /// Tracks found in the file.
        tracks: Vec<AnimationClip>,
    },
    /// Let time pass, one frame at a time.
    Wait {
        /// Milliseconds to simulate.
        ms: u64,
    },
    /// Tick until every sequence has finished.
    Settle {
        /// Cap in milliseconds.
        #[serde(default)]
        limit_ms: Option<u64>,
    },
    /// Pointer moved to a viewport pixel.
    PointerMove {
        /// Pixels from the left edge.
        x: f64,
        /// Pixels from the top edge.
        y: f64,
    },
    /// Click at a viewport pixel.
    Click {
        /// Pixels from the left edge.
        x: f64,
        /// Pixels from the top edge.
        y: f64,
    },
    /// Pointer moved onto the centre of a named object.
    HoverObject {
        /// Scene object name.
        name: String,
    },
    /// Click on the centre of a named object.
    ClickObject {
        /// Scene object name.
        name: String,
    },
    /// Window resized.
    Resize {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
    /// Page `load` event.
    PageLoaded,
    /// Device rotated.
    Orientation {
        /// New orientation.
        orientation: Orientation,
    },
}

/// An ordered list of [`ScriptEvent`]s.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Events in delivery order.
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse and validate a script.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject coordinates and sizes no host could send.
    pub fn validate(&self) -> FolioResult<()> {
        for (i, event) in self.events.iter().enumerate() {
            let ok = match event {
                ScriptEvent::PointerMove { x, y } | ScriptEvent::Click { x, y } => {
                    x.is_finite() && y.is_finite()
                }
                ScriptEvent::Resize { width, height } => {
                    width.is_finite() && height.is_finite() && *width > 0.0 && *height > 0.0
                }
                ScriptEvent::HoverObject { name } | ScriptEvent::ClickObject { name } => {
                    !name.is_empty()
                }
                _ => true,
            };
            if !ok {
                return Err(FolioError::validation(format!(
                    "script event {i} is invalid: {event:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Feed every event of `script` to `stage`, ticking in steps of `frame`, and return the
/// final snapshot.
pub fn run_script(stage: &mut Stage, script: &Script, frame: Duration) -> FolioResult<StageSnapshot> {
    if frame.is_zero() {
        return Err(FolioError::validation("frame duration must be > 0"));
    }
    for event in &script.events {
        tracing::debug!(?event, "script event");
        match event {
            ScriptEvent::LoadAll { clips } => stage.load_all(clips)?,
            ScriptEvent::AssetLoaded { key } => stage.asset_loaded(*key)?,
            ScriptEvent::AssetFailed { key, reason } => stage.asset_failed(*key, reason.clone())?,
            ScriptEvent::ClipLoaded { clip, tracks } => stage.clip_loaded(*clip, tracks)?,
            ScriptEvent::Wait { ms } => stage.run_for(Duration::from_millis(*ms), frame)?,
            ScriptEvent::Settle { limit_ms } => {
                let limit = Duration::from_millis(limit_ms.unwrap_or(DEFAULT_SETTLE_LIMIT_MS));
                let spent = stage.settle(frame, limit)?;
                if !stage.is_idle() {
                    tracing::warn!(?spent, running = ?stage.running(), "settle hit its limit");
                }
            }
            ScriptEvent::PointerMove { x, y } => {
                stage.pointer_move(*x, *y)?;
            }
            ScriptEvent::Click { x, y } => {
                stage.click(*x, *y)?;
            }
            ScriptEvent::HoverObject { name } => {
                stage.hover_object(name)?;
            }
            ScriptEvent::ClickObject { name } => {
                stage.click_object(name)?;
            }
            ScriptEvent::Resize { width, height } => stage.resize(*width, *height)?,
            ScriptEvent::PageLoaded => stage.page_loaded(),
            ScriptEvent::Orientation { orientation } => stage.orientation_changed(*orientation),
        }
    }
    let snapshot = stage.snapshot();
    tracing::info!(
        events = script.events.len(),
        phase = ?snapshot.phase,
        time_ms = %snapshot.time_ms,
        "script finished"
    );
    Ok(snapshot)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/script.rs"]
mod tests;
