use std::collections::BTreeMap;
use std::time::Duration;

use crate::animation::clip::{AnimationClip, ClipName, ClipPlayer};
use crate::animation::sequence::Timeline;
use crate::assets::load::{AssetKey, AssetState, LoadOutcome, LoadTracker};
use crate::director::chains::{self, AVATAR_Y};
use crate::director::flags::CutsceneFlags;
use crate::director::machine::{Cue, Gate, Phase};
use crate::foundation::core::{DVec3, Point, Rgb, Viewport};
use crate::foundation::error::{FolioError, FolioResult};
use crate::interaction::badge::{BadgeId, BadgeSpins};
use crate::interaction::hover::{Cursor, HoverState};
use crate::scene::layout::{AVATAR, StageLayout};
use crate::scene::model::{Camera, Scene};
use crate::scene::overlay::{self, Orientation, Overlay, Platform, Surface};
use crate::scene::picking::{Hit, Picker};
use crate::stage::world::World;

/// Placement and colour of one object in a [`StageSnapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ObjectSnapshot {
    /// Local position.
    pub position: DVec3,
    /// Local Euler rotation.
    pub rotation: DVec3,
    /// Material colour, for meshes.
    pub color: Option<Rgb>,
    /// Visibility flag.
    pub visible: bool,
}

/// Serializable picture of a stage, as printed by the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageSnapshot {
    /// Simulated time in milliseconds.
    pub time_ms: u128,
    /// Frames ticked so far.
    pub frames: u64,
    /// Cutscene phase.
    pub phase: Phase,
    /// Cutscene flags.
    pub flags: CutsceneFlags,
    /// Currently active clip.
    pub active_clip: Option<ClipName>,
    /// Clip switches performed.
    pub cross_fades: u64,
    /// Camera world position.
    pub camera: DVec3,
    /// Cursor style.
    pub cursor: Cursor,
    /// Skills button highlight.
    pub skills_hovered: bool,
    /// Credits button highlight.
    pub credits_hovered: bool,
    /// Every object by name.
    pub objects: BTreeMap<String, ObjectSnapshot>,
    /// Overlay classes, sorted.
    pub overlay_classes: Vec<String>,
    /// Overlay panel opacity.
    pub panel_opacity: f64,
    /// Loading overlay opacity.
    pub loading_opacity: f64,
    /// Canvas opacity.
    pub canvas_opacity: f64,
    /// Load progress in percent.
    pub load_progress: f64,
    /// Required assets that failed to load.
    pub load_failures: Vec<(AssetKey, String)>,
    /// Labels of unfinished sequences.
    pub running: Vec<String>,
}

/// A live portfolio page: scene, clip player, cutscene director, and the timeline driving them.
///
/// The host calls the load methods as assets arrive, [`Stage::tick`] once per displayed frame,
/// and the input methods between frames.
pub struct Stage {
    layout: StageLayout,
    world: World,
    timeline: Timeline<Cue, Gate>,
    hover: HoverState,
    loader: LoadTracker,
    viewport: Viewport,
    frames: u64,
}

impl Stage {
    /// Stage for `layout`, waiting for the full asset manifest.
    pub fn new(layout: StageLayout) -> FolioResult<Self> {
        layout.validate()?;
        let viewport = Viewport::new(layout.viewport.width, layout.viewport.height)?;
        let world = World {
            scene: Scene::with_camera(layout.initial_camera()),
            platform: layout.platform,
            ..World::default()
        };
        Ok(Self {
            layout,
            world,
            timeline: Timeline::new(),
            hover: HoverState::default(),
            loader: LoadTracker::new(),
            viewport,
            frames: 0,
        })
    }

    /// Stage configuration.
    pub fn layout(&self) -> &StageLayout {
        &self.layout
    }

    /// Record that `key` has loaded and add its objects to the scene.
    ///
    /// Each key is delivered once; a key that already loaded is an asset error and leaves the
    /// stage untouched. Failed keys may be delivered again as a retry.
    ///
    /// Animation files delivered this way use the clip's reference length; use
    /// [`Stage::clip_loaded`] to supply the decoded tracks.
    pub fn asset_loaded(&mut self, key: AssetKey) -> FolioResult<()> {
        self.loader.check_open(key)?;
        match key {
            AssetKey::Clip(name) => self.world.player.register(name, name.reference_clip())?,
            _ => {
                self.layout.spawn(key, &mut self.world.scene)?;
            }
        }
        self.loader.mark_loaded(key)?;
        self.poll_loader()
    }

    /// Record an animation file for `name`; the track is looked up by its source name.
    ///
    /// A file without the expected track is reported as a failed asset.
    pub fn clip_loaded(&mut self, name: ClipName, file: &[AnimationClip]) -> FolioResult<()> {
        let key = AssetKey::Clip(name);
        self.loader.check_open(key)?;
        match AnimationClip::find_by_name(file, name.source_name()) {
            Some(track) => {
                let clip = AnimationClip {
                    looping: name.default_loop(),
                    ..track.clone()
                };
                self.world.player.register(name, clip)?;
                self.loader.mark_loaded(key)?;
            }
            None => {
                self.loader
                    .mark_failed(key, format!("no track named '{}'", name.source_name()))?;
            }
        }
        self.poll_loader()
    }

    /// Record that `key` failed. Failures are reported; required ones keep the stage idle.
    pub fn asset_failed(&mut self, key: AssetKey, reason: impl Into<String>) -> FolioResult<()> {
        self.loader.mark_failed(key, reason)?;
        self.poll_loader()
    }

    /// Deliver every asset that has not answered yet, using `clips` for the animation files.
    pub fn load_all(&mut self, clips: &[AnimationClip]) -> FolioResult<()> {
        for key in AssetKey::manifest() {
            if self.loader.state(key) != Some(&AssetState::Pending) {
                continue;
            }
            match key {
                AssetKey::Clip(name)
                    if AnimationClip::find_by_name(clips, name.source_name()).is_some() =>
                {
                    self.clip_loaded(name, clips)?
                }
                _ => self.asset_loaded(key)?,
            }
        }
        Ok(())
    }

    fn poll_loader(&mut self) -> FolioResult<()> {
        match self.loader.take_completion() {
            Some(LoadOutcome::Ready) => {
                let texts = self.layout.text_names();
                if let Some(chains) = self
                    .world
                    .director
                    .begin_intro(&self.world.scene, &texts)?
                {
                    for seq in chains {
                        self.timeline.start(seq);
                    }
                }
            }
            Some(LoadOutcome::Failed(failures)) => {
                tracing::warn!(
                    failed = failures.len(),
                    "required assets failed to load, intro waits for a retry"
                );
            }
            Some(LoadOutcome::Pending) | None => {}
        }
        Ok(())
    }

    /// Load progress in percent.
    pub fn load_progress(&self) -> f64 {
        self.loader.progress()
    }

    /// Current aggregate load state.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.loader.outcome()
    }

    /// Required assets that failed, with reasons.
    pub fn load_failures(&self) -> Vec<(AssetKey, String)> {
        self.loader.failures()
    }

    /// Render-loop callback: advance the clip player, pin the avatar, then run the timeline.
    pub fn tick(&mut self, dt: Duration) -> FolioResult<()> {
        let flags = self.world.director.flags();
        let (mixer_running, settled) = (flags.mixer_running(), flags.avatar_settled());

        if mixer_running {
            for event in self.world.player.update(dt.as_secs_f64()) {
                tracing::debug!(?event, "mixer event");
            }
        }
        if settled && let Some(root) = self.world.scene.find(AVATAR) {
            self.world.scene.get_mut(root)?.transform.position = DVec3::new(0.0, AVATAR_Y, 0.0);
        }
        self.timeline.advance(dt, &mut self.world)?;
        self.frames += 1;
        Ok(())
    }

    /// Tick in steps of `frame` until `total` has elapsed. The last step may be shorter.
    pub fn run_for(&mut self, total: Duration, frame: Duration) -> FolioResult<()> {
        if frame.is_zero() {
            return Err(FolioError::validation("frame duration must be > 0"));
        }
        let mut left = total;
        while !left.is_zero() {
            let dt = frame.min(left);
            self.tick(dt)?;
            left -= dt;
        }
        Ok(())
    }

    /// Tick until no sequence is running or `limit` has elapsed. Returns the time ticked.
    pub fn settle(&mut self, frame: Duration, limit: Duration) -> FolioResult<Duration> {
        if frame.is_zero() {
            return Err(FolioError::validation("frame duration must be > 0"));
        }
        let mut spent = Duration::ZERO;
        while !self.timeline.is_idle() && spent < limit {
            self.tick(frame)?;
            spent += frame;
        }
        Ok(spent)
    }

    /// Pointer moved to `(x, y)` in viewport pixels. Returns the pick list.
    #[tracing::instrument(skip(self))]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> FolioResult<Vec<Hit>> {
        let hits = Picker::pick(&self.world.scene, self.viewport, Point::new(x, y))?;
        let badges =
            self.hover
                .on_pointer_move(&hits, &mut self.world.scene, &self.layout.palette)?;
        for badge in badges {
            self.request_spin(badge)?;
        }
        Ok(hits)
    }

    fn request_spin(&mut self, badge: BadgeId) -> FolioResult<bool> {
        let seq = chains::badge_spin(&self.world.scene, badge)?;
        if !self.world.spins.try_begin(badge) {
            tracing::debug!(?badge, "badge already spinning");
            return Ok(false);
        }
        self.timeline.start(seq);
        Ok(true)
    }

    /// Click at `(x, y)` in viewport pixels. Returns whether an act started.
    #[tracing::instrument(skip(self))]
    pub fn click(&mut self, x: f64, y: f64) -> FolioResult<bool> {
        let hits = Picker::pick(&self.world.scene, self.viewport, Point::new(x, y))?;
        let texts = self.layout.text_names();
        match self
            .world
            .director
            .on_click(&hits, &self.world.scene, &texts)?
        {
            Some(seq) => {
                self.timeline.start(seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Viewport pixel under which the centre of `name` appears, if it is in front of the camera.
    pub fn screen_position(&self, name: &str) -> FolioResult<Option<Point>> {
        let id = self.world.scene.require(name)?;
        let centre = self.world.scene.world_center(id)?;
        Ok(self
            .world
            .scene
            .camera
            .project(centre)
            .map(|ndc| self.viewport.from_ndc(ndc)))
    }

    fn aim(&self, name: &str) -> FolioResult<Point> {
        self.screen_position(name)?
            .ok_or_else(|| FolioError::scene(format!("object '{name}' is behind the camera")))
    }

    /// Move the pointer onto the centre of `name`.
    pub fn hover_object(&mut self, name: &str) -> FolioResult<Vec<Hit>> {
        let p = self.aim(name)?;
        self.pointer_move(p.x, p.y)
    }

    /// Click the centre of `name`.
    pub fn click_object(&mut self, name: &str) -> FolioResult<bool> {
        let p = self.aim(name)?;
        self.click(p.x, p.y)
    }

    /// The window was resized.
    pub fn resize(&mut self, width: f64, height: f64) -> FolioResult<()> {
        self.viewport = Viewport::new(width, height)?;
        self.world.scene.camera.aspect = self.viewport.aspect();
        Ok(())
    }

    /// The page `load` event: desktop fades the canvas in, touch devices show the prompt.
    pub fn page_loaded(&mut self) {
        match self.world.platform {
            Platform::Desktop => {
                self.timeline.start(chains::page_fade_in());
            }
            Platform::Mobile { orientation } => self.world.surface.page_loaded_mobile(orientation),
        }
    }

    /// The device was rotated. Desktop pages ignore this.
    pub fn orientation_changed(&mut self, orientation: Orientation) {
        if !self.world.platform.is_mobile() {
            tracing::debug!(?orientation, "orientation change ignored on desktop");
            return;
        }
        self.world.platform = Platform::Mobile { orientation };
        let credits_visible = self.world.director.flags().credits_visible();
        overlay::apply_orientation(
            &mut self.world.overlay,
            &mut self.world.surface,
            orientation,
            credits_visible,
        );
    }

    /// Cutscene phase.
    pub fn phase(&self) -> Phase {
        self.world.director.phase()
    }

    /// Cutscene flags.
    pub fn flags(&self) -> &CutsceneFlags {
        self.world.director.flags()
    }

    /// Scene graph.
    pub fn scene(&self) -> &Scene {
        &self.world.scene
    }

    /// Camera.
    pub fn camera(&self) -> &Camera {
        &self.world.scene.camera
    }

    /// Clip player.
    pub fn player(&self) -> &ClipPlayer {
        &self.world.player
    }

    /// Hover state.
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Badge spin states.
    pub fn spins(&self) -> &BadgeSpins {
        &self.world.spins
    }

    /// Overlay element.
    pub fn overlay(&self) -> &Overlay {
        &self.world.overlay
    }

    /// Canvas and orientation prompt.
    pub fn surface(&self) -> &Surface {
        &self.world.surface
    }

    /// Current platform.
    pub fn platform(&self) -> Platform {
        self.world.platform
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Simulated time.
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// `true` when no sequence is running.
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    /// Labels of running sequences.
    pub fn running(&self) -> Vec<&str> {
        self.timeline.active_labels()
    }

    /// Local position of `name`.
    pub fn position(&self, name: &str) -> FolioResult<DVec3> {
        let id = self.world.scene.require(name)?;
        Ok(self.world.scene.get(id)?.transform.position)
    }

    /// Serializable snapshot of everything observable.
    pub fn snapshot(&self) -> StageSnapshot {
        let scene = &self.world.scene;
        let objects = scene
            .iter()
            .map(|(_, obj)| {
                (
                    obj.name().to_owned(),
                    ObjectSnapshot {
                        position: obj.transform.position,
                        rotation: obj.transform.rotation,
                        color: obj.material.map(|m| m.color),
                        visible: obj.visible,
                    },
                )
            })
            .collect();
        StageSnapshot {
            time_ms: self.timeline.now().as_millis(),
            frames: self.frames,
            phase: self.phase(),
            flags: self.flags().clone(),
            active_clip: self.world.player.active(),
            cross_fades: self.world.player.cross_fade_count(),
            camera: scene.camera.position,
            cursor: self.hover.cursor(),
            skills_hovered: self.hover.skills_hovered(),
            credits_hovered: self.hover.credits_hovered(),
            objects,
            overlay_classes: self.world.overlay.classes().map(str::to_owned).collect(),
            panel_opacity: self.world.overlay.panel_opacity,
            loading_opacity: self.world.overlay.loading_opacity,
            canvas_opacity: self.world.surface.canvas_opacity,
            load_progress: self.loader.progress(),
            load_failures: self.loader.failures(),
            running: self.running().into_iter().map(str::to_owned).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/session.rs"]
mod tests;
