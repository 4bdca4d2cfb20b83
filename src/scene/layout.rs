//! Stage configuration: starting placement, palette, and collider sizes.
//!
//! Every field has a default matching the shipped page, so a layout file only needs to name
//! what it changes.

use crate::assets::load::AssetKey;
use crate::foundation::core::{DVec3, ObjectId, Rgb, Transform3D, Viewport};
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::Aabb;
use crate::interaction::badge::BadgeId;
use crate::scene::model::{Camera, Scene, SceneObject};
use crate::scene::overlay::Platform;

/// Name of the avatar root node.
pub const AVATAR: &str = "avatar";
/// Name of the avatar's skinned body, the node the walk tweens move.
pub const AVATAR_BODY: &str = "avatar.body";
/// Skills button root.
pub const SKILLS_BUTTON: &str = "SkillsButton";
/// Skills button face mesh, the click target.
pub const SKILLS_BUTTON_BODY: &str = "SkillsButtonBody";
/// Skills button label mesh.
pub const SKILLS_BUTTON_TEXT: &str = "SkillsButtonText";
/// Credits button root.
pub const CREDITS_BUTTON: &str = "CreditsButton";
/// Credits button face mesh, the click target.
pub const CREDITS_BUTTON_BODY: &str = "CreditsButtonBody";
/// Credits button label mesh.
pub const CREDITS_BUTTON_TEXT: &str = "CreditsButtonText";
/// Backdrop model.
pub const STUDIO: &str = "studio";

/// Colours of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Button face colour before the first hover.
    pub button_initial: Rgb,
    /// Button face colour when not hovered.
    pub button_idle: Rgb,
    /// Button face colour under the pointer.
    pub button_hover: Rgb,
    /// Button label colour when not hovered.
    pub label_idle: Rgb,
    /// Button label colour under the pointer.
    pub label_hover: Rgb,
    /// Name text meshes.
    pub name_text: Rgb,
    /// Title text meshes.
    pub title_text: Rgb,
    /// Accent used by the React badge.
    pub react: Rgb,
    /// Backdrop colour.
    pub studio: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            button_initial: Rgb::new(0xc4, 0xea, 0xfd),
            button_idle: Rgb::new(0xb0, 0xe3, 0xfc),
            button_hover: Rgb::new(0x90, 0xc5, 0xe0),
            label_idle: Rgb::new(0x86, 0xca, 0xfd),
            label_hover: Rgb::new(0x69, 0xa8, 0xd8),
            name_text: Rgb::new(0x96, 0x96, 0x96),
            title_text: Rgb::new(0x88, 0xa0, 0xbf),
            react: Rgb::new(0x00, 0xd0, 0xd0),
            studio: Rgb::new(0xaf, 0xbf, 0xfd),
        }
    }
}

/// Whether a text mesh uses the name or the title colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// Name lines.
    Name,
    /// Title lines.
    Title,
}

/// Starting placement of one intro text mesh.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextPlacement {
    /// Scene object name.
    pub name: String,
    /// Start position; the intro slides z to zero.
    pub position: DVec3,
    /// Colour role.
    pub style: TextStyle,
}

impl TextPlacement {
    fn new(name: &str, position: DVec3, style: TextStyle) -> Self {
        Self {
            name: name.to_owned(),
            position,
            style,
        }
    }
}

/// Everything a stage needs to lay out its scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageLayout {
    /// Initial viewport in CSS pixels.
    pub viewport: Viewport,
    /// Desktop or touch device.
    pub platform: Platform,
    /// Initial camera. Its aspect is recomputed from the viewport.
    pub camera: Camera,
    /// Colours.
    pub palette: Palette,
    /// Intro text meshes in reveal order.
    pub texts: Vec<TextPlacement>,
    /// Avatar start position.
    pub avatar: DVec3,
    /// Skills button start position.
    pub skills_button: DVec3,
    /// Credits button start position.
    pub credits_button: DVec3,
    /// Uniform scale of both button models.
    pub button_scale: f64,
    /// Half size of a button face in model units.
    pub button_half_extents: DVec3,
    /// Half size of a badge hit box.
    pub badge_half_extents: DVec3,
    /// Horizontal stretch of the backdrop.
    pub studio_scale_x: f64,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                width: 1280.0,
                height: 720.0,
            },
            platform: Platform::Desktop,
            camera: Camera::default(),
            palette: Palette::default(),
            texts: vec![
                TextPlacement::new("akif", DVec3::new(1.18, 1.68, 5.0), TextStyle::Name),
                TextPlacement::new("volkan", DVec3::new(2.47, 1.67, 5.0), TextStyle::Name),
                TextPlacement::new("ongun", DVec3::new(1.42, 1.13, 5.0), TextStyle::Name),
                TextPlacement::new("title1", DVec3::new(2.04, 0.63, 5.0), TextStyle::Title),
                TextPlacement::new("title2", DVec3::new(1.45, 0.22, 5.0), TextStyle::Title),
            ],
            avatar: DVec3::new(-4.5, -0.01, 0.0),
            skills_button: DVec3::new(23.0, 0.15, -0.5),
            credits_button: DVec3::new(23.0, 0.26, -0.5),
            button_scale: 40.0,
            button_half_extents: DVec3::new(0.012, 0.004, 0.002),
            badge_half_extents: DVec3::new(0.3, 0.45, 0.1),
            studio_scale_x: 125.0,
        }
    }
}

impl StageLayout {
    /// Parse a layout from JSON; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        let layout: Self = serde_json::from_str(s)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout is usable.
    pub fn validate(&self) -> FolioResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        let cam = &self.camera;
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(FolioError::validation("camera fov_deg must be in (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(FolioError::validation("camera must satisfy 0 < near < far"));
        }
        if self.texts.is_empty() {
            return Err(FolioError::validation("layout needs at least one text mesh"));
        }
        for (i, text) in self.texts.iter().enumerate() {
            if self.texts[..i].iter().any(|t| t.name == text.name) {
                return Err(FolioError::validation(format!(
                    "duplicate text mesh '{}'",
                    text.name
                )));
            }
        }
        if !(self.button_scale > 0.0) {
            return Err(FolioError::validation("button_scale must be > 0"));
        }
        let extents = [self.button_half_extents, self.badge_half_extents];
        if extents.iter().any(|e| !e.is_finite() || e.min_element() <= 0.0) {
            return Err(FolioError::validation("collider half extents must be > 0"));
        }
        Ok(())
    }

    /// Camera for this layout with its aspect taken from the viewport.
    pub fn initial_camera(&self) -> Camera {
        Camera {
            aspect: self.viewport.aspect(),
            ..self.camera
        }
    }

    /// Names of the intro text meshes in reveal order.
    pub fn text_names(&self) -> Vec<&str> {
        self.texts.iter().map(|t| t.name.as_str()).collect()
    }

    /// Add the objects delivered by `key` to `scene`. Returns the root that joined the
    /// interactive set, if any. Animation files add no objects.
    pub fn spawn(&self, key: AssetKey, scene: &mut Scene) -> FolioResult<Option<ObjectId>> {
        match key {
            AssetKey::Typeface => {
                for text in &self.texts {
                    let color = match text.style {
                        TextStyle::Name => self.palette.name_text,
                        TextStyle::Title => self.palette.title_text,
                    };
                    scene.spawn(
                        SceneObject::new(text.name.clone())
                            .with_transform(Transform3D::at(text.position))
                            .with_color(color),
                        None,
                    )?;
                }
                Ok(None)
            }
            AssetKey::StudioBackground => {
                let mut t = Transform3D::default();
                t.scale.x = self.studio_scale_x;
                scene.spawn(
                    SceneObject::new(STUDIO)
                        .with_transform(t)
                        .with_color(self.palette.studio),
                    None,
                )?;
                Ok(None)
            }
            AssetKey::SkillsButton => self
                .spawn_button(
                    scene,
                    [SKILLS_BUTTON, SKILLS_BUTTON_BODY, SKILLS_BUTTON_TEXT],
                    self.skills_button,
                )
                .map(Some),
            AssetKey::CreditsButton => self
                .spawn_button(
                    scene,
                    [CREDITS_BUTTON, CREDITS_BUTTON_BODY, CREDITS_BUTTON_TEXT],
                    self.credits_button,
                )
                .map(Some),
            AssetKey::Avatar => {
                let root = scene.spawn(
                    SceneObject::new(AVATAR).with_transform(Transform3D::at(self.avatar)),
                    None,
                )?;
                scene.spawn(SceneObject::new(AVATAR_BODY), Some(root))?;
                Ok(None)
            }
            AssetKey::Clip(_) => Ok(None),
            AssetKey::Badge(badge) => self.spawn_badge(scene, badge).map(Some),
        }
    }

    fn spawn_button(
        &self,
        scene: &mut Scene,
        [root, body, text]: [&str; 3],
        at: DVec3,
    ) -> FolioResult<ObjectId> {
        let id = scene.spawn(
            SceneObject::new(root)
                .with_transform(Transform3D::at(at).with_uniform_scale(self.button_scale)),
            None,
        )?;
        scene.spawn(
            SceneObject::new(body)
                .with_color(self.palette.button_initial)
                .with_collider(Aabb::centered(self.button_half_extents)),
            Some(id),
        )?;
        scene.spawn(
            SceneObject::new(text).with_color(self.palette.label_idle),
            Some(id),
        )?;
        scene.register_interactive(id)?;
        Ok(id)
    }

    fn spawn_badge(&self, scene: &mut Scene, badge: BadgeId) -> FolioResult<ObjectId> {
        let mut object = SceneObject::new(badge.name())
            .with_transform(Transform3D::at(badge.start_position()))
            .with_collider(Aabb::centered(self.badge_half_extents));
        if badge == BadgeId::React {
            object = object.with_color(self.palette.react);
        }
        let id = scene.spawn(object, None)?;
        scene.register_interactive(id)?;
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
