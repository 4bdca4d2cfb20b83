use crate::foundation::error::{FolioError, FolioResult};

pub use glam::{DAffine3, DQuat, DVec2, DVec3, EulerRot};
pub use kurbo::{Point, Size};

/// Stable index of an object in the [`crate::Scene`] arena.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Straight (non-premultiplied) sRGB colour.
///
/// Serializes as a `#rrggbb` string, which is how palettes are authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> FolioResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FolioError::validation(format!(
                "colour '{s}' must be #rrggbb"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| FolioError::validation(format!("colour '{s}': {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Position, Euler rotation (radians, XYZ order) and scale of an object relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform3D {
    /// Translation in parent space.
    pub position: DVec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: DVec3,
    /// Per-axis scale, default (1,1,1).
    pub scale: DVec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

impl Transform3D {
    /// Transform placed at `position` with no rotation and unit scale.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Same transform with a uniform scale.
    pub fn with_uniform_scale(mut self, s: f64) -> Self {
        self.scale = DVec3::splat(s);
        self
    }

    /// Rotation as a quaternion.
    pub fn orientation(self) -> DQuat {
        DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Local-to-parent matrix: `T * R * S`.
    pub fn to_affine(self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels (> 0).
    pub width: f64,
    /// Height in pixels (> 0).
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(width: f64, height: f64) -> FolioResult<Self> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(FolioError::validation(
                "viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width / height.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    /// Size as a kurbo value.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Pixel coordinates (origin top-left, y down) to normalized device coordinates in `[-1, 1]`.
    pub fn to_ndc(self, p: Point) -> DVec2 {
        DVec2::new(
            (p.x / self.width) * 2.0 - 1.0,
            -(p.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn from_ndc(self, ndc: DVec2) -> Point {
        Point::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
