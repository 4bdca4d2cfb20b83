use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::core::ObjectId,
    foundation::error::{FolioError, FolioResult},
    foundation::math::lerp,
};

/// What a tweened property belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Target {
    /// A scene object's local transform.
    Object(ObjectId),
    /// The scene camera.
    Camera,
    /// The loading progress overlay (DOM).
    LoadingOverlay,
    /// The introduction panel inside the overlay (DOM).
    Panel,
    /// The WebGL canvas element (DOM).
    Canvas,
}

/// Scalar channel of a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Channel {
    /// `position.x`
    PositionX,
    /// `position.y`
    PositionY,
    /// `position.z`
    PositionZ,
    /// `rotation.x`
    RotationX,
    /// `rotation.y`
    RotationY,
    /// `rotation.z`
    RotationZ,
    /// CSS-style opacity in `[0, 1]`.
    Opacity,
}

/// One addressable number: a target plus a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Property {
    /// Owner of the value.
    pub target: Target,
    /// Which value.
    pub channel: Channel,
}

impl Property {
    /// Property of a scene object.
    pub fn object(id: ObjectId, channel: Channel) -> Self {
        Self {
            target: Target::Object(id),
            channel,
        }
    }

    /// Property of the camera.
    pub fn camera(channel: Channel) -> Self {
        Self {
            target: Target::Camera,
            channel,
        }
    }

    /// Opacity of a DOM-side target.
    pub fn opacity(target: Target) -> Self {
        Self {
            target,
            channel: Channel::Opacity,
        }
    }
}

/// Read/write access to tweenable numbers.
pub trait PropertyAccess {
    /// Current value of `prop`.
    fn read(&self, prop: Property) -> FolioResult<f64>;
    /// Overwrite `prop`.
    fn write(&mut self, prop: Property, value: f64) -> FolioResult<()>;
}

/// Declarative tween: drive `property` to `to` over `duration` along `ease`.
///
/// The start value is captured when the tween begins, not when it is declared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    /// Driven property.
    pub property: Property,
    /// End value.
    pub to: f64,
    /// Time to reach `to`.
    pub duration: Duration,
    /// Easing curve.
    pub ease: Ease,
}

impl TweenSpec {
    /// Linear tween over `duration_ms` milliseconds.
    pub fn new(property: Property, to: f64, duration_ms: u64) -> Self {
        Self {
            property,
            to,
            duration: Duration::from_millis(duration_ms),
            ease: Ease::Linear,
        }
    }

    /// Replace the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub(crate) fn validate(&self) -> FolioResult<()> {
        if !self.to.is_finite() {
            return Err(FolioError::animation("tween target value must be finite"));
        }
        Ok(())
    }
}

/// A tween that has captured its start value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTween {
    spec: TweenSpec,
    from: f64,
}

impl ActiveTween {
    /// Capture the current value of `spec.property` from `host`.
    pub fn begin(spec: TweenSpec, host: &impl PropertyAccess) -> FolioResult<Self> {
        spec.validate()?;
        let from = host.read(spec.property)?;
        Ok(Self { spec, from })
    }

    /// Driven property.
    pub fn property(&self) -> Property {
        self.spec.property
    }

    /// Captured start value.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Value after `elapsed` time. Clamps to `to` once the duration has passed.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.spec.duration.is_zero() || elapsed >= self.spec.duration {
            return self.spec.to;
        }
        let t = elapsed.as_secs_f64() / self.spec.duration.as_secs_f64();
        lerp(self.from, self.spec.to, self.spec.ease.apply(t))
    }

    /// `true` once `elapsed` covers the whole duration.
    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.spec.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
