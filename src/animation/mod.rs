pub(crate) mod clip;
pub(crate) mod ease;
pub(crate) mod sequence;
pub(crate) mod tween;
