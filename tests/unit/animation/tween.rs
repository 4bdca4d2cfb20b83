use super::*;
use std::collections::HashMap;

#[derive(Default)]
struct Values(HashMap<Property, f64>);

impl PropertyAccess for Values {
    fn read(&self, prop: Property) -> FolioResult<f64> {
        self.0
            .get(&prop)
            .copied()
            .ok_or_else(|| FolioError::scene("unknown property"))
    }

    fn write(&mut self, prop: Property, value: f64) -> FolioResult<()> {
        self.0.insert(prop, value);
        Ok(())
    }
}

fn cam_x() -> Property {
    Property::camera(Channel::PositionX)
}

#[test]
fn start_value_is_captured_on_begin() {
    let mut host = Values::default();
    host.write(cam_x(), 1.3).unwrap();
    let spec = TweenSpec::new(cam_x(), 6.0, 3500);

    host.write(cam_x(), 2.0).unwrap();
    let tween = ActiveTween::begin(spec, &host).unwrap();
    assert_eq!(tween.from(), 2.0);
    assert_eq!(tween.value_at(Duration::ZERO), 2.0);
}

#[test]
fn linear_midpoint_and_clamp() {
    let mut host = Values::default();
    host.write(cam_x(), 0.0).unwrap();
    let tween = ActiveTween::begin(TweenSpec::new(cam_x(), 10.0, 1000), &host).unwrap();

    assert!((tween.value_at(Duration::from_millis(500)) - 5.0).abs() < 1e-12);
    assert_eq!(tween.value_at(Duration::from_millis(1000)), 10.0);
    assert_eq!(tween.value_at(Duration::from_millis(5000)), 10.0);
    assert!(!tween.is_done(Duration::from_millis(999)));
    assert!(tween.is_done(Duration::from_millis(1000)));
}

#[test]
fn easing_is_applied() {
    let mut host = Values::default();
    host.write(cam_x(), 0.0).unwrap();
    let tween = ActiveTween::begin(
        TweenSpec::new(cam_x(), 1.0, 1000).ease(Ease::OutQuint),
        &host,
    )
    .unwrap();
    let v = tween.value_at(Duration::from_millis(500));
    assert!((v - Ease::OutQuint.apply(0.5)).abs() < 1e-12);
}

#[test]
fn zero_duration_jumps_to_end() {
    let mut host = Values::default();
    host.write(cam_x(), 3.0).unwrap();
    let tween = ActiveTween::begin(TweenSpec::new(cam_x(), -1.0, 0), &host).unwrap();
    assert_eq!(tween.value_at(Duration::ZERO), -1.0);
}

#[test]
fn unknown_property_fails_to_begin() {
    let host = Values::default();
    assert!(ActiveTween::begin(TweenSpec::new(cam_x(), 1.0, 10), &host).is_err());
}

#[test]
fn non_finite_target_is_rejected() {
    let mut host = Values::default();
    host.write(cam_x(), 0.0).unwrap();
    let err = ActiveTween::begin(TweenSpec::new(cam_x(), f64::NAN, 10), &host).unwrap_err();
    assert!(matches!(err, FolioError::Animation(_)));
}
