use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::{Channel, Target};
use crate::foundation::core::ObjectId;
use crate::foundation::error::FolioError;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
enum TestCue {
    Mark(&'static str),
}

#[derive(Clone, Debug)]
enum TestGate {
    Open,
}

#[derive(Default)]
struct Host {
    values: HashMap<Property, f64>,
    marks: Vec<(&'static str, f64)>,
    gate_open: bool,
}

impl PropertyAccess for Host {
    fn read(&self, prop: Property) -> FolioResult<f64> {
        Ok(self.values.get(&prop).copied().unwrap_or(0.0))
    }

    fn write(&mut self, prop: Property, value: f64) -> FolioResult<()> {
        if prop.target == Target::Canvas {
            return Err(FolioError::scene("read-only"));
        }
        self.values.insert(prop, value);
        Ok(())
    }
}

impl SequenceHost for Host {
    type Cue = TestCue;
    type Gate = TestGate;

    fn apply_cue(&mut self, cue: &TestCue) -> FolioResult<()> {
        let TestCue::Mark(name) = cue;
        let x = self.values.get(&px(0)).copied().unwrap_or(0.0);
        self.marks.push((*name, x));
        Ok(())
    }

    fn gate_open(&self, _gate: &TestGate) -> bool {
        self.gate_open
    }
}

fn px(id: u32) -> Property {
    Property::object(ObjectId(id), Channel::PositionX)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

type Seq = Sequence<TestCue, TestGate>;

#[test]
fn steps_run_strictly_in_order() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("chain")
        .tween(TweenSpec::new(px(0), 1.0, 100))
        .cue(TestCue::Mark("first"))
        .tween(TweenSpec::new(px(1), 1.0, 100))
        .cue(TestCue::Mark("second"));
    let id = tl.start(seq);

    tl.advance(ms(50), &mut host).unwrap();
    assert!((host.values[&px(0)] - 0.5).abs() < 1e-9);
    assert!(!host.values.contains_key(&px(1)));
    assert!(host.marks.is_empty());

    tl.advance(ms(60), &mut host).unwrap();
    assert_eq!(host.values[&px(0)], 1.0);
    assert_eq!(host.marks, vec![("first", 1.0)]);
    // 10ms of leftover time already applied to the second tween.
    assert!((host.values[&px(1)] - 0.1).abs() < 1e-9);

    let done = tl.advance(ms(90), &mut host).unwrap();
    assert_eq!(done, vec![id]);
    assert_eq!(host.values[&px(1)], 1.0);
    assert_eq!(host.marks.len(), 2);
    assert!(tl.is_idle());
}

#[test]
fn one_large_tick_runs_whole_chain() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("burst")
        .tween(TweenSpec::new(px(0), 2.0, 300).ease(Ease::OutCubic))
        .wait_ms(500)
        .tween(TweenSpec::new(px(1), 3.0, 300))
        .cue(TestCue::Mark("end"));
    assert_eq!(seq.nominal_duration(), ms(1100));
    tl.start(seq);

    let done = tl.advance(ms(5000), &mut host).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(host.values[&px(0)], 2.0);
    assert_eq!(host.values[&px(1)], 3.0);
}

#[test]
fn parallel_group_waits_for_longest() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("group")
        .together(vec![
            TweenSpec::new(px(0), 1.0, 100),
            TweenSpec::new(px(1), 1.0, 400),
        ])
        .cue(TestCue::Mark("after"));
    tl.start(seq);

    tl.advance(ms(200), &mut host).unwrap();
    assert_eq!(host.values[&px(0)], 1.0);
    assert!((host.values[&px(1)] - 0.5).abs() < 1e-9);
    assert!(host.marks.is_empty());

    tl.advance(ms(200), &mut host).unwrap();
    assert_eq!(host.marks.len(), 1);
}

#[test]
fn start_value_is_read_when_step_begins() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("capture")
        .set(px(0), 4.0)
        .tween(TweenSpec::new(px(0), 0.0, 100));
    tl.start(seq);
    tl.advance(ms(50), &mut host).unwrap();
    assert!((host.values[&px(0)] - 2.0).abs() < 1e-9);
}

#[test]
fn until_holds_until_gate_opens() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("gated")
        .until(TestGate::Open)
        .tween(TweenSpec::new(px(0), 1.0, 100));
    tl.start(seq);

    tl.advance(ms(1000), &mut host).unwrap();
    assert!(!host.values.contains_key(&px(0)));

    host.gate_open = true;
    tl.advance(ms(16), &mut host).unwrap();
    // The gate opened "now", so the tween starts from zero elapsed.
    assert_eq!(host.values[&px(0)], 0.0);
    tl.advance(ms(50), &mut host).unwrap();
    assert!((host.values[&px(0)] - 0.5).abs() < 1e-9);
}

#[test]
fn spawned_child_runs_concurrently_from_spawn_time() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let child: Seq = Sequence::new("child").tween(TweenSpec::new(px(1), 1.0, 100));
    let parent: Seq = Sequence::new("parent")
        .wait_ms(100)
        .spawn(child)
        .tween(TweenSpec::new(px(0), 1.0, 400));
    tl.start(parent);

    tl.advance(ms(150), &mut host).unwrap();
    assert_eq!(tl.active_count(), 2);
    assert!((host.values[&px(1)] - 0.5).abs() < 1e-9);

    tl.advance(ms(50), &mut host).unwrap();
    assert_eq!(tl.active_labels(), vec!["parent"]);
}

#[test]
fn host_errors_propagate() {
    let mut host = Host::default();
    let mut tl = Timeline::new();
    let seq: Seq = Sequence::new("bad").set(Property::opacity(Target::Canvas), 1.0);
    tl.start(seq);
    assert!(tl.advance(ms(1), &mut host).is_err());
}
