//! Ordered step lists and the timeline that runs them.
//!
//! A [`Sequence`] is plain data: a list of [`Step`]s run strictly one after another. The
//! [`Timeline`] advances every running sequence on each frame and only moves a sequence to its
//! next step once the current step's time has fully elapsed. Leftover time carries into the next
//! step, so a chain lasts the sum of its step durations regardless of frame rate.

use std::fmt;
use std::time::Duration;

use crate::animation::tween::{ActiveTween, Property, PropertyAccess, TweenSpec};
use crate::foundation::error::FolioResult;

/// The environment a sequence mutates.
///
/// `Cue` is an instant effect owned by the host (flags, clip switches); `Gate` is a condition
/// the host evaluates each frame for [`Step::Until`].
pub trait SequenceHost: PropertyAccess {
    /// Host-defined instant effect.
    type Cue: Clone + fmt::Debug;
    /// Host-defined wait condition.
    type Gate: Clone + fmt::Debug;

    /// Apply `cue` immediately.
    fn apply_cue(&mut self, cue: &Self::Cue) -> FolioResult<()>;

    /// Whether `gate` currently lets the sequence through.
    fn gate_open(&self, gate: &Self::Gate) -> bool;
}

/// One descriptor in a [`Sequence`].
#[derive(Clone, Debug)]
pub enum Step<C, G> {
    /// Run these tweens together; the step ends when the longest one does.
    Tween(Vec<TweenSpec>),
    /// Do nothing for a fixed time.
    Wait(Duration),
    /// Write a value immediately.
    Set(Property, f64),
    /// Ask the host to apply an instant effect.
    Cue(C),
    /// Hold until the host opens the gate.
    Until(G),
    /// Start another sequence at this point in time and continue without waiting for it.
    Spawn(Sequence<C, G>),
}

/// Named, ordered list of steps.
#[derive(Clone, Debug)]
pub struct Sequence<C, G> {
    label: String,
    steps: Vec<Step<C, G>>,
}

impl<C, G> Sequence<C, G> {
    /// Empty sequence.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
        }
    }

    /// Label used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step<C, G>] {
        &self.steps
    }

    /// Append a raw step.
    pub fn step(mut self, step: Step<C, G>) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a single tween.
    pub fn tween(self, spec: TweenSpec) -> Self {
        self.step(Step::Tween(vec![spec]))
    }

    /// Append a group of tweens that run in parallel.
    pub fn together(self, specs: Vec<TweenSpec>) -> Self {
        self.step(Step::Tween(specs))
    }

    /// Append a pause.
    pub fn wait_ms(self, ms: u64) -> Self {
        self.step(Step::Wait(Duration::from_millis(ms)))
    }

    /// Append an immediate write.
    pub fn set(self, property: Property, value: f64) -> Self {
        self.step(Step::Set(property, value))
    }

    /// Append a host cue.
    pub fn cue(self, cue: C) -> Self {
        self.step(Step::Cue(cue))
    }

    /// Append a gate wait.
    pub fn until(self, gate: G) -> Self {
        self.step(Step::Until(gate))
    }

    /// Append a fire-and-forget child sequence.
    pub fn spawn(self, child: Sequence<C, G>) -> Self {
        self.step(Step::Spawn(child))
    }

    /// Sum of fixed step durations. Gates count as zero.
    pub fn nominal_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Tween(specs) => specs.iter().map(|s| s.duration).max().unwrap_or_default(),
                Step::Wait(d) => *d,
                _ => Duration::ZERO,
            })
            .sum()
    }
}

/// Handle to a sequence started on a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(pub u64);

struct Running<C, G> {
    id: SequenceId,
    seq: Sequence<C, G>,
    cursor: usize,
    step_started: Duration,
    tweens: Option<Vec<ActiveTween>>,
}

/// Clock plus the set of running sequences.
pub struct Timeline<C, G> {
    now: Duration,
    next_id: u64,
    running: Vec<Running<C, G>>,
}

impl<C, G> Default for Timeline<C, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, G> Timeline<C, G> {
    /// Empty timeline at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            running: Vec::new(),
        }
    }

    /// Current timeline time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start `seq` at the current time. It runs on the next [`Timeline::advance`].
    pub fn start(&mut self, seq: Sequence<C, G>) -> SequenceId {
        let at = self.now;
        self.start_at(seq, at)
    }

    fn start_at(&mut self, seq: Sequence<C, G>, at: Duration) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        tracing::debug!(sequence = seq.label(), id = id.0, "sequence started");
        self.running.push(Running {
            id,
            seq,
            cursor: 0,
            step_started: at,
            tweens: None,
        });
        id
    }

    /// Whether `id` has not finished yet.
    pub fn is_running(&self, id: SequenceId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    /// Number of unfinished sequences.
    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    /// `true` when nothing is running.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Labels of unfinished sequences, in start order.
    pub fn active_labels(&self) -> Vec<&str> {
        self.running.iter().map(|r| r.seq.label()).collect()
    }
}

impl<C: Clone + fmt::Debug, G: Clone + fmt::Debug> Timeline<C, G> {
    /// Move the clock forward by `dt` and drive every running sequence as far as it can go.
    ///
    /// Returns the ids of sequences that finished during this call, in completion order.
    pub fn advance<H>(&mut self, dt: Duration, host: &mut H) -> FolioResult<Vec<SequenceId>>
    where
        H: SequenceHost<Cue = C, Gate = G>,
    {
        self.now += dt;
        let now = self.now;
        let mut finished = Vec::new();
        let mut spawned = Vec::new();

        let mut i = 0;
        while i < self.running.len() {
            let done = drive(&mut self.running[i], now, host, &mut spawned)?;
            for (child, at) in spawned.drain(..) {
                self.start_at(child, at);
            }
            if done {
                let run = self.running.remove(i);
                tracing::debug!(sequence = run.seq.label(), id = run.id.0, "sequence finished");
                finished.push(run.id);
            } else {
                i += 1;
            }
        }
        Ok(finished)
    }
}

fn drive<H: SequenceHost>(
    run: &mut Running<H::Cue, H::Gate>,
    now: Duration,
    host: &mut H,
    spawned: &mut Vec<(Sequence<H::Cue, H::Gate>, Duration)>,
) -> FolioResult<bool> {
    loop {
        let Some(step) = run.seq.steps.get(run.cursor) else {
            return Ok(true);
        };

        match step {
            Step::Tween(specs) => {
                if run.tweens.is_none() {
                    let begun = specs
                        .iter()
                        .map(|spec| ActiveTween::begin(*spec, &*host))
                        .collect::<FolioResult<Vec<_>>>()?;
                    run.tweens = Some(begun);
                }
                let elapsed = now.saturating_sub(run.step_started);
                let span = specs.iter().map(|s| s.duration).max().unwrap_or_default();
                if let Some(tweens) = run.tweens.as_ref() {
                    for tween in tweens {
                        host.write(tween.property(), tween.value_at(elapsed))?;
                    }
                }
                if elapsed < span {
                    return Ok(false);
                }
                run.tweens = None;
                run.step_started += span;
            }
            Step::Wait(d) => {
                let end = run.step_started + *d;
                if now < end {
                    return Ok(false);
                }
                run.step_started = end;
            }
            Step::Set(prop, value) => host.write(*prop, *value)?,
            Step::Cue(cue) => host.apply_cue(cue)?,
            Step::Until(gate) => {
                if !host.gate_open(gate) {
                    return Ok(false);
                }
                run.step_started = run.step_started.max(now);
            }
            Step::Spawn(child) => spawned.push((child.clone(), run.step_started)),
        }
        run.cursor += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
