use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    deck::model::ResolvedBackground,
    foundation::core::Millis,
    stage::tree::{ElementId, Prop, Stage},
};

/// What a scheduled item writes to. Two items on the same slot never run together: the most
/// recently scheduled or most recently started one wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Prop(ElementId, Prop),
    BackgroundImage(ElementId),
}

/// A single property animation, positioned on a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: ElementId,
    pub prop: Prop,
    /// Start value; `None` reads the element's value at the moment the tween starts.
    pub from: Option<f64>,
    pub to: f64,
    /// Offset from the timeline start.
    pub at_ms: u64,
    pub duration_ms: u64,
    /// `None` uses the timeline default.
    pub ease: Option<Ease>,
}

impl Tween {
    /// Animate from the current value to `to`.
    pub fn to(target: ElementId, prop: Prop, to: f64) -> Self {
        Self {
            target,
            prop,
            from: None,
            to,
            at_ms: 0,
            duration_ms: 0,
            ease: None,
        }
    }

    /// Animate from `from` to `to`. The start value is applied as soon as the timeline is
    /// scheduled, so a delayed tween never shows a stale value.
    pub fn from_to(target: ElementId, prop: Prop, from: f64, to: f64) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, prop, to)
        }
    }

    pub fn at(mut self, ms: u64) -> Self {
        self.at_ms = ms;
        self
    }

    pub fn over(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn end_ms(&self) -> u64 {
        self.at_ms.saturating_add(self.duration_ms)
    }

    fn slot(&self) -> Slot {
        Slot::Prop(self.target, self.prop)
    }
}

/// A one-shot action fired at a point of a timeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    /// Replace the background descriptor.
    SwapBackground {
        target: ElementId,
        background: ResolvedBackground,
    },
    /// Apply a layer's configured rotation before it fades in.
    PoseLayer { target: ElementId, rotate_deg: f64 },
}

impl Cue {
    fn slot(&self) -> Slot {
        match self {
            Self::SwapBackground { target, .. } => Slot::BackgroundImage(*target),
            Self::PoseLayer { target, .. } => Slot::Prop(*target, Prop::RotateDeg),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Step {
    Tween(Tween),
    Cue { at_ms: u64, cue: Cue },
}

impl Step {
    fn at_ms(&self) -> u64 {
        match self {
            Self::Tween(t) => t.at_ms,
            Self::Cue { at_ms, .. } => *at_ms,
        }
    }

    fn end_ms(&self) -> u64 {
        match self {
            Self::Tween(t) => t.end_ms(),
            Self::Cue { at_ms, .. } => *at_ms,
        }
    }

    fn slot(&self) -> Slot {
        match self {
            Self::Tween(t) => t.slot(),
            Self::Cue { cue, .. } => cue.slot(),
        }
    }
}

/// An ordered group of tweens and cues scheduled together.
///
/// Steps sharing a start time run in insertion order, which is how a cue placed at the end of a
/// fade-out is guaranteed to run after that fade completes and before the fade-in that starts at
/// the same offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
    default_ease: Ease,
}

impl Timeline {
    pub fn new(default_ease: Ease) -> Self {
        Self {
            steps: Vec::new(),
            default_ease,
        }
    }

    pub fn push(&mut self, tween: Tween) -> &mut Self {
        self.steps.push(Step::Tween(tween));
        self
    }

    pub fn cue(&mut self, at_ms: u64, cue: Cue) -> &mut Self {
        self.steps.push(Step::Cue { at_ms, cue });
        self
    }

    /// Push `tweens` with start offsets spread `each_ms` apart, in order.
    pub fn stagger(&mut self, tweens: impl IntoIterator<Item = Tween>, each_ms: u64) -> &mut Self {
        for (k, t) in tweens.into_iter().enumerate() {
            let shift = each_ms.saturating_mul(k as u64);
            let at = t.at_ms.saturating_add(shift);
            self.push(t.at(at));
        }
        self
    }

    /// Offset at which the last step ends.
    pub fn end_ms(&self) -> u64 {
        self.steps.iter().map(Step::end_ms).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn tweens(&self) -> impl Iterator<Item = &Tween> {
        self.steps.iter().filter_map(|s| match s {
            Step::Tween(t) => Some(t),
            Step::Cue { .. } => None,
        })
    }

    /// Cues with their offsets.
    pub fn cues(&self) -> impl Iterator<Item = (u64, &Cue)> {
        self.steps.iter().filter_map(|s| match s {
            Step::Cue { at_ms, cue } => Some((*at_ms, cue)),
            Step::Tween(_) => None,
        })
    }
}

#[derive(Clone, Debug)]
struct Active {
    seq: u64,
    start: Millis,
    step: Step,
    ease: Ease,
    /// Captured start value once the tween has begun.
    began_from: Option<f64>,
}

/// Runs scheduled timelines against a [`Stage`].
///
/// Scheduling a timeline cancels every pending or running step on any slot the new timeline
/// touches, so a rapid sequence of requests always converges on the latest targets and no step
/// outlives its replacement.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    active: Vec<Active>,
    next_seq: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending or running steps.
    pub fn pending(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether any pending or running step writes to `slot`.
    pub fn is_animating(&self, slot: Slot) -> bool {
        self.active.iter().any(|a| a.step.slot() == slot)
    }

    /// Drop everything without touching the stage.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Schedule `timeline` to start at `now`.
    pub fn schedule(&mut self, timeline: Timeline, now: Millis, stage: &mut Stage) {
        let touched: BTreeSet<Slot> = timeline.steps.iter().map(Step::slot).collect();
        let before = self.active.len();
        self.active.retain(|a| !touched.contains(&a.step.slot()));
        let superseded = before - self.active.len();
        if superseded > 0 {
            tracing::trace!(superseded, "superseded in-flight animation steps");
        }

        let default_ease = timeline.default_ease;
        for step in timeline.steps {
            if let Step::Tween(Tween {
                target,
                prop,
                from: Some(from),
                ..
            }) = &step
            {
                stage.set(*target, *prop, *from);
            }
            let ease = match &step {
                Step::Tween(t) => t.ease.unwrap_or(default_ease),
                Step::Cue { .. } => default_ease,
            };
            let start = now.after(step.at_ms());
            self.active.push(Active {
                seq: self.next_seq,
                start,
                step,
                ease,
                began_from: None,
            });
            self.next_seq += 1;
        }
    }

    /// Advance every step to `now`, writing sampled values and firing due cues.
    ///
    /// Steps are processed in `(start, schedule order)`. A step whose target is no longer mounted
    /// is dropped without effect.
    pub fn advance(&mut self, now: Millis, stage: &mut Stage) {
        self.active.sort_by_key(|a| (a.start, a.seq));

        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].start > now {
                break;
            }

            let starting_tween = match &self.active[i].step {
                Step::Tween(t) if self.active[i].began_from.is_none() => Some(t.slot()),
                _ => None,
            };
            if let Some(slot) = starting_tween {
                let seq = self.active[i].seq;
                let start = self.active[i].start;
                // Started tweens on the same slot that began earlier yield to this one.
                let mut removed_before = 0;
                let mut j = 0;
                self.active.retain(|a| {
                    let keep = !(a.began_from.is_some()
                        && a.step.slot() == slot
                        && (a.start, a.seq) < (start, seq));
                    if !keep && j < i {
                        removed_before += 1;
                    }
                    j += 1;
                    keep
                });
                i -= removed_before;
            }

            let done = Self::apply(&mut self.active[i], now, stage);
            if done {
                self.active.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Returns `true` once the step has finished (or its target is gone).
    fn apply(a: &mut Active, now: Millis, stage: &mut Stage) -> bool {
        match &a.step {
            Step::Cue { cue, .. } => {
                match cue {
                    Cue::SwapBackground { target, background } => {
                        if stage.contains(*target) {
                            stage.swap_background(background.clone(), a.start);
                        }
                    }
                    Cue::PoseLayer { target, rotate_deg } => {
                        stage.set(*target, Prop::RotateDeg, *rotate_deg);
                    }
                }
                true
            }
            Step::Tween(t) => {
                let from = match a.began_from {
                    Some(v) => v,
                    None => {
                        let Some(current) = stage.get(t.target, t.prop) else {
                            return true;
                        };
                        let v = t.from.unwrap_or(current);
                        a.began_from = Some(v);
                        v
                    }
                };
                let elapsed = now.since(a.start);
                let progress = if t.duration_ms == 0 {
                    1.0
                } else {
                    elapsed as f64 / t.duration_ms as f64
                };
                let value = a.ease.interpolate(from, t.to, progress);
                if !stage.set(t.target, t.prop, value) {
                    return true;
                }
                progress >= 1.0
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
