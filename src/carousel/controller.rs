use crate::{
    animation::tween::{Animator, Timeline},
    carousel::nav::{CarouselState, NavTransition},
    deck::model::Deck,
    effects::{
        parallax::{TouchAction, follow_timeline, reset_timeline},
        transitions::{entrance_timeline, slide_change_timeline},
    },
    foundation::{
        core::{Cursor, Millis, Point, Rect, Size},
        error::CarouselResult,
    },
    playback::autoplay::Autoplay,
    stage::{
        layout::LayoutContext,
        tree::{Stage, StageSnapshot},
    },
};

/// Keys the carousel reacts to. Anything else is carried through and ignored.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other(name),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::ArrowLeft => "ArrowLeft".to_owned(),
            Key::ArrowRight => "ArrowRight".to_owned(),
            Key::Other(name) => name,
        }
    }
}

/// On-page navigation controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Previous,
    Next,
    /// Dot indicator for slide `i`.
    Indicator(usize),
}

/// Host input, already stripped down to what the carousel reads.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PointerMove {
        client: Point,
        container: Rect,
    },
    PointerLeave,
    /// Active touch points in client coordinates; only the first one is read.
    TouchStart {
        touches: Vec<Point>,
        container: Rect,
    },
    TouchMove {
        touches: Vec<Point>,
        container: Rect,
    },
    TouchEnd,
    TouchCancel,
    KeyDown {
        key: Key,
    },
    Control {
        control: Control,
    },
    VisibilityChange {
        visible: bool,
    },
    Resize {
        container: Rect,
        #[serde(default)]
        card: Option<Rect>,
        #[serde(default)]
        viewport: Option<Size>,
    },
}

/// What handling one event did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EventOutcome {
    /// The slide change this event caused, if any.
    pub navigated: Option<NavTransition>,
    /// Whether the host should suppress the event's default action.
    pub prevent_default: bool,
}

impl EventOutcome {
    fn from_change(change: Option<NavTransition>) -> Self {
        Self {
            navigated: change,
            prevent_default: false,
        }
    }

    fn claimed() -> Self {
        Self {
            navigated: None,
            prevent_default: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CarouselStats {
    /// Slide changes that ran a transition.
    pub transitions: u64,
    /// Slide changes whose transition was skipped because a panel was not mounted.
    pub skipped_transitions: u64,
    /// Slide changes triggered by autoplay.
    pub autoplay_advances: u64,
    /// Whole deck cycles of autoplay periods dropped after a long gap between ticks.
    pub autoplay_periods_skipped: u64,
}

/// A mounted slideshow: navigation, animation, parallax and autoplay over one [`Deck`].
///
/// The carousel is driven entirely by the host. Every input carries the host time, and
/// [`Carousel::tick`] fires whatever came due in between. Time never runs backwards: an
/// earlier timestamp than one already seen is treated as "now".
#[derive(Clone, Debug)]
pub struct Carousel {
    deck: Deck,
    state: CarouselState,
    stage: Stage,
    animator: Animator,
    autoplay: Autoplay,
    layout: LayoutContext,
    now: Millis,
    mounted: bool,
    stats: CarouselStats,
}

impl Carousel {
    /// Validate `deck`, build the stage on slide `0`, play the entrance and start autoplay.
    #[tracing::instrument(skip(deck), fields(slides = deck.slides.len()))]
    pub fn mount(deck: Deck, container: Rect, now: Millis) -> CarouselResult<Self> {
        deck.validate()?;
        let mut autoplay = Autoplay::new(deck.autoplay_interval_ms)?;
        let layout = LayoutContext {
            viewport: deck.viewport.size(),
            container,
            card: None,
        };
        autoplay.start(now);
        let state = CarouselState::new(deck.slides.len());
        let stage = Stage::new(&deck, state.current_index(), &layout);

        let mut carousel = Self {
            deck,
            state,
            stage,
            animator: Animator::new(),
            autoplay,
            layout,
            now,
            mounted: true,
            stats: CarouselStats::default(),
        };
        if let Some(tl) = entrance_timeline(
            &carousel.stage,
            &carousel.deck,
            carousel.state.current_index(),
            &carousel.deck.timings,
        ) {
            carousel.schedule(tl, now);
        }
        Ok(carousel)
    }

    /// Detach: stop autoplay and drop pending animation. Later input is ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.autoplay.stop();
        self.animator.clear();
        tracing::debug!("carousel unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Dispatch one host event at `now`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn handle(&mut self, event: Event, now: Millis) -> EventOutcome {
        if !self.mounted {
            tracing::debug!("event after unmount ignored");
            return EventOutcome::default();
        }
        let now = self.tick(now);

        match event {
            Event::PointerMove { client, container } => {
                self.follow(client, container, now);
                EventOutcome::claimed()
            }
            Event::TouchStart { touches, container }
            | Event::TouchMove { touches, container } => {
                match touches.first() {
                    Some(&touch) => self.follow(touch, container, now),
                    None => tracing::debug!("touch event without touch points ignored"),
                }
                EventOutcome::claimed()
            }
            Event::PointerLeave | Event::TouchEnd | Event::TouchCancel => {
                self.reset_parallax(now);
                EventOutcome::default()
            }
            Event::KeyDown { key } => match key {
                Key::ArrowLeft => EventOutcome::from_change(self.step(now, false)),
                Key::ArrowRight => EventOutcome::from_change(self.step(now, true)),
                Key::Other(_) => EventOutcome::default(),
            },
            Event::Control { control } => {
                let change = match control {
                    Control::Previous => self.step(now, false),
                    Control::Next => self.step(now, true),
                    Control::Indicator(i) => self.jump(i, now),
                };
                EventOutcome::from_change(change)
            }
            Event::VisibilityChange { visible } => {
                self.autoplay.set_visible(visible, now);
                tracing::debug!(visible, "autoplay visibility changed");
                EventOutcome::default()
            }
            Event::Resize {
                container,
                card,
                viewport,
            } => {
                self.layout.container = container;
                self.layout.card = card;
                if let Some(viewport) = viewport {
                    self.layout.viewport = viewport;
                }
                self.stage.relayout(&self.deck, &self.layout);
                EventOutcome::default()
            }
        }
    }

    /// Fire due autoplay periods and advance animation to `now`. Returns the effective time.
    ///
    /// Each elapsed autoplay period navigates at its own due time, so animation state observed
    /// after a long gap matches what frame-by-frame ticking would have produced. Catch-up is
    /// bounded to one deck length: whole cycles beyond that are dropped, which leaves the landing
    /// index unchanged.
    pub fn tick(&mut self, now: Millis) -> Millis {
        let now = now.max(self.now);
        if !self.mounted {
            return now;
        }
        let len = self.state.nav.len() as u64;
        let pending = self.autoplay.pending(now);
        if pending > len {
            let skipped = (pending - 1) / len * len;
            self.autoplay.skip(skipped);
            self.stats.autoplay_periods_skipped += skipped;
            tracing::debug!(pending, skipped, "autoplay catch-up truncated");
        }
        while let Some(due) = self.autoplay.poll(now) {
            self.animator.advance(due, &mut self.stage);
            let change = self.state.nav.go_next();
            if let Some(change) = change {
                self.stats.autoplay_advances += 1;
                self.run_transition(change, due);
            }
        }
        self.animator.advance(now, &mut self.stage);
        self.now = now;
        now
    }

    pub fn go_next(&mut self, now: Millis) -> Option<NavTransition> {
        let now = self.entry(now)?;
        self.step(now, true)
    }

    pub fn go_previous(&mut self, now: Millis) -> Option<NavTransition> {
        let now = self.entry(now)?;
        self.step(now, false)
    }

    pub fn jump_to(&mut self, index: usize, now: Millis) -> Option<NavTransition> {
        let now = self.entry(now)?;
        self.jump(index, now)
    }

    /// (Re)create the elements of slide `index`. The current slide mounts visible.
    pub fn mount_slide(&mut self, index: usize) -> bool {
        let visible = index == self.state.current_index();
        self.stage
            .mount_slide(&self.deck, index, visible, &self.layout)
            .is_some()
    }

    /// Remove the elements of slide `index`; transitions touching it are skipped until it is
    /// mounted again.
    pub fn unmount_slide(&mut self, index: usize) -> bool {
        self.stage.unmount_slide(index)
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn layout(&self) -> &LayoutContext {
        &self.layout
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn stats(&self) -> CarouselStats {
        self.stats
    }

    /// Whether any animation is pending or running.
    /// Stop the autoplay timer without detaching. A later visibility change restarts it.
    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle()
    }

    /// Default touch gestures the container keeps enabled.
    pub fn touch_action(&self) -> TouchAction {
        TouchAction::PanXPanY
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.stage.snapshot(
            &self.deck,
            self.now,
            self.state.current_index(),
            self.state.cursor,
        )
    }

    fn entry(&mut self, now: Millis) -> Option<Millis> {
        if !self.mounted {
            tracing::debug!("navigation after unmount ignored");
            return None;
        }
        Some(self.tick(now))
    }

    fn step(&mut self, now: Millis, forward: bool) -> Option<NavTransition> {
        let change = if forward {
            self.state.nav.go_next()
        } else {
            self.state.nav.go_previous()
        };
        match change {
            Some(change) => self.run_transition(change, now),
            None => tracing::debug!("single slide, nothing to navigate to"),
        }
        change
    }

    fn jump(&mut self, index: usize, now: Millis) -> Option<NavTransition> {
        let change = self.state.nav.jump_to(index);
        match change {
            Some(change) => self.run_transition(change, now),
            None => tracing::debug!(index, "jump is a no-op"),
        }
        change
    }

    fn run_transition(&mut self, change: NavTransition, now: Millis) {
        match slide_change_timeline(&self.stage, &self.deck, change, &self.deck.timings) {
            Some(tl) => {
                self.stats.transitions += 1;
                self.schedule(tl, now);
            }
            None => {
                self.stats.skipped_transitions += 1;
                tracing::debug!(
                    from = change.from,
                    to = change.to,
                    "slide panel not mounted, transition skipped"
                );
            }
        }
    }

    fn follow(&mut self, client: Point, container: Rect, now: Millis) {
        let Some(cursor) = Cursor::normalize(client, container) else {
            tracing::debug!(?container, "degenerate container, pointer ignored");
            return;
        };
        self.state.cursor = cursor;
        let current = self.state.current_index();
        let Some(handles) = self.stage.slide(current) else {
            return;
        };
        let layers: Vec<_> = handles
            .layers
            .iter()
            .copied()
            .zip(self.deck.slides[current].parallax_layers.iter().map(|l| l.depth))
            .collect();
        let tl = follow_timeline(layers, cursor, &self.deck.timings);
        self.schedule(tl, now);
    }

    fn reset_parallax(&mut self, now: Millis) {
        self.state.cursor = Cursor::CENTER;
        let tl = reset_timeline(&self.stage, &self.deck.timings);
        self.schedule(tl, now);
    }

    fn schedule(&mut self, tl: Timeline, now: Millis) {
        if tl.is_empty() {
            return;
        }
        self.animator.schedule(tl, now, &mut self.stage);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/controller.rs"]
mod tests;
