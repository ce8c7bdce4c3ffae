//! batik-carousel is a headless slideshow controller.
//!
//! It drives a decorative carousel of batik motifs: a cyclic slide navigation state machine, a
//! timeline-based transition engine, pointer and touch parallax for decorative layers, and an
//! autoplay timer coupled to page visibility. It owns no renderer. Instead it keeps an explicit
//! render tree ([`Stage`]) whose animated properties any renderer (or test) can read back through
//! [`Stage::snapshot`].
//!
//! # Driving a carousel
//!
//! 1. **Configure**: build a [`Deck`] with [`DeckBuilder`] or load it with [`Deck::from_path`].
//! 2. **Mount**: [`Carousel::mount`] validates the deck, plays the entrance and starts autoplay.
//! 3. **Feed input**: pass host events to [`Carousel::handle`] with the host time.
//! 4. **Tick**: call [`Carousel::tick`] every frame; due timers and tweens fire there.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Caller-supplied time**: nothing reads a clock, so every run is reproducible.
//! - **Latest request wins**: a new animation on an element property cancels any older one.
#![forbid(unsafe_code)]

mod animation;
mod carousel;
mod deck;
mod effects;
mod foundation;
mod playback;
mod stage;

pub use animation::ease::Ease;
pub use animation::timings::{EntranceTimings, MotionTimings};
pub use animation::tween::{Animator, Cue, Slot, Timeline, Tween};
pub use carousel::controller::{Carousel, CarouselStats, Control, Event, EventOutcome, Key};
pub use carousel::nav::{CarouselState, NavTransition, SlideNav};
pub use carousel::script::{Script, ScriptEvent};
pub use deck::dsl::{DeckBuilder, SlideBuilder};
pub use deck::length::Length;
pub use deck::model::{
    AttachPoint, Background, Deck, ParallaxLayer, ResolvedBackground, Slide, SlideContent,
    Viewport,
};
pub use effects::parallax::{
    DEPTH_GAIN, MAX_TRAVEL_PX, TouchAction, follow_timeline, parallax_offset, reset_timeline,
};
pub use effects::transitions::{entrance_timeline, slide_change_timeline};
pub use foundation::core::{
    Affine, Cursor, Direction, Millis, Point, Rect, Size, Transform2D, Vec2,
};
pub use foundation::error::{CarouselError, CarouselResult};
pub use playback::autoplay::{Autoplay, DEFAULT_AUTOPLAY_INTERVAL_MS};
pub use stage::layout::{
    CARD_SCALED_MAX_PX, CARD_SCALED_MIN_PX, LayerPlacement, LayoutContext, MAX_LAYER_PX,
    MIN_LAYER_PX, place_layer,
};
pub use stage::tree::{
    BackgroundSnapshot, ElementId, ElementKind, LayerSnapshot, Prop, Props, SlideHandles,
    SlideSnapshot, Stage, StageSnapshot, SwapRecord,
};
