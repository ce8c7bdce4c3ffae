//! Easing, timing configuration and the tween engine.

pub mod ease;
pub mod timings;
pub mod tween;
