//! Pointer-driven parallax for decorative layers.

use crate::{
    animation::ease::Ease,
    animation::timings::MotionTimings,
    animation::tween::{Timeline, Tween},
    foundation::core::{Cursor, Vec2},
    stage::tree::{ElementId, Prop, Stage},
};

/// Pixels of travel per unit of depth at the container edge, before clamping.
pub const DEPTH_GAIN: f64 = 25.0;
/// Hard cap on the displacement of any layer, in pixels.
pub const MAX_TRAVEL_PX: f64 = 30.0;

/// Which default touch gestures the container leaves to the browser.
///
/// The container only reads the touch position, so page panning on both axes stays enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchAction {
    Auto,
    PanX,
    PanY,
    PanXPanY,
    None,
}

impl TouchAction {
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::PanX => "pan-x",
            Self::PanY => "pan-y",
            Self::PanXPanY => "pan-x pan-y",
            Self::None => "none",
        }
    }
}

/// Target offset of a layer with `depth` for a normalized cursor.
///
/// Each axis is `(c - 0.5) * depth * 25`, clamped to `±min(30, depth * 25)`. Non-finite or
/// non-positive depths do not move.
pub fn parallax_offset(cursor: Cursor, depth: f64) -> Vec2 {
    if !depth.is_finite() || depth <= 0.0 {
        return Vec2::ZERO;
    }
    let max = MAX_TRAVEL_PX.min(depth * DEPTH_GAIN);
    let axis = |c: f64| ((c - 0.5) * depth * DEPTH_GAIN).clamp(-max, max);
    Vec2::new(axis(cursor.x), axis(cursor.y))
}

/// Tweens moving each `(layer, depth)` toward its offset for `cursor`.
pub fn follow_timeline(
    layers: impl IntoIterator<Item = (ElementId, f64)>,
    cursor: Cursor,
    timings: &MotionTimings,
) -> Timeline {
    let mut tl = Timeline::new(Ease::OutQuad);
    for (id, depth) in layers {
        let offset = parallax_offset(cursor, depth);
        tl.push(Tween::to(id, Prop::ParallaxX, offset.x).over(timings.parallax_follow_ms));
        tl.push(Tween::to(id, Prop::ParallaxY, offset.y).over(timings.parallax_follow_ms));
    }
    tl
}

/// Tweens easing every mounted layer back to rest.
pub fn reset_timeline(stage: &Stage, timings: &MotionTimings) -> Timeline {
    let mut tl = Timeline::new(Ease::OutQuad);
    for id in stage.all_layers() {
        tl.push(Tween::to(id, Prop::ParallaxX, 0.0).over(timings.parallax_reset_ms));
        tl.push(Tween::to(id, Prop::ParallaxY, 0.0).over(timings.parallax_reset_ms));
    }
    tl
}

#[cfg(test)]
#[path = "../../tests/unit/effects/parallax.rs"]
mod tests;
