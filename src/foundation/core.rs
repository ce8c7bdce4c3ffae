pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// A point in time on the host clock, in milliseconds.
///
/// The carousel never reads a clock itself: every event and tick carries the host time, which
/// keeps animation and autoplay deterministic under test.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Shift forward by `ms`, saturating at `u64::MAX`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Value in seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// Travel direction of a slide change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Toward higher indices (`+1`).
    Forward,
    /// Toward lower indices (`-1`).
    Backward,
}

impl Direction {
    /// Direction from `from` to `to`; `None` when they are equal.
    pub fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Self::Forward),
            std::cmp::Ordering::Less => Some(Self::Backward),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Pointer position normalized to the container box, both axes in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

impl Cursor {
    /// Container center, the resting cursor position.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Normalize client coordinates against `container`.
    ///
    /// Returns `None` for a degenerate or non-finite container or point, so callers can skip the
    /// event instead of propagating NaN offsets.
    pub fn normalize(client: Point, container: Rect) -> Option<Self> {
        let w = container.width();
        let h = container.height();
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return None;
        }
        if !(client.x.is_finite() && client.y.is_finite()) {
            return None;
        }
        let x = ((client.x - container.x0) / w).clamp(0.0, 1.0);
        let y = ((client.y - container.y0) / h).clamp(0.0, 1.0);
        Some(Self { x, y })
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Decomposed 2D transform of a stage element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_deg: f64,
    pub scale: f64,
    /// Pivot in parent space (the element center for decorative layers).
    pub anchor: Point,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
            anchor: Point::ORIGIN,
        }
    }
}

impl Transform2D {
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor.to_vec2());
        let t_unanchor = Affine::translate(-self.anchor.to_vec2());
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale(self.scale);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
