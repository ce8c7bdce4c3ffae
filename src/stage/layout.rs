//! Placement of decorative layers inside the container.
//!
//! Two strategies share one data model: viewport anchors (`left`/`right`, `top`/`bottom` with
//! an optional centering shift) and card attach points (the layer center pinned to a point of the
//! slide card, optionally sized from the card width).

use crate::{
    deck::model::ParallaxLayer,
    foundation::core::{Point, Rect, Size, Vec2},
};

/// Smallest rendered layer edge for viewport-anchored layers.
pub const MIN_LAYER_PX: f64 = 300.0;
/// Largest rendered layer edge for viewport-anchored layers.
pub const MAX_LAYER_PX: f64 = 2000.0;
/// Width clamp for card-scaled layers.
pub const CARD_SCALED_MIN_PX: f64 = 220.0;
pub const CARD_SCALED_MAX_PX: f64 = 900.0;

/// Layout inputs, refreshed on every container resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    pub viewport: Size,
    /// Container box in client coordinates.
    pub container: Rect,
    /// Current slide card box in client coordinates, when known.
    pub card: Option<Rect>,
}

/// Resolved layer box in container coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerPlacement {
    /// Untransformed box (origin = resolved anchor).
    pub rect: Rect,
    /// Extra shift applied before rotation (the `-50%` centering).
    pub centering: Vec2,
}

impl LayerPlacement {
    pub fn size(&self) -> Size {
        self.rect.size()
    }
}

pub fn place_layer(layer: &ParallaxLayer, ctx: &LayoutContext) -> LayerPlacement {
    if let (Some(attach), Some(card)) = (layer.attach, ctx.card) {
        return place_on_card(layer, attach.point(card), card, ctx);
    }
    place_in_viewport(layer, ctx)
}

fn place_in_viewport(layer: &ParallaxLayer, ctx: &LayoutContext) -> LayerPlacement {
    let cw = ctx.container.width();
    let ch = ctx.container.height();
    let clamp_edge = |v: f64| v.clamp(MIN_LAYER_PX, MAX_LAYER_PX);

    let w = clamp_edge(
        layer
            .width
            .map_or(MIN_LAYER_PX, |l| l.to_px(ctx.viewport, cw)),
    );
    let h = clamp_edge(
        layer
            .height
            .map_or(MIN_LAYER_PX, |l| l.to_px(ctx.viewport, ch)),
    );

    let x = match (layer.left, layer.right) {
        (Some(left), _) => left.to_px(ctx.viewport, cw),
        (None, Some(right)) => cw - right.to_px(ctx.viewport, cw) - w,
        (None, None) => 0.0,
    };
    let y = match (layer.top, layer.bottom) {
        (Some(top), _) => top.to_px(ctx.viewport, ch),
        (None, Some(bottom)) => ch - bottom.to_px(ctx.viewport, ch) - h,
        (None, None) => 0.0,
    };

    let centering = if layer.centered {
        Vec2::new(-w / 2.0, -h / 2.0)
    } else {
        Vec2::ZERO
    };
    LayerPlacement {
        rect: Rect::new(x, y, x + w, y + h),
        centering,
    }
}

fn place_on_card(
    layer: &ParallaxLayer,
    anchor: Point,
    card: Rect,
    ctx: &LayoutContext,
) -> LayerPlacement {
    let x = anchor.x - ctx.container.x0 + layer.offset_x;
    let y = anchor.y - ctx.container.y0 + layer.offset_y;

    let configured_w = layer
        .width
        .map(|l| l.to_px(ctx.viewport, ctx.container.width()));
    let configured_h = layer
        .height
        .map(|l| l.to_px(ctx.viewport, ctx.container.height()));

    let (w, h) = match layer.scale_by_card {
        Some(f) => {
            let w = (card.width() * f).clamp(CARD_SCALED_MIN_PX, CARD_SCALED_MAX_PX);
            // Keep the configured aspect ratio; square art otherwise.
            let h = match (configured_w, configured_h) {
                (Some(cw), Some(chh)) if cw > 0.0 => w * chh / cw,
                _ => w,
            };
            (w, h)
        }
        None => {
            let w = configured_w.unwrap_or(MIN_LAYER_PX);
            (w, configured_h.unwrap_or(w))
        }
    };

    LayerPlacement {
        rect: Rect::new(x, y, x + w, y + h),
        centering: Vec2::new(-w / 2.0, -h / 2.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/layout.rs"]
mod tests;
