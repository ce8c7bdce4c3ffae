//! Slide-change and first-render timelines.

use crate::{
    animation::{
        ease::Ease,
        timings::MotionTimings,
        tween::{Cue, Timeline, Tween},
    },
    carousel::nav::NavTransition,
    deck::model::Deck,
    stage::tree::{ElementId, Prop, Stage},
};

/// Timeline for one slide change.
///
/// Layout relative to the call:
/// - background fades out, the image is swapped at minimum opacity, then it fades back in;
/// - the outgoing decorations shrink and fade while the outgoing panel slides away;
/// - the incoming panel slides in from the travel side, slightly delayed;
/// - the incoming content block rises in once everything above has been laid out;
/// - the incoming decorations are posed and fade in, staggered, once the panel has settled.
///
/// Returns `None` when either panel is not mounted; nothing is animated in that case.
pub fn slide_change_timeline(
    stage: &Stage,
    deck: &Deck,
    change: NavTransition,
    timings: &MotionTimings,
) -> Option<Timeline> {
    let outgoing = stage.slide(change.from)?;
    let incoming = stage.slide(change.to)?;
    let next = deck.slides.get(change.to)?;
    let sign = change.direction.sign();
    let shift = timings.panel_shift_percent;

    let mut tl = Timeline::new(Ease::InOutCubic);

    let bg = stage.background();
    tl.push(Tween::to(bg, Prop::Opacity, 0.0).over(timings.bg_fade_ms));
    tl.cue(
        timings.bg_fade_ms,
        Cue::SwapBackground {
            target: bg,
            background: next.background.resolved(),
        },
    );
    tl.push(
        Tween::to(bg, Prop::Opacity, 1.0)
            .at(timings.bg_fade_ms)
            .over(timings.bg_fade_ms),
    );

    for &layer in &outgoing.layers {
        tl.push(Tween::to(layer, Prop::Opacity, 0.0).over(timings.decor_out_ms));
        tl.push(
            Tween::to(layer, Prop::Scale, timings.decor_hidden_scale).over(timings.decor_out_ms),
        );
    }

    tl.push(Tween::to(outgoing.panel, Prop::XPercent, -sign * shift).over(timings.panel_out_ms));
    tl.push(Tween::to(outgoing.panel, Prop::Opacity, 0.0).over(timings.panel_out_ms));

    tl.push(
        Tween::from_to(incoming.panel, Prop::XPercent, sign * shift, 0.0)
            .at(timings.panel_in_delay_ms)
            .over(timings.panel_in_ms),
    );
    tl.push(
        Tween::from_to(incoming.panel, Prop::Opacity, 0.0, 1.0)
            .at(timings.panel_in_delay_ms)
            .over(timings.panel_in_ms),
    );

    let rise_at = tl.end_ms();
    tl.push(
        Tween::from_to(incoming.content, Prop::Rise, timings.content_rise_px, 0.0)
            .at(rise_at)
            .over(timings.content_rise_ms)
            .ease(Ease::OutCubic),
    );
    tl.push(
        Tween::from_to(incoming.content, Prop::Opacity, 0.0, 1.0)
            .at(rise_at)
            .over(timings.content_rise_ms)
            .ease(Ease::OutCubic),
    );

    let settle = timings.panel_settle_ms();
    let entering: Vec<_> = incoming.layers.iter().copied().zip(&next.parallax_layers).collect();
    for &(layer, def) in &entering {
        tl.cue(
            settle,
            Cue::PoseLayer {
                target: layer,
                rotate_deg: def.rotate,
            },
        );
    }
    tl.stagger(
        entering.iter().map(|&(layer, def)| {
            Tween::from_to(layer, Prop::Opacity, 0.0, def.opacity)
                .at(settle)
                .over(timings.decor_in_ms)
                .ease(Ease::OutCubic)
        }),
        timings.decor_stagger_ms,
    );
    tl.stagger(
        entering.iter().map(|&(layer, _)| {
            Tween::from_to(layer, Prop::Scale, timings.decor_hidden_scale, 1.0)
                .at(settle)
                .over(timings.decor_in_ms)
                .ease(Ease::OutCubic)
        }),
        timings.decor_stagger_ms,
    );

    Some(tl)
}

/// First-render entrance of slide `index`: the card, its title and text blocks, then the
/// decorations rise into place.
///
/// Returns `None` when the slide is not mounted.
pub fn entrance_timeline(
    stage: &Stage,
    deck: &Deck,
    index: usize,
    timings: &MotionTimings,
) -> Option<Timeline> {
    let handles = stage.slide(index)?;
    let slide = deck.slides.get(index)?;
    let e = &timings.entrance;
    let mut tl = Timeline::new(Ease::OutCubic);

    let rise = |id: ElementId, px: f64, at: u64, ms: u64| {
        Tween::from_to(id, Prop::Rise, px, 0.0).at(at).over(ms)
    };
    let fade = |id: ElementId, opacity: f64, at: u64, ms: u64| {
        Tween::from_to(id, Prop::Opacity, 0.0, opacity).at(at).over(ms)
    };

    tl.push(rise(handles.content, e.card_rise_px, 0, e.card_ms));
    tl.push(fade(handles.content, 1.0, 0, e.card_ms));
    tl.push(rise(handles.title, e.title_rise_px, e.title_delay_ms, e.title_ms));
    tl.push(fade(handles.title, 1.0, e.title_delay_ms, e.title_ms));

    let blocks = &handles.text_blocks;
    tl.stagger(
        blocks
            .iter()
            .map(|&b| rise(b, e.text_rise_px, e.text_delay_ms, e.text_ms)),
        e.text_stagger_ms,
    );
    tl.stagger(
        blocks.iter().map(|&b| fade(b, 1.0, e.text_delay_ms, e.text_ms)),
        e.text_stagger_ms,
    );

    let decor: Vec<_> = handles.layers.iter().copied().zip(&slide.parallax_layers).collect();
    tl.stagger(
        decor
            .iter()
            .map(|&(layer, _)| rise(layer, e.decor_rise_px, 0, e.decor_ms)),
        e.decor_stagger_ms,
    );
    tl.stagger(
        decor
            .iter()
            .map(|&(layer, def)| fade(layer, def.opacity, 0, e.decor_ms)),
        e.decor_stagger_ms,
    );

    Some(tl)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
