use super::*;
use crate::deck::dsl::{DeckBuilder, SlideBuilder};
use crate::deck::model::{Deck, ParallaxLayer};
use crate::foundation::core::{Rect, Size};
use crate::stage::layout::LayoutContext;

fn deck() -> Deck {
    DeckBuilder::new()
        .slide(
            SlideBuilder::new("a")
                .background("url('/a.jpg')")
                .layer(ParallaxLayer::new("/a.svg").depth(0.5))
                .build()
                .unwrap(),
        )
        .unwrap()
        .slide(
            SlideBuilder::new("b")
                .background("url('/b.jpg')")
                .build()
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn stage(deck: &Deck) -> Stage {
    let layout = LayoutContext {
        viewport: Size::new(1000.0, 1000.0),
        container: Rect::new(0.0, 0.0, 1000.0, 1000.0),
        card: None,
    };
    Stage::new(deck, 0, &layout)
}

#[test]
fn tween_samples_with_ease_and_completes() {
    let deck = deck();
    let mut stage = stage(&deck);
    let bg = stage.background();
    let mut anim = Animator::new();
    let mut tl = Timeline::new(Ease::Linear);
    tl.push(Tween::to(bg, Prop::Opacity, 0.0).over(400));
    anim.schedule(tl, Millis(1000), &mut stage);

    anim.advance(Millis(1100), &mut stage);
    assert_eq!(stage.get(bg, Prop::Opacity), Some(0.75));
    anim.advance(Millis(1400), &mut stage);
    assert_eq!(stage.get(bg, Prop::Opacity), Some(0.0));
    assert!(anim.is_idle());
}

#[test]
fn from_to_renders_start_value_immediately() {
    let deck = deck();
    let mut stage = stage(&deck);
    let panel = stage.slide(1).unwrap().panel;
    let mut anim = Animator::new();
    let mut tl = Timeline::new(Ease::Linear);
    tl.push(
        Tween::from_to(panel, Prop::XPercent, 20.0, 0.0)
            .at(100)
            .over(600),
    );
    anim.schedule(tl, Millis(0), &mut stage);
    assert_eq!(stage.get(panel, Prop::XPercent), Some(20.0));
    anim.advance(Millis(50), &mut stage);
    assert_eq!(stage.get(panel, Prop::XPercent), Some(20.0));
    anim.advance(Millis(400), &mut stage);
    assert_eq!(stage.get(panel, Prop::XPercent), Some(10.0));
}

#[test]
fn cue_runs_between_fades_sharing_its_offset() {
    let deck = deck();
    let mut stage = stage(&deck);
    let bg = stage.background();
    let mut anim = Animator::new();
    let mut tl = Timeline::new(Ease::InOutCubic);
    tl.push(Tween::to(bg, Prop::Opacity, 0.0).over(400));
    tl.cue(
        400,
        Cue::SwapBackground {
            target: bg,
            background: deck.slides[1].background.resolved(),
        },
    );
    tl.push(Tween::to(bg, Prop::Opacity, 1.0).at(400).over(400));
    anim.schedule(tl, Millis(0), &mut stage);

    // One coarse step across the whole timeline still observes the order.
    anim.advance(Millis(5_000), &mut stage);
    let swap = stage.last_swap().unwrap();
    assert_eq!(swap.opacity, 0.0);
    assert_eq!(swap.at, Millis(400));
    assert_eq!(stage.get(bg, Prop::Opacity), Some(1.0));
    assert_eq!(stage.background_desc().image, "url('/b.jpg')");
}

#[test]
fn scheduling_supersedes_steps_on_same_slot() {
    let deck = deck();
    let mut stage = stage(&deck);
    let bg = stage.background();
    let mut anim = Animator::new();

    let mut first = Timeline::new(Ease::Linear);
    first.push(Tween::to(bg, Prop::Opacity, 0.0).over(1000));
    first.cue(
        1000,
        Cue::SwapBackground {
            target: bg,
            background: deck.slides[1].background.resolved(),
        },
    );
    anim.schedule(first, Millis(0), &mut stage);
    anim.advance(Millis(500), &mut stage);
    assert_eq!(stage.get(bg, Prop::Opacity), Some(0.5));

    let mut second = Timeline::new(Ease::Linear);
    second.push(Tween::to(bg, Prop::Opacity, 1.0).over(500));
    anim.schedule(second, Millis(500), &mut stage);
    // The swap cue survives: the new timeline does not touch the image slot.
    assert!(anim.is_animating(Slot::BackgroundImage(bg)));

    anim.advance(Millis(750), &mut stage);
    assert_eq!(stage.get(bg, Prop::Opacity), Some(0.75));
    anim.advance(Millis(2_000), &mut stage);
    assert_eq!(stage.get(bg, Prop::Opacity), Some(1.0));
    assert!(anim.is_idle());
}

#[test]
fn later_starting_tween_takes_over_running_one() {
    let deck = deck();
    let mut stage = stage(&deck);
    let layer = stage.slide(0).unwrap().layers[0];
    let mut anim = Animator::new();
    let mut tl = Timeline::new(Ease::Linear);
    tl.push(Tween::to(layer, Prop::ParallaxX, 100.0).over(1000));
    tl.push(Tween::to(layer, Prop::ParallaxX, 0.0).at(500).over(500));
    anim.schedule(tl, Millis(0), &mut stage);

    anim.advance(Millis(500), &mut stage);
    assert_eq!(stage.get(layer, Prop::ParallaxX), Some(50.0));
    assert_eq!(anim.pending(), 1);
    anim.advance(Millis(750), &mut stage);
    assert_eq!(stage.get(layer, Prop::ParallaxX), Some(25.0));
}

#[test]
fn steps_on_unmounted_targets_are_dropped() {
    let deck = deck();
    let mut stage = stage(&deck);
    let panel = stage.slide(1).unwrap().panel;
    let mut anim = Animator::new();
    let mut tl = Timeline::new(Ease::Linear);
    tl.push(Tween::to(panel, Prop::Opacity, 1.0).over(300));
    anim.schedule(tl, Millis(0), &mut stage);
    stage.unmount_slide(1);
    anim.advance(Millis(100), &mut stage);
    assert!(anim.is_idle());
}

#[test]
fn stagger_spreads_offsets_and_end_tracks_last_step() {
    let deck = deck();
    let stage = stage(&deck);
    let bg = stage.background();
    let mut tl = Timeline::new(Ease::Linear);
    tl.stagger(
        (0..3).map(|_| Tween::to(bg, Prop::Scale, 1.0).at(700).over(600)),
        100,
    );
    let starts: Vec<u64> = tl.tweens().map(|t| t.at_ms).collect();
    assert_eq!(starts, vec![700, 800, 900]);
    assert_eq!(tl.end_ms(), 1500);
    assert_eq!(tl.len(), 3);
}
