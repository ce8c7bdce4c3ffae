use super::*;
use crate::animation::tween::Animator;
use crate::deck::dsl::{DeckBuilder, SlideBuilder};
use crate::deck::model::ParallaxLayer;
use crate::foundation::core::{Direction, Millis, Rect, Size};
use crate::stage::layout::LayoutContext;

fn deck() -> Deck {
    let mk = |key: &str| {
        SlideBuilder::new(key)
            .title(key)
            .origin("Yogyakarta")
            .philosophy("...")
            .background(format!("url('/{key}.jpg')"))
            .layer(ParallaxLayer::new("/kawung.svg").depth(0.6).opacity(0.7).rotate(45.0))
            .layer(ParallaxLayer::new("/mega.svg").depth(0.3).opacity(0.5))
            .build()
            .unwrap()
    };
    DeckBuilder::new()
        .slide(mk("kawung"))
        .unwrap()
        .slide(mk("mega-mendung"))
        .unwrap()
        .build()
        .unwrap()
}

fn layout() -> LayoutContext {
    LayoutContext {
        viewport: Size::new(1920.0, 1080.0),
        container: Rect::new(0.0, 0.0, 1920.0, 1080.0),
        card: None,
    }
}

fn forward() -> NavTransition {
    NavTransition {
        from: 0,
        to: 1,
        direction: Direction::Forward,
    }
}

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

#[test]
fn timeline_layout_matches_default_timings() {
    let deck = deck();
    let stage = Stage::new(&deck, 0, &layout());
    let tl = slide_change_timeline(&stage, &deck, forward(), &deck.timings).unwrap();

    let cues: Vec<u64> = tl.cues().map(|(at, _)| at).collect();
    assert_eq!(cues, vec![400, 700, 700]);

    let incoming = stage.slide(1).unwrap();
    let content_starts: Vec<u64> = tl
        .tweens()
        .filter(|t| t.target == incoming.content)
        .map(|t| t.at_ms)
        .collect();
    assert_eq!(content_starts, vec![800, 800]);

    let layer_starts = |id: ElementId| -> Vec<u64> {
        tl.tweens()
            .filter(|t| t.target == id)
            .map(|t| t.at_ms)
            .collect()
    };
    assert_eq!(layer_starts(incoming.layers[0]), vec![700, 700]);
    assert_eq!(layer_starts(incoming.layers[1]), vec![800, 800]);
    assert_eq!(tl.end_ms(), 1400);
}

#[test]
fn incoming_panel_enters_from_travel_side() {
    let deck = deck();
    let mut stage = Stage::new(&deck, 1, &layout());
    let mut anim = Animator::new();
    let back = NavTransition {
        from: 1,
        to: 0,
        direction: Direction::Backward,
    };
    let tl = slide_change_timeline(&stage, &deck, back, &deck.timings).unwrap();
    anim.schedule(tl, Millis(0), &mut stage);
    let incoming = stage.slide(0).unwrap().panel;
    assert_eq!(stage.get(incoming, Prop::XPercent), Some(-20.0));
    assert_eq!(stage.get(incoming, Prop::Opacity), Some(0.0));

    anim.advance(Millis(500), &mut stage);
    let outgoing = stage.slide(1).unwrap().panel;
    assert_eq!(stage.get(outgoing, Prop::XPercent), Some(20.0));
    assert_eq!(stage.get(outgoing, Prop::Opacity), Some(0.0));
}

#[test]
fn full_run_swaps_at_minimum_and_settles_on_incoming() {
    let deck = deck();
    let mut stage = Stage::new(&deck, 0, &layout());
    let mut anim = Animator::new();
    let tl = slide_change_timeline(&stage, &deck, forward(), &deck.timings).unwrap();
    anim.schedule(tl, Millis(1_000), &mut stage);

    for t in (1_000..=3_000).step_by(16) {
        anim.advance(Millis(t), &mut stage);
    }
    assert!(anim.is_idle());

    let swap = stage.last_swap().unwrap();
    assert_eq!(swap.at, Millis(1_400));
    assert_eq!(swap.opacity, 0.0);
    assert_eq!(stage.background_desc().image, "url('/mega-mendung.jpg')");
    assert!(close(stage.get(stage.background(), Prop::Opacity), 1.0));

    let out = stage.slide(0).unwrap().clone();
    let inc = stage.slide(1).unwrap().clone();
    assert!(close(stage.get(out.panel, Prop::Opacity), 0.0));
    assert!(close(stage.get(inc.panel, Prop::Opacity), 1.0));
    assert!(close(stage.get(inc.panel, Prop::XPercent), 0.0));
    assert!(close(stage.get(inc.content, Prop::Rise), 0.0));
    assert!(close(stage.get(out.layers[0], Prop::Scale), 0.9));
    assert!(close(stage.get(inc.layers[0], Prop::Opacity), 0.7));
    assert!(close(stage.get(inc.layers[1], Prop::Opacity), 0.5));
    assert!(close(stage.get(inc.layers[0], Prop::Scale), 1.0));
    assert_eq!(stage.get(inc.layers[0], Prop::RotateDeg), Some(45.0));
}

#[test]
fn missing_panel_yields_no_timeline() {
    let deck = deck();
    let mut stage = Stage::new(&deck, 0, &layout());
    stage.unmount_slide(1);
    assert!(slide_change_timeline(&stage, &deck, forward(), &deck.timings).is_none());
}

#[test]
fn entrance_staggers_text_and_decorations() {
    let deck = deck();
    let stage = Stage::new(&deck, 0, &layout());
    let tl = entrance_timeline(&stage, &deck, 0, &deck.timings).unwrap();
    let h = stage.slide(0).unwrap();

    let starts_of = |id: ElementId| -> Vec<u64> {
        tl.tweens()
            .filter(|t| t.target == id && t.prop == Prop::Rise)
            .map(|t| t.at_ms)
            .collect()
    };
    assert_eq!(starts_of(h.content), vec![0]);
    assert_eq!(starts_of(h.title), vec![150]);
    assert_eq!(starts_of(h.text_blocks[0]), vec![250]);
    assert_eq!(starts_of(h.text_blocks[1]), vec![330]);
    assert_eq!(starts_of(h.layers[1]), vec![80]);
    assert_eq!(tl.end_ms(), 80 + 1200);
}
