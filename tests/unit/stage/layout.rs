use super::*;
use crate::deck::length::Length;
use crate::deck::model::AttachPoint;

fn ctx(card: Option<Rect>) -> LayoutContext {
    LayoutContext {
        viewport: Size::new(1000.0, 800.0),
        container: Rect::new(0.0, 0.0, 1000.0, 800.0),
        card,
    }
}

#[test]
fn centered_viewport_layer() {
    let layer = ParallaxLayer::new("text1.svg")
        .size(Length::Vw(80.0), Length::Vw(80.0))
        .at(Length::Percent(50.0), Length::Percent(50.0))
        .centered();
    let p = place_layer(&layer, &ctx(None));
    assert_eq!(p.rect, Rect::new(500.0, 400.0, 1300.0, 1200.0));
    assert_eq!(p.centering, Vec2::new(-400.0, -400.0));
}

#[test]
fn right_bottom_anchors_measure_from_far_edges() {
    let layer = ParallaxLayer::new("leaf.svg")
        .size(Length::Px(400.0), Length::Px(320.0))
        .at_far(Length::Px(20.0), Length::Px(40.0));
    let p = place_layer(&layer, &ctx(None));
    assert_eq!(p.rect.x0, 1000.0 - 20.0 - 400.0);
    assert_eq!(p.rect.y0, 800.0 - 40.0 - 320.0);
    assert_eq!(p.centering, Vec2::ZERO);
}

#[test]
fn viewport_layer_size_is_clamped() {
    let layer = ParallaxLayer::new("edge.svg").size(Length::Px(10.0), Length::Vw(500.0));
    let p = place_layer(&layer, &ctx(None));
    assert_eq!(p.size(), Size::new(MIN_LAYER_PX, MAX_LAYER_PX));
}

#[test]
fn card_attached_layer_centers_on_attach_point() {
    let card = Rect::new(200.0, 100.0, 800.0, 500.0);
    let layer = ParallaxLayer::new("swirl.svg")
        .attach(AttachPoint::RightTop, 10.0, -5.0)
        .scale_by_card(0.5);
    let p = place_layer(&layer, &ctx(Some(card)));
    // 600 * 0.5 = 300 wide, square
    assert_eq!(p.rect, Rect::new(810.0, 95.0, 1110.0, 395.0));
    assert_eq!(p.centering, Vec2::new(-150.0, -150.0));
}

#[test]
fn card_scale_is_clamped() {
    let card = Rect::new(0.0, 0.0, 3000.0, 500.0);
    let layer = ParallaxLayer::new("swirl.svg")
        .attach(AttachPoint::CenterMiddle, 0.0, 0.0)
        .scale_by_card(0.9);
    let p = place_layer(&layer, &ctx(Some(card)));
    assert_eq!(p.size().width, CARD_SCALED_MAX_PX);
}

#[test]
fn attach_without_card_falls_back_to_viewport() {
    let layer = ParallaxLayer::new("swirl.svg")
        .at(Length::Px(5.0), Length::Px(6.0))
        .attach(AttachPoint::LeftTop, 0.0, 0.0);
    let p = place_layer(&layer, &ctx(None));
    assert_eq!(p.rect.origin(), crate::foundation::core::Point::new(5.0, 6.0));
}
