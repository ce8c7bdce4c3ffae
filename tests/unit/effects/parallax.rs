use super::*;

#[test]
fn right_edge_with_depth_0_9() {
    let v = parallax_offset(Cursor { x: 1.0, y: 0.5 }, 0.9);
    assert!((v.x - 11.25).abs() < 1e-12);
    assert_eq!(v.y, 0.0);
}

#[test]
fn center_does_not_move() {
    assert_eq!(parallax_offset(Cursor::CENTER, 0.8), Vec2::ZERO);
}

#[test]
fn offsets_are_bounded_for_any_depth() {
    let depths = [0.0, 0.15, 0.5, 0.9, 1.2, 2.4, 3.0, 10.0, 1e6];
    let positions = [0.0, 0.1, 0.25, 0.5, 0.77, 1.0];
    for d in depths {
        let bound = MAX_TRAVEL_PX.min(d * DEPTH_GAIN);
        for &x in &positions {
            for &y in &positions {
                let v = parallax_offset(Cursor { x, y }, d);
                assert!(v.x.abs() <= bound + 1e-12, "d={d} x={x}");
                assert!(v.y.abs() <= bound + 1e-12, "d={d} y={y}");
            }
        }
    }
}

#[test]
fn high_depth_hits_the_hard_cap() {
    let v = parallax_offset(Cursor { x: 0.0, y: 1.0 }, 10.0);
    assert_eq!(v, Vec2::new(-30.0, 30.0));
}

#[test]
fn degenerate_depths_stay_put() {
    assert_eq!(parallax_offset(Cursor { x: 1.0, y: 1.0 }, -1.0), Vec2::ZERO);
    assert_eq!(
        parallax_offset(Cursor { x: 1.0, y: 1.0 }, f64::NAN),
        Vec2::ZERO
    );
}

#[test]
fn follow_timeline_targets_both_axes() {
    let timings = MotionTimings::default();
    let tl = follow_timeline(
        [(ElementId(3), 0.9), (ElementId(4), 0.2)],
        Cursor { x: 1.0, y: 0.0 },
        &timings,
    );
    let targets: Vec<(ElementId, Prop, f64)> =
        tl.tweens().map(|t| (t.target, t.prop, t.to)).collect();
    assert_eq!(targets.len(), 4);
    assert_eq!(targets[0].0, ElementId(3));
    assert_eq!(targets[1], (ElementId(3), Prop::ParallaxY, -11.25));
    assert_eq!(targets[2], (ElementId(4), Prop::ParallaxX, 2.5));
    assert!(tl.tweens().all(|t| t.duration_ms == 600));
}

#[test]
fn touch_action_keeps_panning() {
    assert_eq!(TouchAction::PanXPanY.css_value(), "pan-x pan-y");
}
