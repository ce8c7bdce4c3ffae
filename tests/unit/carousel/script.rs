use super::*;
use crate::deck::dsl::{DeckBuilder, SlideBuilder};

fn deck() -> Deck {
    let mut b = DeckBuilder::new();
    for key in ["lereng", "ceplok", "nitik"] {
        b = b
            .slide(
                SlideBuilder::new(key)
                    .background(format!("url('/{key}.jpg')"))
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }
    b.build().unwrap()
}

#[test]
fn replays_events_and_settles() {
    let script: Script = serde_json::from_str(
        r#"{
            "events": [
                {"at_ms": 100, "type": "control", "control": "next"},
                {"at_ms": 2000, "type": "control", "control": {"indicator": 0}}
            ]
        }"#,
    )
    .unwrap();

    let mut indices = Vec::new();
    let stats = script
        .replay(deck(), 100, |snap| {
            indices.push(snap.current_index);
            Ok(())
        })
        .unwrap();

    assert_eq!(stats.transitions, 2);
    assert_eq!(indices[0], 0);
    assert_eq!(indices[1], 1);
    assert_eq!(*indices.last().unwrap(), 0);
    // 2000 ms for the last event plus 1400 ms for its transition to settle.
    assert_eq!(indices.len(), 35);
}

#[test]
fn out_of_order_events_are_rejected() {
    let script: Script = serde_json::from_str(
        r#"{"events": [
            {"at_ms": 500, "type": "pointer_leave"},
            {"at_ms": 100, "type": "pointer_leave"}
        ]}"#,
    )
    .unwrap();
    let err = script.replay(deck(), 16, |_| Ok(())).unwrap_err();
    assert!(matches!(err, CarouselError::Config(_)));
}

#[test]
fn zero_step_is_rejected() {
    let script = Script {
        container: None,
        duration_ms: 0,
        events: vec![],
    };
    assert!(script.replay(deck(), 0, |_| Ok(())).is_err());
}

#[test]
fn sink_errors_stop_the_replay() {
    let script = Script {
        container: None,
        duration_ms: 10_000,
        events: vec![],
    };
    let mut calls = 0;
    let res = script.replay(deck(), 100, |_| {
        calls += 1;
        if calls == 3 {
            Err(CarouselError::config("sink full"))
        } else {
            Ok(())
        }
    });
    assert!(res.is_err());
    assert_eq!(calls, 3);
}

#[test]
fn short_autoplay_interval_still_settles() {
    let mut deck = deck();
    deck.autoplay_interval_ms = 500;
    let script = Script {
        container: None,
        duration_ms: 1_200,
        events: vec![],
    };

    let mut indices = Vec::new();
    let stats = script
        .replay(deck, 100, |snap| {
            indices.push(snap.current_index);
            Ok(())
        })
        .unwrap();

    // Autoplay fires at 500 and 1000 only; the second change settles at 2400.
    assert_eq!(stats.autoplay_advances, 2);
    assert_eq!(*indices.last().unwrap(), 2);
    assert_eq!(indices.len(), 25);
}
