use super::*;

#[test]
fn parses_units() {
    assert_eq!("40vw".parse::<Length>().unwrap(), Length::Vw(40.0));
    assert_eq!("-5vw".parse::<Length>().unwrap(), Length::Vw(-5.0));
    assert_eq!("10vh".parse::<Length>().unwrap(), Length::Vh(10.0));
    assert_eq!("50%".parse::<Length>().unwrap(), Length::Percent(50.0));
    assert_eq!("300px".parse::<Length>().unwrap(), Length::Px(300.0));
    assert_eq!("12".parse::<Length>().unwrap(), Length::Px(12.0));
    assert!("wide".parse::<Length>().is_err());
}

#[test]
fn resolves_against_viewport_and_axis() {
    let vp = Size::new(2000.0, 1000.0);
    assert_eq!(Length::Vw(50.0).to_px(vp, 0.0), 1000.0);
    assert_eq!(Length::Vh(10.0).to_px(vp, 0.0), 100.0);
    assert_eq!(Length::Percent(25.0).to_px(vp, 800.0), 200.0);
    assert_eq!(Length::Px(7.0).to_px(vp, 800.0), 7.0);
}

#[test]
fn json_accepts_strings_and_numbers() {
    let v: Vec<Length> = serde_json::from_str(r#"["80vw", 120, "50%"]"#).unwrap();
    assert_eq!(
        v,
        vec![Length::Vw(80.0), Length::Px(120.0), Length::Percent(50.0)]
    );
    assert_eq!(
        serde_json::to_string(&Length::Vh(10.0)).unwrap(),
        "\"10vh\""
    );
}

#[test]
fn lenient_numbers_read_text_and_reject_garbage() {
    #[derive(Debug, serde::Deserialize)]
    struct Depth {
        #[serde(deserialize_with = "lenient_f64")]
        depth: f64,
    }

    let d: Depth = serde_json::from_str(r#"{"depth": "0.9"}"#).unwrap();
    assert_eq!(d.depth, 0.9);
    let d: Depth = serde_json::from_str(r#"{"depth": 0.35}"#).unwrap();
    assert_eq!(d.depth, 0.35);
    let err = serde_json::from_str::<Depth>(r#"{"depth": "deep"}"#).unwrap_err();
    assert!(err.to_string().contains("expected a number, got 'deep'"));
}
