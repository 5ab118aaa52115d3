use chart_axis::api::{AXIS_APPEARANCE_JSON_SCHEMA_V1, AxisAppearance, AxisOrientation};
use chart_axis::error::AxisError;
use chart_axis::render::{Color, StrokeDash};

#[test]
fn versioned_contract_round_trips() {
    let mut appearance = AxisAppearance::for_orientation(AxisOrientation::Right);
    appearance.tick_stroke = Color::from_hex("#336699").expect("valid hex");
    appearance.tick_label_fill = Some(Color::from_hex("#ff0000").expect("valid hex"));
    appearance.tick_stroke_dash = StrokeDash::LongDashDot;
    appearance.flex_ticks = true;
    appearance.range = Some((0.0, 250.0));

    let json = appearance.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {AXIS_APPEARANCE_JSON_SCHEMA_V1}")));
    assert!(json.contains("\"orientation\": \"right\""));
    assert!(json.contains("\"#336699ff\""));

    let parsed = AxisAppearance::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, appearance);
}

#[test]
fn bare_appearance_fills_missing_fields_with_defaults() {
    let parsed = AxisAppearance::from_json_compat_str(
        r##"{ "orientation": "left", "font_size": 14, "tick_stroke": "#222" }"##,
    )
    .expect("parse");

    let mut expected = AxisAppearance::for_orientation(AxisOrientation::Left);
    expected.font_size = 14.0;
    expected.tick_stroke = Color::from_hex("#222222").expect("valid hex");
    assert_eq!(parsed, expected);
}

#[test]
fn unknown_schema_versions_are_rejected() {
    let err = AxisAppearance::from_json_compat_str(
        r#"{ "schema_version": 2, "appearance": { "orientation": "top" } }"#,
    )
    .expect_err("unsupported version");
    assert!(matches!(err, AxisError::InvalidConfig(message) if message.contains("version")));
}

#[test]
fn unsupported_orientation_fails_fast() {
    let err = AxisAppearance::from_json_compat_str(r#"{ "orientation": "center" }"#)
        .expect_err("bad orientation");
    assert!(matches!(err, AxisError::InvalidConfig(message) if message.contains("center")));
}

#[test]
fn invalid_values_are_rejected_after_parsing() {
    assert!(AxisAppearance::from_json_compat_str(r#"{ "font_size": -1 }"#).is_err());
    assert!(AxisAppearance::from_json_compat_str(r#"{ "stroke": "not-a-color" }"#).is_err());
    assert!(AxisAppearance::from_json_compat_str(r#"{ "tick_stroke_opacity": 2.5 }"#).is_err());
}
