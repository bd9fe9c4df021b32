use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    let c: Color = "#fff".parse().unwrap();
    assert_eq!(c, Color::WHITE);
}

#[test]
fn rejects_bad_hex() {
    assert!("#12345".parse::<Color>().is_err());
    assert!("zzzzzz".parse::<Color>().is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.0, 0.0, 0.0, 0.8])).unwrap();
    assert_eq!(c, Color::rgba(0.0, 0.0, 0.0, 0.8));
}

#[test]
fn parses_hsla_object() {
    let c: Color = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!((c.r - 1.0).abs() < 1e-9);
    assert!(c.g.abs() < 1e-9);
    assert!(c.b.abs() < 1e-9);
}

#[test]
fn premul_conversion_scales_by_alpha() {
    let p = Color::rgba(1.0, 1.0, 1.0, 0.5).to_rgba8_premul();
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(Color::BLACK.to_rgba8_premul().a, 255);
}
