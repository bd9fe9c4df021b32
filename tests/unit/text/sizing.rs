use super::*;

#[test]
fn length_buckets_are_non_increasing() {
    let texts = [
        "x".repeat(5),
        "x".repeat(10),
        "x".repeat(11),
        "x".repeat(20),
        "x".repeat(21),
        "x".repeat(30),
        "x".repeat(31),
        "x".repeat(80),
    ];
    for style in [CaptionStyle::Classic, CaptionStyle::Modern] {
        let sizes: Vec<f32> = texts
            .iter()
            .map(|t| calculate_font_size(400, t, style))
            .collect();
        for pair in sizes.windows(2) {
            assert!(pair[1] <= pair[0], "{style:?}: {sizes:?}");
        }
    }
}

#[test]
fn matches_formula_inside_clamp_range() {
    // 400 * 0.08 * 1.2 * 1.0
    assert!((calculate_font_size(400, "HELLO", CaptionStyle::Classic) - 38.4).abs() < 1e-4);
    // 400 * 0.08 * 0.7 * 0.85
    let long = "x".repeat(40);
    assert!((calculate_font_size(400, &long, CaptionStyle::Modern) - 19.04).abs() < 1e-4);
}

#[test]
fn clamps_to_bounds() {
    assert_eq!(calculate_font_size(10, "hi", CaptionStyle::Classic), MIN_FONT_SIZE);
    assert_eq!(calculate_font_size(5000, "hi", CaptionStyle::Classic), MAX_FONT_SIZE);
}

#[test]
fn counts_characters_not_bytes() {
    let accented = "é".repeat(10);
    assert_eq!(
        calculate_font_size(400, &accented, CaptionStyle::Classic),
        calculate_font_size(400, "eeeeeeeeee", CaptionStyle::Classic)
    );
}
