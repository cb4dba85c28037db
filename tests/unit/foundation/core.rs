use super::*;

#[test]
fn transparent_is_all_zero() {
    assert_eq!(Rgba8::TRANSPARENT.to_array(), [0, 0, 0, 0]);
    assert!(Rgba8::TRANSPARENT.is_transparent());
    assert!(!Rgba8::new(0, 0, 0, 1).is_transparent());
}

#[test]
fn rgb_with_alpha_roundtrips_channels() {
    let px = Rgb8::new(10, 20, 30).with_alpha(40);
    assert_eq!(px, Rgba8::new(10, 20, 30, 40));
    assert_eq!(px.rgb(), Rgb8::new(10, 20, 30));
}

#[test]
fn pixel_extent_rounds_and_rejects_degenerate() {
    assert_eq!(pixel_extent(Size::new(18.0, 18.0), 2.0), (36, 36));
    assert_eq!(pixel_extent(Size::new(16.5, 10.2), 1.0), (17, 10));
    assert_eq!(pixel_extent(Size::new(0.0, 10.0), 3.0), (0, 30));
    assert_eq!(pixel_extent(Size::new(-4.0, f64::NAN), 1.0), (0, 0));
}

#[test]
fn color_space_defaults_to_srgb() {
    assert_eq!(ColorSpace::default(), ColorSpace::Srgb);
    let parsed: ColorSpace = serde_json::from_str("\"linear_srgb\"").unwrap();
    assert_eq!(parsed, ColorSpace::LinearSrgb);
}
