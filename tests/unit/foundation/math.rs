use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 77), 77);
    assert_eq!(mul_div255_u8(128, 128), 64);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn premul_unpremul_is_exact_for_opaque_and_zero_for_transparent() {
    for c in 0..=255u8 {
        assert_eq!(unpremul_channel(premul_channel(c, 255), 255), c);
    }
    assert_eq!(unpremul_channel(10, 0), 0);
    assert_eq!(premul_channel(200, 0), 0);
}

#[test]
fn srgb_transfer_endpoints_and_monotonic() {
    assert_eq!(srgb_to_linear(0), 0.0);
    assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
    for c in 1..=255u8 {
        assert!(srgb_to_linear(c) > srgb_to_linear(c - 1));
    }
    // Mid-gray encodes to roughly 21.4% linear light.
    assert!((srgb_to_linear(128) - 0.2158).abs() < 1e-3);
}

#[test]
fn luminance_uses_bt709_weights() {
    let red = linear_luminance(Rgb8::new(255, 0, 0), ColorSpace::Srgb);
    let green = linear_luminance(Rgb8::new(0, 255, 0), ColorSpace::Srgb);
    let blue = linear_luminance(Rgb8::new(0, 0, 255), ColorSpace::Srgb);
    assert!((red - 0.2126).abs() < 1e-6);
    assert!((green - 0.7152).abs() < 1e-6);
    assert!((blue - 0.0722).abs() < 1e-6);
    assert!((linear_luminance(Rgb8::WHITE, ColorSpace::Srgb) - 1.0).abs() < 1e-5);
    assert_eq!(linear_luminance(Rgb8::BLACK, ColorSpace::Srgb), 0.0);
}

#[test]
fn linear_buffers_skip_gamma_decode() {
    let gray = Rgb8::new(51, 51, 51);
    let linear = linear_luminance(gray, ColorSpace::LinearSrgb);
    assert!((linear - 0.2).abs() < 1e-5);
    assert!(linear_luminance(gray, ColorSpace::Srgb) < linear);
}

#[test]
fn channel_conversion_roundtrips_mid_gray() {
    let pairs = [
        (ColorSpace::Srgb, ColorSpace::LinearSrgb),
        (ColorSpace::LinearSrgb, ColorSpace::Srgb),
    ];
    for (from, to) in pairs {
        assert_eq!(convert_channel(0, from, to), 0);
        assert_eq!(convert_channel(255, from, to), 255);
        assert_eq!(convert_channel(77, from, from), 77);
    }
    assert_eq!(convert_channel(128, ColorSpace::LinearSrgb, ColorSpace::Srgb), 188);
    assert_eq!(convert_channel(188, ColorSpace::Srgb, ColorSpace::LinearSrgb), 128);
}
