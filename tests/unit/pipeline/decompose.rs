use super::*;
use crate::foundation::core::{Rgb8, Size};

fn source_from(px: &[Rgba8], w: u32, h: u32) -> Bitmap {
    let data = px.iter().flat_map(|p| p.to_array()).collect();
    Bitmap::from_buffer(PixelBuffer::from_rgba8(w, h, 1.0, data).unwrap())
}

fn mixed_source() -> Bitmap {
    source_from(
        &[
            Rgba8::new(0, 0, 0, 255),
            Rgba8::new(10, 10, 10, 90),
            Rgba8::new(255, 0, 0, 255),
            Rgba8::new(40, 200, 90, 30),
            Rgba8::new(0, 0, 0, 0),
            Rgba8::new(250, 250, 250, 255),
        ],
        3,
        2,
    )
}

#[test]
fn partition_and_alpha_conservation_hold() {
    let src = mixed_source();
    let pair = decompose(&src, DEFAULT_THRESHOLD).unwrap();

    let s = &src.representations()[0];
    let c = &pair.colored.representations()[0];
    let t = &pair.template.representations()[0];
    for ((sp, cp), tp) in s.pixels().zip(c.pixels()).zip(t.pixels()) {
        assert_eq!(u16::from(cp.a) + u16::from(tp.a), u16::from(sp.a));
        if sp.a > 0 {
            assert!((cp.a == 0) ^ (tp.a == 0));
        } else {
            assert!(cp.is_transparent() && tp.is_transparent());
        }
        assert_eq!(tp.rgb(), Rgb8::BLACK);
    }
}

#[test]
fn colored_pixels_keep_their_original_values() {
    let pair = decompose(&mixed_source(), DEFAULT_THRESHOLD).unwrap();
    let c = &pair.colored.representations()[0];
    assert_eq!(c.get_pixel(2, 0).unwrap(), Rgba8::new(255, 0, 0, 255));
    assert_eq!(c.get_pixel(0, 1).unwrap(), Rgba8::new(40, 200, 90, 30));
}

#[test]
fn threshold_comparison_is_strict() {
    let gray = Rgba8::new(60, 60, 60, 255);
    let y = linear_luminance(gray.rgb(), ColorSpace::Srgb);

    assert_eq!(classify(gray, ColorSpace::Srgb, y), PixelClass::Colored);
    let just_above = f32::from_bits(y.to_bits() + 1);
    assert_eq!(
        classify(gray, ColorSpace::Srgb, just_above),
        PixelClass::Template
    );
}

#[test]
fn strict_profile_is_more_selective() {
    // Linear luminance of sRGB 60 is about 0.045: template at 0.1, colored at 0.02.
    let gray = Rgba8::new(60, 60, 60, 255);
    assert_eq!(
        classify(gray, ColorSpace::Srgb, DEFAULT_THRESHOLD),
        PixelClass::Template
    );
    assert_eq!(
        classify(gray, ColorSpace::Srgb, STRICT_THRESHOLD),
        PixelClass::Colored
    );
}

#[test]
fn linear_buffers_skip_gamma_decoding() {
    // 20/255 is about 0.078 when already linear, but about 0.007 once sRGB-decoded.
    let px = Rgba8::new(20, 20, 20, 255);
    assert_eq!(classify(px, ColorSpace::LinearSrgb, 0.05), PixelClass::Colored);
    assert_eq!(classify(px, ColorSpace::Srgb, 0.05), PixelClass::Template);
}

#[test]
fn every_representation_is_split() {
    let mut one = PixelBuffer::new(2, 2, 1.0).unwrap();
    one.fill(Rgba8::new(0, 0, 0, 255));
    let mut two = PixelBuffer::new(4, 4, 2.0).unwrap();
    two.fill(Rgba8::new(0, 0, 255, 255));
    let src = Bitmap::with_representations(Size::new(2.0, 2.0), vec![one, two]).unwrap();

    let pair = decompose(&src, DEFAULT_THRESHOLD).unwrap();
    assert_eq!(pair.template.scales(), vec![1.0, 2.0]);
    assert_eq!(pair.colored.scales(), vec![1.0, 2.0]);
    assert_eq!(pair.template.representation(1.0).unwrap().visible_pixel_count(), 4);
    assert!(pair.template.representation(2.0).unwrap().is_fully_transparent());
    assert_eq!(pair.colored.representation(2.0).unwrap().visible_pixel_count(), 16);
}

#[test]
fn rejects_bad_threshold_and_empty_sources() {
    let src = mixed_source();
    assert!(matches!(
        decompose(&src, 1.5),
        Err(TrayTintError::Validation(_))
    ));
    assert!(matches!(
        decompose(&src, f32::NAN),
        Err(TrayTintError::Validation(_))
    ));
    assert!(matches!(
        decompose(&Bitmap::new(Size::ZERO), DEFAULT_THRESHOLD),
        Err(TrayTintError::InvalidInput(_))
    ));
    assert!(matches!(
        decompose(&Bitmap::new(Size::new(16.0, 16.0)), DEFAULT_THRESHOLD),
        Err(TrayTintError::DecodeFailure(_))
    ));
}

#[test]
fn fully_transparent_source_yields_empty_pair() {
    let src = Bitmap::from_buffer(PixelBuffer::new(4, 4, 1.0).unwrap());
    let pair = decompose(&src, DEFAULT_THRESHOLD).unwrap();
    assert!(pair.is_empty());
}
