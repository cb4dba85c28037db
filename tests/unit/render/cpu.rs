use super::*;
use crate::foundation::core::Rgba8;

fn solid(w: u32, h: u32, scale: f64, px: Rgba8) -> PixelBuffer {
    let mut buf = PixelBuffer::new(w, h, scale).unwrap();
    buf.fill(px);
    buf
}

#[test]
fn resample_to_same_size_copies_and_retags_scale() {
    let src = solid(3, 2, 1.0, Rgba8::new(10, 20, 30, 200));
    let out = CpuRasterizer::new().resample(&src, 3, 2, 2.0).unwrap();
    assert_eq!(out.data(), src.data());
    assert_eq!(out.scale(), 2.0);
}

#[test]
fn resample_upscales_opaque_solid_without_changing_color() {
    let src = solid(4, 4, 1.0, Rgba8::new(0, 0, 0, 255));
    let out = CpuRasterizer::new().resample(&src, 8, 8, 2.0).unwrap();
    assert_eq!((out.width(), out.height()), (8, 8));
    // Interior pixels are fully covered by the scaled image.
    let px = out.get_pixel(4, 4).unwrap();
    assert_eq!(px.rgb(), crate::foundation::core::Rgb8::BLACK);
    assert!(px.a >= 250, "interior alpha {}", px.a);
}

#[test]
fn resample_to_zero_extent_is_empty() {
    let src = solid(4, 4, 1.0, Rgba8::new(0, 0, 0, 255));
    let out = CpuRasterizer::new().resample(&src, 0, 0, 1.0).unwrap();
    assert!(out.is_empty());
}

#[test]
fn draw_over_clips_negative_offsets() {
    let mut dst = PixelBuffer::new(4, 4, 1.0).unwrap();
    let src = solid(4, 4, 1.0, Rgba8::new(255, 0, 0, 255));
    CpuRasterizer::new()
        .draw_over(&mut dst, &src, -2, -2)
        .unwrap();
    assert_eq!(dst.visible_pixel_count(), 4);
    assert_eq!(dst.get_pixel(1, 1).unwrap(), Rgba8::new(255, 0, 0, 255));
    assert!(dst.get_pixel(2, 2).unwrap().is_transparent());
}
