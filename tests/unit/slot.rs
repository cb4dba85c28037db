use super::*;
use crate::adaptive::appearance::{Appearance, FixedAppearance};
use crate::foundation::core::{Rgba8, Size};

fn black_icon() -> Bitmap {
    let mut buf = PixelBuffer::new(4, 4, 1.0).unwrap();
    buf.fill(Rgba8::new(0, 0, 0, 255));
    Bitmap::from_buffer(buf)
}

#[test]
fn enable_and_disable_switch_the_displayed_image() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(black_icon());
    assert!(!slot.current().is_adaptive());

    slot.enable_adaptive(&ctx).unwrap();
    assert!(slot.current().is_adaptive());
    let dark = slot
        .render(&ctx, &FixedAppearance(Appearance::dark()), 1.0)
        .unwrap();
    assert_eq!(dark.get_pixel(0, 0).unwrap(), Rgba8::new(255, 255, 255, 255));

    slot.disable_adaptive();
    assert_eq!(slot.current(), &IconImage::Original(black_icon()));
}

#[test]
fn failed_enable_leaves_the_original_in_place() {
    let ctx = RenderContext::cpu();
    let transparent = Bitmap::from_buffer(PixelBuffer::new(4, 4, 1.0).unwrap());
    let mut slot = IconSlot::new(transparent.clone());

    let err = slot.enable_adaptive(&ctx).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(slot.current(), &IconImage::Original(transparent));
}

#[test]
fn failed_layers_keep_previous_adaptive_image() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(black_icon());
    slot.enable_adaptive(&ctx).unwrap();
    let before = slot.current().clone();

    assert!(slot.set_layers(&ctx, &[]).is_err());
    assert_eq!(slot.current(), &before);
}

#[test]
fn invalid_source_is_not_decomposed() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(Bitmap::new(Size::ZERO));
    assert!(matches!(
        slot.enable_adaptive(&ctx),
        Err(TrayTintError::InvalidInput(_))
    ));
    assert!(!slot.current().is_adaptive());
}

#[test]
fn set_image_rebuilds_adaptive_slots() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(black_icon());
    slot.enable_adaptive(&ctx).unwrap();

    let mut red = PixelBuffer::new(4, 4, 1.0).unwrap();
    red.fill(Rgba8::new(255, 0, 0, 255));
    slot.set_image(&ctx, Bitmap::from_buffer(red)).unwrap();

    assert!(slot.current().is_adaptive());
    let light = slot
        .render(&ctx, &FixedAppearance(Appearance::light()), 1.0)
        .unwrap();
    assert_eq!(light.get_pixel(1, 1).unwrap(), Rgba8::new(255, 0, 0, 255));
}

#[test]
fn original_renders_at_requested_scale() {
    let ctx = RenderContext::cpu();
    let slot = IconSlot::new(black_icon());
    let out = slot
        .render(&ctx, &FixedAppearance(Appearance::light()), 2.0)
        .unwrap();
    assert_eq!((out.width(), out.height()), (8, 8));
}

#[test]
fn failed_rebuild_keeps_source_and_displayed_image() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(black_icon());
    slot.enable_adaptive(&ctx).unwrap();
    let before = slot.current().clone();

    let transparent = Bitmap::from_buffer(PixelBuffer::new(4, 4, 1.0).unwrap());
    let err = slot.set_image(&ctx, transparent).unwrap_err();
    assert!(matches!(err, TrayTintError::EmptyResult(_)));
    assert_eq!(slot.current(), &before);
    assert_eq!(slot.original(), &black_icon());
}

#[test]
fn set_image_on_plain_slot_shows_new_image() {
    let ctx = RenderContext::cpu();
    let mut slot = IconSlot::new(black_icon());
    let mut red = PixelBuffer::new(4, 4, 1.0).unwrap();
    red.fill(Rgba8::new(255, 0, 0, 255));
    let red = Bitmap::from_buffer(red);

    slot.set_image(&ctx, red.clone()).unwrap();
    assert_eq!(slot.current(), &IconImage::Original(red.clone()));
    assert_eq!(slot.original(), &red);
}
