use super::*;
use crate::foundation::core::Rgba8;
use crate::raster::buffer::PixelBuffer;

fn solid(w: u32, h: u32, px: Rgba8) -> Bitmap {
    let mut buf = PixelBuffer::new(w, h, 1.0).unwrap();
    buf.fill(px);
    Bitmap::from_buffer(buf)
}

#[test]
fn canvas_is_the_max_extent_of_all_layers() {
    let ctx = RenderContext::cpu();
    let img = compose_layers(
        &ctx,
        &[
            Layer::colored(solid(20, 6, Rgba8::new(0, 0, 255, 255))),
            Layer::template(solid(8, 16, Rgba8::new(0, 0, 0, 255))),
        ],
    )
    .unwrap();
    assert_eq!(img.size(), Size::new(20.0, 16.0));
}

#[test]
fn template_layers_are_tinted_per_appearance_and_drawn_on_top() {
    let ctx = RenderContext::cpu();
    let img = compose_layers_with_scales(
        &ctx,
        &[
            Layer::colored(solid(20, 20, Rgba8::new(0, 0, 255, 255))),
            Layer::template(solid(10, 10, Rgba8::new(0, 0, 0, 255))),
        ],
        &[1.0],
    )
    .unwrap();

    let light = img.light().representation(1.0).unwrap();
    let dark = img.dark().representation(1.0).unwrap();
    assert_eq!(light.get_pixel(10, 10).unwrap(), Rgba8::new(0, 0, 0, 255));
    assert_eq!(dark.get_pixel(10, 10).unwrap(), Rgba8::new(255, 255, 255, 255));
    // Colored layer untouched outside the template.
    assert_eq!(light.get_pixel(0, 0).unwrap(), Rgba8::new(0, 0, 255, 255));
    assert_eq!(dark.get_pixel(0, 0).unwrap(), Rgba8::new(0, 0, 255, 255));
    assert!(!img.is_template());
}

#[test]
fn empty_layer_list_is_an_empty_result() {
    let ctx = RenderContext::cpu();
    assert!(matches!(
        compose_layers(&ctx, &[]),
        Err(TrayTintError::EmptyResult(_))
    ));
}
