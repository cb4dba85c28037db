use super::*;
use crate::foundation::core::{Rgba8, Size};

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let bytes = png_bytes(1, 1, vec![100, 50, 200, 128]);
    let buf = decode_image(&bytes, 1.0).unwrap();
    assert_eq!((buf.width(), buf.height()), (1, 1));
    assert_eq!(buf.get_pixel(0, 0).unwrap(), Rgba8::new(100, 50, 200, 128));
}

#[test]
fn garbage_bytes_are_a_decode_failure() {
    assert!(matches!(
        decode_image(b"not an image", 1.0),
        Err(TrayTintError::DecodeFailure(_))
    ));
}

#[test]
fn decode_bitmap_collects_scales() {
    let one = png_bytes(2, 2, vec![0; 16]);
    let two = png_bytes(4, 4, vec![0; 64]);
    let bmp = decode_bitmap(&[(one.as_slice(), 1.0), (two.as_slice(), 2.0)]).unwrap();
    assert_eq!(bmp.size(), Size::new(2.0, 2.0));
    assert_eq!(bmp.scales(), vec![1.0, 2.0]);
    assert!(decode_bitmap(&[]).is_err());
}

#[test]
fn encode_then_decode_preserves_pixels() {
    let mut buf = PixelBuffer::new(2, 1, 1.0).unwrap();
    buf.set_pixel(1, 0, Rgba8::new(9, 8, 7, 6)).unwrap();
    let back = decode_image(&encode_png(&buf).unwrap(), 1.0).unwrap();
    assert_eq!(back.data(), buf.data());
}
