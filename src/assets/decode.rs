use std::io::Cursor;

use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::bitmap::Bitmap;
use crate::raster::buffer::PixelBuffer;

/// Decode encoded image bytes (PNG, TIFF, ...) into a straight-alpha sRGB buffer at `scale`.
pub fn decode_image(bytes: &[u8], scale: f64) -> TrayTintResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| TrayTintError::decode_failure(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba8(width, height, scale, rgba.into_raw())
}

/// Decode several encodings of the same artwork, one per `(bytes, scale)`, into one bitmap.
///
/// The logical size comes from the first entry.
pub fn decode_bitmap(sources: &[(&[u8], f64)]) -> TrayTintResult<Bitmap> {
    let mut reps = Vec::with_capacity(sources.len());
    for (bytes, scale) in sources {
        reps.push(decode_image(bytes, *scale)?);
    }
    let size = reps
        .first()
        .map(PixelBuffer::logical_size)
        .ok_or_else(|| TrayTintError::invalid_input("no image data to decode"))?;
    Bitmap::with_representations(size, reps)
}

/// Encode a buffer as PNG.
pub fn encode_png(buf: &PixelBuffer) -> TrayTintResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(buf.width(), buf.height(), buf.data().to_vec())
        .ok_or_else(|| TrayTintError::render("pixel buffer does not match its dimensions"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| TrayTintError::render(format!("encode png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
