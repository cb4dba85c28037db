use crate::foundation::core::{Rgb8, Size, pixel_extent};
use crate::foundation::error::TrayTintResult;
use crate::raster::bitmap::Bitmap;
use crate::raster::buffer::PixelBuffer;
use crate::render::context::RenderContext;

/// Tint applied to template pixels in light appearance.
pub const LIGHT_TINT: Rgb8 = Rgb8::BLACK;
/// Tint applied to template pixels in dark appearance.
pub const DARK_TINT: Rgb8 = Rgb8::WHITE;

/// Recolor every visible pixel of `template` to `color`, keeping alpha exactly.
///
/// Each representation is tinted on its own, so the output carries the same scales as the
/// input. A template without representations gets one transparent 1x representation sized to
/// `logical_size`; if that size rounds to zero pixels the result is an empty bitmap.
#[tracing::instrument(level = "debug", skip(ctx, template), fields(reps = template.representations().len()))]
pub fn tint(
    ctx: &RenderContext,
    template: &Bitmap,
    color: Rgb8,
    logical_size: Size,
) -> TrayTintResult<Bitmap> {
    let raster = ctx.rasterizer();

    if template.representations().is_empty() {
        let (w, h) = pixel_extent(logical_size, 1.0);
        let mut out = Bitmap::new(logical_size);
        if w > 0 && h > 0 {
            out.add_representation(PixelBuffer::new(w, h, 1.0)?);
        }
        return Ok(out);
    }

    let mut out = Bitmap::new(template.size());
    for rep in template.representations() {
        let mut buf = PixelBuffer::new(rep.width(), rep.height(), rep.scale())?
            .with_color_space(rep.color_space());
        raster.fill_solid(&mut buf, color);
        raster.destination_in(&mut buf, rep)?;
        out.add_representation(buf);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/tint.rs"]
mod tests;
