use std::borrow::Cow;

use crate::foundation::core::{ColorSpace, Size, pixel_extent};
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::bitmap::{Bitmap, same_scale};
use crate::raster::buffer::PixelBuffer;
use crate::render::context::RenderContext;

/// Scale factors every composite is produced at unless configured otherwise.
pub const SUPPORTED_SCALES: [f64; 3] = [1.0, 2.0, 3.0];

/// Flatten `colored` and then `tinted` on top of it, centered in `logical_size`.
///
/// Produces one representation per entry of [`SUPPORTED_SCALES`] plus any scale present on the
/// inputs.
pub fn compose(
    ctx: &RenderContext,
    colored: &Bitmap,
    tinted: &Bitmap,
    logical_size: Size,
) -> TrayTintResult<Bitmap> {
    compose_with_scales(ctx, &[colored, tinted], logical_size, &SUPPORTED_SCALES)
}

/// Draw `layers` in order, each centered on a canvas of `logical_size` points.
///
/// For every output scale a layer contributes its best representation at that density
/// (never a sparser one when a denser one exists), resampled when its pixel size does not
/// match the layer's logical size at that scale. Layers larger than the canvas are centered
/// with a negative offset and clipped.
///
/// The canvas is linear only when every input representation is; otherwise linear layers are
/// re-encoded to sRGB before drawing.
#[tracing::instrument(level = "debug", skip(ctx, layers), fields(layers = layers.len()))]
pub fn compose_with_scales(
    ctx: &RenderContext,
    layers: &[&Bitmap],
    logical_size: Size,
    scales: &[f64],
) -> TrayTintResult<Bitmap> {
    let (w1, h1) = pixel_extent(logical_size, 1.0);
    if w1 == 0 || h1 == 0 {
        return Err(TrayTintError::empty_result(format!(
            "composite canvas is {}x{} points",
            logical_size.width, logical_size.height
        )));
    }

    let out_scales = output_scales(scales, layers);
    let space = canvas_color_space(layers);
    let mut out = Bitmap::new(logical_size);
    for &scale in &out_scales {
        let (w, h) = pixel_extent(logical_size, scale);
        let mut canvas = PixelBuffer::new(w, h, scale)?.with_color_space(space);
        for layer in layers {
            draw_centered(ctx, &mut canvas, layer, scale)?;
        }
        out.add_representation(canvas);
    }

    tracing::debug!(scales = ?out_scales, ?space, "composed");
    Ok(out)
}

/// Configured scales, the scales already present on `layers` and 1x, ascending and unique.
pub(crate) fn output_scales(configured: &[f64], layers: &[&Bitmap]) -> Vec<f64> {
    let mut scales: Vec<f64> = configured
        .iter()
        .copied()
        .chain(layers.iter().flat_map(|l| l.scales()))
        .chain(std::iter::once(1.0))
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    scales.sort_by(f64::total_cmp);
    scales.dedup_by(|a, b| same_scale(*a, *b));
    scales
}

pub(crate) fn canvas_color_space(layers: &[&Bitmap]) -> ColorSpace {
    let mut reps = layers.iter().flat_map(|l| l.representations()).peekable();
    if reps.peek().is_some() && reps.all(|r| r.color_space() == ColorSpace::LinearSrgb) {
        ColorSpace::LinearSrgb
    } else {
        ColorSpace::Srgb
    }
}

/// Draw the representation of `layer` best suited to `canvas`'s density, centered.
pub(crate) fn draw_centered(
    ctx: &RenderContext,
    canvas: &mut PixelBuffer,
    layer: &Bitmap,
    scale: f64,
) -> TrayTintResult<()> {
    let Some(rep) = layer.best_representation(scale) else {
        return Ok(());
    };
    let (lw, lh) = pixel_extent(layer.size(), scale);
    if lw == 0 || lh == 0 {
        return Ok(());
    }

    let raster = ctx.rasterizer();
    let mut placed = if rep.width() == lw && rep.height() == lh {
        Cow::Borrowed(rep)
    } else {
        Cow::Owned(raster.resample(rep, lw, lh, scale)?)
    };
    if placed.color_space() != canvas.color_space() {
        placed = Cow::Owned(placed.to_color_space(canvas.color_space()));
    }

    let x = (i64::from(canvas.width()) - i64::from(lw)).div_euclid(2);
    let y = (i64::from(canvas.height()) - i64::from(lh)).div_euclid(2);
    raster.draw_over(canvas, &placed, x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/compose.rs"]
mod tests;
