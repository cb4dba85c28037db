use crate::foundation::core::{ColorSpace, Rgba8};
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::foundation::math::linear_luminance;
use crate::raster::bitmap::Bitmap;
use crate::raster::buffer::PixelBuffer;

/// Default near-black threshold: 10% linear luminance.
pub const DEFAULT_THRESHOLD: f32 = 0.1;
/// Threshold of the strict profile, close to pure black only.
pub const STRICT_THRESHOLD: f32 = 0.02;

/// The two halves of a decomposed icon.
///
/// Both bitmaps have the same logical size and the same representations as the source. Every
/// visible source pixel lands in exactly one of them; template pixels are always black.
#[derive(Clone, Debug, PartialEq)]
pub struct DecomposedPair {
    /// Pixels that keep their original color.
    pub colored: Bitmap,
    /// Near-black pixels, forced to black with alpha preserved.
    pub template: Bitmap,
}

impl DecomposedPair {
    /// True when neither half has a visible pixel.
    pub fn is_empty(&self) -> bool {
        self.colored.is_fully_transparent() && self.template.is_fully_transparent()
    }
}

/// Per-pixel classification result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelClass {
    /// `alpha == 0`; belongs to neither output.
    Transparent,
    /// Visible and darker than the threshold.
    Template,
    /// Visible and at or above the threshold.
    Colored,
}

/// Classify one pixel. The comparison is strict: luminance equal to `threshold` is colored.
pub fn classify(px: Rgba8, space: ColorSpace, threshold: f32) -> PixelClass {
    if px.a == 0 {
        PixelClass::Transparent
    } else if linear_luminance(px.rgb(), space) < threshold {
        PixelClass::Template
    } else {
        PixelClass::Colored
    }
}

/// Split `source` into colored and template halves.
///
/// Errors:
/// - `Validation` if `threshold` is not a finite value in `[0, 1]`.
/// - `InvalidInput` if the logical size has a zero dimension.
/// - `DecodeFailure` if there is no representation with actual pixels.
#[tracing::instrument(level = "debug", skip(source), fields(w = source.size().width, h = source.size().height))]
pub fn decompose(source: &Bitmap, threshold: f32) -> TrayTintResult<DecomposedPair> {
    validate_threshold(threshold)?;

    let size = source.size();
    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(TrayTintError::invalid_input(format!(
            "source image must have non-zero size, got {}x{}",
            size.width, size.height
        )));
    }
    if source.representations().is_empty() {
        return Err(TrayTintError::decode_failure(
            "source image has no pixel representations",
        ));
    }

    let mut colored = Bitmap::new(size);
    let mut template = Bitmap::new(size);
    let (mut template_px, mut colored_px) = (0usize, 0usize);

    for rep in source.representations() {
        if rep.is_empty() {
            return Err(TrayTintError::decode_failure(format!(
                "representation at {}x has no pixels",
                rep.scale()
            )));
        }
        let (c, t) = split_representation(rep, threshold)?;
        colored_px += c.visible_pixel_count();
        template_px += t.visible_pixel_count();
        colored.add_representation(c);
        template.add_representation(t);
    }

    tracing::debug!(template_px, colored_px, scales = ?source.scales(), "decomposed");
    Ok(DecomposedPair { colored, template })
}

pub(crate) fn validate_threshold(threshold: f32) -> TrayTintResult<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(TrayTintError::validation(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}

fn split_representation(
    rep: &PixelBuffer,
    threshold: f32,
) -> TrayTintResult<(PixelBuffer, PixelBuffer)> {
    let space = rep.color_space();
    let mut colored = Vec::with_capacity(rep.data().len());
    let mut template = Vec::with_capacity(rep.data().len());

    for px in rep.pixels() {
        let (c, t) = match classify(px, space, threshold) {
            PixelClass::Transparent => (Rgba8::TRANSPARENT, Rgba8::TRANSPARENT),
            PixelClass::Template => (Rgba8::TRANSPARENT, Rgba8::new(0, 0, 0, px.a)),
            PixelClass::Colored => (px, Rgba8::TRANSPARENT),
        };
        colored.extend_from_slice(&c.to_array());
        template.extend_from_slice(&t.to_array());
    }

    let (w, h, s) = (rep.width(), rep.height(), rep.scale());
    Ok((
        PixelBuffer::from_rgba8(w, h, s, colored)?.with_color_space(space),
        PixelBuffer::from_rgba8(w, h, s, template)?.with_color_space(space),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/decompose.rs"]
mod tests;
