use crate::adaptive::selector::{AdaptiveImage, make_adaptive};
use crate::foundation::core::Size;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::pipeline::compose::{SUPPORTED_SCALES, compose_with_scales};
use crate::pipeline::tint::{DARK_TINT, LIGHT_TINT, tint};
use crate::raster::bitmap::Bitmap;
use crate::render::context::RenderContext;

/// One input of [`compose_layers`].
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Artwork of this layer.
    pub bitmap: Bitmap,
    /// Tint this layer black/white per appearance instead of drawing it verbatim.
    pub is_template: bool,
}

impl Layer {
    /// A layer drawn with its own colors in both appearances.
    pub fn colored(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            is_template: false,
        }
    }

    /// A layer recolored to the appearance tint.
    pub fn template(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            is_template: true,
        }
    }
}

/// Stack `layers` in order on a shared canvas and wrap the result as an [`AdaptiveImage`].
///
/// The canvas is as wide as the widest layer and as tall as the tallest. Each layer is
/// centered on it; template layers are tinted at their own size.
pub fn compose_layers(ctx: &RenderContext, layers: &[Layer]) -> TrayTintResult<AdaptiveImage> {
    compose_layers_with_scales(ctx, layers, &SUPPORTED_SCALES)
}

/// [`compose_layers`] with explicit output scales.
#[tracing::instrument(level = "debug", skip(ctx, layers), fields(layers = layers.len()))]
pub fn compose_layers_with_scales(
    ctx: &RenderContext,
    layers: &[Layer],
    scales: &[f64],
) -> TrayTintResult<AdaptiveImage> {
    if layers.is_empty() {
        return Err(TrayTintError::empty_result("no layers to compose"));
    }
    let canvas = layers.iter().fold(Size::ZERO, |acc, l| {
        let s = l.bitmap.size();
        Size::new(acc.width.max(s.width), acc.height.max(s.height))
    });

    let mut light_layers = Vec::with_capacity(layers.len());
    let mut dark_layers = Vec::with_capacity(layers.len());
    for layer in layers {
        if layer.is_template {
            let size = layer.bitmap.size();
            light_layers.push(tint(ctx, &layer.bitmap, LIGHT_TINT, size)?);
            dark_layers.push(tint(ctx, &layer.bitmap, DARK_TINT, size)?);
        } else {
            light_layers.push(layer.bitmap.clone());
            dark_layers.push(layer.bitmap.clone());
        }
    }

    let light_refs: Vec<&Bitmap> = light_layers.iter().collect();
    let dark_refs: Vec<&Bitmap> = dark_layers.iter().collect();
    let light = compose_with_scales(ctx, &light_refs, canvas, scales)?;
    let dark = compose_with_scales(ctx, &dark_refs, canvas, scales)?;

    tracing::debug!(
        canvas_w = canvas.width,
        canvas_h = canvas.height,
        "layers composed"
    );
    Ok(make_adaptive(light, dark, canvas))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/layers.rs"]
mod tests;
