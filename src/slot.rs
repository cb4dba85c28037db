use crate::adaptive::appearance::AppearanceProvider;
use crate::adaptive::selector::AdaptiveImage;
use crate::config::PipelineConfig;
use crate::foundation::core::pixel_extent;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::pipeline::build_adaptive_icon;
use crate::pipeline::layers::{Layer, compose_layers_with_scales};
use crate::raster::bitmap::Bitmap;
use crate::raster::buffer::{PixelBuffer, validate_scale};
use crate::render::context::RenderContext;

/// What an [`IconSlot`] currently displays.
#[derive(Clone, Debug, PartialEq)]
pub enum IconImage {
    /// The caller's image, drawn as-is.
    Original(Bitmap),
    /// A pre-composed appearance-adaptive image.
    Adaptive(AdaptiveImage),
}

impl IconImage {
    /// Whether the displayed image recolors itself per appearance.
    pub fn is_adaptive(&self) -> bool {
        matches!(self, Self::Adaptive(_))
    }
}

/// The icon shown by one tray item.
///
/// Every mutation either fully succeeds or leaves the displayed image exactly as it was, so a
/// failed recolor never blanks or corrupts the icon.
#[derive(Clone, Debug)]
pub struct IconSlot {
    original: Bitmap,
    current: IconImage,
    config: PipelineConfig,
}

impl IconSlot {
    /// Slot showing `original` with the default pipeline configuration.
    pub fn new(original: Bitmap) -> Self {
        Self::with_config(original, PipelineConfig::default())
    }

    /// Slot showing `original`, using `config` when adaptive mode is enabled.
    pub fn with_config(original: Bitmap, config: PipelineConfig) -> Self {
        Self {
            current: IconImage::Original(original.clone()),
            original,
            config,
        }
    }

    /// The undecomposed source image.
    pub fn original(&self) -> &Bitmap {
        &self.original
    }

    /// The displayed image.
    pub fn current(&self) -> &IconImage {
        &self.current
    }

    /// Pipeline configuration used by [`IconSlot::enable_adaptive`].
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the source image. An adaptive slot rebuilds from the new image.
    ///
    /// If that rebuild fails, neither the source nor the displayed image changes.
    pub fn set_image(&mut self, ctx: &RenderContext, original: Bitmap) -> TrayTintResult<()> {
        if self.current.is_adaptive() {
            let built = build_adaptive_icon(ctx, &original, &self.config);
            self.apply(built)?;
            self.original = original;
            return Ok(());
        }
        self.current = IconImage::Original(original.clone());
        self.original = original;
        Ok(())
    }

    /// Decompose the original image and display the adaptive result.
    pub fn enable_adaptive(&mut self, ctx: &RenderContext) -> TrayTintResult<()> {
        let built = build_adaptive_icon(ctx, &self.original, &self.config);
        self.apply(built)
    }

    /// Display a multi-layer adaptive composite.
    pub fn set_layers(&mut self, ctx: &RenderContext, layers: &[Layer]) -> TrayTintResult<()> {
        let built = compose_layers_with_scales(ctx, layers, &self.config.output_scales());
        self.apply(built)
    }

    /// Go back to showing the original image.
    pub fn disable_adaptive(&mut self) {
        self.current = IconImage::Original(self.original.clone());
    }

    /// Render what is displayed for the provider's appearance at `scale`.
    pub fn render(
        &self,
        ctx: &RenderContext,
        provider: &dyn AppearanceProvider,
        scale: f64,
    ) -> TrayTintResult<PixelBuffer> {
        match &self.current {
            IconImage::Adaptive(img) => img.render(ctx, provider, scale),
            IconImage::Original(bitmap) => render_original(ctx, bitmap, scale),
        }
    }

    fn apply(&mut self, built: TrayTintResult<AdaptiveImage>) -> TrayTintResult<()> {
        match built {
            Ok(img) => {
                self.current = IconImage::Adaptive(img);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, recoverable = e.is_recoverable(), "keeping previous icon");
                Err(e)
            }
        }
    }
}

fn render_original(ctx: &RenderContext, bitmap: &Bitmap, scale: f64) -> TrayTintResult<PixelBuffer> {
    validate_scale(scale)?;
    let (w, h) = pixel_extent(bitmap.size(), scale);
    let rep = bitmap
        .best_representation(scale)
        .ok_or_else(|| TrayTintError::empty_result("original image has no representations"))?;
    ctx.rasterizer().resample(rep, w, h, scale)
}

#[cfg(test)]
#[path = "../tests/unit/slot.rs"]
mod tests;
