use std::borrow::Cow;

use crate::adaptive::appearance::{Appearance, AppearanceMode, AppearanceProvider};
use crate::foundation::core::{Rect, Size, pixel_extent};
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::bitmap::Bitmap;
use crate::raster::buffer::{PixelBuffer, validate_scale};
use crate::render::context::RenderContext;

/// One logical image with a pre-composed bitmap per appearance.
///
/// Both composites are built once, up front. Every draw asks the [`AppearanceProvider`] which
/// one to use, so a live appearance switch repaints correctly without rebuilding anything.
/// The image already carries its final colors and must never be recolored again by the host,
/// see [`AdaptiveImage::is_template`].
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveImage {
    light: Bitmap,
    dark: Bitmap,
    size: Size,
}

/// Wrap pre-composed `light` and `dark` bitmaps into an [`AdaptiveImage`] of `logical_size`.
pub fn make_adaptive(light: Bitmap, dark: Bitmap, logical_size: Size) -> AdaptiveImage {
    AdaptiveImage {
        light,
        dark,
        size: logical_size,
    }
}

impl AdaptiveImage {
    /// Logical size in points.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Always `false`: host toolkits must not apply template recoloring on top.
    pub fn is_template(&self) -> bool {
        false
    }

    /// Composite for the light appearance.
    pub fn light(&self) -> &Bitmap {
        &self.light
    }

    /// Composite for the dark appearance.
    pub fn dark(&self) -> &Bitmap {
        &self.dark
    }

    /// Composite for `mode`.
    pub fn variant(&self, mode: AppearanceMode) -> &Bitmap {
        match mode {
            AppearanceMode::Light => &self.light,
            AppearanceMode::Dark => &self.dark,
        }
    }

    /// Composite matching `appearance`. Pure; nothing is cached.
    pub fn select(&self, appearance: &Appearance) -> &Bitmap {
        self.variant(appearance.mode())
    }

    /// Draw the composite for the provider's current appearance into `dest` (in points of
    /// `target`), centered. Composites larger than `dest` are scaled down to fit.
    pub fn draw(
        &self,
        ctx: &RenderContext,
        target: &mut PixelBuffer,
        dest: Rect,
        provider: &dyn AppearanceProvider,
    ) -> TrayTintResult<()> {
        let appearance = provider.current();
        let bitmap = self.select(&appearance);
        tracing::trace!(appearance = appearance.name(), "drawing adaptive image");

        let scale = target.scale();
        let Some(rep) = bitmap.best_representation(scale) else {
            return Ok(());
        };

        let dest_px = dest.scale_from_origin(scale).round();
        let (dw, dh) = (dest_px.width(), dest_px.height());
        if !(dw > 0.0 && dh > 0.0) {
            return Ok(());
        }
        let bounds = Rect::new(0.0, 0.0, f64::from(target.width()), f64::from(target.height()));
        if !dest_px.overlaps(bounds) {
            return Ok(());
        }

        let (mut w, mut h) = pixel_extent(self.size, scale);
        if w == 0 || h == 0 {
            return Ok(());
        }
        if f64::from(w) > dw || f64::from(h) > dh {
            let fit = (dw / f64::from(w)).min(dh / f64::from(h));
            w = ((f64::from(w) * fit).round() as u32).max(1);
            h = ((f64::from(h) * fit).round() as u32).max(1);
        }

        let raster = ctx.rasterizer();
        let mut placed = if rep.width() == w && rep.height() == h {
            Cow::Borrowed(rep)
        } else {
            Cow::Owned(raster.resample(rep, w, h, scale)?)
        };
        if placed.color_space() != target.color_space() {
            placed = Cow::Owned(placed.to_color_space(target.color_space()));
        }

        let x = (dest_px.x0 as i64).saturating_add((dw as i64 - i64::from(w)).div_euclid(2));
        let y = (dest_px.y0 as i64).saturating_add((dh as i64 - i64::from(h)).div_euclid(2));
        raster.draw_over(target, &placed, x, y)
    }

    /// Render the composite for the provider's current appearance into a fresh buffer at
    /// `scale`.
    pub fn render(
        &self,
        ctx: &RenderContext,
        provider: &dyn AppearanceProvider,
        scale: f64,
    ) -> TrayTintResult<PixelBuffer> {
        validate_scale(scale)?;
        let (w, h) = pixel_extent(self.size, scale);
        if w == 0 || h == 0 {
            return Err(TrayTintError::empty_result(format!(
                "adaptive image is {}x{} points",
                self.size.width, self.size.height
            )));
        }
        let mut out = PixelBuffer::new(w, h, scale)?;
        let dest = Rect::from_origin_size((0.0, 0.0), self.size);
        self.draw(ctx, &mut out, dest, provider)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adaptive/selector.rs"]
mod tests;
