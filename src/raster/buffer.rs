use crate::foundation::core::{ColorSpace, Rgba8, Size};
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::foundation::math::{convert_channel, premul_channel, unpremul_channel};

/// One pixel-density representation of an image.
///
/// Pixels are straight-alpha RGBA8, tightly packed and row-major. `scale` is the ratio of pixels
/// to logical points (2.0 for a Retina representation).
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    scale: f64,
    color_space: ColorSpace,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32, scale: f64) -> TrayTintResult<Self> {
        validate_scale(scale)?;
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            scale,
            color_space: ColorSpace::Srgb,
            data: vec![0; len],
        })
    }

    /// Wrap decoded straight-alpha RGBA8 bytes.
    ///
    /// Fails with [`TrayTintError::DecodeFailure`] when `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_rgba8(width: u32, height: u32, scale: f64, data: Vec<u8>) -> TrayTintResult<Self> {
        validate_scale(scale)?;
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(TrayTintError::decode_failure(format!(
                "rgba8 buffer holds {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            scale,
            color_space: ColorSpace::Srgb,
            data,
        })
    }

    /// Rebuild a straight-alpha buffer from premultiplied RGBA8 bytes.
    pub fn from_premultiplied(
        width: u32,
        height: u32,
        scale: f64,
        mut premul: Vec<u8>,
    ) -> TrayTintResult<Self> {
        for px in premul.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_channel(px[0], a);
            px[1] = unpremul_channel(px[1], a);
            px[2] = unpremul_channel(px[2], a);
        }
        Self::from_rgba8(width, height, scale, premul)
    }

    /// Return the same buffer tagged with a different color space. Pixels are not converted.
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Copy of this buffer with its color channels re-encoded into `color_space`.
    ///
    /// Alpha is left alone. Returns an identical copy when the space already matches.
    pub fn to_color_space(&self, color_space: ColorSpace) -> Self {
        let from = self.color_space;
        let mut out = self.clone().with_color_space(color_space);
        if from != color_space {
            for px in out.data.chunks_exact_mut(4) {
                for c in &mut px[..3] {
                    *c = convert_channel(*c, from, color_space);
                }
            }
        }
        out
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per logical point.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Declared color space of the RGB channels.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Size in logical points.
    pub fn logical_size(&self) -> Size {
        Size::new(
            f64::from(self.width) / self.scale,
            f64::from(self.height) / self.scale,
        )
    }

    /// Return `true` if the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw straight-alpha RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel.
    pub fn get_pixel(&self, x: u32, y: u32) -> TrayTintResult<Rgba8> {
        let idx = self.index(x, y)?;
        Ok(Rgba8::from_slice(&self.data[idx..idx + 4]))
    }

    /// Overwrite one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) -> TrayTintResult<()> {
        let idx = self.index(x, y)?;
        self.data[idx..idx + 4].copy_from_slice(&px.to_array());
        Ok(())
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data.chunks_exact(4).map(Rgba8::from_slice)
    }

    /// Overwrite every pixel with `px`.
    pub fn fill(&mut self, px: Rgba8) {
        let px = px.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn visible_pixel_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Return `true` when every pixel has zero alpha.
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Premultiplied copy of the pixel data, for rasterizers that work in premultiplied space.
    pub fn to_premultiplied(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = premul_channel(px[0], a);
            px[1] = premul_channel(px[1], a);
            px[2] = premul_channel(px[2], a);
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> TrayTintResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(TrayTintError::invalid_input(format!(
                "pixel ({x}, {y}) is outside a {}x{} buffer",
                self.width, self.height
            )));
        }
        Ok(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

pub(crate) fn validate_scale(scale: f64) -> TrayTintResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TrayTintError::invalid_input(format!(
            "scale factor must be finite and > 0, got {scale}"
        )));
    }
    Ok(())
}

fn byte_len(width: u32, height: u32) -> TrayTintResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TrayTintError::invalid_input("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
