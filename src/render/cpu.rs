use std::sync::Arc;

use crate::effects::composite;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::buffer::PixelBuffer;
use crate::render::backend::{BackendKind, Rasterizer};

/// CPU rasterizer.
///
/// Resampling goes through `vello_cpu`; compositing uses the integer kernels in
/// `effects::composite`, so results are bit-for-bit reproducible across machines.
#[derive(Debug, Default)]
pub struct CpuRasterizer;

impl CpuRasterizer {
    /// Create a CPU rasterizer.
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for CpuRasterizer {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    #[tracing::instrument(level = "trace", skip(self, src), fields(src_w = src.width(), src_h = src.height()))]
    fn resample(
        &self,
        src: &PixelBuffer,
        width: u32,
        height: u32,
        scale: f64,
    ) -> TrayTintResult<PixelBuffer> {
        if src.width() == width && src.height() == height {
            return Ok(PixelBuffer::from_rgba8(width, height, scale, src.data().to_vec())?
                .with_color_space(src.color_space()));
        }
        if width == 0 || height == 0 || src.is_empty() {
            return Ok(PixelBuffer::new(width, height, scale)?.with_color_space(src.color_space()));
        }

        let w: u16 = width
            .try_into()
            .map_err(|_| TrayTintError::render("resample width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| TrayTintError::render("resample height exceeds u16"))?;

        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(buffer_to_pixmap(src)?)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(
            f64::from(width) / f64::from(src.width()),
            f64::from(height) / f64::from(src.height()),
        ));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(src.width()),
            f64::from(src.height()),
        ));
        ctx.flush();

        let mut out = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut out);
        Ok(
            PixelBuffer::from_premultiplied(width, height, scale, out.data_as_u8_slice().to_vec())?
                .with_color_space(src.color_space()),
        )
    }

    fn draw_over(
        &self,
        dst: &mut PixelBuffer,
        src: &PixelBuffer,
        x: i64,
        y: i64,
    ) -> TrayTintResult<()> {
        composite::over_at(dst, src, x, y);
        Ok(())
    }
}

fn buffer_to_pixmap(buf: &PixelBuffer) -> TrayTintResult<vello_cpu::Pixmap> {
    let w: u16 = buf
        .width()
        .try_into()
        .map_err(|_| TrayTintError::render("image width exceeds u16"))?;
    let h: u16 = buf
        .height()
        .try_into()
        .map_err(|_| TrayTintError::render("image height exceeds u16"))?;

    let premul = buf.to_premultiplied();
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(premul.len() / 4);
    for px in premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
