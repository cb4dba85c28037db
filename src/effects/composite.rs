use crate::foundation::core::Rgba8;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::foundation::math::{mul_div255_u8, premul_channel, unpremul_channel};
use crate::raster::buffer::PixelBuffer;

pub(crate) type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Source-over on straight-alpha pixels. Result alpha is `sa + da * (1 - sa)`.
pub(crate) fn over_straight(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    let [r, g, b, a] = over(premul(dst), premul(src));
    Rgba8::new(
        unpremul_channel(r, a),
        unpremul_channel(g, a),
        unpremul_channel(b, a),
        a,
    )
}

/// Destination-in: keep `dst` color, scale its alpha by `mask_a`.
pub(crate) fn destination_in(dst: Rgba8, mask_a: u8) -> Rgba8 {
    let a = mul_div255_u8(u16::from(dst.a), u16::from(mask_a));
    if a == 0 {
        return Rgba8::TRANSPARENT;
    }
    Rgba8::new(dst.r, dst.g, dst.b, a)
}

/// Draw `src` over `dst` with its top-left corner at pixel `(x, y)`, clipped to `dst`.
pub(crate) fn over_at(dst: &mut PixelBuffer, src: &PixelBuffer, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(sw).min(dw);
    let y1 = y.saturating_add(sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_stride = dw as usize * 4;
    let src_stride = sw as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let drow = dy as usize * dst_stride;
        let srow = sy * src_stride;
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            let di = drow + dx as usize * 4;
            let si = srow + sx * 4;
            let out = over_straight(
                Rgba8::from_slice(&dst_data[di..di + 4]),
                Rgba8::from_slice(&src_data[si..si + 4]),
            );
            dst_data[di..di + 4].copy_from_slice(&out.to_array());
        }
    }
}

/// Apply [`destination_in`] across two equally sized buffers.
pub(crate) fn destination_in_in_place(
    dst: &mut PixelBuffer,
    mask: &PixelBuffer,
) -> TrayTintResult<()> {
    if dst.width() != mask.width() || dst.height() != mask.height() {
        return Err(TrayTintError::invalid_input(format!(
            "destination-in expects equal sizes, got {}x{} and {}x{}",
            dst.width(),
            dst.height(),
            mask.width(),
            mask.height()
        )));
    }
    for (d, m) in dst
        .data_mut()
        .chunks_exact_mut(4)
        .zip(mask.data().chunks_exact(4))
    {
        let out = destination_in(Rgba8::from_slice(d), m[3]);
        d.copy_from_slice(&out.to_array());
    }
    Ok(())
}

fn premul(px: Rgba8) -> PremulRgba8 {
    [
        premul_channel(px.r, px.a),
        premul_channel(px.g, px.a),
        premul_channel(px.b, px.a),
        px.a,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
