use std::sync::OnceLock;

use crate::foundation::core::{ColorSpace, Rgb8};

/// BT.709 luma coefficients, applied to linear-light channels.
pub(crate) const BT709: [f32; 3] = [0.2126, 0.7152, 0.0722];

static SRGB_TO_LINEAR: OnceLock<[f32; 256]> = OnceLock::new();
static LINEAR_TO_SRGB_U8: OnceLock<[u8; 256]> = OnceLock::new();

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn premul_channel(c: u8, a: u8) -> u8 {
    mul_div255_u8(u16::from(c), u16::from(a))
}

pub(crate) fn unpremul_channel(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a = u32::from(a);
    ((u32::from(c) * 255 + a / 2) / a).min(255) as u8
}

/// sRGB-encoded 8-bit channel to linear light in `[0, 1]`.
pub(crate) fn srgb_to_linear(c: u8) -> f32 {
    let lut = SRGB_TO_LINEAR.get_or_init(|| {
        let mut lut = [0.0f32; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            let s = (i as f64) / 255.0;
            let l = if s <= 0.040_45 {
                s / 12.92
            } else {
                ((s + 0.055) / 1.055).powf(2.4)
            };
            *v = l as f32;
        }
        lut
    });
    lut[usize::from(c)]
}

/// Re-encode an 8-bit channel from `from` to `to`.
pub(crate) fn convert_channel(c: u8, from: ColorSpace, to: ColorSpace) -> u8 {
    match (from, to) {
        (ColorSpace::Srgb, ColorSpace::LinearSrgb) => (srgb_to_linear(c) * 255.0).round() as u8,
        (ColorSpace::LinearSrgb, ColorSpace::Srgb) => linear_to_srgb_u8(c),
        _ => c,
    }
}

fn linear_to_srgb_u8(c: u8) -> u8 {
    let lut = LINEAR_TO_SRGB_U8.get_or_init(|| {
        let mut lut = [0u8; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            let l = (i as f64) / 255.0;
            let s = if l <= 0.003_130_8 {
                l * 12.92
            } else {
                1.055 * l.powf(1.0 / 2.4) - 0.055
            };
            *v = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        lut
    });
    lut[usize::from(c)]
}

/// Linear-light BT.709 luminance of an 8-bit color stored in `space`.
///
/// This is the quantity compared against the decomposition threshold.
pub fn linear_luminance(rgb: Rgb8, space: ColorSpace) -> f32 {
    let lin = |c: u8| match space {
        ColorSpace::Srgb => srgb_to_linear(c),
        ColorSpace::LinearSrgb => f32::from(c) / 255.0,
    };
    BT709[0] * lin(rgb.r) + BT709[1] * lin(rgb.g) + BT709[2] * lin(rgb.b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
