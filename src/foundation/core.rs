pub use kurbo::{Point, Rect, Size};

/// Straight (non-premultiplied) RGBA8 pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color channels without alpha.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Return `true` when the pixel has no coverage.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub(crate) fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    pub(crate) fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Opaque RGB8 color used for tints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black, the light-appearance tint.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white, the dark-appearance tint.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The same color with the given alpha.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, a)
    }
}

/// Transfer function of the color channels stored in a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Gamma-encoded sRGB, what decoders hand us.
    #[default]
    Srgb,
    /// sRGB primaries with a linear transfer function.
    LinearSrgb,
}

/// Pixel extent of a logical size at `scale`, rounded to the nearest pixel.
pub fn pixel_extent(size: Size, scale: f64) -> (u32, u32) {
    fn px(v: f64) -> u32 {
        if v.is_finite() && v > 0.0 {
            v.round().min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
    (px(size.width * scale), px(size.height * scale))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
