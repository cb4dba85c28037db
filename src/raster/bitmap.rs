use crate::foundation::core::Size;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::buffer::PixelBuffer;

const SCALE_EPSILON: f64 = 1e-6;

/// A logical image: a size in points plus one representation per pixel density.
///
/// Representations are kept sorted by ascending scale and scales are unique.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    size: Size,
    reps: Vec<PixelBuffer>,
}

impl Bitmap {
    /// A bitmap of `size` points with no representations yet.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            reps: Vec::new(),
        }
    }

    /// Wrap a single buffer; the logical size is derived from its scale.
    pub fn from_buffer(buf: PixelBuffer) -> Self {
        Self {
            size: buf.logical_size(),
            reps: vec![buf],
        }
    }

    /// Build a bitmap from several representations of the same artwork.
    pub fn with_representations(size: Size, reps: Vec<PixelBuffer>) -> TrayTintResult<Self> {
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width < 0.0
            || size.height < 0.0
        {
            return Err(TrayTintError::invalid_input(format!(
                "logical size must be finite and non-negative, got {}x{}",
                size.width, size.height
            )));
        }
        let mut out = Self::new(size);
        for rep in reps {
            out.add_representation(rep);
        }
        Ok(out)
    }

    /// Insert a representation, replacing any existing one at the same scale.
    pub fn add_representation(&mut self, rep: PixelBuffer) {
        match self
            .reps
            .iter()
            .position(|r| same_scale(r.scale(), rep.scale()))
        {
            Some(i) => self.reps[i] = rep,
            None => {
                let at = self
                    .reps
                    .iter()
                    .position(|r| r.scale() > rep.scale())
                    .unwrap_or(self.reps.len());
                self.reps.insert(at, rep);
            }
        }
    }

    /// Logical size in points.
    pub fn size(&self) -> Size {
        self.size
    }

    /// All representations, ascending by scale.
    pub fn representations(&self) -> &[PixelBuffer] {
        &self.reps
    }

    /// Scale factors present on this bitmap, ascending.
    pub fn scales(&self) -> Vec<f64> {
        self.reps.iter().map(PixelBuffer::scale).collect()
    }

    /// Representation with exactly `scale`, if any.
    pub fn representation(&self, scale: f64) -> Option<&PixelBuffer> {
        self.reps.iter().find(|r| same_scale(r.scale(), scale))
    }

    /// Representation to draw at `scale`: the least dense one that is at least as dense as
    /// requested, otherwise the densest available.
    pub fn best_representation(&self, scale: f64) -> Option<&PixelBuffer> {
        self.reps
            .iter()
            .find(|r| r.scale() + SCALE_EPSILON >= scale)
            .or_else(|| self.reps.last())
    }

    /// Return `true` when there is nothing to draw: zero logical area or no representations.
    pub fn is_empty(&self) -> bool {
        self.reps.is_empty() || self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Return `true` when every representation is fully transparent.
    pub fn is_fully_transparent(&self) -> bool {
        self.reps.iter().all(PixelBuffer::is_fully_transparent)
    }
}

pub(crate) fn same_scale(a: f64, b: f64) -> bool {
    (a - b).abs() < SCALE_EPSILON
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bitmap.rs"]
mod tests;
