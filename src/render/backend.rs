use crate::effects::composite;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::buffer::PixelBuffer;

/// Pixel operations the pipeline needs from an execution backend.
///
/// The decomposition and compositing algorithms are written once against this trait; backends
/// only differ in where the pixels are pushed. Implementations must be usable from several
/// threads at once because the process-wide [`RenderContext`](crate::RenderContext) is shared.
pub trait Rasterizer: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Resample `src` to `width x height` pixels and tag the result with `scale`.
    fn resample(
        &self,
        src: &PixelBuffer,
        width: u32,
        height: u32,
        scale: f64,
    ) -> TrayTintResult<PixelBuffer>;

    /// Source-over `src` onto `dst` with its top-left corner at pixel `(x, y)`.
    ///
    /// Offsets may be negative; anything outside `dst` is clipped.
    fn draw_over(
        &self,
        dst: &mut PixelBuffer,
        src: &PixelBuffer,
        x: i64,
        y: i64,
    ) -> TrayTintResult<()>;

    /// Fill the whole buffer with an opaque color.
    fn fill_solid(&self, dst: &mut PixelBuffer, color: Rgb8) {
        dst.fill(color.with_alpha(255));
    }

    /// Destination-in: keep `dst` color, take alpha from `mask`.
    fn destination_in(&self, dst: &mut PixelBuffer, mask: &PixelBuffer) -> TrayTintResult<()> {
        composite::destination_in_in_place(dst, mask)
    }
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
/// - `Gpu` requires the `gpu` cargo feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Deterministic CPU rasterizer powered by `vello_cpu`.
    Cpu,
    /// GPU rasterizer powered by `vello` on `wgpu`.
    #[cfg(feature = "gpu")]
    Gpu,
}

/// Which backend a [`RenderContext`](crate::RenderContext) should try first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// GPU when compiled in and an adapter exists, CPU otherwise.
    #[default]
    Auto,
    /// Always the CPU rasterizer.
    Cpu,
    /// GPU, falling back to CPU when unavailable.
    Gpu,
}

impl BackendPreference {
    /// Parse `auto`, `cpu` or `gpu` (case-insensitive).
    pub fn parse(s: &str) -> TrayTintResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "gpu" => Ok(Self::Gpu),
            other => Err(TrayTintError::validation(format!(
                "unknown backend \"{other}\" (expected auto, cpu or gpu)"
            ))),
        }
    }
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Backend to try first.
    pub preference: BackendPreference,
}

impl RenderSettings {
    /// Name of the environment variable read by [`RenderSettings::from_env`].
    pub const BACKEND_ENV: &'static str = "TRAYTINT_BACKEND";

    /// Settings from `TRAYTINT_BACKEND`; unknown or missing values mean `Auto`.
    pub fn from_env() -> Self {
        let preference = std::env::var(Self::BACKEND_ENV)
            .ok()
            .and_then(|v| BackendPreference::parse(&v).ok())
            .unwrap_or_default();
        Self { preference }
    }
}

/// Create a rasterizer implementation.
///
/// - `BackendKind::Cpu` always succeeds.
/// - `BackendKind::Gpu` fails when no adapter or device can be acquired.
pub fn create_rasterizer(kind: BackendKind) -> TrayTintResult<Box<dyn Rasterizer>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuRasterizer::new())),
        #[cfg(feature = "gpu")]
        BackendKind::Gpu => Ok(Box::new(crate::render::gpu::GpuRasterizer::new()?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
