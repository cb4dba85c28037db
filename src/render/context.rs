use std::sync::OnceLock;

#[cfg(feature = "gpu")]
use crate::render::backend::create_rasterizer;
use crate::render::backend::{BackendKind, BackendPreference, Rasterizer, RenderSettings};
use crate::render::cpu::CpuRasterizer;

static SHARED: OnceLock<RenderContext> = OnceLock::new();

/// Execution context every pipeline stage draws through.
///
/// Construction picks a backend once: GPU when it is compiled in, preferred and available,
/// otherwise the deterministic CPU rasterizer. Pipeline results do not depend on which one was
/// picked beyond GPU rounding.
pub struct RenderContext {
    rasterizer: Box<dyn Rasterizer>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("backend", &self.backend_kind())
            .finish()
    }
}

impl RenderContext {
    /// Build a context from explicit settings, falling back to CPU if the GPU is unavailable.
    #[tracing::instrument(level = "debug")]
    pub fn new(settings: &RenderSettings) -> Self {
        let rasterizer = match settings.preference {
            BackendPreference::Cpu => cpu_rasterizer(),
            BackendPreference::Auto | BackendPreference::Gpu => try_gpu(settings.preference),
        };
        tracing::info!(backend = ?rasterizer.kind(), "render context ready");
        Self { rasterizer }
    }

    /// A CPU-only context.
    pub fn cpu() -> Self {
        Self {
            rasterizer: cpu_rasterizer(),
        }
    }

    /// Wrap a caller-provided rasterizer.
    pub fn with_rasterizer(rasterizer: Box<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Process-wide context, created on first use from [`RenderSettings::from_env`].
    ///
    /// Initialization happens exactly once even under concurrent first use.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(|| Self::new(&RenderSettings::from_env()))
    }

    /// Backend this context draws with.
    pub fn backend_kind(&self) -> BackendKind {
        self.rasterizer.kind()
    }

    /// The underlying rasterizer.
    pub fn rasterizer(&self) -> &dyn Rasterizer {
        self.rasterizer.as_ref()
    }
}

fn cpu_rasterizer() -> Box<dyn Rasterizer> {
    Box::new(CpuRasterizer::new())
}

#[cfg(feature = "gpu")]
fn try_gpu(preference: BackendPreference) -> Box<dyn Rasterizer> {
    match create_rasterizer(BackendKind::Gpu) {
        Ok(r) => r,
        Err(e) => {
            if preference == BackendPreference::Gpu {
                tracing::warn!(error = %e, "gpu backend unavailable, falling back to cpu");
            } else {
                tracing::debug!(error = %e, "gpu backend unavailable, using cpu");
            }
            cpu_rasterizer()
        }
    }
}

#[cfg(not(feature = "gpu"))]
fn try_gpu(preference: BackendPreference) -> Box<dyn Rasterizer> {
    if preference == BackendPreference::Gpu {
        tracing::warn!("built without the `gpu` feature, falling back to cpu");
    }
    cpu_rasterizer()
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
