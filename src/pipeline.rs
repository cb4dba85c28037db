//! Decompose, tint and compose: the stages that turn one icon into an [`AdaptiveImage`].

pub(crate) mod compose;
pub(crate) mod decompose;
pub(crate) mod layers;
pub(crate) mod tint;

use crate::adaptive::selector::{AdaptiveImage, make_adaptive};
use crate::config::PipelineConfig;
use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::bitmap::Bitmap;
use crate::render::context::RenderContext;

use self::compose::compose_with_scales;
use self::decompose::decompose;
use self::tint::{DARK_TINT, LIGHT_TINT, tint};

/// Run the whole pipeline on `source`.
///
/// The source is split into colored and template halves, the template is tinted black and
/// white, and each tint is composed over the colored half at every configured scale.
///
/// Fails with `EmptyResult` when the source has no visible pixels; the caller should keep
/// showing the original image in that case.
#[tracing::instrument(skip(ctx, source, config), fields(profile = ?config.profile))]
pub fn build_adaptive_icon(
    ctx: &RenderContext,
    source: &Bitmap,
    config: &PipelineConfig,
) -> TrayTintResult<AdaptiveImage> {
    config.validate()?;

    let size = source.size();
    let pair = decompose(source, config.effective_threshold())?;
    if pair.is_empty() {
        return Err(TrayTintError::empty_result(
            "source image has no visible pixels",
        ));
    }

    let scales = config.output_scales();
    let light_template = tint(ctx, &pair.template, LIGHT_TINT, size)?;
    let dark_template = tint(ctx, &pair.template, DARK_TINT, size)?;
    let light = compose_with_scales(ctx, &[&pair.colored, &light_template], size, &scales)?;
    let dark = compose_with_scales(ctx, &[&pair.colored, &dark_template], size, &scales)?;

    tracing::debug!(backend = ?ctx.backend_kind(), "adaptive icon built");
    Ok(make_adaptive(light, dark, size))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
