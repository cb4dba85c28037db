use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::pipeline::compose::{SUPPORTED_SCALES, output_scales};
use crate::pipeline::decompose::{DEFAULT_THRESHOLD, STRICT_THRESHOLD};

/// Named near-black threshold presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdProfile {
    /// 10% linear luminance.
    #[default]
    Standard,
    /// 2% linear luminance, pure-black artwork only.
    Strict,
    /// Use [`PipelineConfig::threshold`].
    Custom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Tunables for [`build_adaptive_icon`](crate::build_adaptive_icon).
pub struct PipelineConfig {
    /// Threshold preset.
    pub profile: ThresholdProfile,
    /// Explicit threshold in `[0, 1]`, required by the `custom` profile and ignored otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    /// Scale factors to produce composites at. 1x is always added.
    pub scales: Vec<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profile: ThresholdProfile::Standard,
            threshold: None,
            scales: SUPPORTED_SCALES.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Standard profile, default scales.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Strict profile, default scales.
    pub fn strict() -> Self {
        Self {
            profile: ThresholdProfile::Strict,
            ..Self::default()
        }
    }

    /// Custom profile with an explicit threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            profile: ThresholdProfile::Custom,
            threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Replace the output scales.
    pub fn scales(mut self, scales: impl Into<Vec<f64>>) -> Self {
        self.scales = scales.into();
        self
    }

    /// Effective near-black threshold.
    pub fn effective_threshold(&self) -> f32 {
        match self.profile {
            ThresholdProfile::Standard => DEFAULT_THRESHOLD,
            ThresholdProfile::Strict => STRICT_THRESHOLD,
            ThresholdProfile::Custom => self.threshold.unwrap_or(DEFAULT_THRESHOLD),
        }
    }

    /// Configured scales with 1x added, ascending and unique.
    pub fn output_scales(&self) -> Vec<f64> {
        output_scales(&self.scales, &[])
    }

    /// Check threshold and scale values.
    pub fn validate(&self) -> TrayTintResult<()> {
        if self.profile == ThresholdProfile::Custom && self.threshold.is_none() {
            return Err(TrayTintError::validation(
                "custom profile requires a threshold",
            ));
        }
        let t = self.effective_threshold();
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(TrayTintError::validation(format!(
                "threshold must be within [0, 1], got {t}"
            )));
        }
        if let Some(s) = self.scales.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(TrayTintError::validation(format!(
                "scale factors must be finite and > 0, got {s}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> TrayTintResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse pipeline config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> TrayTintResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pipeline config {}", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
