//! traytint renders appearance-adaptive menu-bar and tray icons.
//!
//! An icon is split into a *template* part (near-black pixels, recolored to match the menu
//! bar) and a *colored* part (everything else, e.g. a brand badge, kept as-is). Both
//! appearances are composed once up front; drawing only picks one.
//!
//! # Pipeline overview
//!
//! 1. **Decompose**: `Bitmap -> DecomposedPair` by linear BT.709 luminance and alpha
//! 2. **Tint**: template half -> black (light) and white (dark), alpha kept exactly
//! 3. **Compose**: colored half, then tinted template on top, per scale factor
//! 4. **Select**: [`AdaptiveImage`] picks the light or dark composite at draw time
//!
//! [`build_adaptive_icon`] runs all four steps; [`compose_layers`] builds the same output from
//! an ordered list of layers.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic on CPU**: the CPU rasterizer is bit-exact across machines.
//! - **No IO in the pipeline**: decoding lives in [`decode_image`] and the CLI.
//! - **Straight-alpha RGBA8** buffers; premultiplication happens only inside kernels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod adaptive;
mod assets;
mod config;
mod effects;
mod foundation;
mod pipeline;
mod raster;
mod render;
mod slot;

pub use adaptive::appearance::{Appearance, AppearanceMode, AppearanceProvider, FixedAppearance};
pub use adaptive::selector::{AdaptiveImage, make_adaptive};
pub use assets::decode::{decode_bitmap, decode_image, encode_png};
pub use config::{PipelineConfig, ThresholdProfile};
pub use foundation::core::{ColorSpace, Point, Rect, Rgb8, Rgba8, Size, pixel_extent};
pub use foundation::error::{TrayTintError, TrayTintResult};
pub use foundation::math::linear_luminance;
pub use pipeline::build_adaptive_icon;
pub use pipeline::compose::{SUPPORTED_SCALES, compose, compose_with_scales};
pub use pipeline::decompose::{
    DEFAULT_THRESHOLD, DecomposedPair, PixelClass, STRICT_THRESHOLD, classify, decompose,
};
pub use pipeline::layers::{Layer, compose_layers, compose_layers_with_scales};
pub use pipeline::tint::{DARK_TINT, LIGHT_TINT, tint};
pub use raster::bitmap::Bitmap;
pub use raster::buffer::PixelBuffer;
pub use render::backend::{
    BackendKind, BackendPreference, Rasterizer, RenderSettings, create_rasterizer,
};
pub use render::context::RenderContext;
pub use render::cpu::CpuRasterizer;
pub use slot::{IconImage, IconSlot};
#[cfg(feature = "gpu")]
pub use render::gpu::GpuRasterizer;
