use std::sync::Mutex;

use crate::foundation::error::{TrayTintError, TrayTintResult};
use crate::raster::buffer::PixelBuffer;
use crate::render::backend::{BackendKind, Rasterizer};

/// GPU rasterizer built on `vello` and `wgpu`.
///
/// Every operation renders a small scene into an offscreen texture and reads it back. The
/// vello renderer needs exclusive access while rendering, so it sits behind a mutex.
pub struct GpuRasterizer {
    device: vello::wgpu::Device,
    queue: vello::wgpu::Queue,
    renderer: Mutex<vello::Renderer>,
}

impl std::fmt::Debug for GpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuRasterizer").finish_non_exhaustive()
    }
}

impl GpuRasterizer {
    /// Acquire an adapter and device.
    ///
    /// Fails with [`TrayTintError::Render`] when the machine has no usable GPU.
    pub fn new() -> TrayTintResult<Self> {
        let instance = vello::wgpu::Instance::new(&vello::wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(
            &vello::wgpu::RequestAdapterOptions {
                power_preference: vello::wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            },
        ))
        .map_err(|e| match e {
            vello::wgpu::RequestAdapterError::NotFound { .. } => {
                TrayTintError::render("no gpu adapter available")
            }
            other => TrayTintError::render(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) =
            pollster::block_on(adapter.request_device(&vello::wgpu::DeviceDescriptor {
                label: Some("traytint_device"),
                required_features: vello::wgpu::Features::empty(),
                required_limits: vello::wgpu::Limits::default(),
                experimental_features: vello::wgpu::ExperimentalFeatures::default(),
                memory_hints: vello::wgpu::MemoryHints::Performance,
                trace: vello::wgpu::Trace::Off,
            }))
            .map_err(|e| TrayTintError::render(format!("wgpu request_device failed: {e:?}")))?;

        let renderer = vello::Renderer::new(&device, vello::RendererOptions::default())
            .map_err(|e| TrayTintError::render(format!("vello renderer init failed: {e:?}")))?;

        Ok(Self {
            device,
            queue,
            renderer: Mutex::new(renderer),
        })
    }

    /// Render `scene` into a fresh `width x height` texture and return premultiplied RGBA8.
    fn render_scene(&self, scene: &vello::Scene, width: u32, height: u32) -> TrayTintResult<Vec<u8>> {
        let texture = self.device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("traytint_target"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::TEXTURE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut renderer = self
                .renderer
                .lock()
                .map_err(|_| TrayTintError::render("gpu renderer lock poisoned"))?;
            renderer
                .render_to_texture(
                    &self.device,
                    &self.queue,
                    scene,
                    &view,
                    &vello::RenderParams {
                        base_color: vello::peniko::Color::from_rgba8(0, 0, 0, 0),
                        width,
                        height,
                        antialiasing_method: vello::AaConfig::Area,
                    },
                )
                .map_err(|e| TrayTintError::render(format!("vello render failed: {e:?}")))?;
        }

        self.readback(&texture, width, height)
    }

    fn readback(
        &self,
        texture: &vello::wgpu::Texture,
        width: u32,
        height: u32,
    ) -> TrayTintResult<Vec<u8>> {
        let row_bytes = width
            .checked_mul(4)
            .ok_or_else(|| TrayTintError::render("render target width overflow"))?;
        let padded_row_bytes = align_to(row_bytes, vello::wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let buffer_size = u64::from(padded_row_bytes)
            .checked_mul(u64::from(height))
            .ok_or_else(|| TrayTintError::render("readback buffer size overflow"))?;

        let readback = self.device.create_buffer(&vello::wgpu::BufferDescriptor {
            label: Some("traytint_readback"),
            size: buffer_size,
            usage: vello::wgpu::BufferUsages::MAP_READ | vello::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder =
            self.device
                .create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("traytint_readback_encoder"),
                });
        encoder.copy_texture_to_buffer(
            vello::wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: vello::wgpu::Origin3d::ZERO,
                aspect: vello::wgpu::TextureAspect::All,
            },
            vello::wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: vello::wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(height),
                },
            },
            vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(vello::wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(vello::wgpu::PollType::wait_indefinitely())
            .map_err(|e| TrayTintError::render(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| TrayTintError::render("readback channel closed"))?
            .map_err(|e| TrayTintError::render(format!("readback map failed: {e:?}")))?;

        let mut out = Vec::with_capacity(row_bytes as usize * height as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in 0..height as usize {
                let start = row * padded_row_bytes as usize;
                out.extend_from_slice(&mapped[start..start + row_bytes as usize]);
            }
        }
        readback.unmap();
        Ok(out)
    }
}

impl Rasterizer for GpuRasterizer {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpu
    }

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

        let mut scene = vello::Scene::new();
        scene.draw_image(
            &image_data(src),
            vello::kurbo::Affine::scale_non_uniform(
                f64::from(width) / f64::from(src.width()),
                f64::from(height) / f64::from(src.height()),
            ),
        );
        let premul = self.render_scene(&scene, width, height)?;
        Ok(PixelBuffer::from_premultiplied(width, height, scale, premul)?
            .with_color_space(src.color_space()))
    }

    fn draw_over(
        &self,
        dst: &mut PixelBuffer,
        src: &PixelBuffer,
        x: i64,
        y: i64,
    ) -> TrayTintResult<()> {
        if dst.is_empty() || src.is_empty() {
            return Ok(());
        }
        let mut scene = vello::Scene::new();
        scene.draw_image(&image_data(dst), vello::kurbo::Affine::IDENTITY);
        scene.draw_image(
            &image_data(src),
            vello::kurbo::Affine::translate((x as f64, y as f64)),
        );
        let premul = self.render_scene(&scene, dst.width(), dst.height())?;
        *dst = PixelBuffer::from_premultiplied(dst.width(), dst.height(), dst.scale(), premul)?
            .with_color_space(dst.color_space());
        Ok(())
    }
}

fn image_data(buf: &PixelBuffer) -> vello::peniko::ImageData {
    vello::peniko::ImageData {
        data: vello::peniko::Blob::from(buf.to_premultiplied()),
        format: vello::peniko::ImageFormat::Rgba8,
        alpha_type: vello::peniko::ImageAlphaType::AlphaPremultiplied,
        width: buf.width(),
        height: buf.height(),
    }
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}

#[cfg(test)]
#[path = "../../tests/unit/render/gpu.rs"]
mod tests;
