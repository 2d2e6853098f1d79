//! Engine session: the long-lived handle to the wgpu renderer
//!
//! Created once on the render thread, dropped once when the thread exits.
//! Everything the sandbox asks of the GPU goes through this type: buffer
//! upload, surface configuration, and the begin/end frame protocol.

use crate::SandboxConfig;
use std::sync::Arc;
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window as WinitWindow;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to initialize engine: {0}")]
    InitializationFailed(String),
    #[error("Failed to create surface: {0}")]
    SurfaceCreationFailed(String),
    #[error("Failed to create device: {0}")]
    DeviceCreationFailed(String),
    #[error("Failed to acquire next image: {0}")]
    AcquireImageFailed(String),
    #[error("Material blob is malformed: {0}")]
    MaterialInvalid(String),
    #[error("Surface lost")]
    SurfaceLost,
    #[error("Out of memory")]
    OutOfMemory,
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Everything needed to record and present one frame.
///
/// Returned by [`Engine::begin_frame`]; handed back to
/// [`Engine::end_frame`] for submission and presentation.
pub struct Frame {
    pub encoder: wgpu::CommandEncoder,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
    texture: wgpu::SurfaceTexture,
}

/// The engine session owning all GPU-side state.
pub struct Engine {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    #[allow(dead_code)]
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
}

impl Engine {
    /// Create the engine session for a window.
    pub fn new(window: Arc<WinitWindow>, config: &SandboxConfig) -> EngineResult<Self> {
        pollster::block_on(Self::init(window, config))
    }

    async fn init(window: Arc<WinitWindow>, config: &SandboxConfig) -> EngineResult<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| EngineError::SurfaceCreationFailed(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| EngineError::InitializationFailed("no suitable adapter found".into()))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "selected GPU: {} ({:?} backend)",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Sandbox Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(|e| EngineError::DeviceCreationFailed(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: config.strategy.present_mode(),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Ok(Self {
            instance,
            surface,
            adapter,
            device,
            queue,
            surface_config,
        })
    }

    /// Reconfigure the surface for new viewport dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    /// Reconfigure the surface at its current dimensions, recovering a lost
    /// or outdated swapchain.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Acquire the next swapchain image and open a command encoder.
    ///
    /// A lost or outdated surface maps to [`EngineError::SurfaceLost`], which
    /// the frame loop treats as a skipped frame rather than a failure.
    pub fn begin_frame(&mut self) -> EngineResult<Frame> {
        let texture = self.surface.get_current_texture().map_err(|e| match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => EngineError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => EngineError::OutOfMemory,
            other => EngineError::AcquireImageFailed(other.to_string()),
        })?;

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        Ok(Frame {
            encoder,
            view,
            width: self.surface_config.width,
            height: self.surface_config.height,
            texture,
        })
    }

    /// Submit the frame's commands and present the swapchain image.
    pub fn end_frame(&mut self, frame: Frame) {
        let Frame {
            encoder, texture, ..
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        texture.present();
    }

    /// Upload a byte blob into a new engine-owned buffer.
    pub fn create_buffer_init(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
