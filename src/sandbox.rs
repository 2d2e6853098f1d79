//! The sandbox frame loop
//!
//! A sequential loop on one dedicated render thread: consume the resize flag,
//! recompute the projection if it was set, recompute the spin transform from
//! wall-clock time, then run the begin/render/end frame protocol and sleep a
//! fixed interval. The loop has no pause, resume, or termination signal; it
//! runs until the process exits or an unrecoverable engine error occurs.

use crate::engine::{Engine, EngineError, EngineResult, Frame};
use crate::material::{self, Material};
use crate::mesh::Vertex;
use crate::scene::{transform, Scene};
use crate::window::ViewportState;
use crate::SandboxConfig;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::window::Window as WinitWindow;

/// Frame loop lifecycle.
///
/// `Initializing` builds every GPU resource, transitions unconditionally to
/// `Running`, and `ShuttingDown` is entered only when the loop gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    ShuttingDown,
}

/// Scene uniform data sent to the GPU every frame
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SceneUniform {
    mvp: Mat4,
}

/// The sandbox: the engine session plus every resource created at startup.
pub struct Sandbox {
    engine: Engine,
    scene: Scene,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    viewport: Arc<ViewportState>,
    frame_interval: Duration,
    started: Instant,
    state: LoopState,
}

impl Sandbox {
    /// Create the engine session and upload every startup resource: material,
    /// geometry buffers, uniform buffer, and the render pipeline.
    pub fn initialize(
        window: Arc<WinitWindow>,
        viewport: Arc<ViewportState>,
        config: &SandboxConfig,
    ) -> EngineResult<Self> {
        let engine = Engine::new(window, config)?;

        let (width, height) = engine.surface_size();
        let scene = Scene::new(width, height);

        let material = Material::from_bytes(&engine, "baked_color", material::BAKED_COLOR)?;

        let mesh = &scene.renderable.mesh;
        let vertex_buffer = engine.create_buffer_init(
            "Triangle Vertex Buffer",
            mesh.vertex_bytes(),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = engine.create_buffer_init(
            "Triangle Index Buffer",
            mesh.index_bytes(),
            wgpu::BufferUsages::INDEX,
        );

        let uniform = SceneUniform {
            mvp: scene.camera.projection_matrix(),
        };
        let uniform_buffer = engine.create_buffer_init(
            "Scene Uniform Buffer",
            bytemuck::bytes_of(&uniform),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let device = engine.device();

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Triangle Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Triangle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: material.shader(),
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: material.shader(),
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: engine.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Ok(Self {
            engine,
            scene,
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            viewport,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            started: Instant::now(),
            state: LoopState::Initializing,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run the frame loop until an unrecoverable error occurs.
    pub fn run(&mut self) -> EngineResult<()> {
        self.state = LoopState::Running;
        log::info!("starting rendering loop");

        loop {
            if let Err(e) = self.tick() {
                self.state = LoopState::ShuttingDown;
                return Err(e);
            }
            std::thread::sleep(self.frame_interval);
        }
    }

    /// One loop iteration: resize check, transform update, one frame.
    fn tick(&mut self) -> EngineResult<()> {
        if let Some((width, height)) = self.viewport.consume() {
            self.engine.resize(width, height);
            self.scene.camera.set_viewport(width, height);
            log::debug!("viewport: {}x{}", width, height);
        }

        let elapsed = self.started.elapsed();
        let model = transform::spin_matrix(elapsed, self.scene.renderable.spin_rate);
        let uniform = SceneUniform {
            mvp: self.scene.camera.projection_matrix() * model,
        };
        self.engine
            .queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        match self.engine.begin_frame() {
            Ok(mut frame) => {
                self.render(&mut frame);
                self.engine.end_frame(frame);
            }
            Err(EngineError::SurfaceLost) => {
                // Skip the frame; the surface comes back on the next acquire.
                log::warn!("surface lost, reconfiguring");
                self.engine.reconfigure();
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Record the single render pass: clear to the skybox color, draw the
    /// triangle.
    fn render(&self, frame: &mut Frame) {
        let skybox = self.scene.skybox;
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Triangle Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: skybox.x as f64,
                        g: skybox.y as f64,
                        b: skybox.z as f64,
                        a: skybox.w as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.scene.renderable.mesh.index_count() as u32, 0, 0..1);
    }
}

/// Render thread entry point.
///
/// Everything unrecoverable lands here: it is logged and the engine session
/// is dropped. The thread is spawned detached, so closing the window can end
/// the process while teardown is still in flight.
pub fn run_render_thread(
    window: Arc<WinitWindow>,
    viewport: Arc<ViewportState>,
    config: SandboxConfig,
) {
    log::info!("render thread: initializing");

    let result = Sandbox::initialize(window, viewport, &config).and_then(|mut sandbox| {
        log::info!("render thread: running");
        sandbox.run()
    });

    if let Err(e) = result {
        log::error!("render thread: shutting down: {e}");
    }
}
