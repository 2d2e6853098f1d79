use std::thread;
use triangle_sandbox::window::Window;
use triangle_sandbox::{material, sandbox, SandboxConfig};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

/// Best-effort startup diagnostics.
fn diagnostics(config: &SandboxConfig, scale_factor: f64) {
    log::info!(
        "triangle sandbox on {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    log::info!(
        "window {}x{}, strategy {:?}, frame interval {}ms",
        config.width,
        config.height,
        config.strategy,
        config.frame_interval_ms
    );
    log::info!("display scale factor: {scale_factor}");
    log::info!("bundled material: {} bytes", material::BAKED_COLOR.len());
}

/// Query the primary display's scale factor, substituting 1.0 when the
/// windowing system does not report a primary monitor.
fn display_scale_factor(event_loop: &EventLoop<()>) -> f64 {
    match event_loop.primary_monitor() {
        Some(monitor) => monitor.scale_factor(),
        None => {
            log::warn!("unable to determine display scale factor, defaulting to 1.0");
            1.0
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SandboxConfig::default();
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    diagnostics(&config, display_scale_factor(&event_loop));

    let window = Window::new(&event_loop, &config.title, config.width, config.height);

    // The render thread owns the engine session and all GPU resources; the
    // viewport atomics are the only state shared with this thread. It is not
    // joined: process exit abandons it mid-frame.
    let render_window = window.window_arc();
    let render_viewport = window.viewport();
    thread::Builder::new()
        .name("render".into())
        .spawn(move || sandbox::run_render_thread(render_window, render_viewport, config))
        .expect("Failed to spawn render thread");

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            if let Event::WindowEvent { event, .. } = event {
                window.handle_event(&event);

                if let WindowEvent::CloseRequested = event {
                    log::info!("close requested, exiting");
                    elwt.exit();
                }
            }
        })
        .expect("Event loop error");
}
