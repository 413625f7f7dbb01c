//! Wavesheet - a photograph rippling on a noise-displaced plane
//!
//! The texture loads in the background; the plane starts drawing as soon as
//! it arrives.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavesheet::camera::Camera;
use wavesheet::cli::Args;
use wavesheet::mesh::PlaneGeometry;
use wavesheet::params::{MaterialParams, PlaneParams, RenderConfig};
use wavesheet::rendering::WgpuBackend;
use wavesheet::texture::{TextureLoader, TextureSource};
use wavesheet::wave::WaveMesh;
use wavesheet::WaveError;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    backend: Option<WgpuBackend>,
    mesh: Option<WaveMesh<WgpuBackend>>,
    camera: Camera,

    // Configuration
    render_config: RenderConfig,
    material_params: MaterialParams,
    texture_source: TextureSource,
}

impl App {
    fn new(args: &Args) -> Self {
        let (render_config, material_params) = args.to_configs();
        Self {
            window: None,
            backend: None,
            mesh: None,
            camera: Camera::new(&render_config),
            render_config,
            material_params,
            texture_source: args.texture.clone(),
        }
    }

    /// Create window, GPU backend and mesh. Errors here are fatal.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> wavesheet::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| WaveError::GpuInit(format!("Failed to create window: {}", e)))?;
        let window = Arc::new(window);

        let mut backend = pollster::block_on(WgpuBackend::new(
            Arc::clone(&window),
            &self.render_config,
            &self.material_params,
        ))?;

        let (width, height) = backend.size();
        self.camera.resize(width, height);
        backend.set_camera(self.camera.view_proj());

        let loader = TextureLoader::spawn(self.texture_source.clone(), self.material_params.flip_y);
        let plane = PlaneGeometry::new(PlaneParams::default());
        let mesh = WaveMesh::mount(
            &mut backend,
            &plane,
            &self.material_params,
            loader,
            Instant::now(),
        )?;

        self.window = Some(window);
        self.backend = Some(backend);
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Release GPU resources and leave the event loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let (Some(mesh), Some(backend)) = (self.mesh.as_mut(), self.backend.as_mut()) {
            mesh.unmount(backend);
        }
        event_loop.exit();
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(mesh), Some(backend)) = (self.mesh.as_mut(), self.backend.as_mut()) else {
            return;
        };

        if let Err(e) = mesh.frame(backend, Instant::now()) {
            log::error!("Render error: {}", e);
            self.shutdown(event_loop);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            event_loop.exit();
            return;
        }

        println!("\nWavesheet is running!");
        println!("Texture: {}", self.texture_source);
        println!("Press ESC to quit\n");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(backend) = self.backend.as_mut() {
                    backend.resize(size.width, size.height);
                    let (width, height) = backend.size();
                    self.camera.resize(width, height);
                    backend.set_camera(self.camera.view_proj());
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Wavesheet - noise-displaced textured plane");
    println!("Initializing...\n");

    let mut app = App::new(&args);
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
