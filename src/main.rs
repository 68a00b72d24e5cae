//! Neon Geometry - a wireframe lattice that morphs between classic parametric
//! surfaces and swells with the low end of whatever the microphone hears.
//!
//! Keys: Space/Enter morph, A enable audio, Tab next microphone, Esc quit.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use neon_geometry::audio::{AudioBackend, AudioInput, CaptureStatus, CpalBackend, DeviceList};
use neon_geometry::camera::CameraSystem;
use neon_geometry::cli::{Args, Settings};
use neon_geometry::params::RenderConfig;
use neon_geometry::rendering::{morph_vertices, RenderSystem, Uniforms};
use neon_geometry::scene::Scene;
use neon_geometry::surface::{GeometryCache, CATALOG};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    scene: Scene,
    camera: CameraSystem,
    audio: AudioInput,
    devices: DeviceList,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    start_time: Instant,

    /// Last window title, to skip redundant updates
    title: String,

    /// Startup failure to report once the event loop exits
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(
        settings: Settings,
        cache: Arc<GeometryCache>,
        audio: AudioInput,
        devices: DeviceList,
    ) -> Self {
        let scene = Scene::new(cache, settings.morph, settings.analyser, settings.level);
        let camera = CameraSystem::new(settings.camera);

        Self {
            window: None,
            render_system: None,
            scene,
            camera,
            audio,
            devices,
            render_config: settings.render,
            start_time: Instant::now(),
            title: String::new(),
            fatal: None,
        }
    }

    fn elapsed_s(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Neon Geometry")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let morph = self.scene.morph();
        let vertices = morph_vertices(self.scene.cache().grid(), morph.source(), morph.target());
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.scene.cache().grid(),
            &vertices,
            &self.render_config,
        ))
        .context("failed to initialize renderer")?;

        log::info!("Neon Geometry is running");
        log::info!("Space: morph | A: audio | Tab: next microphone | Esc: quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn trigger_morph(&mut self) {
        let now = self.elapsed_s();
        if self.scene.trigger_morph(now).is_none() {
            return;
        }

        // Endpoints change only here; the shader does the blending
        if let Some(render_system) = &self.render_system {
            let morph = self.scene.morph();
            let vertices =
                morph_vertices(self.scene.cache().grid(), morph.source(), morph.target());
            render_system.update_vertices(&vertices);
        }
    }

    fn enable_audio(&mut self) {
        self.audio.request(self.devices.selected().device_id());
        self.scene.reset_audio_history();
    }

    fn next_device(&mut self) {
        let option = self.devices.cycle().clone();
        log::info!("Microphone: {}", option.label);

        if self.audio.switch_device(option.device_id()) {
            self.scene.reset_audio_history();
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let time_s = self.elapsed_s();

        if self.audio.poll() {
            match self.audio.status() {
                CaptureStatus::Unsupported { reason } | CaptureStatus::Failed { reason } => {
                    log::warn!("Audio: {} ({})", self.audio.status().label(), reason)
                }
                status => log::info!("Audio: {}", status.label()),
            }
        }

        let frame = self.scene.frame(time_s, self.audio.tap());
        self.update_title();

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        let (view_proj, _eye) = self
            .camera
            .create_view_proj_matrix(time_s, &self.render_config);

        render_system.update_uniforms(&Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            time: frame.time,
            morph_factor: frame.morph_factor,
            audio_level: frame.audio_level,
            fog_near: self.render_config.fog_near,
            fog_far: self.render_config.fog_far,
            _padding: [0.0; 3],
        });

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.resize(width, height)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Render error: out of GPU memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn update_title(&mut self) {
        let status = self.scene.status();
        let mut audio = self.audio.status().label().to_string();
        if self.audio.is_active() {
            audio = format!("{} {}", audio, self.scene.audio().display());
        } else if let Some(reason) = self.audio.status().reason() {
            audio = format!("{} [{}]", audio, reason);
        }

        let title = format!("{} | {} | {}", status.title, status.status, audio);
        if title == self.title {
            return;
        }

        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        log::debug!("{}", title);
        self.title = title;
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

        if let Err(e) = self.init_window(event_loop) {
            log::error!("{:#}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space | KeyCode::Enter => self.trigger_morph(),
                KeyCode::KeyA => self.enable_audio(),
                KeyCode::Tab => self.next_device(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let backend: Arc<dyn AudioBackend> = Arc::new(CpalBackend);

    let mut devices = DeviceList::query(backend.as_ref()).unwrap_or_else(|e| {
        log::warn!("Error enumerating devices: {}", e);
        DeviceList::default()
    });

    if args.list_devices {
        for option in devices.options().iter().skip(1) {
            println!("{}", option.label);
        }
        return Ok(());
    }

    if let Some(name) = &args.device {
        if !devices.select(name) {
            log::warn!("Microphone '{}' not found, using default input", name);
        }
    }

    let settings = args.settings();
    settings.validate().context("invalid configuration")?;

    let cache = Arc::new(
        GeometryCache::build(&CATALOG, &settings.geometry)
            .context("failed to build surface geometry")?,
    );

    let mut audio = AudioInput::new(backend, settings.analyser.tap_capacity);
    if args.audio {
        audio.request(devices.selected().device_id());
    }

    let mut app = App::new(settings, cache, audio, devices);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
