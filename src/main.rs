use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::Key,
    window::{CursorGrabMode, Window},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

// Import from the library crate
use orrery::{
    demo, logging,
    controller::{FrameLoop, InputEvent, InputProcessor},
    ClientConfig,
};

/// Seconds between camera status lines
const STATUS_INTERVAL: f32 = 1.0;

struct App {
    window: Arc<Window>,
    frame_loop: FrameLoop,
    input_processor: InputProcessor,
    last_frame_time: Instant,
    status_timer: f32,
}

impl App {
    fn new(window: Arc<Window>, frame_loop: FrameLoop) -> Self {
        let size = window.inner_size();
        let mut app = Self {
            window,
            frame_loop,
            input_processor: InputProcessor::default(),
            last_frame_time: Instant::now(),
            status_timer: 0.0,
        };
        app.frame_loop.set_viewport(size.width, size.height);
        app
    }

    fn set_pointer_lock(&mut self, locked: bool) {
        let grab = if locked {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            warn!("cursor grab failed: {e}");
            return;
        }
        self.window.set_cursor_visible(!locked);
        self.frame_loop
            .input
            .process_event(&InputEvent::PointerLockChanged { locked });
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, logical_key, .. }, .. } => {
                if *state != ElementState::Pressed {
                    return false;
                }
                let Some(key) = key_name(logical_key) else {
                    return false;
                };
                if self.input_processor.is_escape(&key) {
                    self.set_pointer_lock(false);
                    true
                } else if self.input_processor.wants_next_target(&key) {
                    if let Err(e) = self.frame_loop.cycle_follow_target() {
                        warn!("cannot switch follow target: {e}");
                    }
                    true
                } else {
                    false
                }
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                self.set_pointer_lock(true);
                true
            }
            WindowEvent::Focused(false) => {
                self.frame_loop.input.process_event(&InputEvent::FocusLost);
                true
            }
            WindowEvent::Occluded(occluded) => {
                self.frame_loop
                    .input
                    .process_event(&InputEvent::VisibilityChanged { visible: !occluded });
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, dt: f32) {
        // the uniform is what an attached renderer would upload
        let uniform = self.frame_loop.step(dt as f64);

        self.status_timer += dt;
        if self.status_timer >= STATUS_INTERVAL {
            self.status_timer = 0.0;
            self.log_status(uniform.is_some());
        }
    }

    fn log_status(&self, has_uniform: bool) {
        let Some(camera) = self.frame_loop.active_camera else {
            return;
        };
        let scene = &self.frame_loop.scene;
        let pitch = scene.node(camera).map(|n| n.rotation.x.to_degrees());
        let position = scene.world_position(camera);
        let target = scene
            .followed_object(camera)
            .map(|e| e.object.to_string())
            .unwrap_or_else(|| "<nothing>".to_string());
        info!(
            frame = self.frame_loop.frame(),
            has_uniform,
            "camera at {:?}, pitch {:?} deg, following {}",
            position,
            pitch,
            target,
        );
    }
}

/// Key names as the browser reports them ("a", "Tab", "Escape")
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match ClientConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    };
    logging::init(&config);
    if let Some(e) = config_error {
        warn!("{e}; using default settings");
    }

    let frame_loop = demo::home_system(config)?;

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("orrery")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = App::new(window, frame_loop);
    info!("click the window to capture the mouse, Tab to switch bodies, Escape to release");

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.frame_loop.set_viewport(physical_size.width, physical_size.height);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32();
                            app.last_frame_time = now;

                            app.update(dt);
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta }, .. } => {
                app.frame_loop
                    .input
                    .process_event(&InputEvent::MouseMove { dx: delta.0, dy: delta.1 });
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            Event::LoopExiting => {
                info!("exiting after {} frames", app.frame_loop.frame());
            }
            _ => {}
        }
    }).map_err(|e| {
        error!("event loop failed: {e}");
        e
    })?;

    Ok(())
}
