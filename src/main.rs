use std::sync::Arc;
use std::time::Instant;

use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

// Import from the library crate
use roomfolio::{
    controller::{MouseButton, TargetPath, UiButton},
    logging, loader, utils::Viewport,
    AppController, InputEvent, RoomConfig, Session, UiEffect,
};

/// Native shell: drives the interaction layer from winit events and logs the
/// effects a browser page would apply
struct App {
    window: Arc<Window>,
    session: Session,
    cursor: (f32, f32),
    last_frame_time: Instant,
}

impl App {
    fn new(window: Arc<Window>, config: RoomConfig) -> roomfolio::SceneResult<Self> {
        let mut session = Session::new(&config);
        let scene = pollster::block_on(loader::load_scene(&config))?;
        session.ready(AppController::new(&config, scene, viewport_of(&window)));
        Ok(Self { window, session, cursor: (0.0, 0.0), last_frame_time: Instant::now() })
    }

    fn input(&mut self, event: &WindowEvent) {
        let inputs = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                vec![InputEvent::MouseMove { x: self.cursor.0, y: self.cursor.1 }]
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => MouseButton::Left,
                };
                vec![InputEvent::MouseDown { button, x: self.cursor.0, y: self.cursor.1 }]
            }
            // A browser fires mouseup then click on release
            WindowEvent::MouseInput { state: ElementState::Released, button: winit::event::MouseButton::Left, .. } => vec![
                InputEvent::MouseUp { target: TargetPath::default() },
                InputEvent::Click { x: self.cursor.0, y: self.cursor.1, target: TargetPath::default() },
            ],
            WindowEvent::MouseWheel { delta, .. } => {
                // Browser wheel deltas are positive when scrolling down
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                vec![InputEvent::MouseWheel { delta_y }]
            }
            WindowEvent::KeyboardInput { event: KeyEvent { state: ElementState::Pressed, physical_key: PhysicalKey::Code(code), .. }, .. } => {
                match code {
                    KeyCode::Escape | KeyCode::Home => vec![InputEvent::Button(UiButton::Close)],
                    KeyCode::KeyC => vec![InputEvent::Button(UiButton::Contact)],
                    KeyCode::KeyM => vec![InputEvent::Button(UiButton::PlayPause)],
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        };

        for input in inputs {
            let effects = self.session.handle(input);
            apply(&effects);
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            let effects = self.session.handle(InputEvent::Resize(Viewport::new(size.width as f32, size.height as f32)));
            apply(&effects);
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32().min(0.1);
        self.last_frame_time = now;

        if !self.session.update(dt) {
            return;
        }
        if let Some(app) = self.session.app() {
            let pose = app.camera().pose();
            tracing::trace!(position = ?pose.position, rotation = ?pose.rotation, theme = ?app.theme(), "frame");
        }
    }
}

fn viewport_of(window: &Window) -> Viewport {
    let size = window.inner_size();
    Viewport::new(size.width.max(1) as f32, size.height.max(1) as f32)
}

fn apply(effects: &[UiEffect]) {
    for effect in effects {
        match effect {
            UiEffect::OpenUrl { url, target } => tracing::info!(%url, target = target.as_str(), "open link"),
            other => tracing::info!(effect = ?other, "ui effect"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("Roomfolio - Native")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut config = RoomConfig::for_viewport_width(window.inner_size().width);
    config.scene_url = std::env::args().nth(1).unwrap_or_else(|| "assets/room.json".to_string());

    let mut app = match App::new(window.clone(), config) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!("{err}");
            return Err(err.into());
        }
    };

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => app.resize(*physical_size),
                    WindowEvent::RedrawRequested => app.update(),
                    other => app.input(other),
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}
