// CONTROLLER: Input, theme/camera state machines, hotspot routing and the frame tick
pub mod input;
pub mod orbit;
pub mod camera_controller;
pub mod theme_controller;
pub mod hotspot_router;
pub mod app;
pub mod overlay_state;
pub mod session;
pub mod frame_loop;

pub use input::{InputEvent, MouseButton, TargetPath, UiButton};
pub use orbit::OrbitControls;
pub use camera_controller::{CameraController, CameraState, InteractionState};
pub use theme_controller::ThemeController;
pub use hotspot_router::{HotspotAction, HotspotRouter};
pub use app::{AppController, FrameState, UiEffect};
pub use overlay_state::OverlayState;
pub use session::{Session, Stage};
pub use frame_loop::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoopContext;
