// VIEW: the page around the canvas and the per-frame handoff to the renderer
pub mod overlay;
pub mod frame_sink;

pub use overlay::Overlay;
pub use frame_sink::{FrameSink, FRAME_EVENT};
