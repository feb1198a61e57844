use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, EventTarget};

use crate::controller::FrameState;

/// Event the renderer listens for on the canvas
pub const FRAME_EVENT: &str = "roomfolio:frame";

/// Hands the interaction state to the renderer each frame as a DOM event
/// carrying the frame as JSON
pub struct FrameSink {
    target: EventTarget,
}

impl FrameSink {
    pub fn new(target: EventTarget) -> Self {
        Self { target }
    }

    pub fn publish(&self, frame: &FrameState<'_>) -> Result<(), JsValue> {
        let json = serde_json::to_string(frame).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&json));
        let event = CustomEvent::new_with_event_init_dict(FRAME_EVENT, &init)?;
        self.target.dispatch_event(&event)?;
        Ok(())
    }
}
