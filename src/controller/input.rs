/// Platform-agnostic input handling
use crate::utils::Viewport;

/// Selectors (`#id`, `.class`) of the event target and its ancestors,
/// innermost first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetPath(pub Vec<String>);

impl TargetPath {
    pub fn new<S: Into<String>>(selectors: impl IntoIterator<Item = S>) -> Self {
        Self(selectors.into_iter().map(Into::into).collect())
    }

    /// True if the target is, or sits inside, an element matching `selector`
    pub fn is_within(&self, selector: &str) -> bool {
        self.0.iter().any(|s| s == selector)
    }

    pub fn is_within_any(&self, selectors: &[String]) -> bool {
        selectors.iter().any(|s| self.is_within(s))
    }
}

/// Overlay buttons drawn over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiButton {
    Logo,
    Close,
    Contact,
    PlayPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A click anywhere on the page
    Click { x: f32, y: f32, target: TargetPath },
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp { target: TargetPath },
    MouseWheel { delta_y: f32 },
    Resize(Viewport),
    Button(UiButton),
}

/// Drag bookkeeping for orbiting
#[derive(Debug, Default)]
pub struct DragState {
    last: Option<(f32, f32)>,
}

impl DragState {
    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer moved; returns the delta since the last move while a button is held
    pub fn moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (lx, ly) = self.last?;
        self.last = Some((x, y));
        Some((x - lx, y - ly))
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, MouseEvent, WheelEvent};

    /// Walk from the event target up to the document root collecting selectors
    pub fn target_path(e: &Event) -> TargetPath {
        let mut selectors = Vec::new();
        let mut current = e.target().and_then(|t| t.dyn_into::<Element>().ok());
        while let Some(el) = current {
            let id = el.id();
            if !id.is_empty() {
                selectors.push(format!("#{id}"));
            }
            let classes = el.class_list();
            for i in 0..classes.length() {
                if let Some(class) = classes.item(i) {
                    selectors.push(format!(".{class}"));
                }
            }
            current = el.parent_element();
        }
        TargetPath(selectors)
    }

    pub fn click_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::Click {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
            target: target_path(e),
        }
    }

    pub fn mouse_down_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseDown {
            button: MouseButton::from_web_button(e.button()),
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseMove { x: e.client_x() as f32, y: e.client_y() as f32 }
    }

    pub fn mouse_up_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseUp { target: target_path(e) }
    }

    pub fn wheel_to_input(e: &WheelEvent) -> InputEvent {
        InputEvent::MouseWheel { delta_y: e.delta_y() as f32 }
    }

    pub fn window_viewport(window: &web_sys::Window) -> Viewport {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        Viewport::new(w as f32, h as f32)
    }
}
