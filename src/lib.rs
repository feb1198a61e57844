// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod error;
pub mod config;
pub mod utils;
pub mod loader;

// MVC Architecture
pub mod model;
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod view;

pub use config::RoomConfig;
pub use controller::{AppController, InputEvent, Session, UiEffect};
pub use error::{SceneError, SceneResult};
pub use model::SceneModel;

#[cfg(target_arch = "wasm32")]
use std::{cell::{Cell, RefCell}, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

#[cfg(target_arch = "wasm32")]
use controller::{input::wasm as web_input, FrameClock, FrameLoopContext, UiButton};
#[cfg(target_arch = "wasm32")]
use view::{FrameSink, Overlay};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    let config = pick_config(&window);
    let canvas = find_canvas(&document, &config.dom.canvas_selector)?;
    setup_app(window, document, canvas, config)
}

/// Wire the page up and kick off the scene load. Room input arriving before the
/// load finishes is dropped by the session; the overlay buttons work throughout.
#[cfg(target_arch = "wasm32")]
fn setup_app(
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    config: RoomConfig,
) -> Result<(), JsValue> {
    let session = Rc::new(RefCell::new(Session::new(&config)));
    let overlay = Overlay::new(window.clone(), document.clone(), canvas.clone(), config.clone(), session.clone());

    setup_input_listeners(&window, &document, &canvas, &config, session.clone(), overlay.clone())?;

    wasm_bindgen_futures::spawn_local(async move {
        match loader::load_scene(&config).await {
            Ok(scene) => {
                let viewport = web_input::window_viewport(&window);
                session.borrow_mut().ready(AppController::new(&config, scene, viewport));
                overlay.hide_loader();

                let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
                let mut frame_ctx = FrameLoopContext {
                    session,
                    clock: FrameClock::new(now),
                    sink: FrameSink::new(canvas.into()),
                    dirty: true,
                };
                let window_for_loop = window.clone();
                let frame_loop = RcCellCallback::new(window.clone(), move || frame_ctx.update(&window_for_loop));
                if let Err(err) = frame_loop.start() {
                    tracing::error!("frame loop failed to start: {err:?}");
                }
            }
            Err(err) => {
                // The loader stays visible; only the overlay buttons keep working
                tracing::error!("{err}");
                session.borrow_mut().fail();
            }
        }
    });

    Ok(())
}

/// Register a listener that turns a DOM event into an [`InputEvent`] and
/// applies the resulting effects
#[cfg(target_arch = "wasm32")]
fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    name: &str,
    session: &Rc<RefCell<Session>>,
    overlay: &Overlay,
    to_input: impl Fn(&E) -> Option<InputEvent> + 'static,
) -> Result<(), JsValue> {
    let session = session.clone();
    let overlay = overlay.clone();
    let closure = Closure::wrap(Box::new(move |e: Event| {
        let Ok(e) = e.dyn_into::<E>() else { return };
        let Some(input) = to_input(&e) else { return };
        // Release the session before touching the DOM; audio callbacks borrow it again
        let effects = session.borrow_mut().handle(input);
        overlay.apply_all(effects);
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Setup all input event listeners with platform-agnostic abstractions
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    config: &RoomConfig,
    session: Rc<RefCell<Session>>,
    overlay: Overlay,
) -> Result<(), JsValue> {
    // Picking listens on the whole window; exempt overlay regions are filtered by the router
    listen::<MouseEvent>(window, "click", &session, &overlay, |e| Some(web_input::click_to_input(e)))?;
    listen::<MouseEvent>(canvas, "mousedown", &session, &overlay, |e| Some(web_input::mouse_down_to_input(e)))?;
    listen::<MouseEvent>(canvas, "mousemove", &session, &overlay, |e| Some(web_input::mouse_move_to_input(e)))?;
    listen::<MouseEvent>(document, "mouseup", &session, &overlay, |e| Some(web_input::mouse_up_to_input(e)))?;
    listen::<WheelEvent>(canvas, "wheel", &session, &overlay, |e| {
        e.prevent_default();
        Some(web_input::wheel_to_input(e))
    })?;
    {
        let window_for_resize = window.clone();
        listen::<Event>(window, "resize", &session, &overlay, move |_| {
            Some(InputEvent::Resize(web_input::window_viewport(&window_for_resize)))
        })?;
    }

    let buttons = [
        (&config.dom.logo, UiButton::Logo),
        (&config.dom.close_button, UiButton::Close),
        (&config.dom.contact_button, UiButton::Contact),
        (&config.dom.play_pause, UiButton::PlayPause),
    ];
    for (id, button) in buttons {
        let Some(el) = document.get_element_by_id(id) else {
            tracing::warn!(%id, "overlay button missing");
            continue;
        };
        listen::<MouseEvent>(&el, "click", &session, &overlay, move |e| {
            e.prevent_default();
            Some(InputEvent::Button(button))
        })?;
    }

    Ok(())
}

/// Desktop or mobile profile from the viewport width media query
#[cfg(target_arch = "wasm32")]
fn pick_config(window: &Window) -> RoomConfig {
    let query = format!("(max-width: {}px)", config::MOBILE_BREAKPOINT_PX);
    let is_mobile = window
        .match_media(&query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    tracing::info!(is_mobile, "room profile selected");
    if is_mobile { RoomConfig::mobile() } else { RoomConfig::default() }
}

#[cfg(target_arch = "wasm32")]
fn find_canvas(document: &Document, selector: &str) -> Result<HtmlCanvasElement, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| js_error(format!("no canvas matching `{selector}`")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| js_error(format!("`{selector}` is not a canvas")))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

/// requestAnimationFrame loop around a boxed callback. Stops for good when the
/// page is hidden for unload.
#[cfg(target_arch = "wasm32")]
struct RcCellCallback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
    stopped: Rc<Cell<bool>>,
}

#[cfg(target_arch = "wasm32")]
impl RcCellCallback {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
            stopped: Rc::new(Cell::new(false)),
        }
    }

    fn start(self) -> Result<(), JsValue> {
        {
            let stopped = self.stopped.clone();
            let pagehide = Closure::wrap(Box::new(move |_e: Event| {
                tracing::debug!("page hidden, frame loop stopped");
                stopped.set(true);
            }) as Box<dyn FnMut(Event)>);
            self.window.add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref())?;
            pagehide.forget();
        }

        let inner = self.inner.clone();
        let window = self.window.clone();
        let stopped = self.stopped.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if stopped.get() {
                return;
            }
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            if let Some(cb) = callback_clone.borrow().as_ref() {
                if let Err(err) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    tracing::error!("RAF failed: {err:?}");
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }
        // The closure holds its own Rc, keeping the loop alive after we return
        Ok(())
    }
}
