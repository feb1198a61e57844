use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement, HtmlCanvasElement, HtmlElement, HtmlImageElement, Window};

use crate::config::RoomConfig;
use crate::controller::{Session, UiEffect};
use crate::error::SceneError;
use crate::model::Theme;

/// DOM side of [`UiEffect`]s: body theme class, overlay buttons, contact
/// dropdown, background music
#[derive(Clone)]
pub struct Overlay {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    config: Rc<RoomConfig>,
    audio: Option<HtmlAudioElement>,
    session: Rc<RefCell<Session>>,
}

impl Overlay {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        config: RoomConfig,
        session: Rc<RefCell<Session>>,
    ) -> Self {
        let audio = HtmlAudioElement::new_with_src(&config.audio_url)
            .map_err(|e| tracing::warn!("audio element unavailable: {e:?}"))
            .ok();
        Self { window, document, canvas, config: Rc::new(config), audio, session }
    }

    pub fn apply_all(&self, effects: Vec<UiEffect>) {
        for effect in effects {
            if let Err(err) = self.apply(effect) {
                tracing::warn!("ui effect failed: {err:?}");
            }
        }
    }

    pub fn apply(&self, effect: UiEffect) -> Result<(), JsValue> {
        tracing::debug!(?effect, "apply");
        match effect {
            UiEffect::OpenUrl { url, target } => {
                self.window.open_with_url_and_target(&url, target.as_str())?;
            }
            UiEffect::SetBodyTheme(theme) => self.set_body_theme(theme)?,
            UiEffect::ShowCloseButton(show) => {
                if let Some(btn) = self.element_by_id(&self.config.dom.close_button) {
                    btn.style().set_property("display", if show { "block" } else { "none" })?;
                }
            }
            UiEffect::SetContactMenuOpen(open) => {
                let class = &self.config.dom.contact_dropdown_open_class;
                if let Some(dropdown) = self.document.query_selector(&self.config.dom.contact_dropdown)? {
                    dropdown.class_list().toggle_with_force(class, open)?;
                }
            }
            UiEffect::PlayAudio => {
                self.set_play_icon(&self.config.pause_icon);
                self.play_audio();
            }
            UiEffect::PauseAudio => {
                if let Some(audio) = &self.audio {
                    audio.pause()?;
                }
                self.set_play_icon(&self.config.play_icon);
            }
            // Drawing buffer follows the window; the next frame carries the new aspect
            UiEffect::ResizeRenderer(viewport) => {
                tracing::trace!(width = viewport.width, height = viewport.height, "resize");
                self.canvas.set_width(viewport.width as u32);
                self.canvas.set_height(viewport.height as u32);
            }
        }
        Ok(())
    }

    /// Hide the loading indicator once the scene is up
    pub fn hide_loader(&self) {
        if let Some(loader) = self.element_by_id(&self.config.dom.loader) {
            if let Err(err) = loader.style().set_property("display", "none") {
                tracing::warn!("could not hide loader: {err:?}");
            }
        }
    }

    fn set_body_theme(&self, theme: Theme) -> Result<(), JsValue> {
        let body = self.document.body().ok_or_else(|| JsValue::from_str("no body on document"))?;
        let classes = body.class_list();
        classes.remove_1(theme.toggled().css_class())?;
        classes.add_1(theme.css_class())?;
        Ok(())
    }

    fn play_audio(&self) {
        let Some(audio) = &self.audio else { return };
        let promise: js_sys::Promise = match audio.play() {
            Ok(promise) => promise,
            Err(err) => {
                self.playback_blocked(format!("{err:?}"));
                return;
            }
        };
        let overlay = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                overlay.playback_blocked(format!("{err:?}"));
            }
        });
    }

    fn playback_blocked(&self, reason: String) {
        tracing::debug!("{}", SceneError::PlaybackBlocked(reason));
        let effects = match self.session.try_borrow_mut() {
            Ok(mut session) => session.audio_blocked(),
            Err(_) => return,
        };
        self.apply_all(effects);
    }

    fn set_play_icon(&self, src: &str) {
        let selector = format!("#{} img", self.config.dom.play_pause);
        let icon = self
            .document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        if let Some(icon) = icon {
            icon.set_src(src);
        }
    }

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}
