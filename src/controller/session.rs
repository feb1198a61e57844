use crate::config::RoomConfig;

use super::app::{AppController, UiEffect};
use super::input::{InputEvent, UiButton};
use super::overlay_state::OverlayState;

/// How far the room has come up
pub enum Stage {
    Loading,
    Ready(AppController),
    /// Load failed; the loading indicator stays up
    Failed,
}

/// Lifetime of the page. Room input is ignored until the scene has loaded;
/// the contact menu and music work in every stage.
pub struct Session {
    overlay: OverlayState,
    stage: Stage,
}

impl Session {
    pub fn new(config: &RoomConfig) -> Self {
        Self { overlay: OverlayState::new(config.dom.contact_menu.clone()), stage: Stage::Loading }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn ready(&mut self, app: AppController) {
        self.stage = Stage::Ready(app);
    }

    pub fn fail(&mut self) {
        self.stage = Stage::Failed;
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn app(&self) -> Option<&AppController> {
        match &self.stage {
            Stage::Ready(app) => Some(app),
            _ => None,
        }
    }

    pub fn app_mut(&mut self) -> Option<&mut AppController> {
        match &mut self.stage {
            Stage::Ready(app) => Some(app),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<UiEffect> {
        match event {
            InputEvent::Button(UiButton::Contact) => self.overlay.toggle_contact_menu(),
            InputEvent::Button(UiButton::PlayPause) => self.overlay.toggle_audio(),
            InputEvent::MouseUp { target } => {
                let mut effects = self.overlay.mouse_up(&target);
                effects.extend(self.handle_room(InputEvent::MouseUp { target }));
                effects
            }
            other => self.handle_room(other),
        }
    }

    fn handle_room(&mut self, event: InputEvent) -> Vec<UiEffect> {
        match self.app_mut() {
            Some(app) => app.handle(event),
            None => {
                tracing::trace!(?event, "room input before scene load dropped");
                Vec::new()
            }
        }
    }

    pub fn audio_blocked(&mut self) -> Vec<UiEffect> {
        self.overlay.audio_blocked()
    }

    pub fn update(&mut self, dt: f32) -> bool {
        self.app_mut().map(|app| app.update(dt)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::TargetPath;
    use crate::model::{SceneManifest, SceneModel};
    use crate::utils::Viewport;

    #[test]
    fn test_room_input_before_load_is_dropped() {
        let mut session = Session::new(&RoomConfig::default());
        let effects = session.handle(InputEvent::Click { x: 400.0, y: 300.0, target: TargetPath::default() });
        assert!(effects.is_empty());
        assert!(!session.update(0.016));
        assert!(session.app().is_none());
    }

    #[test]
    fn test_overlay_buttons_work_while_loading() {
        let mut session = Session::new(&RoomConfig::default());
        assert!(matches!(session.stage(), Stage::Loading));
        assert_eq!(session.handle(InputEvent::Button(UiButton::Contact)), vec![UiEffect::SetContactMenuOpen(true)]);
        assert_eq!(session.handle(InputEvent::Button(UiButton::PlayPause)), vec![UiEffect::PlayAudio]);
        assert_eq!(
            session.handle(InputEvent::MouseUp { target: TargetPath::new([".experience-canvas"]) }),
            vec![UiEffect::SetContactMenuOpen(false)]
        );
        assert_eq!(session.audio_blocked(), vec![UiEffect::PauseAudio]);
    }

    #[test]
    fn test_overlay_buttons_work_after_failed_load() {
        let mut session = Session::new(&RoomConfig::default());
        session.fail();
        assert_eq!(session.handle(InputEvent::Button(UiButton::PlayPause)), vec![UiEffect::PlayAudio]);
        assert!(session.handle(InputEvent::Button(UiButton::Close)).is_empty(), "no camera to reset");
    }

    #[test]
    fn test_overlay_state_survives_load() {
        let config = RoomConfig::default();
        let mut session = Session::new(&config);
        session.handle(InputEvent::Button(UiButton::Contact));

        let scene = SceneModel::from_manifest(SceneManifest::default(), &config);
        session.ready(AppController::new(&config, scene, Viewport::new(800.0, 600.0)));
        assert!(session.overlay().is_contact_menu_open());
        assert_eq!(
            session.handle(InputEvent::MouseUp { target: TargetPath::default() }),
            vec![UiEffect::SetContactMenuOpen(false)]
        );
    }
}
