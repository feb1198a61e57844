use super::app::UiEffect;
use super::input::TargetPath;

/// Page chrome that works whether or not the room has loaded: the contact
/// dropdown and the background music
#[derive(Debug)]
pub struct OverlayState {
    contact_menu: String,
    contact_menu_open: bool,
    audio_playing: bool,
}

impl OverlayState {
    /// `contact_menu` is the selector of the dropdown's container
    pub fn new(contact_menu: impl Into<String>) -> Self {
        Self { contact_menu: contact_menu.into(), contact_menu_open: false, audio_playing: false }
    }

    pub fn is_contact_menu_open(&self) -> bool {
        self.contact_menu_open
    }

    pub fn is_audio_playing(&self) -> bool {
        self.audio_playing
    }

    pub fn toggle_contact_menu(&mut self) -> Vec<UiEffect> {
        self.contact_menu_open = !self.contact_menu_open;
        vec![UiEffect::SetContactMenuOpen(self.contact_menu_open)]
    }

    /// A press released outside the contact menu closes it
    pub fn mouse_up(&mut self, target: &TargetPath) -> Vec<UiEffect> {
        if self.contact_menu_open && !target.is_within(&self.contact_menu) {
            self.contact_menu_open = false;
            return vec![UiEffect::SetContactMenuOpen(false)];
        }
        Vec::new()
    }

    pub fn toggle_audio(&mut self) -> Vec<UiEffect> {
        self.audio_playing = !self.audio_playing;
        vec![if self.audio_playing { UiEffect::PlayAudio } else { UiEffect::PauseAudio }]
    }

    /// The browser refused to start the music; stay paused
    pub fn audio_blocked(&mut self) -> Vec<UiEffect> {
        if !self.audio_playing {
            return Vec::new();
        }
        self.audio_playing = false;
        vec![UiEffect::PauseAudio]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_menu_toggle_and_outside_close() {
        let mut overlay = OverlayState::new(".contact-menu");
        assert_eq!(overlay.toggle_contact_menu(), vec![UiEffect::SetContactMenuOpen(true)]);

        let inside = TargetPath::new(["#contact-btn", ".contact-menu"]);
        assert!(overlay.mouse_up(&inside).is_empty());
        assert!(overlay.is_contact_menu_open());

        let outside = TargetPath::new([".experience-canvas"]);
        assert_eq!(overlay.mouse_up(&outside), vec![UiEffect::SetContactMenuOpen(false)]);
        assert!(overlay.mouse_up(&outside).is_empty(), "closed menu stays quiet");
    }

    #[test]
    fn test_play_pause_and_blocked_playback() {
        let mut overlay = OverlayState::new(".contact-menu");
        assert_eq!(overlay.toggle_audio(), vec![UiEffect::PlayAudio]);
        assert_eq!(overlay.audio_blocked(), vec![UiEffect::PauseAudio]);
        assert!(!overlay.is_audio_playing());
        assert!(overlay.audio_blocked().is_empty());
        assert_eq!(overlay.toggle_audio(), vec![UiEffect::PlayAudio]);
        assert_eq!(overlay.toggle_audio(), vec![UiEffect::PauseAudio]);
    }
}
