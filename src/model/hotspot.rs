use super::camera::Pose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotKind {
    ExternalLink,
    ThemeToggle,
    InternalFocus,
}

/// A named interactive node and what clicking it means
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub name: String,
    pub kind: HotspotKind,
    pub target_url: Option<String>,
    pub focus_pose: Option<Pose>,
}

impl Hotspot {
    pub fn link(name: impl Into<String>, url: Option<String>) -> Self {
        Self { name: name.into(), kind: HotspotKind::ExternalLink, target_url: url, focus_pose: None }
    }

    pub fn theme_toggle(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: HotspotKind::ThemeToggle, target_url: None, focus_pose: None }
    }

    pub fn focus(name: impl Into<String>, pose: Pose) -> Self {
        Self { name: name.into(), kind: HotspotKind::InternalFocus, target_url: None, focus_pose: Some(pose) }
    }
}

/// Where an opened link should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Let the browser pick (project links)
    Default,
    /// Force a new tab (social links)
    Blank,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkTarget::Default => "",
            LinkTarget::Blank => "_blank",
        }
    }
}

/// Node names the room model is expected to carry
pub mod names {
    pub const SWITCH_BOARD: &str = "SwitchBoard";
    pub const SWITCH: &str = "Switch";
    pub const LAMP: &str = "Lamp";
    pub const PROJECT: &str = "project";
    pub const SOCIALS: [&str; 3] = ["linkedin", "instagram", "discord"];
    pub const ABOUT: &str = "about";
    pub const PROJECTS: &str = "projects";

    pub fn is_social(name: &str) -> bool {
        SOCIALS.contains(&name)
    }
}
