// MODEL: Scene data, camera, theme and tweening
pub mod camera;
pub mod hotspot;
pub mod scene;
pub mod theme;
pub mod tween;

pub use camera::{Camera, Pose};
pub use hotspot::{Hotspot, HotspotKind, LinkTarget};
pub use scene::{Intersection, Light, SceneManifest, SceneModel, SceneNode};
pub use theme::{Theme, ThemeTargets};
pub use tween::{Tween, TweenSet};
