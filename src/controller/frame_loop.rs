/// Turns frame timestamps into clamped time steps
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: Some(now_ms) }
    }

    /// Seconds since the previous tick, clamped so a backgrounded tab does not
    /// jump animations forward
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, 0.1) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::FrameLoopContext;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::Window;

    use super::FrameClock;
    use crate::controller::Session;
    use crate::view::FrameSink;

    /// Per-frame work on the UI thread
    pub struct FrameLoopContext {
        pub session: Rc<RefCell<Session>>,
        pub clock: FrameClock,
        pub sink: FrameSink,
        /// Publish the first frame even if nothing animated yet
        pub dirty: bool,
    }

    impl FrameLoopContext {
        pub fn update(&mut self, window: &Window) {
            let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
            let dt = self.clock.tick(now);

            let mut session = self.session.borrow_mut();
            let animated = session.update(dt);
            let dirty = std::mem::take(&mut self.dirty);
            if !animated && !dirty {
                return;
            }
            if let Some(app) = session.app() {
                if let Err(err) = self.sink.publish(&app.frame_state()) {
                    tracing::warn!("frame publish failed: {err:?}");
                }
            }
        }
    }
}
