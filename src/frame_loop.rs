//! Animation-loop bookkeeping, independent of the browser.

/// How the backdrop presents itself, decided once when it is installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Shader animation driven by animation frames.
    Animated,
    /// Static gradient on the canvas; no frames ever scheduled.
    StaticFallback,
    /// Nothing to do: no canvas, or the shader program could not be built.
    Inactive,
}

impl Mode {
    /// Picks the mode. `context_available` is only consulted when motion is
    /// allowed, so a reduced-motion page never creates a GPU context.
    pub fn decide(
        surface_present: bool,
        reduced_motion: bool,
        context_available: impl FnOnce() -> bool,
    ) -> Mode {
        if !surface_present {
            Mode::Inactive
        } else if reduced_motion || !context_available() {
            Mode::StaticFallback
        } else {
            Mode::Animated
        }
    }
}

/// Tracks the single outstanding frame request and the time origin.
///
/// `H` is the host's frame handle (a `requestAnimationFrame` id).
#[derive(Debug)]
pub struct FrameLoop<H> {
    handle: Option<H>,
    origin_ms: f64,
    time_scale: f64,
    frames_drawn: u64,
}

impl<H: Copy> FrameLoop<H> {
    pub fn new(time_scale: f64) -> Self {
        Self {
            handle: None,
            origin_ms: 0.0,
            time_scale,
            frames_drawn: 0,
        }
    }

    /// Restarts the clock at `now_ms`. Any previous handle must already have
    /// been cancelled by the caller.
    pub fn restart(&mut self, now_ms: f64) {
        self.handle = None;
        self.origin_ms = now_ms;
    }

    /// Records a freshly requested frame, replacing the old handle.
    pub fn scheduled(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    /// Clears the outstanding request and returns it for cancellation.
    pub fn pause(&mut self) -> Option<H> {
        self.handle.take()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<H> {
        self.handle
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Starts a frame at timestamp `now_ms`.
    ///
    /// Returns the shader time, or `None` if the loop was paused after the
    /// callback had already been queued; such a callback must draw nothing.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        self.handle?;
        self.frames_drawn += 1;
        Some(self.elapsed(now_ms))
    }

    /// Scaled time since the origin. Frame timestamps can predate the origin
    /// slightly, so this never goes negative.
    pub fn elapsed(&self, now_ms: f64) -> f32 {
        ((now_ms - self.origin_ms).max(0.0) * self.time_scale) as f32
    }
}
