//! Trailing-edge throttle.
//!
//! The first trigger arms a timer for `window_ms`; triggers arriving while
//! that timer is pending are dropped. When the timer fires the action runs
//! once and the throttle re-opens. `T` is whatever the host returns for a
//! scheduled timer (a `setTimeout` id in the browser).

#[derive(Debug)]
pub struct Throttle<T> {
    window_ms: i32,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window_ms: i32) -> Self {
        Self { window_ms, pending: None }
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arms the timer through `schedule` unless one is already pending.
    ///
    /// Returns `Ok(true)` when a timer was armed, `Ok(false)` when the
    /// trigger was dropped.
    pub fn trigger<E>(&mut self, schedule: impl FnOnce(i32) -> Result<T, E>) -> Result<bool, E> {
        if self.pending.is_some() {
            return Ok(false);
        }
        self.pending = Some(schedule(self.window_ms)?);
        Ok(true)
    }

    /// Marks the pending timer as fired. Returns false for a stray callback.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Disarms the throttle, handing back the timer to cancel.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }
}
