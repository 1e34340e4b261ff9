use foundation::time::Millis;

use crate::timer_queue::{TimerId, TimerQueue};

/// Coalesces bursts of events into a single timer.
///
/// Each [`Debouncer::trigger`] cancels the pending timer and schedules a new
/// one `window` later, so only the last event of a burst survives. The owner
/// must call [`Debouncer::settle`] when the timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: Millis,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn trigger<T: Clone>(
        &mut self,
        timers: &mut TimerQueue<T>,
        now: Millis,
        payload: T,
    ) -> TimerId {
        if let Some(prev) = self.pending.take() {
            timers.cancel(prev);
        }
        let id = timers.schedule_once(now, self.window, payload);
        self.pending = Some(id);
        id
    }

    /// Marks `fired` as delivered. Returns `false` for a stale timer id, which
    /// the caller should ignore.
    pub fn settle(&mut self, fired: TimerId) -> bool {
        if self.pending == Some(fired) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T: Clone>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}
