//! Deterministic timer queue.
//!
//! Key properties:
//! - Total ordering on `(deadline, id)`.
//! - Timers due at the same instant fire in scheduling order.
//! - Cancellation does not perturb the order of remaining timers.
//! - Repeating timers are re-armed relative to their previous deadline, so a
//!   late poll does not accumulate drift. Missed periods are skipped rather
//!   than replayed.
//!
//! The queue never reads a clock. Callers pass `now` explicitly; the browser
//! layer feeds it `Date.now()` and tests feed it whatever they like.

use foundation::time::Millis;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Key {
    deadline: Millis,
    id: TimerId,
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct Entry<T> {
    key: Key,
    period: Option<Millis>,
    payload: T,
}

/// A timer that came due during [`TimerQueue::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub deadline: Millis,
    pub payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.key.id == id)
    }

    /// Schedules `payload` to fire once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Millis, delay: Millis, payload: T) -> TimerId {
        self.insert(now + delay, None, payload)
    }

    /// Schedules `payload` to fire every `period`, first at `now + period`.
    ///
    /// A zero period is bumped to one millisecond so a single poll cannot
    /// loop forever.
    pub fn schedule_repeating(&mut self, now: Millis, period: Millis, payload: T) -> TimerId {
        let period = Millis(period.0.max(1));
        self.insert(now + period, Some(period), payload)
    }

    fn insert(&mut self, deadline: Millis, period: Option<Millis>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            key: Key { deadline, id },
            period,
            payload,
        });
        id
    }

    /// Removes a pending timer. Returns `false` if it already fired (one-shot)
    /// or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.key.deadline).min()
    }

    /// Pops every timer whose deadline is `<= now`, in `(deadline, id)` order.
    ///
    /// A repeating timer fires at most once per poll, however late the poll
    /// is. Missed periods are skipped and the timer is re-armed on its original
    /// grid at the first deadline strictly after `now`.
    pub fn pop_due(&mut self, now: Millis) -> Vec<Fired<T>> {
        let mut fired = Vec::new();
        while let Some(idx) = self.earliest_due(now) {
            let entry = &self.entries[idx];
            let rearm_at = entry
                .period
                .and_then(|period| next_on_grid(entry.key.deadline, period, now));
            fired.push(Fired {
                id: entry.key.id,
                deadline: entry.key.deadline,
                payload: entry.payload.clone(),
            });
            match rearm_at {
                Some(deadline) => self.entries[idx].key.deadline = deadline,
                // One-shot, or a repeating timer whose next tick is unrepresentable.
                None => {
                    self.entries.swap_remove(idx);
                }
            }
        }
        fired
    }

    fn earliest_due(&self, now: Millis) -> Option<usize> {
        let mut best_idx: Option<usize> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.key.deadline > now {
                continue;
            }
            match best_idx {
                None => best_idx = Some(idx),
                Some(best) => {
                    if entry.key < self.entries[best].key {
                        best_idx = Some(idx);
                    }
                }
            }
        }
        best_idx
    }
}

/// First `deadline + k * period` (k >= 1) strictly after `now`.
fn next_on_grid(deadline: Millis, period: Millis, now: Millis) -> Option<Millis> {
    let missed = now.0.saturating_sub(deadline.0) / period.0;
    missed
        .checked_add(1)
        .and_then(|k| k.checked_mul(period.0))
        .and_then(|offset| deadline.0.checked_add(offset))
        .map(Millis)
}
