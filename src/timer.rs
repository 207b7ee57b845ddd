use std::time::{Duration, Instant};

/// Identifies a scheduled action so it can be cancelled before it fires.
/// Handles are never reused within one `Timers` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<A> {
    handle: u64,
    due: Instant,
    action: A,
}

/// Cancellable delayed actions with caller-supplied time.
///
/// Nothing here reads the clock; `schedule` and `poll` take `now` from the
/// caller, so event loops pass `Instant::now()` and tests pass synthesized
/// instants. `next_deadline` tells the event loop how long it may sleep.
#[derive(Debug)]
pub struct Timers<A> {
    next_handle: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action to fire once `delay` has elapsed past `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) -> TimerHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            due: now + delay,
            action,
        });
        TimerHandle(handle)
    }

    /// Cancel a scheduled action. Returns true if it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle.0);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle.0)
    }

    /// Remove and return every action due at or before `now`, earliest
    /// deadline first. Equal deadlines fire in scheduling order.
    pub fn poll(&mut self, now: Instant) -> Vec<A> {
        self.pending.sort_by_key(|p| p.due);

        let mut fired = Vec::new();
        while !self.pending.is_empty() && self.pending[0].due <= now {
            fired.push(self.pending.remove(0).action);
        }
        fired
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending actions without firing them.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
