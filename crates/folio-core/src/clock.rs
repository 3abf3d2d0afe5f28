//! Virtual-time timer scheduler.
//!
//! The engine never sleeps. It schedules one-shot and recurring timers in
//! milliseconds on a [`Scheduler`], and the host drives time forward with
//! [`Scheduler::pop_due`], firing timers in due order. Timers due at the same
//! instant fire in scheduling order.

/// Milliseconds on the scheduler's virtual clock.
pub type Millis = u64;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: Millis,
    /// `Some` for recurring timers.
    every: Option<Millis>,
    payload: T,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub at: Millis,
    pub payload: T,
}

/// Deterministic timer queue over a virtual clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedules `payload` to fire once, `after` ms from now.
    pub fn schedule_once(&mut self, after: Millis, payload: T) -> TimerId {
        self.insert(after, None, payload)
    }

    /// Schedules `payload` to fire every `interval` ms until cancelled.
    ///
    /// Intervals are clamped to at least 1 ms so a recurring timer always
    /// makes progress.
    pub fn schedule_every(&mut self, interval: Millis, payload: T) -> TimerId {
        let interval = interval.max(1);
        self.insert(interval, Some(interval), payload)
    }

    /// Cancels a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancels every timer whose payload matches. Returns how many were removed.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| !pred(&timer.payload));
        before - self.timers.len()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if a timer with this id is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Earliest due time among pending timers.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time. Recurring timers are re-armed for their next interval.
    ///
    /// Once nothing is due the clock is moved to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<T>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(idx, _)| idx);

        let Some(idx) = idx else {
            self.now = self.now.max(until);
            return None;
        };

        let due = self.timers[idx].due;
        self.now = self.now.max(due);

        let fired = if let Some(interval) = self.timers[idx].every {
            let timer = &mut self.timers[idx];
            timer.due = due + interval;
            Fired {
                id: timer.id,
                at: due,
                payload: timer.payload.clone(),
            }
        } else {
            let timer = self.timers.swap_remove(idx);
            Fired {
                id: timer.id,
                at: due,
                payload: timer.payload,
            }
        };

        Some(fired)
    }

    fn insert(&mut self, after: Millis, every: Option<Millis>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            due: self.now + after,
            every,
            payload,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, until: Millis) -> Vec<(Millis, &'static str)> {
        let mut fired = Vec::new();
        while let Some(f) = scheduler.pop_due(until) {
            fired.push((f.at, f.payload));
        }
        fired
    }

    #[test]
    fn test_once_fires_at_due_time_only() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(50, "step");

        assert!(drain(&mut scheduler, 49).is_empty());
        assert_eq!(scheduler.now(), 49);
        assert_eq!(drain(&mut scheduler, 50), vec![(50, "step")]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_every_repeats_until_cancelled() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_every(15, "tick");

        assert_eq!(
            drain(&mut scheduler, 45),
            vec![(15, "tick"), (30, "tick"), (45, "tick")]
        );
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(drain(&mut scheduler, 1_000).is_empty());
    }

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(80, "late");
        scheduler.schedule_once(50, "first");
        scheduler.schedule_once(50, "second");

        assert_eq!(
            drain(&mut scheduler, 100),
            vec![(50, "first"), (50, "second"), (80, "late")]
        );
    }

    #[test]
    fn test_schedule_is_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(10, "a");
        drain(&mut scheduler, 10);
        scheduler.schedule_once(10, "b");
        assert_eq!(scheduler.next_due(), Some(20));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(0, "tick");
        assert_eq!(drain(&mut scheduler, 3).len(), 3);
    }

    #[test]
    fn test_cancel_where_removes_matching() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(5, "a");
        scheduler.schedule_every(5, "a");
        scheduler.schedule_once(5, "b");

        assert_eq!(scheduler.cancel_where(|p| *p == "a"), 2);
        assert_eq!(drain(&mut scheduler, 5), vec![(5, "b")]);
    }
}
