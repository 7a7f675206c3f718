use std::time::Duration;

/// One-shot timers on a page-local clock that starts at zero on page ready.
///
/// Time only moves when the owner settles it, so the queue behaves the same
/// under a real runtime and in tests.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    seq: u64,
    pending: Vec<Timer<T>>,
}

#[derive(Debug, Clone)]
struct Timer<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.pending.push(Timer {
            due: self.now + delay,
            seq: self.seq,
            task,
        });
        self.seq += 1;
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }

    /// Pops the earliest timer due by `deadline`, moving the clock to its due time.
    /// Timers due at the same instant fire in scheduling order.
    pub fn pop_due_by(&mut self, deadline: Duration) -> Option<T> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;
        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Moves the clock forward to `deadline`; never backwards.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_then_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(300), "late");
        timers.schedule(Duration::from_millis(100), "first");
        timers.schedule(Duration::from_millis(100), "second");

        let deadline = Duration::from_millis(200);
        assert_eq!(timers.pop_due_by(deadline), Some("first"));
        assert_eq!(timers.pop_due_by(deadline), Some("second"));
        assert_eq!(timers.pop_due_by(deadline), None);
        assert_eq!(timers.now(), Duration::from_millis(100));

        timers.settle(deadline);
        assert_eq!(timers.next_due(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut timers = TimerQueue::new();
        timers.settle(Duration::from_millis(5000));
        timers.schedule(Duration::from_millis(300), ());
        assert_eq!(timers.next_due(), Some(Duration::from_millis(5300)));
    }
}
