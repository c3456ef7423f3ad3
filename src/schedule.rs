use std::time::{Duration, Instant};

/// A single deferred action; scheduling again replaces the pending run.
///
/// The owner polls it from its event loop; only the last `schedule` in a burst
/// ever comes due, which is what resize debouncing needs.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ScheduledTask {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Cancels any pending run and schedules a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the pending run is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(250);

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut task = ScheduledTask::new(DELAY);
        assert!(!task.poll(start));

        task.schedule(start);
        assert!(task.is_pending());
        assert!(!task.poll(start + Duration::from_millis(249)));
        assert!(task.poll(start + DELAY));
        assert!(!task.poll(start + DELAY * 2));
        assert!(!task.is_pending());
    }

    #[test]
    fn test_reschedule_defers_the_run() {
        let start = Instant::now();
        let mut task = ScheduledTask::new(DELAY);

        // A burst of events 100ms apart
        for step in 0..5 {
            let now = start + Duration::from_millis(step * 100);
            assert!(!task.poll(now));
            task.schedule(now);
        }

        let last = start + Duration::from_millis(400);
        assert!(!task.poll(last + Duration::from_millis(200)));
        assert!(task.poll(last + DELAY));
    }
}
