//! Once-per-second frame rate counter.

use std::time::Duration;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts frames and reports the total once at least a second has passed since the last report.
///
/// Time is supplied by the caller as the elapsed duration since the loop started, which keeps
/// the counter independent of any clock.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last_report: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Creates a counter whose first interval starts at `start`.
    pub fn new(start: Duration) -> Self {
        Self {
            last_report: start,
            frames: 0,
        }
    }

    /// Records one frame sampled at `now`.
    ///
    /// Returns the number of frames counted since the previous report when a full interval has
    /// elapsed, resetting the count and moving the baseline to `now`.
    pub fn tick(&mut self, now: Duration) -> Option<u32> {
        self.frames += 1;

        if now.saturating_sub(self.last_report) < REPORT_INTERVAL {
            return None;
        }

        let frames = self.frames;
        self.frames = 0;
        self.last_report = now;
        Some(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_reported_within_first_second() {
        let mut counter = FpsCounter::new(Duration::ZERO);

        for ms in (10..1000).step_by(10) {
            assert_eq!(counter.tick(Duration::from_millis(ms)), None);
        }
    }

    #[test]
    fn reports_once_per_second_at_fixed_rate() {
        const RATE: u64 = 50;
        const SECONDS: u64 = 3;
        let frame = Duration::from_secs(1) / RATE as u32;

        let mut counter = FpsCounter::new(Duration::ZERO);
        let reports: Vec<u32> = (1..=RATE * SECONDS)
            .filter_map(|i| counter.tick(frame * i as u32))
            .collect();

        assert_eq!(reports.len() as u64, SECONDS);
        assert_eq!(reports.iter().map(|&n| n as u64).sum::<u64>(), RATE * SECONDS);
        assert!(reports.iter().all(|&n| n == RATE as u32));
    }

    #[test]
    fn count_resets_after_report() {
        let mut counter = FpsCounter::new(Duration::ZERO);

        assert_eq!(counter.tick(Duration::from_millis(400)), None);
        assert_eq!(counter.tick(Duration::from_millis(1000)), Some(2));
        assert_eq!(counter.tick(Duration::from_millis(1500)), None);
        assert_eq!(counter.tick(Duration::from_millis(2100)), Some(2));
    }

    #[test]
    fn long_stall_reports_frames_counted_so_far() {
        let mut counter = FpsCounter::new(Duration::from_secs(5));

        assert_eq!(counter.tick(Duration::from_secs(9)), Some(1));
    }
}
