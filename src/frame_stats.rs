use std::time::Duration;
use web_time::Instant;

/// Counts presented frames and reports the average rate once per interval.
pub struct FrameStats {
    interval: Duration,
    window_start: Instant,
    frames: u32,
    total_frames: u64,
}

impl FrameStats {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            window_start: now,
            frames: 0,
            total_frames: 0,
        }
    }

    /// Record a frame; returns the frames per second once `interval` has elapsed.
    pub fn record_frame(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        self.total_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }

    /// Frames recorded since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut stats = FrameStats::new(Duration::from_secs(1), start);

        for i in 1..60 {
            assert_eq!(stats.record_frame(start + Duration::from_millis(i * 10)), None);
        }
        let fps = stats.record_frame(start + Duration::from_secs(2)).unwrap();
        assert!((fps - 30.0).abs() < 1e-9);
        assert_eq!(stats.total_frames(), 60);
    }

    #[test]
    fn window_restarts_after_a_report() {
        let start = Instant::now();
        let mut stats = FrameStats::new(Duration::from_secs(1), start);
        let first = start + Duration::from_secs(1);
        assert!(stats.record_frame(first).is_some());
        assert_eq!(stats.record_frame(first + Duration::from_millis(500)), None);
        let fps = stats.record_frame(first + Duration::from_secs(1)).unwrap();
        assert!((fps - 2.0).abs() < 1e-9);
    }

    #[test]
    fn clock_going_backwards_is_not_a_report() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut stats = FrameStats::new(Duration::from_secs(1), start);
        assert_eq!(stats.record_frame(start - Duration::from_secs(5)), None);
    }
}
