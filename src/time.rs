//! Fixed-period tick timer using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. TickTimer converts
//! this into discrete ticks on a fixed period, making the round logic
//! deterministic and fully testable. A timer is either active or
//! cancelled; a cancelled timer never yields ticks.

pub struct TickTimer {
    /// Milliseconds per tick (e.g. 400ms for the price series)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Ticks yielded since the last `start()`
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame since start
    last_timestamp: Option<f64>,
    active: bool,
}

impl TickTimer {
    /// Create a stopped timer with the given period in milliseconds.
    pub fn new(ms_per_tick: u32) -> Self {
        Self {
            ms_per_tick: ms_per_tick.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
            active: false,
        }
    }

    /// Start a fresh tick stream.
    ///
    /// Any time accumulated by a previous stream is discarded, so restarting
    /// never produces a burst of catch-up ticks.
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.total_ticks = 0;
        self.last_timestamp = None;
        self.active = true;
    }

    /// Stop yielding ticks. Cancelling a stopped timer is a no-op.
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.active {
            return 0;
        }

        let delta = match self.last_timestamp {
            Some(prev) => {
                let d = now_ms - prev;
                // Clamp to avoid spiral-of-death if tab was backgrounded
                d.clamp(0.0, 1000.0)
            }
            None => 0.0, // First frame: no delta
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(ms: u32) -> TickTimer {
        let mut t = TickTimer::new(ms);
        t.start();
        t
    }

    #[test]
    fn new_timer_is_stopped() {
        let mut t = TickTimer::new(400);
        assert!(!t.is_active());
        t.update(0.0);
        assert_eq!(t.update(5000.0), 0);
    }

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut t = started(400);
        assert_eq!(t.update(0.0), 0);
    }

    #[test]
    fn one_tick_at_400ms() {
        let mut t = started(400);
        t.update(0.0);
        assert_eq!(t.update(399.0), 0);
        assert_eq!(t.update(400.0), 1);
        assert_eq!(t.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut t = started(400);
        t.update(0.0);
        assert_eq!(t.update(600.0), 1); // 200ms remainder
        assert_eq!(t.update(800.0), 1); // 200 + 200
        assert_eq!(t.total_ticks, 2);
    }

    #[test]
    fn clamp_large_delta() {
        let mut t = started(400);
        t.update(0.0);
        // 10 second gap (tab backgrounded) → clamped to 1000ms = 2 ticks
        assert_eq!(t.update(10_000.0), 2);
    }

    #[test]
    fn steady_60fps() {
        let mut t = started(400);
        t.update(0.0);
        let mut total = 0u32;
        // 120 frames at ~16.67ms each = 2 seconds
        for i in 1..=120 {
            total += t.update(i as f64 * 16.667);
        }
        assert!((4..=6).contains(&total), "expected ~5 ticks, got {}", total);
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut t = started(400);
        t.update(0.0);
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.update(2000.0), 0);
    }

    #[test]
    fn cancel_twice_is_noop() {
        let mut t = started(400);
        t.cancel();
        t.cancel();
        assert!(!t.is_active());
    }

    #[test]
    fn restart_discards_previous_stream() {
        let mut t = started(400);
        t.update(0.0);
        t.update(350.0); // 350ms pending
        t.start();
        // Fresh stream: first frame yields nothing, old remainder is gone
        assert_eq!(t.update(360.0), 0);
        assert_eq!(t.update(700.0), 0);
        assert_eq!(t.update(760.0), 1);
        assert_eq!(t.total_ticks, 1);
    }

    #[test]
    fn start_while_active_does_not_double_rate() {
        let mut t = started(400);
        t.update(0.0);
        t.start();
        t.update(0.0);
        assert_eq!(t.update(400.0), 1);
    }
}
