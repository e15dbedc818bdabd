//! Mock timer implementation for testing

use crate::platform::traits::TimerInterface;

/// Mock timer implementation
///
/// Advances simulated time on each delay instead of sleeping, so tests that
/// include datasheet power-up waits run instantly.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self { now_us: 0 }
    }

    /// Total simulated time spent in delays
    pub fn elapsed_us(&self) -> u64 {
        self.now_us
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.wrapping_add(us as u64);
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.delay_us(1000);
        assert_eq!(timer.now_us(), 1000);

        timer.delay_us(500);
        assert_eq!(timer.now_us(), 1500);
    }

    #[test]
    fn test_mock_timer_delay_ms() {
        let mut timer = MockTimer::new();
        timer.delay_ms(5);
        assert_eq!(timer.now_us(), 5000);
    }

    #[test]
    fn test_mock_timer_now_ms() {
        let mut timer = MockTimer::new();
        timer.delay_us(3500);
        assert_eq!(timer.now_ms(), 3);
    }
}
