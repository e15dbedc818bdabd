//! Timer interface trait
//!
//! Defines the time source that platform implementations must provide.
//! Delays are blocking busy-waits; there is no cancellation.

/// Timer interface trait
pub trait TimerInterface {
    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }

    /// Microseconds since platform init
    fn now_us(&self) -> u64;

    /// Milliseconds since platform init
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
