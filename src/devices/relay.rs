//! Relay Click driver
//!
//! Two electromechanical relays, each driven by one GPIO. High energises
//! the coil.

use crate::devices::traits::DeviceResult;
use crate::platform::traits::GpioInterface;

/// Relay selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Relay1,
    Relay2,
}

/// Relay Click driver
pub struct Relay<G: GpioInterface> {
    relay1: G,
    relay2: G,
}

impl<G: GpioInterface> Relay<G> {
    /// Create the driver with both relays released
    pub fn new(mut relay1: G, mut relay2: G) -> DeviceResult<Self> {
        relay1.set_low()?;
        relay2.set_low()?;
        Ok(Self { relay1, relay2 })
    }

    /// Energise a relay
    pub fn set(&mut self, channel: Channel) -> DeviceResult<()> {
        self.pin_mut(channel).set_high()?;
        Ok(())
    }

    /// Release a relay
    pub fn clear(&mut self, channel: Channel) -> DeviceResult<()> {
        self.pin_mut(channel).set_low()?;
        Ok(())
    }

    /// Toggle a relay
    pub fn toggle(&mut self, channel: Channel) -> DeviceResult<()> {
        self.pin_mut(channel).toggle()?;
        Ok(())
    }

    /// Whether a relay is energised
    pub fn state(&self, channel: Channel) -> bool {
        self.pin(channel).read()
    }

    /// Release both GPIO pins
    pub fn release(self) -> (G, G) {
        (self.relay1, self.relay2)
    }

    fn pin(&self, channel: Channel) -> &G {
        match channel {
            Channel::Relay1 => &self.relay1,
            Channel::Relay2 => &self.relay2,
        }
    }

    fn pin_mut(&mut self, channel: Channel) -> &mut G {
        match channel {
            Channel::Relay1 => &mut self.relay1,
            Channel::Relay2 => &mut self.relay2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    fn new_driver() -> Relay<MockGpio> {
        Relay::new(MockGpio::new_output(), MockGpio::new_output()).unwrap()
    }

    #[test]
    fn test_new_releases_both_relays() {
        let driver = new_driver();
        assert!(!driver.state(Channel::Relay1));
        assert!(!driver.state(Channel::Relay2));
    }

    #[test]
    fn test_set_clear_independent() {
        let mut driver = new_driver();
        driver.set(Channel::Relay1).unwrap();
        assert!(driver.state(Channel::Relay1));
        assert!(!driver.state(Channel::Relay2));

        driver.set(Channel::Relay2).unwrap();
        driver.clear(Channel::Relay1).unwrap();
        assert!(!driver.state(Channel::Relay1));
        assert!(driver.state(Channel::Relay2));
    }

    #[test]
    fn test_toggle() {
        let mut driver = new_driver();
        driver.toggle(Channel::Relay1).unwrap();
        assert!(driver.state(Channel::Relay1));
        driver.toggle(Channel::Relay1).unwrap();
        assert!(!driver.state(Channel::Relay1));
    }
}
