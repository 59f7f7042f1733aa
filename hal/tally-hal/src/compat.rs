//! Adapters from `embedded-hal` 1.0 digital pins
//!
//! Lets board pins (embassy-rp `Output`/`Input`, or any other HAL) be used
//! wherever this crate's traits are expected.

use embedded_hal::digital;

use crate::gpio::{InputPin, OutputPin};

/// Output adapter
///
/// Remembers the last level that was successfully driven, since
/// `embedded-hal` only exposes readback through `&mut self`.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap a pin, driving it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self { pin, high: false };
        out.set_state(initial_high);
        out
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input adapter
///
/// A failed read counts as low.
pub struct EhInput<P> {
    pin: P,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> bool {
        matches!(self.pin.is_high(), Ok(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct HalPin {
        level: bool,
    }

    impl ErrorType for HalPin {
        type Error = Infallible;
    }

    impl digital::OutputPin for HalPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            Ok(())
        }
    }

    impl digital::InputPin for HalPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level)
        }
    }

    /// Pin whose every operation fails
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl digital::OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    impl digital::InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_output_tracks_level() {
        let mut out = EhOutput::new(HalPin { level: false }, true);
        assert!(out.is_set_high());
        out.set_low();
        assert!(out.is_set_low());
        assert!(!out.release().level);
    }

    #[test]
    fn test_input_reads_level() {
        let mut input = EhInput::new(HalPin { level: true });
        assert!(input.is_high());
    }

    #[test]
    fn test_failed_operations() {
        let mut out = EhOutput::new(BrokenPin, true);
        assert!(out.is_set_low());

        let mut input = EhInput::new(BrokenPin);
        assert!(!input.is_high());
    }
}
