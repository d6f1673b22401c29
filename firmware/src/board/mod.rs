#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! C030 board support: GPIO claims and power sequencing.

use netcfg_core::pins::Pin;
use netcfg_core::platform::Platform;
use netcfg_core::registry::NetworkHandle;

#[cfg(target_os = "none")]
mod driver;

#[cfg(target_os = "none")]
pub use driver::{BoardNetworkApi, enable_board_rail};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// Nothing to drive for this record.
    EmptyRecord,
    UnknownHandle(NetworkHandle),
    /// Every open slot is taken.
    SlotsFull,
    /// Connected pin with no GPIO behind it on this MCU.
    NoSuchPin(Pin),
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::EmptyRecord => f.write_str("record is not configured"),
            BoardError::UnknownHandle(handle) => write!(f, "unknown handle {handle}"),
            BoardError::SlotsFull => f.write_str("no free network slot"),
            BoardError::NoSuchPin(pin) => write!(f, "pin {pin} is not a GPIO on this board"),
        }
    }
}

/// Port/pin index to claim for `pin`; `None` when the signal is unconnected.
pub fn gpio_index(pin: Pin) -> Result<Option<u8>, BoardError> {
    let Some(index) = pin.index() else {
        return Ok(None);
    };
    if !Platform::Stm32f4.has_pin(pin) {
        return Err(BoardError::NoSuchPin(pin));
    }
    u8::try_from(index)
        .map(Some)
        .map_err(|_| BoardError::NoSuchPin(pin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconnected_pins_are_skipped() {
        assert_eq!(gpio_index(Pin::UNCONNECTED), Ok(None));
    }

    #[test]
    fn c030_pins_map_to_their_port_index() {
        assert_eq!(gpio_index(Pin::new(0x4e)), Ok(Some(0x4e)));
        assert_eq!(gpio_index(Pin::new(0x09)), Ok(Some(0x09)));
    }

    #[test]
    fn pins_without_a_gpio_are_refused() {
        for raw in [0xb0, 0xf0, 0x1000] {
            assert_eq!(
                gpio_index(Pin::new(raw)),
                Err(BoardError::NoSuchPin(Pin::new(raw)))
            );
        }
    }
}
