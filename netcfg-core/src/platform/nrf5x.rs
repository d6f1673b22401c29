//! Default wiring for a Zephyr host on an nRF5x MCU (nRF52840, nRF5340).
//!
//! The Zephyr device tree owns UART pin assignment on this platform, so the
//! UART pins here never reach the hardware and default to unconnected. GPIO
//! numbers are `port * 32 + pin`.

use crate::hardware::{BoardWiring, CellWiring, GnssWiring, HardwareConfig, ShortRangeWiring};
use crate::network::ShortRangeRole;
use crate::pins::{Pin, UartId, UartPins};

/// P0.00 to P1.15.
pub const GPIO_COUNT: u16 = 48;

/// UARTE block used for the cellular module.
pub const CELL_UART: UartId = UartId::new(1);
/// P1.01.
pub const PIN_CELL_PWR_ON: Pin = Pin::new(33);
/// UARTE block used for the GNSS module.
pub const GNSS_UART: UartId = UartId::new(1);

/// Default nRF5x table.
pub const DEFAULTS: HardwareConfig = HardwareConfig {
    short_range: ShortRangeWiring {
        uart: UartId::UNCONNECTED,
        role: ShortRangeRole::Peripheral,
        pins: UartPins::UNCONNECTED,
    },
    cell: CellWiring {
        uart: CELL_UART,
        pins: UartPins::UNCONNECTED,
        reset: Pin::UNCONNECTED,
        enable_power: Pin::UNCONNECTED,
        pwr_on: PIN_CELL_PWR_ON,
        vint: Pin::UNCONNECTED,
    },
    gnss: GnssWiring {
        uart: GNSS_UART,
        pins: UartPins::UNCONNECTED,
        enable: Pin::UNCONNECTED,
    },
    board: BoardWiring {
        enable_3v3: Pin::UNCONNECTED,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uart_pins_are_left_to_the_device_tree() {
        assert_eq!(DEFAULTS.short_range.pins, UartPins::UNCONNECTED);
        assert_eq!(DEFAULTS.cell.pins, UartPins::UNCONNECTED);
        assert_eq!(DEFAULTS.gnss.pins, UartPins::UNCONNECTED);
    }

    #[test]
    fn cellular_power_on_uses_p1_01() {
        assert_eq!(DEFAULTS.cell.pwr_on.index(), Some(33));
        assert_eq!(DEFAULTS.cell.uart.block(), Some(1));
    }
}
