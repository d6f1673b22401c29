//! Default wiring for an STM32F4 host, matching the u-blox C030-R412M board.
//!
//! STM32F4 pin numbers carry the GPIO bank in the upper nibble and the pin in
//! the lower nibble: `0x0f` is PA_15 and `0x10` is PB_0. A C030-U201 board
//! needs the cellular UART on USART2 with TX/RX/CTS/RTS on PD_5/PD_6/PD_3/PD_4,
//! so those values must come from overrides.

use crate::hardware::{BoardWiring, CellWiring, GnssWiring, HardwareConfig, ShortRangeWiring};
use crate::network::ShortRangeRole;
use crate::pins::{Pin, UartId, UartPins};

/// GPIOA to GPIOK.
pub const GPIO_BANK_COUNT: u16 = 11;

/// USART3, routed to the Arduino header on a C030 board.
pub const SHORT_RANGE_UART: UartId = UartId::new(3);
/// PD_8, D1 on a C030 board.
pub const PIN_SHORT_RANGE_TXD: Pin = Pin::new(0x38);
/// PD_9, D0 on a C030 board.
pub const PIN_SHORT_RANGE_RXD: Pin = Pin::new(0x39);
/// PD_11, D2 on a C030 board.
pub const PIN_SHORT_RANGE_CTS: Pin = Pin::new(0x3b);
/// PB_14, D3 on a C030 board.
pub const PIN_SHORT_RANGE_RTS: Pin = Pin::new(0x1e);

/// USART1 is wired inside the STM32F437VG to PA_9..PA_12 on the C030-R412M.
/// Only USARTs 1, 2, 3 and 6 support hardware flow control.
pub const CELL_UART: UartId = UartId::new(1);
/// PE_0, open-drain enable for the Arduino 3V3 rail.
pub const PIN_ENABLE_3V3: Pin = Pin::new(0x40);
/// PB_5.
pub const PIN_CELL_RESET: Pin = Pin::new(0x15);
/// PE_14.
pub const PIN_CELL_PWR_ON: Pin = Pin::new(0x4e);
/// PA_9.
pub const PIN_CELL_TXD: Pin = Pin::new(0x09);
/// PA_10.
pub const PIN_CELL_RXD: Pin = Pin::new(0x0a);
/// PA_11.
pub const PIN_CELL_CTS: Pin = Pin::new(0x0b);
/// PA_12.
pub const PIN_CELL_RTS: Pin = Pin::new(0x0c);

/// Default STM32F4 table.
pub const DEFAULTS: HardwareConfig = HardwareConfig {
    short_range: ShortRangeWiring {
        uart: SHORT_RANGE_UART,
        role: ShortRangeRole::Peripheral,
        pins: UartPins::new(
            PIN_SHORT_RANGE_TXD,
            PIN_SHORT_RANGE_RXD,
            PIN_SHORT_RANGE_CTS,
            PIN_SHORT_RANGE_RTS,
        ),
    },
    cell: CellWiring {
        uart: CELL_UART,
        pins: UartPins::new(PIN_CELL_TXD, PIN_CELL_RXD, PIN_CELL_CTS, PIN_CELL_RTS),
        reset: PIN_CELL_RESET,
        // No supply switch or VINT sense on a C030 board.
        enable_power: Pin::UNCONNECTED,
        pwr_on: PIN_CELL_PWR_ON,
        vint: Pin::UNCONNECTED,
    },
    gnss: GnssWiring {
        uart: UartId::UNCONNECTED,
        pins: UartPins::UNCONNECTED,
        enable: Pin::UNCONNECTED,
    },
    board: BoardWiring {
        enable_3v3: PIN_ENABLE_3V3,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c030_cellular_wiring_matches_r412m_board() {
        assert_eq!(DEFAULTS.cell.uart.block(), Some(1));
        assert_eq!(DEFAULTS.cell.pins.txd.index(), Some(0x09));
        assert_eq!(DEFAULTS.cell.pins.rxd.index(), Some(0x0a));
        assert_eq!(DEFAULTS.cell.pins.cts.index(), Some(0x0b));
        assert_eq!(DEFAULTS.cell.pins.rts.index(), Some(0x0c));
        assert_eq!(DEFAULTS.cell.pwr_on.index(), Some(0x4e));
        assert_eq!(DEFAULTS.cell.reset.index(), Some(0x15));
        assert!(!DEFAULTS.cell.enable_power.is_connected());
        assert!(!DEFAULTS.cell.vint.is_connected());
    }

    #[test]
    fn gnss_is_not_wired_by_default() {
        assert!(!DEFAULTS.gnss.uart.is_connected());
        assert_eq!(DEFAULTS.gnss.pins, UartPins::UNCONNECTED);
        assert!(!DEFAULTS.gnss.enable.is_connected());
    }
}
