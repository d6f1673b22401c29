//! Typed hardware wiring for the modules a board can carry.

use crate::network::ShortRangeRole;
use crate::params::{ParameterId, ParameterKind, ParameterValue};
use crate::pins::{Pin, UartId, UartPins};

/// Wiring for the short-range (BLE/Wi-Fi) module.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ShortRangeWiring {
    pub uart: UartId,
    pub role: ShortRangeRole,
    pub pins: UartPins,
}

/// Wiring for the cellular module.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CellWiring {
    pub uart: UartId,
    pub pins: UartPins,
    pub reset: Pin,
    pub enable_power: Pin,
    pub pwr_on: Pin,
    pub vint: Pin,
}

/// Wiring for the GNSS module.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GnssWiring {
    pub uart: UartId,
    pub pins: UartPins,
    pub enable: Pin,
}

/// Board-level signals that are not tied to one module.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BoardWiring {
    pub enable_3v3: Pin,
}

/// One value for every [`ParameterId`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HardwareConfig {
    pub short_range: ShortRangeWiring,
    pub cell: CellWiring,
    pub gnss: GnssWiring,
    pub board: BoardWiring,
}

/// Raised when a value of the wrong kind is bound to a parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KindMismatch {
    pub parameter: ParameterId,
    pub found: ParameterKind,
}

impl HardwareConfig {
    /// Reads the value bound to `id`.
    #[must_use]
    pub const fn get(&self, id: ParameterId) -> ParameterValue {
        match id {
            ParameterId::ShortRangeUart => ParameterValue::Uart(self.short_range.uart),
            ParameterId::ShortRangeRole => ParameterValue::Role(self.short_range.role),
            ParameterId::ShortRangePinTxd => ParameterValue::Pin(self.short_range.pins.txd),
            ParameterId::ShortRangePinRxd => ParameterValue::Pin(self.short_range.pins.rxd),
            ParameterId::ShortRangePinCts => ParameterValue::Pin(self.short_range.pins.cts),
            ParameterId::ShortRangePinRts => ParameterValue::Pin(self.short_range.pins.rts),
            ParameterId::CellUart => ParameterValue::Uart(self.cell.uart),
            ParameterId::BoardPinEnable3v3 => ParameterValue::Pin(self.board.enable_3v3),
            ParameterId::CellPinReset => ParameterValue::Pin(self.cell.reset),
            ParameterId::CellPinEnablePower => ParameterValue::Pin(self.cell.enable_power),
            ParameterId::CellPinPwrOn => ParameterValue::Pin(self.cell.pwr_on),
            ParameterId::CellPinVint => ParameterValue::Pin(self.cell.vint),
            ParameterId::CellPinTxd => ParameterValue::Pin(self.cell.pins.txd),
            ParameterId::CellPinRxd => ParameterValue::Pin(self.cell.pins.rxd),
            ParameterId::CellPinCts => ParameterValue::Pin(self.cell.pins.cts),
            ParameterId::CellPinRts => ParameterValue::Pin(self.cell.pins.rts),
            ParameterId::GnssUart => ParameterValue::Uart(self.gnss.uart),
            ParameterId::GnssPinEnable => ParameterValue::Pin(self.gnss.enable),
            ParameterId::GnssPinTxd => ParameterValue::Pin(self.gnss.pins.txd),
            ParameterId::GnssPinRxd => ParameterValue::Pin(self.gnss.pins.rxd),
            ParameterId::GnssPinCts => ParameterValue::Pin(self.gnss.pins.cts),
            ParameterId::GnssPinRts => ParameterValue::Pin(self.gnss.pins.rts),
        }
    }

    /// Binds `value` to `id`, rejecting a value of the wrong kind.
    pub fn set(&mut self, id: ParameterId, value: ParameterValue) -> Result<(), KindMismatch> {
        let mismatch = KindMismatch {
            parameter: id,
            found: value.kind(),
        };
        match (id.kind(), value) {
            (ParameterKind::Uart, ParameterValue::Uart(uart)) => {
                *self.uart_slot(id).ok_or(mismatch)? = uart;
            }
            (ParameterKind::Pin, ParameterValue::Pin(pin)) => {
                *self.pin_slot(id).ok_or(mismatch)? = pin;
            }
            (ParameterKind::Role, ParameterValue::Role(role)) => {
                self.short_range.role = role;
            }
            _ => return Err(mismatch),
        }
        Ok(())
    }

    fn uart_slot(&mut self, id: ParameterId) -> Option<&mut UartId> {
        match id {
            ParameterId::ShortRangeUart => Some(&mut self.short_range.uart),
            ParameterId::CellUart => Some(&mut self.cell.uart),
            ParameterId::GnssUart => Some(&mut self.gnss.uart),
            _ => None,
        }
    }

    fn pin_slot(&mut self, id: ParameterId) -> Option<&mut Pin> {
        match id {
            ParameterId::ShortRangePinTxd => Some(&mut self.short_range.pins.txd),
            ParameterId::ShortRangePinRxd => Some(&mut self.short_range.pins.rxd),
            ParameterId::ShortRangePinCts => Some(&mut self.short_range.pins.cts),
            ParameterId::ShortRangePinRts => Some(&mut self.short_range.pins.rts),
            ParameterId::BoardPinEnable3v3 => Some(&mut self.board.enable_3v3),
            ParameterId::CellPinReset => Some(&mut self.cell.reset),
            ParameterId::CellPinEnablePower => Some(&mut self.cell.enable_power),
            ParameterId::CellPinPwrOn => Some(&mut self.cell.pwr_on),
            ParameterId::CellPinVint => Some(&mut self.cell.vint),
            ParameterId::CellPinTxd => Some(&mut self.cell.pins.txd),
            ParameterId::CellPinRxd => Some(&mut self.cell.pins.rxd),
            ParameterId::CellPinCts => Some(&mut self.cell.pins.cts),
            ParameterId::CellPinRts => Some(&mut self.cell.pins.rts),
            ParameterId::GnssPinEnable => Some(&mut self.gnss.enable),
            ParameterId::GnssPinTxd => Some(&mut self.gnss.pins.txd),
            ParameterId::GnssPinRxd => Some(&mut self.gnss.pins.rxd),
            ParameterId::GnssPinCts => Some(&mut self.gnss.pins.cts),
            ParameterId::GnssPinRts => Some(&mut self.gnss.pins.rts),
            _ => None,
        }
    }
}
