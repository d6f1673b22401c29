//! Pin and UART identifiers shared by every platform table.
//!
//! Both identifiers reserve the raw value `-1` for "no physical connection".
//! Constructors refuse every other negative value so the sentinel can never be
//! confused with a real GPIO or UART block.

use core::fmt;

/// Raw value reserved for an unconnected pin or UART.
pub const UNCONNECTED_RAW: i32 = -1;

/// MCU GPIO number, or [`Pin::UNCONNECTED`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Pin(i32);

impl Pin {
    /// Sentinel for a signal with no physical connection.
    pub const UNCONNECTED: Self = Self(UNCONNECTED_RAW);

    /// Builds a connected pin from an MCU GPIO number.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index as i32)
    }

    /// Validates a raw pin value as it appears in an override source.
    pub const fn from_raw(raw: i64) -> Result<Self, ValueError> {
        if raw == UNCONNECTED_RAW as i64 {
            Ok(Self::UNCONNECTED)
        } else if raw >= 0 && raw <= u16::MAX as i64 {
            Ok(Self(raw as i32))
        } else {
            Err(ValueError::PinOutOfRange(raw))
        }
    }

    /// Returns the raw value, `-1` when unconnected.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_connected(self) -> bool {
        self.0 != UNCONNECTED_RAW
    }

    /// Returns the GPIO number when the pin is connected.
    #[must_use]
    pub const fn index(self) -> Option<u16> {
        if self.is_connected() {
            Some(self.0 as u16)
        } else {
            None
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "{index:#04x}"),
            None => f.write_str("unconnected"),
        }
    }
}

/// UART hardware block index, or [`UartId::UNCONNECTED`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UartId(i16);

impl UartId {
    /// Sentinel for "no UART attached to this module".
    pub const UNCONNECTED: Self = Self(UNCONNECTED_RAW as i16);

    /// Builds a UART identifier from a hardware block number.
    #[must_use]
    pub const fn new(block: u8) -> Self {
        Self(block as i16)
    }

    /// Validates a raw UART value as it appears in an override source.
    pub const fn from_raw(raw: i64) -> Result<Self, ValueError> {
        if raw == UNCONNECTED_RAW as i64 {
            Ok(Self::UNCONNECTED)
        } else if raw >= 0 && raw <= u8::MAX as i64 {
            Ok(Self(raw as i16))
        } else {
            Err(ValueError::UartOutOfRange(raw))
        }
    }

    /// Returns the raw value, `-1` when unconnected.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0 as i32
    }

    #[must_use]
    pub const fn is_connected(self) -> bool {
        self.0 != UNCONNECTED_RAW as i16
    }

    /// Returns the block number when a UART is attached.
    #[must_use]
    pub const fn block(self) -> Option<u8> {
        if self.is_connected() {
            Some(self.0 as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for UartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block() {
            Some(block) => write!(f, "UART{block}"),
            None => f.write_str("unconnected"),
        }
    }
}

/// TX/RX/CTS/RTS lines of a UART attachment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UartPins {
    pub txd: Pin,
    pub rxd: Pin,
    pub cts: Pin,
    pub rts: Pin,
}

impl UartPins {
    /// All four lines unconnected.
    pub const UNCONNECTED: Self = Self::new(
        Pin::UNCONNECTED,
        Pin::UNCONNECTED,
        Pin::UNCONNECTED,
        Pin::UNCONNECTED,
    );

    #[must_use]
    pub const fn new(txd: Pin, rxd: Pin, cts: Pin, rts: Pin) -> Self {
        Self { txd, rxd, cts, rts }
    }

    /// Returns `true` when hardware flow control lines are both wired.
    #[must_use]
    pub const fn has_flow_control(&self) -> bool {
        self.cts.is_connected() && self.rts.is_connected()
    }
}

/// Rejected raw values for pins, UART blocks and roles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueError {
    PinOutOfRange(i64),
    UartOutOfRange(i64),
    RoleOutOfRange(i64),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::PinOutOfRange(raw) => {
                write!(f, "pin {raw} out of range (expected -1 or 0..=65535)")
            }
            ValueError::UartOutOfRange(raw) => {
                write!(f, "UART {raw} out of range (expected -1 or 0..=255)")
            }
            ValueError::RoleOutOfRange(raw) => {
                write!(f, "role {raw} out of range (expected 1 or 2)")
            }
        }
    }
}
