//! Catalog of every hardware parameter a platform table binds.
//!
//! The catalog is the single place that names a parameter: override files,
//! the console and the resolver all look parameters up here, so keys and
//! value kinds stay in sync.

use core::fmt;

use crate::network::ShortRangeRole;
use crate::pins::{Pin, UartId};

/// Identifies one configurable hardware parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParameterId {
    ShortRangeUart,
    ShortRangeRole,
    ShortRangePinTxd,
    ShortRangePinRxd,
    ShortRangePinCts,
    ShortRangePinRts,
    CellUart,
    BoardPinEnable3v3,
    CellPinReset,
    CellPinEnablePower,
    CellPinPwrOn,
    CellPinVint,
    CellPinTxd,
    CellPinRxd,
    CellPinCts,
    CellPinRts,
    GnssUart,
    GnssPinEnable,
    GnssPinTxd,
    GnssPinRxd,
    GnssPinCts,
    GnssPinRts,
}

impl ParameterId {
    pub const COUNT: usize = 22;

    /// Deterministic index for lookups into [`PARAMETERS`].
    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            ParameterId::ShortRangeUart => 0,
            ParameterId::ShortRangeRole => 1,
            ParameterId::ShortRangePinTxd => 2,
            ParameterId::ShortRangePinRxd => 3,
            ParameterId::ShortRangePinCts => 4,
            ParameterId::ShortRangePinRts => 5,
            ParameterId::CellUart => 6,
            ParameterId::BoardPinEnable3v3 => 7,
            ParameterId::CellPinReset => 8,
            ParameterId::CellPinEnablePower => 9,
            ParameterId::CellPinPwrOn => 10,
            ParameterId::CellPinVint => 11,
            ParameterId::CellPinTxd => 12,
            ParameterId::CellPinRxd => 13,
            ParameterId::CellPinCts => 14,
            ParameterId::CellPinRts => 15,
            ParameterId::GnssUart => 16,
            ParameterId::GnssPinEnable => 17,
            ParameterId::GnssPinTxd => 18,
            ParameterId::GnssPinRxd => 19,
            ParameterId::GnssPinCts => 20,
            ParameterId::GnssPinRts => 21,
        }
    }

    /// Returns the catalog entry for this parameter.
    #[must_use]
    pub fn spec(self) -> &'static ParameterSpec {
        &PARAMETERS[self.as_index()]
    }

    /// Override-file key for this parameter.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    #[must_use]
    pub fn kind(self) -> ParameterKind {
        self.spec().kind
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Shape of the value a parameter accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParameterKind {
    Uart,
    Pin,
    Role,
}

/// Typed value bound to a parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParameterValue {
    Uart(UartId),
    Pin(Pin),
    Role(ShortRangeRole),
}

impl ParameterValue {
    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            ParameterValue::Uart(_) => ParameterKind::Uart,
            ParameterValue::Pin(_) => ParameterKind::Pin,
            ParameterValue::Role(_) => ParameterKind::Role,
        }
    }

    /// Raw numeric form, matching what a build-level override would spell.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            ParameterValue::Uart(uart) => uart.raw(),
            ParameterValue::Pin(pin) => pin.raw(),
            ParameterValue::Role(role) => role.raw() as i32,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Uart(uart) => write!(f, "{uart}"),
            ParameterValue::Pin(pin) => write!(f, "{pin}"),
            ParameterValue::Role(role) => write!(f, "{role}"),
        }
    }
}

/// Catalog entry describing a parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParameterSpec {
    pub id: ParameterId,
    pub key: &'static str,
    pub kind: ParameterKind,
    pub summary: &'static str,
}

impl ParameterSpec {
    const fn new(
        id: ParameterId,
        key: &'static str,
        kind: ParameterKind,
        summary: &'static str,
    ) -> Self {
        Self {
            id,
            key,
            kind,
            summary,
        }
    }
}

/// Compile-time catalog of every hardware parameter, in index order.
pub static PARAMETERS: [ParameterSpec; ParameterId::COUNT] = [
    ParameterSpec::new(
        ParameterId::ShortRangeUart,
        "short_range.uart",
        ParameterKind::Uart,
        "UART block wired to the short-range module",
    ),
    ParameterSpec::new(
        ParameterId::ShortRangeRole,
        "short_range.role",
        ParameterKind::Role,
        "BLE role: 1 central, 2 peripheral",
    ),
    ParameterSpec::new(
        ParameterId::ShortRangePinTxd,
        "short_range.pin.txd",
        ParameterKind::Pin,
        "MCU TX toward the short-range module",
    ),
    ParameterSpec::new(
        ParameterId::ShortRangePinRxd,
        "short_range.pin.rxd",
        ParameterKind::Pin,
        "MCU RX from the short-range module",
    ),
    ParameterSpec::new(
        ParameterId::ShortRangePinCts,
        "short_range.pin.cts",
        ParameterKind::Pin,
        "short-range UART CTS",
    ),
    ParameterSpec::new(
        ParameterId::ShortRangePinRts,
        "short_range.pin.rts",
        ParameterKind::Pin,
        "short-range UART RTS",
    ),
    ParameterSpec::new(
        ParameterId::CellUart,
        "cell.uart",
        ParameterKind::Uart,
        "UART block wired to the cellular module",
    ),
    ParameterSpec::new(
        ParameterId::BoardPinEnable3v3,
        "board.pin.enable_3v3",
        ParameterKind::Pin,
        "open-drain output enabling the board 3V3 rail",
    ),
    ParameterSpec::new(
        ParameterId::CellPinReset,
        "cell.pin.reset",
        ParameterKind::Pin,
        "output wired to the cellular RESET_N",
    ),
    ParameterSpec::new(
        ParameterId::CellPinEnablePower,
        "cell.pin.enable_power",
        ParameterKind::Pin,
        "output switching the cellular supply",
    ),
    ParameterSpec::new(
        ParameterId::CellPinPwrOn,
        "cell.pin.pwr_on",
        ParameterKind::Pin,
        "output wired to the cellular PWR_ON",
    ),
    ParameterSpec::new(
        ParameterId::CellPinVint,
        "cell.pin.vint",
        ParameterKind::Pin,
        "input sensing the cellular VINT rail",
    ),
    ParameterSpec::new(
        ParameterId::CellPinTxd,
        "cell.pin.txd",
        ParameterKind::Pin,
        "MCU TX toward the cellular module",
    ),
    ParameterSpec::new(
        ParameterId::CellPinRxd,
        "cell.pin.rxd",
        ParameterKind::Pin,
        "MCU RX from the cellular module",
    ),
    ParameterSpec::new(
        ParameterId::CellPinCts,
        "cell.pin.cts",
        ParameterKind::Pin,
        "cellular UART CTS",
    ),
    ParameterSpec::new(
        ParameterId::CellPinRts,
        "cell.pin.rts",
        ParameterKind::Pin,
        "cellular UART RTS",
    ),
    ParameterSpec::new(
        ParameterId::GnssUart,
        "gnss.uart",
        ParameterKind::Uart,
        "UART block wired to the GNSS module",
    ),
    ParameterSpec::new(
        ParameterId::GnssPinEnable,
        "gnss.pin.en",
        ParameterKind::Pin,
        "output wired to the GNSS enable input",
    ),
    ParameterSpec::new(
        ParameterId::GnssPinTxd,
        "gnss.pin.txd",
        ParameterKind::Pin,
        "MCU TX toward the GNSS module",
    ),
    ParameterSpec::new(
        ParameterId::GnssPinRxd,
        "gnss.pin.rxd",
        ParameterKind::Pin,
        "MCU RX from the GNSS module",
    ),
    ParameterSpec::new(
        ParameterId::GnssPinCts,
        "gnss.pin.cts",
        ParameterKind::Pin,
        "GNSS UART CTS",
    ),
    ParameterSpec::new(
        ParameterId::GnssPinRts,
        "gnss.pin.rts",
        ParameterKind::Pin,
        "GNSS UART RTS",
    ),
];

/// Returns the full parameter catalog.
#[must_use]
pub fn parameters() -> &'static [ParameterSpec] {
    &PARAMETERS
}

/// Finds a parameter by override key (case insensitive).
#[must_use]
pub fn find(key: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS
        .iter()
        .find(|spec| spec.key.eq_ignore_ascii_case(key))
}
