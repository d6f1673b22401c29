//! Network type tags and the module-type selectors that refine them.
//!
//! [`NetworkType`] is the discriminant shared by configuration records and
//! registry entries. The module enums identify the concrete u-blox part fitted
//! for a network type and carry the per-part facts the board harness needs.

use core::fmt;
use core::time::Duration;

use crate::pins::ValueError;

/// Category of radio/transport a configuration record describes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NetworkType {
    None,
    Ble,
    Cell,
    Wifi,
    Gnss,
}

impl NetworkType {
    /// Number of variants, including [`NetworkType::None`].
    pub const COUNT: usize = 5;

    /// Deterministic index for lookups into [`ALL_NETWORK_TYPES`] and
    /// [`NETWORK_TYPE_NAMES`].
    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            NetworkType::None => 0,
            NetworkType::Ble => 1,
            NetworkType::Cell => 2,
            NetworkType::Wifi => 3,
            NetworkType::Gnss => 4,
        }
    }

    /// Attempts to construct a [`NetworkType`] from a raw index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(NetworkType::None),
            1 => Some(NetworkType::Ble),
            2 => Some(NetworkType::Cell),
            3 => Some(NetworkType::Wifi),
            4 => Some(NetworkType::Gnss),
            _ => None,
        }
    }

    /// Human-readable label used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        NETWORK_TYPE_NAMES[self.as_index()]
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, NetworkType::None)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every network type in index order.
pub const ALL_NETWORK_TYPES: [NetworkType; NetworkType::COUNT] = [
    NetworkType::None,
    NetworkType::Ble,
    NetworkType::Cell,
    NetworkType::Wifi,
    NetworkType::Gnss,
];

/// Log labels, index-aligned with [`NetworkType::as_index`].
pub const NETWORK_TYPE_NAMES: [&str; NetworkType::COUNT] =
    ["none", "BLE", "cellular", "Wifi", "GNSS"];

const _: () = {
    let mut index = 0;
    while index < NetworkType::COUNT {
        assert!(ALL_NETWORK_TYPES[index].as_index() == index);
        index += 1;
    }
};

/// Cellular module fitted to the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CellModuleType {
    SaraU201,
    SaraR410m02b,
    SaraR412m02b,
    SaraR412m03b,
    SaraR5,
    SaraR410m03b,
    SaraR422,
    LaraR6,
}

impl CellModuleType {
    pub const ALL: [CellModuleType; 8] = [
        CellModuleType::SaraU201,
        CellModuleType::SaraR410m02b,
        CellModuleType::SaraR412m02b,
        CellModuleType::SaraR412m03b,
        CellModuleType::SaraR5,
        CellModuleType::SaraR410m03b,
        CellModuleType::SaraR422,
        CellModuleType::LaraR6,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CellModuleType::SaraU201 => "SARA_U201",
            CellModuleType::SaraR410m02b => "SARA_R410M_02B",
            CellModuleType::SaraR412m02b => "SARA_R412M_02B",
            CellModuleType::SaraR412m03b => "SARA_R412M_03B",
            CellModuleType::SaraR5 => "SARA_R5",
            CellModuleType::SaraR410m03b => "SARA_R410M_03B",
            CellModuleType::SaraR422 => "SARA_R422",
            CellModuleType::LaraR6 => "LARA_R6",
        }
    }

    /// Finds a module by name (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }

    /// How long PWR_ON must be held asserted to switch the module on.
    #[must_use]
    pub const fn power_on_pull(self) -> Duration {
        match self {
            CellModuleType::SaraU201 => Duration::from_millis(1),
            CellModuleType::SaraR5 => Duration::from_millis(1_500),
            CellModuleType::LaraR6 => Duration::from_millis(150),
            CellModuleType::SaraR410m02b
            | CellModuleType::SaraR412m02b
            | CellModuleType::SaraR412m03b
            | CellModuleType::SaraR410m03b
            | CellModuleType::SaraR422 => Duration::from_millis(300),
        }
    }
}

impl fmt::Display for CellModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Short-range (BLE and/or Wi-Fi) module fitted to the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShortRangeModuleType {
    /// Radio built into the host MCU; no UART attachment.
    Internal,
    NinaB1,
    AnnaB1,
    NinaB3,
    NinaB4,
    NinaB2,
    NinaW13,
    NinaW15,
    OdinW2,
}

impl ShortRangeModuleType {
    pub const ALL: [ShortRangeModuleType; 9] = [
        ShortRangeModuleType::Internal,
        ShortRangeModuleType::NinaB1,
        ShortRangeModuleType::AnnaB1,
        ShortRangeModuleType::NinaB3,
        ShortRangeModuleType::NinaB4,
        ShortRangeModuleType::NinaB2,
        ShortRangeModuleType::NinaW13,
        ShortRangeModuleType::NinaW15,
        ShortRangeModuleType::OdinW2,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShortRangeModuleType::Internal => "INTERNAL",
            ShortRangeModuleType::NinaB1 => "NINA_B1",
            ShortRangeModuleType::AnnaB1 => "ANNA_B1",
            ShortRangeModuleType::NinaB3 => "NINA_B3",
            ShortRangeModuleType::NinaB4 => "NINA_B4",
            ShortRangeModuleType::NinaB2 => "NINA_B2",
            ShortRangeModuleType::NinaW13 => "NINA_W13",
            ShortRangeModuleType::NinaW15 => "NINA_W15",
            ShortRangeModuleType::OdinW2 => "ODIN_W2",
        }
    }

    /// Finds a module by name (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub const fn supports_ble(self) -> bool {
        !matches!(self, ShortRangeModuleType::NinaW13)
    }

    #[must_use]
    pub const fn supports_wifi(self) -> bool {
        matches!(
            self,
            ShortRangeModuleType::NinaW13
                | ShortRangeModuleType::NinaW15
                | ShortRangeModuleType::OdinW2
        )
    }

    /// Returns `true` when the module talks to the host over a UART.
    #[must_use]
    pub const fn uses_uart(self) -> bool {
        !matches!(self, ShortRangeModuleType::Internal)
    }
}

impl fmt::Display for ShortRangeModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// GNSS module fitted to the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GnssModuleType {
    M8,
    M9,
}

impl GnssModuleType {
    pub const ALL: [GnssModuleType; 2] = [GnssModuleType::M8, GnssModuleType::M9];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GnssModuleType::M8 => "M8",
            GnssModuleType::M9 => "M9",
        }
    }

    /// Finds a module by name (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GnssModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the host exchanges data with a GNSS module.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GnssTransport {
    UbxUart,
    UbxI2c,
    UbxAt,
    NmeaUart,
}

impl GnssTransport {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GnssTransport::UbxUart => "ubx-uart",
            GnssTransport::UbxI2c => "ubx-i2c",
            GnssTransport::UbxAt => "ubx-at",
            GnssTransport::NmeaUart => "nmea-uart",
        }
    }
}

impl fmt::Display for GnssTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// BLE role taken by the short-range module.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShortRangeRole {
    Central,
    Peripheral,
}

impl ShortRangeRole {
    /// Converts the numeric role used by build configuration (1 or 2).
    pub const fn from_raw(raw: i64) -> Result<Self, ValueError> {
        match raw {
            1 => Ok(ShortRangeRole::Central),
            2 => Ok(ShortRangeRole::Peripheral),
            other => Err(ValueError::RoleOutOfRange(other)),
        }
    }

    /// Parses the role keyword accepted in override files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("central") {
            Some(ShortRangeRole::Central)
        } else if name.eq_ignore_ascii_case("peripheral") {
            Some(ShortRangeRole::Peripheral)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            ShortRangeRole::Central => 1,
            ShortRangeRole::Peripheral => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShortRangeRole::Central => "central",
            ShortRangeRole::Peripheral => "peripheral",
        }
    }
}

impl fmt::Display for ShortRangeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_table_covers_every_network_type() {
        for (index, network) in ALL_NETWORK_TYPES.iter().enumerate() {
            assert_eq!(network.as_index(), index);
            assert_eq!(NetworkType::from_index(index), Some(*network));
        }
        assert_eq!(NetworkType::from_index(NetworkType::COUNT), None);
        assert_eq!(NetworkType::Wifi.name(), "Wifi");
        assert_eq!(NetworkType::Gnss.name(), "GNSS");
    }

    #[test]
    fn module_names_resolve_case_insensitively() {
        assert_eq!(
            CellModuleType::from_name("sara_r412m_02b"),
            Some(CellModuleType::SaraR412m02b)
        );
        assert_eq!(
            ShortRangeModuleType::from_name("NINA_W15"),
            Some(ShortRangeModuleType::NinaW15)
        );
        assert_eq!(GnssModuleType::from_name("m9"), Some(GnssModuleType::M9));
        assert_eq!(CellModuleType::from_name("SARA_X"), None);
    }

    #[test]
    fn short_range_capabilities_match_part_families() {
        assert!(ShortRangeModuleType::NinaB3.supports_ble());
        assert!(!ShortRangeModuleType::NinaB3.supports_wifi());
        assert!(ShortRangeModuleType::NinaW13.supports_wifi());
        assert!(!ShortRangeModuleType::NinaW13.supports_ble());
        assert!(ShortRangeModuleType::OdinW2.supports_ble());
        assert!(ShortRangeModuleType::OdinW2.supports_wifi());
        assert!(!ShortRangeModuleType::Internal.uses_uart());
    }

    #[test]
    fn role_accepts_only_central_and_peripheral() {
        assert_eq!(ShortRangeRole::from_raw(1), Ok(ShortRangeRole::Central));
        assert_eq!(ShortRangeRole::from_raw(2), Ok(ShortRangeRole::Peripheral));
        assert_eq!(
            ShortRangeRole::from_raw(0),
            Err(ValueError::RoleOutOfRange(0))
        );
        assert_eq!(ShortRangeRole::Peripheral.raw(), 2);
    }
}
