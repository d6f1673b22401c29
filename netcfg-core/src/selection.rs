//! Module selectors that switch network types on for a test build.
//!
//! A network type is configured only when its selector is present. The
//! cellular settings (SIM PIN, APN, connect timeout) ride along with the
//! cellular selector.

use core::fmt;
use core::time::Duration;

use heapless::String;

use crate::network::{CellModuleType, GnssModuleType, NetworkType, ShortRangeModuleType};

/// Longest APN accepted from an override source.
pub const MAX_APN_LEN: usize = 64;
/// Longest SIM PIN accepted from an override source.
pub const MAX_SIM_PIN_LEN: usize = 8;
/// Connection timeout used when the build does not supply one.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(240);

/// Bounded APN string.
pub type Apn = String<MAX_APN_LEN>;
/// Bounded SIM PIN string.
pub type SimPin = String<MAX_SIM_PIN_LEN>;

/// Settings applied to the cellular record when it is enabled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellTestSettings {
    pub sim_pin: Option<SimPin>,
    pub apn: Option<Apn>,
    pub connect_timeout: Duration,
}

impl CellTestSettings {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sim_pin: None,
            apn: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl Default for CellTestSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Which module, if any, the build fits for each network type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestSelection {
    pub cell_module: Option<CellModuleType>,
    pub short_range_module: Option<ShortRangeModuleType>,
    /// Use the host MCU's own BLE radio; wins over `short_range_module`.
    pub ble_internal: bool,
    pub wifi_module: Option<ShortRangeModuleType>,
    pub gnss_module: Option<GnssModuleType>,
    pub cell: CellTestSettings,
}

impl TestSelection {
    /// Selection with every network type switched off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell_module: None,
            short_range_module: None,
            ble_internal: false,
            wifi_module: None,
            gnss_module: None,
            cell: CellTestSettings::new(),
        }
    }

    /// Module used for BLE, taking the internal radio into account.
    #[must_use]
    pub const fn ble_module(&self) -> Option<ShortRangeModuleType> {
        if self.ble_internal {
            Some(ShortRangeModuleType::Internal)
        } else {
            self.short_range_module
        }
    }

    /// Returns `true` when the selector for `network` is present.
    #[must_use]
    pub const fn is_enabled(&self, network: NetworkType) -> bool {
        match network {
            NetworkType::None => false,
            NetworkType::Ble => self.ble_module().is_some(),
            NetworkType::Cell => self.cell_module.is_some(),
            NetworkType::Wifi => self.wifi_module.is_some(),
            NetworkType::Gnss => self.gnss_module.is_some(),
        }
    }
}

impl Default for TestSelection {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one selector key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SelectorId {
    CellModule,
    ShortRangeModule,
    BleInternal,
    WifiModule,
    GnssModule,
    CellSimPin,
    CellApn,
    CellConnectTimeout,
}

impl SelectorId {
    pub const COUNT: usize = 8;

    pub const ALL: [SelectorId; SelectorId::COUNT] = [
        SelectorId::CellModule,
        SelectorId::ShortRangeModule,
        SelectorId::BleInternal,
        SelectorId::WifiModule,
        SelectorId::GnssModule,
        SelectorId::CellSimPin,
        SelectorId::CellApn,
        SelectorId::CellConnectTimeout,
    ];

    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            SelectorId::CellModule => 0,
            SelectorId::ShortRangeModule => 1,
            SelectorId::BleInternal => 2,
            SelectorId::WifiModule => 3,
            SelectorId::GnssModule => 4,
            SelectorId::CellSimPin => 5,
            SelectorId::CellApn => 6,
            SelectorId::CellConnectTimeout => 7,
        }
    }

    /// Override-file key for this selector.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            SelectorId::CellModule => "test.cell.module",
            SelectorId::ShortRangeModule => "test.short_range.module",
            SelectorId::BleInternal => "test.ble.internal",
            SelectorId::WifiModule => "test.wifi.module",
            SelectorId::GnssModule => "test.gnss.module",
            SelectorId::CellSimPin => "test.cell.sim_pin",
            SelectorId::CellApn => "test.cell.apn",
            SelectorId::CellConnectTimeout => "test.cell.connect_timeout_s",
        }
    }

    /// Value shape the selector accepts.
    #[must_use]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            SelectorId::CellModule
            | SelectorId::ShortRangeModule
            | SelectorId::WifiModule
            | SelectorId::GnssModule => ValueKind::Name,
            SelectorId::BleInternal => ValueKind::Boolean,
            SelectorId::CellSimPin | SelectorId::CellApn => ValueKind::Text,
            SelectorId::CellConnectTimeout => ValueKind::Integer,
        }
    }

    /// Finds a selector by key (case insensitive).
    #[must_use]
    pub fn find(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|selector| selector.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for SelectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lexical shape of a value in an override source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Integer,
    Boolean,
    Text,
    Name,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "true/false",
            ValueKind::Text => "quoted string",
            ValueKind::Name => "name",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_enables_nothing() {
        let selection = TestSelection::new();
        for network in crate::network::ALL_NETWORK_TYPES {
            assert!(!selection.is_enabled(network));
        }
        assert_eq!(selection.cell.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn internal_ble_wins_over_external_module() {
        let mut selection = TestSelection::new();
        selection.short_range_module = Some(ShortRangeModuleType::NinaB3);
        assert_eq!(selection.ble_module(), Some(ShortRangeModuleType::NinaB3));

        selection.ble_internal = true;
        assert_eq!(selection.ble_module(), Some(ShortRangeModuleType::Internal));
        assert!(selection.is_enabled(NetworkType::Ble));
    }

    #[test]
    fn selector_keys_are_index_aligned() {
        for (index, selector) in SelectorId::ALL.iter().enumerate() {
            assert_eq!(selector.as_index(), index);
            assert_eq!(SelectorId::find(selector.key()), Some(*selector));
        }
    }
}
