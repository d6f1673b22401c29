//! Per-network configuration records.
//!
//! [`NetworkConfig`] is a tagged sum over the network types. A network type
//! whose selector is absent gets [`NetworkConfig::None`], which carries no
//! fields. Records are plain values and never change once built.

use core::fmt;
use core::time::Duration;

use crate::hardware::HardwareConfig;
use crate::network::{
    CellModuleType, GnssModuleType, GnssTransport, NetworkType, ShortRangeModuleType,
    ShortRangeRole,
};
use crate::params::{ParameterId, ParameterValue};
use crate::pins::{Pin, UartId, UartPins};
use crate::platform::Platform;
use crate::selection::{Apn, SimPin, TestSelection};

/// UART block and lines a module is attached through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UartTransport {
    pub uart: UartId,
    pub pins: UartPins,
}

impl UartTransport {
    pub const UNCONNECTED: Self = Self {
        uart: UartId::UNCONNECTED,
        pins: UartPins::UNCONNECTED,
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BleConfig {
    pub module: ShortRangeModuleType,
    pub transport: UartTransport,
    pub role: ShortRangeRole,
    /// Serial-port-service server enable.
    pub sps_server: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellConfig {
    pub module: CellModuleType,
    pub sim_pin: Option<SimPin>,
    pub apn: Option<Apn>,
    pub connect_timeout: Duration,
    pub transport: UartTransport,
    pub enable_power: Pin,
    pub pwr_on: Pin,
    pub vint: Pin,
    pub reset: Pin,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WifiConfig {
    pub module: ShortRangeModuleType,
    pub transport: UartTransport,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GnssConfig {
    pub module: GnssModuleType,
    pub transport_kind: GnssTransport,
    pub transport: UartTransport,
    pub enable: Pin,
}

/// Configuration record for one network type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NetworkConfig {
    None,
    Ble(BleConfig),
    Cell(CellConfig),
    Wifi(WifiConfig),
    Gnss(GnssConfig),
}

impl NetworkConfig {
    /// Type tag of the record.
    #[must_use]
    pub const fn network_type(&self) -> NetworkType {
        match self {
            NetworkConfig::None => NetworkType::None,
            NetworkConfig::Ble(_) => NetworkType::Ble,
            NetworkConfig::Cell(_) => NetworkType::Cell,
            NetworkConfig::Wifi(_) => NetworkType::Wifi,
            NetworkConfig::Gnss(_) => NetworkType::Gnss,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, NetworkConfig::None)
    }

    /// UART transport of the record, if it has one.
    #[must_use]
    pub const fn transport(&self) -> Option<&UartTransport> {
        match self {
            NetworkConfig::None => None,
            NetworkConfig::Ble(ble) => Some(&ble.transport),
            NetworkConfig::Cell(cell) => Some(&cell.transport),
            NetworkConfig::Wifi(wifi) => Some(&wifi.transport),
            NetworkConfig::Gnss(gnss) => Some(&gnss.transport),
        }
    }
}

static NONE_RECORD: NetworkConfig = NetworkConfig::None;

/// Reasons a set of records cannot be used together.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// Two enabled transports claim the same UART block.
    UartConflict {
        uart: UartId,
        first: NetworkType,
        second: NetworkType,
    },
    /// BLE and Wi-Fi name different external short-range modules.
    ShortRangeModuleMismatch {
        ble: ShortRangeModuleType,
        wifi: ShortRangeModuleType,
    },
    /// The selected module lacks the radio for `network`.
    Unsupported {
        network: NetworkType,
        module: ShortRangeModuleType,
    },
    ZeroConnectTimeout,
    /// A control or UART pin the platform does not have.
    NoSuchPin { parameter: ParameterId, pin: Pin },
    /// Two enabled signals are wired to the same GPIO.
    PinConflict {
        pin: Pin,
        first: ParameterId,
        second: ParameterId,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UartConflict {
                uart,
                first,
                second,
            } => write!(f, "{first} and {second} both use {uart}"),
            ValidationError::ShortRangeModuleMismatch { ble, wifi } => write!(
                f,
                "BLE module {ble} and Wifi module {wifi} must be the same part"
            ),
            ValidationError::Unsupported { network, module } => {
                write!(f, "{module} does not support {network}")
            }
            ValidationError::ZeroConnectTimeout => {
                f.write_str("cellular connect timeout must be non-zero")
            }
            ValidationError::NoSuchPin { parameter, pin } => {
                write!(f, "{parameter} = {pin} is not a GPIO on this platform")
            }
            ValidationError::PinConflict { pin, first, second } => {
                write!(f, "{first} and {second} both use pin {pin}")
            }
        }
    }
}

const BOARD_PINS: [ParameterId; 1] = [ParameterId::BoardPinEnable3v3];

const SHORT_RANGE_PINS: [ParameterId; 4] = [
    ParameterId::ShortRangePinTxd,
    ParameterId::ShortRangePinRxd,
    ParameterId::ShortRangePinCts,
    ParameterId::ShortRangePinRts,
];

const CELL_PINS: [ParameterId; 8] = [
    ParameterId::CellPinReset,
    ParameterId::CellPinEnablePower,
    ParameterId::CellPinPwrOn,
    ParameterId::CellPinVint,
    ParameterId::CellPinTxd,
    ParameterId::CellPinRxd,
    ParameterId::CellPinCts,
    ParameterId::CellPinRts,
];

const GNSS_PINS: [ParameterId; 5] = [
    ParameterId::GnssPinEnable,
    ParameterId::GnssPinTxd,
    ParameterId::GnssPinRxd,
    ParameterId::GnssPinCts,
    ParameterId::GnssPinRts,
];

/// One record per network type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkConfigs {
    pub ble: NetworkConfig,
    pub cell: NetworkConfig,
    pub wifi: NetworkConfig,
    pub gnss: NetworkConfig,
}

impl NetworkConfigs {
    /// Every record set to [`NetworkConfig::None`].
    #[must_use]
    pub const fn none() -> Self {
        Self {
            ble: NetworkConfig::None,
            cell: NetworkConfig::None,
            wifi: NetworkConfig::None,
            gnss: NetworkConfig::None,
        }
    }

    /// Builds the records selected by `selection` from resolved wiring.
    #[must_use]
    pub fn build(hardware: &HardwareConfig, selection: &TestSelection) -> Self {
        let short_range = UartTransport {
            uart: hardware.short_range.uart,
            pins: hardware.short_range.pins,
        };
        let short_range_for = |module: ShortRangeModuleType| {
            if module.uses_uart() {
                short_range
            } else {
                UartTransport::UNCONNECTED
            }
        };

        let ble = selection.ble_module().map_or(NetworkConfig::None, |module| {
            NetworkConfig::Ble(BleConfig {
                module,
                transport: short_range_for(module),
                role: hardware.short_range.role,
                sps_server: true,
            })
        });

        let cell = selection.cell_module.map_or(NetworkConfig::None, |module| {
            NetworkConfig::Cell(CellConfig {
                module,
                sim_pin: selection.cell.sim_pin.clone(),
                apn: selection.cell.apn.clone(),
                connect_timeout: selection.cell.connect_timeout,
                transport: UartTransport {
                    uart: hardware.cell.uart,
                    pins: hardware.cell.pins,
                },
                enable_power: hardware.cell.enable_power,
                pwr_on: hardware.cell.pwr_on,
                vint: hardware.cell.vint,
                reset: hardware.cell.reset,
            })
        });

        let wifi = selection.wifi_module.map_or(NetworkConfig::None, |module| {
            NetworkConfig::Wifi(WifiConfig {
                module,
                transport: short_range_for(module),
            })
        });

        let gnss = selection.gnss_module.map_or(NetworkConfig::None, |module| {
            NetworkConfig::Gnss(GnssConfig {
                module,
                transport_kind: GnssTransport::NmeaUart,
                transport: UartTransport {
                    uart: hardware.gnss.uart,
                    pins: hardware.gnss.pins,
                },
                enable: hardware.gnss.enable,
            })
        });

        Self {
            ble,
            cell,
            wifi,
            gnss,
        }
    }

    /// Record for `network`; [`NetworkType::None`] maps to the empty record.
    #[must_use]
    pub fn get(&self, network: NetworkType) -> &NetworkConfig {
        match network {
            NetworkType::None => &NONE_RECORD,
            NetworkType::Ble => &self.ble,
            NetworkType::Cell => &self.cell,
            NetworkType::Wifi => &self.wifi,
            NetworkType::Gnss => &self.gnss,
        }
    }

    /// Checks that the enabled records can run side by side.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let NetworkConfig::Ble(ble) = &self.ble {
            if !ble.module.supports_ble() {
                return Err(ValidationError::Unsupported {
                    network: NetworkType::Ble,
                    module: ble.module,
                });
            }
        }
        if let NetworkConfig::Wifi(wifi) = &self.wifi {
            if !wifi.module.supports_wifi() {
                return Err(ValidationError::Unsupported {
                    network: NetworkType::Wifi,
                    module: wifi.module,
                });
            }
            match &self.ble {
                NetworkConfig::Ble(ble) if ble.module.uses_uart() && ble.module != wifi.module => {
                    return Err(ValidationError::ShortRangeModuleMismatch {
                        ble: ble.module,
                        wifi: wifi.module,
                    });
                }
                _ => {}
            }
        }
        if let NetworkConfig::Cell(cell) = &self.cell {
            if cell.connect_timeout.is_zero() {
                return Err(ValidationError::ZeroConnectTimeout);
            }
        }
        self.check_uarts()
    }

    fn check_uarts(&self) -> Result<(), ValidationError> {
        // BLE and Wi-Fi on the same module share one attachment, so the
        // short-range transport is counted once.
        let short_range = match (&self.ble, &self.wifi) {
            (NetworkConfig::Ble(ble), _) if ble.module.uses_uart() => {
                Some((NetworkType::Ble, ble.transport.uart))
            }
            (_, NetworkConfig::Wifi(wifi)) => Some((NetworkType::Wifi, wifi.transport.uart)),
            _ => None,
        };
        let claims = [
            short_range,
            self.claim(NetworkType::Cell),
            self.claim(NetworkType::Gnss),
        ];

        for (index, first) in claims.iter().enumerate() {
            let Some((first_network, uart)) = first else {
                continue;
            };
            if !uart.is_connected() {
                continue;
            }
            for (second_network, other) in claims[index + 1..].iter().flatten() {
                if other == uart {
                    return Err(ValidationError::UartConflict {
                        uart: *uart,
                        first: *first_network,
                        second: *second_network,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks the GPIOs the enabled records and the board rail will drive:
    /// each must exist on `platform` and no two may share a pin.
    pub fn validate_pins(
        &self,
        platform: Platform,
        hardware: &HardwareConfig,
    ) -> Result<(), ValidationError> {
        let short_range = match (&self.ble, &self.wifi) {
            (NetworkConfig::Ble(ble), _) if ble.module.uses_uart() => true,
            (_, NetworkConfig::Wifi(wifi)) => wifi.module.uses_uart(),
            _ => false,
        };
        let groups: [(bool, &[ParameterId]); 4] = [
            (true, &BOARD_PINS[..]),
            (short_range, &SHORT_RANGE_PINS[..]),
            (!self.cell.is_none(), &CELL_PINS[..]),
            (!self.gnss.is_none(), &GNSS_PINS[..]),
        ];

        let mut claimed = [None::<(ParameterId, Pin)>; ParameterId::COUNT];
        let mut count = 0;
        let ids = groups
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, ids)| ids.iter().copied());
        for parameter in ids {
            let ParameterValue::Pin(pin) = hardware.get(parameter) else {
                continue;
            };
            if !pin.is_connected() {
                continue;
            }
            if !platform.has_pin(pin) {
                return Err(ValidationError::NoSuchPin { parameter, pin });
            }
            let earlier = claimed[..count]
                .iter()
                .flatten()
                .find(|(_, other)| *other == pin);
            if let Some((first, _)) = earlier {
                return Err(ValidationError::PinConflict {
                    pin,
                    first: *first,
                    second: parameter,
                });
            }
            claimed[count] = Some((parameter, pin));
            count += 1;
        }
        Ok(())
    }

    fn claim(&self, network: NetworkType) -> Option<(NetworkType, UartId)> {
        self.get(network)
            .transport()
            .map(|transport| (network, transport.uart))
    }

    /// Number of records that are not [`NetworkConfig::None`].
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        [&self.ble, &self.cell, &self.wifi, &self.gnss]
            .iter()
            .filter(|record| !record.is_none())
            .count()
    }
}

impl Default for NetworkConfigs {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> TestSelection {
        TestSelection::new()
    }

    #[test]
    fn absent_selectors_give_empty_records() {
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection());
        assert_eq!(records, NetworkConfigs::none());
        assert_eq!(records.enabled_count(), 0);
        assert_eq!(records.validate(), Ok(()));
    }

    #[test]
    fn ble_record_uses_short_range_wiring() {
        let mut selection = selection();
        selection.short_range_module = Some(ShortRangeModuleType::NinaB3);
        let hardware = Platform::Stm32f4.defaults();
        let records = NetworkConfigs::build(&hardware, &selection);

        let NetworkConfig::Ble(ble) = &records.ble else {
            panic!("expected a BLE record, got {:?}", records.ble);
        };
        assert_eq!(ble.transport.uart, UartId::new(3));
        assert_eq!(ble.transport.pins, hardware.short_range.pins);
        assert_eq!(ble.role, ShortRangeRole::Peripheral);
        assert!(ble.sps_server);
    }

    #[test]
    fn internal_ble_has_no_uart() {
        let mut selection = selection();
        selection.ble_internal = true;
        selection.short_range_module = Some(ShortRangeModuleType::NinaB1);
        let records = NetworkConfigs::build(&Platform::ZephyrNrf5x.defaults(), &selection);

        let NetworkConfig::Ble(ble) = &records.ble else {
            panic!("expected a BLE record");
        };
        assert_eq!(ble.module, ShortRangeModuleType::Internal);
        assert_eq!(ble.transport, UartTransport::UNCONNECTED);
    }

    #[test]
    fn cell_and_gnss_on_the_same_uart_conflict() {
        let mut selection = selection();
        selection.cell_module = Some(CellModuleType::SaraR5);
        selection.gnss_module = Some(GnssModuleType::M9);
        let records = NetworkConfigs::build(&Platform::ZephyrNrf5x.defaults(), &selection);

        assert_eq!(
            records.validate(),
            Err(ValidationError::UartConflict {
                uart: UartId::new(1),
                first: NetworkType::Cell,
                second: NetworkType::Gnss,
            })
        );
    }

    #[test]
    fn unconnected_uarts_never_conflict() {
        let mut selection = selection();
        selection.ble_internal = true;
        selection.gnss_module = Some(GnssModuleType::M8);
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection);
        assert_eq!(records.validate(), Ok(()));
    }

    #[test]
    fn capability_checks_follow_the_module() {
        let mut selection = selection();
        selection.short_range_module = Some(ShortRangeModuleType::NinaW13);
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection);
        assert_eq!(
            records.validate(),
            Err(ValidationError::Unsupported {
                network: NetworkType::Ble,
                module: ShortRangeModuleType::NinaW13,
            })
        );

        let mut selection = TestSelection::new();
        selection.short_range_module = Some(ShortRangeModuleType::NinaB3);
        selection.wifi_module = Some(ShortRangeModuleType::NinaW15);
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection);
        assert_eq!(
            records.validate(),
            Err(ValidationError::ShortRangeModuleMismatch {
                ble: ShortRangeModuleType::NinaB3,
                wifi: ShortRangeModuleType::NinaW15,
            })
        );
    }

    #[test]
    fn ble_and_wifi_on_one_module_share_the_uart() {
        let mut selection = selection();
        selection.short_range_module = Some(ShortRangeModuleType::OdinW2);
        selection.wifi_module = Some(ShortRangeModuleType::OdinW2);
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection);
        assert_eq!(records.validate(), Ok(()));
        assert_eq!(records.enabled_count(), 2);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut selection = selection();
        selection.cell_module = Some(CellModuleType::SaraR412m02b);
        selection.cell.connect_timeout = Duration::ZERO;
        let records = NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection);
        assert_eq!(records.validate(), Err(ValidationError::ZeroConnectTimeout));
    }

    #[test]
    fn control_pins_must_exist_on_the_platform() {
        let mut selection = selection();
        selection.cell_module = Some(CellModuleType::SaraR5);
        let mut hardware = Platform::Stm32f4.defaults();
        hardware.cell.pwr_on = Pin::new(0xf0);
        let records = NetworkConfigs::build(&hardware, &selection);
        assert_eq!(
            records.validate_pins(Platform::Stm32f4, &hardware),
            Err(ValidationError::NoSuchPin {
                parameter: ParameterId::CellPinPwrOn,
                pin: Pin::new(0xf0),
            })
        );

        let mut hardware = Platform::ZephyrNrf5x.defaults();
        hardware.cell.pwr_on = Pin::new(48);
        let records = NetworkConfigs::build(&hardware, &selection);
        assert_eq!(
            records.validate_pins(Platform::ZephyrNrf5x, &hardware),
            Err(ValidationError::NoSuchPin {
                parameter: ParameterId::CellPinPwrOn,
                pin: Pin::new(48),
            })
        );
    }

    #[test]
    fn two_enabled_signals_cannot_share_a_pin() {
        let mut selection = selection();
        selection.cell_module = Some(CellModuleType::SaraR5);
        selection.gnss_module = Some(GnssModuleType::M8);
        let mut hardware = Platform::Stm32f4.defaults();
        hardware.gnss.enable = hardware.cell.pwr_on;
        let records = NetworkConfigs::build(&hardware, &selection);
        assert_eq!(
            records.validate_pins(Platform::Stm32f4, &hardware),
            Err(ValidationError::PinConflict {
                pin: Pin::new(0x4e),
                first: ParameterId::CellPinPwrOn,
                second: ParameterId::GnssPinEnable,
            })
        );

        // A disabled network's wiring is never driven.
        selection.gnss_module = None;
        let records = NetworkConfigs::build(&hardware, &selection);
        assert_eq!(records.validate_pins(Platform::Stm32f4, &hardware), Ok(()));
    }

    #[test]
    fn default_tables_pass_the_pin_checks() {
        let mut selection = selection();
        selection.short_range_module = Some(ShortRangeModuleType::NinaB3);
        selection.cell_module = Some(CellModuleType::SaraR412m02b);
        for platform in Platform::ALL {
            let hardware = platform.defaults();
            let records = NetworkConfigs::build(&hardware, &selection);
            assert_eq!(records.validate_pins(platform, &hardware), Ok(()));
        }
    }

    #[test]
    fn get_maps_none_to_the_empty_record() {
        let records = NetworkConfigs::none();
        assert!(records.get(NetworkType::None).is_none());
        assert_eq!(records.get(NetworkType::Gnss).network_type(), NetworkType::None);
    }
}
