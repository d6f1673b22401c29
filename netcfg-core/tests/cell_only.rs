use core::time::Duration;

use netcfg_core::network::{CellModuleType, NetworkType};
use netcfg_core::params::ParameterId;
use netcfg_core::pins::{Pin, UartId};
use netcfg_core::records::ValidationError;
use netcfg_core::registry::{TEST_NETWORK_COUNT, TEST_NETWORK_TYPES};
use netcfg_core::{ConfigError, NetworkConfig, Platform, TestRegistry, resolve_source};

const C030_R412M: &str = "\
# Cellular only, C030-R412M wiring from the defaults.
test.cell.module = SARA_R412M_02B
test.cell.apn = \"internet\"
";

#[test]
fn cellular_selector_alone_populates_only_the_cell_record() {
    let resolved = resolve_source(Platform::Stm32f4, C030_R412M).expect("valid configuration");
    let registry = TestRegistry::new(&resolved.records);

    assert_eq!(registry.len(), TEST_NETWORK_COUNT);
    assert_eq!(registry.len(), 4);

    for (entry, expected) in registry.iter().zip(TEST_NETWORK_TYPES) {
        assert_eq!(entry.network_type(), expected);
        assert_eq!(entry.raw_handle(), -1);
    }

    for network in [NetworkType::Ble, NetworkType::Wifi, NetworkType::Gnss] {
        let entry = registry.entry(network).expect("entry per network type");
        assert_eq!(entry.config(), &NetworkConfig::None);
        assert!(!entry.is_active());
    }

    let cell = registry.entry(NetworkType::Cell).expect("cell entry");
    assert!(cell.is_active());
    let NetworkConfig::Cell(config) = cell.config() else {
        panic!("expected a cellular record, got {:?}", cell.config());
    };
    assert_eq!(config.module, CellModuleType::SaraR412m02b);
    assert_eq!(config.apn.as_deref(), Some("internet"));
    assert_eq!(config.sim_pin, None);
    assert_eq!(config.connect_timeout, Duration::from_secs(240));
    assert_eq!(config.transport.uart, UartId::new(1));
    assert_eq!(config.transport.pins.txd, Pin::new(0x09));
    assert_eq!(config.transport.pins.rxd, Pin::new(0x0a));
    assert_eq!(config.transport.pins.cts, Pin::new(0x0b));
    assert_eq!(config.transport.pins.rts, Pin::new(0x0c));
    assert_eq!(config.pwr_on, Pin::new(0x4e));
    assert_eq!(config.reset, Pin::new(0x15));
    assert_eq!(config.enable_power, Pin::UNCONNECTED);
    assert_eq!(config.vint, Pin::UNCONNECTED);
}

#[test]
fn nrf_cellular_record_leaves_uart_pins_to_the_device_tree() {
    let resolved =
        resolve_source(Platform::ZephyrNrf5x, "test.cell.module = SARA_R5\n").expect("valid");
    let NetworkConfig::Cell(config) = &resolved.records.cell else {
        panic!("expected a cellular record");
    };
    assert_eq!(config.transport.uart, UartId::new(1));
    assert_eq!(config.transport.pins.txd, Pin::UNCONNECTED);
    assert_eq!(config.pwr_on, Pin::new(33));
}

#[test]
fn u201_board_overrides_replace_the_cell_uart() {
    let source = "\
test.cell.module = SARA_U201
cell.uart = 2
cell.pin.txd = 0x35   # PD_5
cell.pin.rxd = 0x36   # PD_6
cell.pin.cts = 0x33   # PD_3
cell.pin.rts = 0x34   # PD_4
";
    let resolved = resolve_source(Platform::Stm32f4, source).expect("valid");
    let NetworkConfig::Cell(config) = &resolved.records.cell else {
        panic!("expected a cellular record");
    };
    assert_eq!(config.transport.uart, UartId::new(2));
    assert_eq!(config.transport.pins.txd, Pin::new(0x35));
    assert_eq!(config.transport.pins.rts, Pin::new(0x34));
    assert_eq!(resolved.hardware.override_count(), 5);
}

#[test]
fn unusable_control_pins_are_rejected_before_bring_up() {
    let source = "\
test.cell.module = SARA_R5
cell.pin.pwr_on = 0xf0
test.gnss.module = M8
gnss.pin.en = 0x4e
";
    let error = resolve_source(Platform::Stm32f4, source).expect_err("no GPIO bank P");
    assert_eq!(
        error,
        ConfigError::Validation(ValidationError::NoSuchPin {
            parameter: ParameterId::CellPinPwrOn,
            pin: Pin::new(0xf0),
        })
    );

    // Back on PE_14, the cell now collides with the GNSS enable line.
    let source = "\
test.cell.module = SARA_R5
test.gnss.module = M8
gnss.pin.en = 0x4e
";
    let error = resolve_source(Platform::Stm32f4, source).expect_err("PE_14 driven twice");
    assert_eq!(
        error,
        ConfigError::Validation(ValidationError::PinConflict {
            pin: Pin::new(0x4e),
            first: ParameterId::CellPinPwrOn,
            second: ParameterId::GnssPinEnable,
        })
    );
}
