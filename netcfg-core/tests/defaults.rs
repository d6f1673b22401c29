use netcfg_core::params::{ParameterId, ParameterValue, parameters};
use netcfg_core::pins::{Pin, UNCONNECTED_RAW};
use netcfg_core::platform::{BUILD_PLATFORM, Platform};

#[test]
fn every_parameter_has_a_default_of_the_catalog_kind() {
    for platform in Platform::ALL {
        let defaults = platform.defaults();
        for spec in parameters() {
            assert_eq!(
                defaults.get(spec.id).kind(),
                spec.kind,
                "{platform} {}",
                spec.key
            );
        }
    }
}

#[test]
fn connected_defaults_never_use_the_sentinel_range() {
    for platform in Platform::ALL {
        let defaults = platform.defaults();
        for spec in parameters() {
            let raw = defaults.get(spec.id).raw();
            assert!(
                raw == UNCONNECTED_RAW || raw >= 0,
                "{platform} {} = {raw}",
                spec.key
            );
        }
    }
}

#[test]
fn cell_tx_defaults_differ_per_platform() {
    assert_eq!(
        Platform::Stm32f4.defaults().get(ParameterId::CellPinTxd),
        ParameterValue::Pin(Pin::new(0x09))
    );
    assert_eq!(
        Platform::ZephyrNrf5x.defaults().get(ParameterId::CellPinTxd),
        ParameterValue::Pin(Pin::UNCONNECTED)
    );
}

#[test]
fn role_defaults_to_peripheral_everywhere() {
    for platform in Platform::ALL {
        assert_eq!(platform.defaults().get(ParameterId::ShortRangeRole).raw(), 2);
    }
}

#[test]
fn build_platform_follows_cargo_features() {
    if cfg!(feature = "platform-stm32f4") {
        assert_eq!(BUILD_PLATFORM, Some(Platform::Stm32f4));
    } else if cfg!(feature = "platform-nrf5x") {
        assert_eq!(BUILD_PLATFORM, Some(Platform::ZephyrNrf5x));
    } else {
        assert_eq!(BUILD_PLATFORM, None);
    }
}
