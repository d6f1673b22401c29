#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! Build-time configuration for the network test harness.
//!
//! The override file is compiled into the image and resolved once at start-up
//! against the platform chosen by the `netcfg-core` feature.

use netcfg_core::network::NetworkType;
use netcfg_core::platform::{BUILD_PLATFORM, Platform};
use netcfg_core::records::NetworkConfig;
use netcfg_core::resolve::{ConfigError, ResolvedConfig, ValueSource, resolve_source};

/// Override source baked into the firmware image.
pub const OVERRIDE_SOURCE: &str = include_str!("../netcfg.override");

pub const PLATFORM: Platform = match BUILD_PLATFORM {
    Some(platform) => platform,
    None => Platform::Stm32f4,
};

/// Resolves the compiled-in overrides against the build platform.
pub fn resolve_build() -> Result<ResolvedConfig, ConfigError> {
    resolve_source(PLATFORM, OVERRIDE_SOURCE)
}

/// Logs every overridden parameter and every configured record.
pub fn log_resolved(resolved: &ResolvedConfig) {
    log_platform(resolved.hardware.platform, resolved.hardware.override_count());
    for (spec, value, source) in resolved.hardware.entries() {
        if source == ValueSource::Override {
            log_override(spec.key, value.raw());
        }
    }
    for network in netcfg_core::registry::TEST_NETWORK_TYPES {
        log_record(network, resolved.records.get(network));
    }
}

fn record_uart(record: &NetworkConfig) -> i32 {
    record
        .transport()
        .map_or(-1, |transport| transport.uart.raw())
}

#[cfg(target_os = "none")]
fn log_platform(platform: Platform, overrides: usize) {
    defmt::info!(
        "netcfg: platform={} overrides={}",
        platform.name(),
        overrides
    );
}

#[cfg(not(target_os = "none"))]
fn log_platform(platform: Platform, overrides: usize) {
    println!("netcfg: platform={} overrides={}", platform.name(), overrides);
}

#[cfg(target_os = "none")]
fn log_override(key: &str, raw: i32) {
    defmt::info!("netcfg: {}={} (override)", key, raw);
}

#[cfg(not(target_os = "none"))]
fn log_override(key: &str, raw: i32) {
    println!("netcfg: {key}={raw} (override)");
}

#[cfg(target_os = "none")]
fn log_record(network: NetworkType, record: &NetworkConfig) {
    if record.is_none() {
        defmt::info!("netcfg: {} not configured", network.name());
    } else {
        defmt::info!(
            "netcfg: {} configured uart={}",
            network.name(),
            record_uart(record)
        );
    }
}

#[cfg(not(target_os = "none"))]
fn log_record(network: NetworkType, record: &NetworkConfig) {
    if record.is_none() {
        println!("netcfg: {} not configured", network.name());
    } else {
        println!(
            "netcfg: {} configured uart={}",
            network.name(),
            record_uart(record)
        );
    }
}

#[cfg(target_os = "none")]
pub fn log_config_error(error: &ConfigError) {
    defmt::error!("netcfg: configuration rejected: {}", defmt::Display2Format(error));
}

#[cfg(not(target_os = "none"))]
pub fn log_config_error(error: &ConfigError) {
    println!("netcfg: configuration rejected: {error}");
}

#[cfg(target_os = "none")]
pub fn log_network_up(network: NetworkType, handle: i32) {
    defmt::info!("netcfg: {} up handle={}", network.name(), handle);
}

#[cfg(not(target_os = "none"))]
pub fn log_network_up(network: NetworkType, handle: i32) {
    println!("netcfg: {} up handle={handle}", network.name());
}

#[cfg(target_os = "none")]
pub fn log_bring_up_failed<E: core::fmt::Display>(error: &E) {
    defmt::warn!("netcfg: bring-up failed: {}", defmt::Display2Format(error));
}

#[cfg(not(target_os = "none"))]
pub fn log_bring_up_failed<E: core::fmt::Display>(error: &E) {
    println!("netcfg: bring-up failed: {error}");
}

#[cfg(target_os = "none")]
pub fn log_heartbeat(mask: u8, open: usize) {
    defmt::info!("netcfg: heartbeat up-mask={=u8:#04x} open={}", mask, open);
}

#[cfg(not(target_os = "none"))]
pub fn log_heartbeat(mask: u8, open: usize) {
    println!("netcfg: heartbeat up-mask={mask:#04x} open={open}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcfg_core::network::CellModuleType;

    #[test]
    fn compiled_in_overrides_resolve() {
        let resolved = resolve_build().expect("netcfg.override must resolve");
        assert_eq!(resolved.hardware.platform, Platform::Stm32f4);

        let NetworkConfig::Cell(cell) = &resolved.records.cell else {
            panic!("the harness image selects a cellular module");
        };
        assert_eq!(cell.module, CellModuleType::SaraR412m02b);
        assert!(resolved.records.ble.is_none());
        assert!(resolved.records.gnss.is_none());
    }
}
