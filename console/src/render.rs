use netcfg_core::params::ParameterValue;
use netcfg_core::pins::{Pin, UartPins};
use netcfg_core::platform::Platform;
use netcfg_core::records::{NetworkConfig, NetworkConfigs, UartTransport};
use netcfg_core::registry::TestRegistry;
use netcfg_core::resolve::ResolvedHardware;

const KEY_WIDTH: usize = 24;

pub fn parameter_table(hardware: &ResolvedHardware) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<KEY_WIDTH$} {:<12} {:<8} {}",
        "parameter", "value", "source", "pin"
    )];
    for (spec, value, source) in hardware.entries() {
        let label = match value {
            ParameterValue::Pin(pin) => hardware.platform.pin_label(pin).to_string(),
            ParameterValue::Uart(_) | ParameterValue::Role(_) => String::new(),
        };
        lines.push(
            format!(
                "{:<KEY_WIDTH$} {:<12} {:<8} {label}",
                spec.key,
                value.to_string(),
                source.name()
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

pub fn record_lines(platform: Platform, records: &NetworkConfigs) -> Vec<String> {
    [&records.ble, &records.cell, &records.wifi, &records.gnss]
        .into_iter()
        .map(|record| describe_record(platform, record))
        .collect()
}

pub fn describe_record(platform: Platform, record: &NetworkConfig) -> String {
    match record {
        NetworkConfig::None => "none".to_string(),
        NetworkConfig::Ble(ble) => format!(
            "BLE {} {} role={} sps={}",
            ble.module,
            describe_transport(platform, &ble.transport),
            ble.role,
            ble.sps_server
        ),
        NetworkConfig::Cell(cell) => format!(
            "cellular {} {} pwr_on={} reset={} enable_power={} vint={} timeout={}s apn={} sim_pin={}",
            cell.module,
            describe_transport(platform, &cell.transport),
            pin(platform, cell.pwr_on),
            pin(platform, cell.reset),
            pin(platform, cell.enable_power),
            pin(platform, cell.vint),
            cell.connect_timeout.as_secs(),
            cell.apn.as_deref().unwrap_or("-"),
            if cell.sim_pin.is_some() { "set" } else { "-" },
        ),
        NetworkConfig::Wifi(wifi) => format!(
            "Wifi {} {}",
            wifi.module,
            describe_transport(platform, &wifi.transport)
        ),
        NetworkConfig::Gnss(gnss) => format!(
            "GNSS {} {} {} enable={}",
            gnss.module,
            gnss.transport_kind,
            describe_transport(platform, &gnss.transport),
            pin(platform, gnss.enable)
        ),
    }
}

pub fn describe_transport(platform: Platform, transport: &UartTransport) -> String {
    if transport.uart.is_connected() {
        format!("{} [{}]", transport.uart, describe_pins(platform, &transport.pins))
    } else {
        "no-uart".to_string()
    }
}

fn describe_pins(platform: Platform, pins: &UartPins) -> String {
    format!(
        "txd={} rxd={} cts={} rts={}",
        pin(platform, pins.txd),
        pin(platform, pins.rxd),
        pin(platform, pins.cts),
        pin(platform, pins.rts)
    )
}

fn pin(platform: Platform, pin: Pin) -> String {
    platform.pin_label(pin).to_string()
}

pub fn registry_lines(platform: Platform, registry: &TestRegistry<'_>) -> Vec<String> {
    registry
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "  {index}. {:<9} handle={:>3} {}",
                entry.network_type().name(),
                entry.raw_handle(),
                describe_record(platform, entry.config())
            )
        })
        .collect()
}
