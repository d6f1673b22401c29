use std::fmt;

use netcfg_core::network::NetworkType;
use netcfg_core::platform::Platform;
use netcfg_core::records::NetworkConfig;
use netcfg_core::registry::{NetworkApi, NetworkHandle};

use crate::render::describe_transport;

/// Failures the simulated driver layer reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostApiError {
    UnknownHandle(NetworkHandle),
    NoUart(NetworkType),
    EmptyRecord,
}

impl fmt::Display for HostApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostApiError::UnknownHandle(handle) => write!(f, "unknown handle {handle}"),
            HostApiError::NoUart(network) => write!(f, "{network} module has no UART"),
            HostApiError::EmptyRecord => f.write_str("record is not configured"),
        }
    }
}

/// Network layer stand-in that narrates what the board would do.
pub struct HostNetworkApi {
    platform: Platform,
    next_handle: i32,
    live: Vec<(NetworkHandle, NetworkType)>,
    log: Vec<String>,
}

impl HostNetworkApi {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            next_handle: 0,
            live: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Drains the narration gathered since the last call.
    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }

    fn lookup(&self, handle: NetworkHandle) -> Result<usize, HostApiError> {
        self.live
            .iter()
            .position(|(live, _)| *live == handle)
            .ok_or(HostApiError::UnknownHandle(handle))
    }

    fn pin(&self, pin: netcfg_core::pins::Pin) -> String {
        self.platform.pin_label(pin).to_string()
    }
}

impl NetworkApi for HostNetworkApi {
    type Error = HostApiError;

    fn add(&mut self, config: &NetworkConfig) -> Result<NetworkHandle, Self::Error> {
        let network = config.network_type();
        if network.is_none() {
            return Err(HostApiError::EmptyRecord);
        }
        let handle = NetworkHandle::new(self.next_handle);
        self.next_handle += 1;
        self.live.push((handle, network));
        self.log.push(format!("add {network} -> handle {handle}"));
        Ok(handle)
    }

    fn up(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error> {
        self.lookup(handle)?;
        let network = config.network_type();
        match config {
            NetworkConfig::None => return Err(HostApiError::EmptyRecord),
            NetworkConfig::Ble(ble) => {
                if ble.module.uses_uart() && !ble.transport.uart.is_connected() {
                    return Err(HostApiError::NoUart(network));
                }
                self.log.push(format!(
                    "up {handle}: {} {} as {}",
                    ble.module,
                    describe_transport(self.platform, &ble.transport),
                    ble.role
                ));
            }
            NetworkConfig::Cell(cell) => {
                if !cell.transport.uart.is_connected() {
                    return Err(HostApiError::NoUart(network));
                }
                if cell.enable_power.is_connected() {
                    self.log
                        .push(format!("  power on via {}", self.pin(cell.enable_power)));
                }
                if cell.pwr_on.is_connected() {
                    self.log.push(format!(
                        "  pulse PWR_ON {} for {}ms",
                        self.pin(cell.pwr_on),
                        cell.module.power_on_pull().as_millis()
                    ));
                }
                self.log.push(format!(
                    "up {handle}: {} {} connect within {}s",
                    cell.module,
                    describe_transport(self.platform, &cell.transport),
                    cell.connect_timeout.as_secs()
                ));
            }
            NetworkConfig::Wifi(wifi) => {
                if !wifi.transport.uart.is_connected() {
                    return Err(HostApiError::NoUart(network));
                }
                self.log.push(format!(
                    "up {handle}: {} {}",
                    wifi.module,
                    describe_transport(self.platform, &wifi.transport)
                ));
            }
            NetworkConfig::Gnss(gnss) => {
                if !gnss.transport.uart.is_connected() {
                    return Err(HostApiError::NoUart(network));
                }
                if gnss.enable.is_connected() {
                    self.log
                        .push(format!("  enable GNSS via {}", self.pin(gnss.enable)));
                }
                self.log.push(format!(
                    "up {handle}: {} {} {}",
                    gnss.module,
                    gnss.transport_kind,
                    describe_transport(self.platform, &gnss.transport)
                ));
            }
        }
        Ok(())
    }

    fn down(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error> {
        self.lookup(handle)?;
        self.log
            .push(format!("down {handle}: {}", config.network_type()));
        Ok(())
    }

    fn remove(&mut self, handle: NetworkHandle) -> Result<(), Self::Error> {
        let index = self.lookup(handle)?;
        let (_, network) = self.live.remove(index);
        self.log.push(format!("remove {handle}: {network}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcfg_core::{Platform, TestRegistry, resolve_source};

    #[test]
    fn gnss_without_a_uart_fails_to_come_up() {
        let resolved =
            resolve_source(Platform::Stm32f4, "test.gnss.module = M8\n").expect("valid");
        let mut registry = TestRegistry::new(&resolved.records);
        let mut api = HostNetworkApi::new(Platform::Stm32f4);

        let error = registry.bring_up(&mut api).expect_err("GNSS UART unconnected");
        assert_eq!(error.to_string(), "bringing up GNSS failed: GNSS module has no UART");
        assert_eq!(registry.open_count(), 1);

        assert_eq!(registry.tear_down(&mut api), Ok(1));
        assert_eq!(api.live_count(), 0);
    }

    #[test]
    fn cellular_bring_up_narrates_the_power_on_pulse() {
        let resolved = resolve_source(Platform::Stm32f4, "test.cell.module = SARA_R5\n")
            .expect("valid");
        let mut registry = TestRegistry::new(&resolved.records);
        let mut api = HostNetworkApi::new(Platform::Stm32f4);

        assert_eq!(registry.bring_up(&mut api), Ok(1));
        let log = api.take_log();
        assert_eq!(log[0], "add cellular -> handle 0");
        assert_eq!(log[1], "  pulse PWR_ON PE_14 for 1500ms");
        assert!(log[2].starts_with("up 0: SARA_R5 UART1 [txd=PA_9"));
    }
}
