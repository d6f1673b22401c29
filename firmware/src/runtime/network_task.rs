use embassy_time::{Duration, Timer};
use netcfg_core::registry::TestRegistry;
use netcfg_core::resolve::ResolvedConfig;

use crate::board::BoardNetworkApi;
use crate::{harness, status};

const HEARTBEAT_PERIOD: Duration = Duration::from_secs(10);

#[embassy_executor::task]
pub async fn run(resolved: &'static ResolvedConfig) -> ! {
    let mut registry = TestRegistry::new(&resolved.records);
    let mut api = BoardNetworkApi::new();

    status::reset_networks();
    match registry.bring_up(&mut api) {
        Ok(_) => {
            for entry in registry.active() {
                harness::log_network_up(entry.network_type(), entry.raw_handle());
            }
        }
        Err(error) => {
            harness::log_bring_up_failed(&error);
            if let Err(error) = registry.tear_down(&mut api) {
                harness::log_bring_up_failed(&error);
            }
        }
    }

    loop {
        harness::log_heartbeat(status::networks_up_mask(), registry.open_count());
        Timer::after(HEARTBEAT_PERIOD).await;
    }
}
