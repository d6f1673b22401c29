use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use netcfg_core::resolve::ResolvedConfig;
use static_cell::StaticCell;

use crate::board;
use crate::harness;

mod network_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

static RESOLVED: StaticCell<ResolvedConfig> = StaticCell::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let _peripherals = hal::init(hal::Config::default());

    let resolved = match harness::resolve_build() {
        Ok(resolved) => RESOLVED.init(resolved),
        Err(error) => {
            harness::log_config_error(&error);
            return;
        }
    };
    harness::log_resolved(resolved);

    // Must outlive the executor.
    let _rail = match board::enable_board_rail(resolved.hardware.config.board.enable_3v3) {
        Ok(rail) => rail,
        Err(error) => {
            harness::log_bring_up_failed(&error);
            return;
        }
    };

    spawner
        .spawn(network_task::run(resolved))
        .expect("failed to spawn network task");

    core::future::pending::<()>().await;
}
