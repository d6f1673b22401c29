//! GPIO-backed network API.
//!
//! Control lines come from the resolved configuration, so the pins are not
//! known until run time and are claimed by number. UART traffic belongs to
//! the module drivers; bring-up here only sequences power.

use embassy_stm32::gpio::{AnyPin, Level, OutputOpenDrain, Speed};
use embassy_time::{Duration, block_for};
use netcfg_core::network::NetworkType;
use netcfg_core::pins::Pin;
use netcfg_core::records::NetworkConfig;
use netcfg_core::registry::{NetworkApi, NetworkHandle, TEST_NETWORK_COUNT};

use super::{BoardError, gpio_index};
use crate::status;

/// Settling time after PWR_ON is released.
const POWER_ON_SETTLE: Duration = Duration::from_millis(100);

/// Open-drain output claimed from a resolved pin number; `None` when the
/// signal is unconnected.
fn claim(pin: Pin, initial: Level) -> Result<Option<OutputOpenDrain<'static>>, BoardError> {
    let Some(index) = gpio_index(pin)? else {
        return Ok(None);
    };
    // SAFETY: `hal::init` hands no GPIO to another driver in this image, and
    // resolution rejects configurations that put two signals on one pin.
    let pin = unsafe { AnyPin::steal(index) };
    Ok(Some(OutputOpenDrain::new(pin, initial, Speed::Low)))
}

/// Drives the 3V3 rail enable high and keeps the returned output alive.
pub fn enable_board_rail(pin: Pin) -> Result<Option<OutputOpenDrain<'static>>, BoardError> {
    claim(pin, Level::High)
}

type OpenSlot = Option<(NetworkHandle, NetworkType)>;

pub struct BoardNetworkApi {
    next_handle: i32,
    open: [OpenSlot; TEST_NETWORK_COUNT],
    cell_enable_power: Option<OutputOpenDrain<'static>>,
    cell_pwr_on: Option<OutputOpenDrain<'static>>,
    cell_reset: Option<OutputOpenDrain<'static>>,
    gnss_enable: Option<OutputOpenDrain<'static>>,
}

impl BoardNetworkApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            open: [None; TEST_NETWORK_COUNT],
            cell_enable_power: None,
            cell_pwr_on: None,
            cell_reset: None,
            gnss_enable: None,
        }
    }

    fn release_cell(&mut self) {
        self.cell_enable_power = None;
        self.cell_pwr_on = None;
        self.cell_reset = None;
    }

    fn slot(&mut self, handle: NetworkHandle) -> Result<&mut OpenSlot, BoardError> {
        self.open
            .iter_mut()
            .find(|slot| matches!(slot, Some((open, _)) if *open == handle))
            .ok_or(BoardError::UnknownHandle(handle))
    }
}

impl Default for BoardNetworkApi {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkApi for BoardNetworkApi {
    type Error = BoardError;

    fn add(&mut self, config: &NetworkConfig) -> Result<NetworkHandle, Self::Error> {
        let network = config.network_type();
        if network.is_none() {
            return Err(BoardError::EmptyRecord);
        }
        let handle = NetworkHandle::new(self.next_handle);
        let slot = self
            .open
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(BoardError::SlotsFull)?;
        *slot = Some((handle, network));
        self.next_handle += 1;
        Ok(handle)
    }

    fn up(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error> {
        self.slot(handle)?;
        match config {
            NetworkConfig::None => return Err(BoardError::EmptyRecord),
            NetworkConfig::Cell(cell) => {
                // Dropping an output releases its pin, so old claims go first.
                self.release_cell();
                self.cell_reset = claim(cell.reset, Level::High)?;
                self.cell_enable_power = claim(cell.enable_power, Level::High)?;
                self.cell_pwr_on = claim(cell.pwr_on, Level::High)?;
                if let Some(pwr_on) = self.cell_pwr_on.as_mut() {
                    let pull = cell.module.power_on_pull();
                    let pull =
                        Duration::from_micros(u64::try_from(pull.as_micros()).unwrap_or(u64::MAX));
                    pwr_on.set_low();
                    block_for(pull);
                    pwr_on.set_high();
                    block_for(POWER_ON_SETTLE);
                }
            }
            NetworkConfig::Gnss(gnss) => {
                self.gnss_enable = None;
                self.gnss_enable = claim(gnss.enable, Level::High)?;
            }
            NetworkConfig::Ble(_) | NetworkConfig::Wifi(_) => {}
        }
        status::record_network_up(config.network_type(), true);
        Ok(())
    }

    fn down(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error> {
        self.slot(handle)?;
        match config {
            NetworkConfig::Cell(_) => {
                if let Some(enable) = self.cell_enable_power.as_mut() {
                    enable.set_low();
                }
                self.cell_pwr_on = None;
                self.cell_reset = None;
            }
            NetworkConfig::Gnss(_) => {
                if let Some(enable) = self.gnss_enable.as_mut() {
                    enable.set_low();
                }
            }
            NetworkConfig::None | NetworkConfig::Ble(_) | NetworkConfig::Wifi(_) => {}
        }
        status::record_network_up(config.network_type(), false);
        Ok(())
    }

    fn remove(&mut self, handle: NetworkHandle) -> Result<(), Self::Error> {
        *self.slot(handle)? = None;
        Ok(())
    }
}
