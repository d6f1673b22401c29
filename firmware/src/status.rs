#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! Shared status storage for the firmware target.
//!
//! A lock-free bitmask records which networks the harness currently has up so
//! the heartbeat can report it without touching the registry.

use netcfg_core::network::NetworkType;
use portable_atomic::{AtomicU8, Ordering};

/// Bitmask of networks that are up (1 == up), indexed by [`NetworkType::as_index`].
static NETWORKS_UP: AtomicU8 = AtomicU8::new(0);

fn bit_for(network: NetworkType) -> u8 {
    1 << network.as_index()
}

/// Records whether `network` is currently up.
pub fn record_network_up(network: NetworkType, up: bool) {
    let bit = bit_for(network);
    if up {
        NETWORKS_UP.fetch_or(bit, Ordering::Relaxed);
    } else {
        NETWORKS_UP.fetch_and(!bit, Ordering::Relaxed);
    }
}

/// Clears every bit, marking all networks down.
pub fn reset_networks() {
    NETWORKS_UP.store(0, Ordering::Relaxed);
}

/// Returns the raw bitmask.
pub fn networks_up_mask() -> u8 {
    NETWORKS_UP.load(Ordering::Relaxed)
}
