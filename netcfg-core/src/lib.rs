#![cfg_attr(not(test), no_std)]

// Network test configuration shared by the firmware harness and host tooling.
//
// Platform default tables, build-level overrides, the per-network records
// built from them and the registry a test harness walks. Nothing here
// allocates or performs I/O.

pub mod hardware;
pub mod network;
pub mod overrides;
pub mod params;
pub mod pins;
pub mod platform;
pub mod records;
pub mod registry;
pub mod resolve;
pub mod selection;

pub use network::NetworkType;
pub use overrides::Overrides;
pub use platform::Platform;
pub use records::{NetworkConfig, NetworkConfigs};
pub use registry::{NetworkApi, TestRegistry};
pub use resolve::{ConfigError, ResolvedConfig, resolve, resolve_source};
