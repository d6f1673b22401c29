//! Test configuration registry.
//!
//! The registry holds one entry per network type a test harness may bring up,
//! in the order BLE, cellular, Wi-Fi, GNSS. Each entry pairs a handle slot with
//! the type tag and a borrowed reference to the matching record. Its length is
//! derived from [`TEST_NETWORK_TYPES`].

use core::fmt;

use crate::network::NetworkType;
use crate::pins::UNCONNECTED_RAW;
use crate::records::{NetworkConfig, NetworkConfigs};

/// Network types carried by the registry, in entry order.
pub const TEST_NETWORK_TYPES: [NetworkType; 4] = [
    NetworkType::Ble,
    NetworkType::Cell,
    NetworkType::Wifi,
    NetworkType::Gnss,
];

/// Number of registry entries.
pub const TEST_NETWORK_COUNT: usize = TEST_NETWORK_TYPES.len();

/// Opaque handle returned by a network driver when a network is added.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NetworkHandle(i32);

impl NetworkHandle {
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NetworkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Driver seam the registry walks during bring-up and tear-down.
pub trait NetworkApi {
    type Error;

    /// Registers the network described by `config` and returns its handle.
    fn add(&mut self, config: &NetworkConfig) -> Result<NetworkHandle, Self::Error>;

    /// Powers up and connects a previously added network.
    fn up(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error>;

    /// Disconnects and powers down a network.
    fn down(&mut self, handle: NetworkHandle, config: &NetworkConfig) -> Result<(), Self::Error>;

    /// Releases the handle.
    fn remove(&mut self, handle: NetworkHandle) -> Result<(), Self::Error>;
}

/// Network API that accepts everything and hands out sequential handles.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopNetworkApi {
    next_handle: i32,
}

impl NoopNetworkApi {
    #[must_use]
    pub const fn new() -> Self {
        Self { next_handle: 0 }
    }
}

impl NetworkApi for NoopNetworkApi {
    type Error = core::convert::Infallible;

    fn add(&mut self, _: &NetworkConfig) -> Result<NetworkHandle, Self::Error> {
        let handle = NetworkHandle::new(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn up(&mut self, _: NetworkHandle, _: &NetworkConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn down(&mut self, _: NetworkHandle, _: &NetworkConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn remove(&mut self, _: NetworkHandle) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// One registry slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegistryEntry<'a> {
    handle: Option<NetworkHandle>,
    network: NetworkType,
    config: &'a NetworkConfig,
}

impl<'a> RegistryEntry<'a> {
    #[must_use]
    pub const fn handle(&self) -> Option<NetworkHandle> {
        self.handle
    }

    /// Handle as logged by test harnesses, `-1` while unset.
    #[must_use]
    pub const fn raw_handle(&self) -> i32 {
        match self.handle {
            Some(handle) => handle.raw(),
            None => UNCONNECTED_RAW,
        }
    }

    #[must_use]
    pub const fn network_type(&self) -> NetworkType {
        self.network
    }

    #[must_use]
    pub const fn config(&self) -> &'a NetworkConfig {
        self.config
    }

    /// Returns `true` when both the entry and its record are configured.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.network.is_none() && !self.config.network_type().is_none()
    }
}

/// Bring-up failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BringUpError<E> {
    /// The entry already holds a handle from an earlier bring-up.
    AlreadyOpen(NetworkType),
    Driver { network: NetworkType, error: E },
}

impl<E: fmt::Display> fmt::Display for BringUpError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BringUpError::AlreadyOpen(network) => write!(f, "{network} is already up"),
            BringUpError::Driver { network, error } => {
                write!(f, "bringing up {network} failed: {error}")
            }
        }
    }
}

/// First driver error seen during tear-down.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TearDownError<E> {
    pub network: NetworkType,
    pub error: E,
    /// Number of entries whose tear-down failed.
    pub failures: usize,
}

impl<E: fmt::Display> fmt::Display for TearDownError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tearing down {} failed: {} ({} failure(s))",
            self.network, self.error, self.failures
        )
    }
}

/// Handle slots of a registry, in entry order.
pub type HandleSlots = [Option<NetworkHandle>; TEST_NETWORK_COUNT];

/// Fixed-size registry of test network entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestRegistry<'a> {
    entries: [RegistryEntry<'a>; TEST_NETWORK_COUNT],
}

impl<'a> TestRegistry<'a> {
    /// One entry per test network type, handles unset.
    #[must_use]
    pub fn new(records: &'a NetworkConfigs) -> Self {
        Self {
            entries: core::array::from_fn(|index| {
                let network = TEST_NETWORK_TYPES[index];
                RegistryEntry {
                    handle: None,
                    network,
                    config: records.get(network),
                }
            }),
        }
    }

    /// Rebuilds a registry over `records` with slots saved by
    /// [`TestRegistry::into_handles`].
    ///
    /// Slots whose record is not configured are dropped.
    #[must_use]
    pub fn with_handles(records: &'a NetworkConfigs, handles: HandleSlots) -> Self {
        let mut registry = Self::new(records);
        for (entry, handle) in registry.entries.iter_mut().zip(handles) {
            if entry.is_active() {
                entry.handle = handle;
            }
        }
        registry
    }

    /// Releases the borrow on the records, keeping only the handle slots.
    #[must_use]
    pub fn into_handles(self) -> HandleSlots {
        self.entries.map(|entry| entry.handle)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry<'a>> + '_ {
        self.entries.iter()
    }

    /// Entry tagged `network`; `None` for [`NetworkType::None`].
    #[must_use]
    pub fn entry(&self, network: NetworkType) -> Option<&RegistryEntry<'a>> {
        self.entries.iter().find(|entry| entry.network == network)
    }

    /// Entries whose record is configured.
    pub fn active(&self) -> impl Iterator<Item = &RegistryEntry<'a>> + '_ {
        self.entries.iter().filter(|entry| entry.is_active())
    }

    /// Number of entries currently holding a handle.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.handle.is_some())
            .count()
    }

    /// Adds and brings up every active entry, storing the handles.
    ///
    /// Nothing is added when any active entry already holds a handle. After
    /// that check the walk stops at the first failure; a handle obtained from
    /// `add` is kept even when `up` fails so that [`TestRegistry::tear_down`]
    /// can release it.
    pub fn bring_up<A: NetworkApi>(
        &mut self,
        api: &mut A,
    ) -> Result<usize, BringUpError<A::Error>> {
        if let Some(entry) = self.active().find(|entry| entry.handle.is_some()) {
            return Err(BringUpError::AlreadyOpen(entry.network));
        }
        let mut opened = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.is_active()) {
            let network = entry.network;
            let handle = api
                .add(entry.config)
                .map_err(|error| BringUpError::Driver { network, error })?;
            entry.handle = Some(handle);
            api.up(handle, entry.config)
                .map_err(|error| BringUpError::Driver { network, error })?;
            opened += 1;
        }
        Ok(opened)
    }

    /// Brings down and removes every entry holding a handle.
    ///
    /// `remove` follows `down` even when `down` fails, so the driver never
    /// keeps a handle the registry has forgotten. Every entry is attempted
    /// and its slot cleared; the first error is returned afterwards.
    pub fn tear_down<A: NetworkApi>(
        &mut self,
        api: &mut A,
    ) -> Result<usize, TearDownError<A::Error>> {
        let mut closed = 0;
        let mut first_error = None;
        let mut failures = 0;
        for entry in &mut self.entries {
            let Some(handle) = entry.handle.take() else {
                continue;
            };
            let down = api.down(handle, entry.config);
            let removed = api.remove(handle);
            match down.and(removed) {
                Ok(()) => closed += 1,
                Err(error) => {
                    failures += 1;
                    if first_error.is_none() {
                        first_error = Some((entry.network, error));
                    }
                }
            }
        }
        match first_error {
            None => Ok(closed),
            Some((network, error)) => Err(TearDownError {
                network,
                error,
                failures,
            }),
        }
    }
}

impl<'r, 'a> IntoIterator for &'r TestRegistry<'a> {
    type Item = &'r RegistryEntry<'a>;
    type IntoIter = core::slice::Iter<'r, RegistryEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::CellModuleType;
    use crate::platform::Platform;
    use crate::selection::TestSelection;

    fn cell_only() -> NetworkConfigs {
        let mut selection = TestSelection::new();
        selection.cell_module = Some(CellModuleType::SaraR412m02b);
        NetworkConfigs::build(&Platform::Stm32f4.defaults(), &selection)
    }

    #[test]
    fn one_entry_per_test_network_type() {
        let records = NetworkConfigs::none();
        let registry = TestRegistry::new(&records);
        assert_eq!(registry.len(), TEST_NETWORK_COUNT);
        for network in TEST_NETWORK_TYPES {
            assert_eq!(registry.iter().filter(|e| e.network_type() == network).count(), 1);
        }
        assert!(registry.entry(NetworkType::None).is_none());
        assert!(registry.iter().all(|entry| entry.raw_handle() == -1));
    }

    #[test]
    fn only_configured_entries_are_active() {
        let records = cell_only();
        let registry = TestRegistry::new(&records);
        let active: Vec<_> = registry.active().map(RegistryEntry::network_type).collect();
        assert_eq!(active, [NetworkType::Cell]);
    }

    #[test]
    fn bring_up_then_tear_down_with_noop_api() {
        let records = cell_only();
        let mut registry = TestRegistry::new(&records);
        let mut api = NoopNetworkApi::new();

        assert_eq!(registry.bring_up(&mut api), Ok(1));
        let cell = registry.entry(NetworkType::Cell).expect("cell entry");
        assert_eq!(cell.handle(), Some(NetworkHandle::new(0)));
        assert_eq!(registry.open_count(), 1);

        assert_eq!(
            registry.bring_up(&mut api),
            Err(BringUpError::AlreadyOpen(NetworkType::Cell))
        );

        assert_eq!(registry.tear_down(&mut api), Ok(1));
        assert_eq!(registry.open_count(), 0);
    }

    #[test]
    fn handles_survive_a_rebuild() {
        let records = cell_only();
        let mut registry = TestRegistry::new(&records);
        registry
            .bring_up(&mut NoopNetworkApi::new())
            .expect("noop bring-up");

        let handles = registry.into_handles();
        assert_eq!(handles, [None, Some(NetworkHandle::new(0)), None, None]);

        let mut slots = handles;
        slots[0] = Some(NetworkHandle::new(9));
        let registry = TestRegistry::with_handles(&records, slots);
        assert_eq!(registry.open_count(), 1);
        assert_eq!(registry.entry(NetworkType::Ble).map(RegistryEntry::raw_handle), Some(-1));
    }
}
