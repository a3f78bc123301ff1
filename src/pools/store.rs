//! Keyed storage for pool records.

use std::collections::BTreeMap;

use super::PoolState;
use crate::domain::Address;

/// Persistent storage for [`PoolState`] records, keyed by pool address.
pub trait PoolStore {
    /// Returns the pool stored at `address`.
    fn get(&self, address: &Address) -> Option<&PoolState>;

    /// Returns the pool stored at `address` for mutation.
    fn get_mut(&mut self, address: &Address) -> Option<&mut PoolState>;

    /// Stores `pool` under its address.
    fn insert(&mut self, pool: PoolState);

    /// Removes and returns the pool stored at `address`.
    fn remove(&mut self, address: &Address) -> Option<PoolState>;

    /// Returns `true` if a pool is stored at `address`.
    fn contains(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }
}

/// [`PoolStore`] backed by a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPoolStore {
    pools: BTreeMap<Address, PoolState>,
}

impl InMemoryPoolStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool is stored.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl PoolStore for InMemoryPoolStore {
    fn get(&self, address: &Address) -> Option<&PoolState> {
        self.pools.get(address)
    }

    fn get_mut(&mut self, address: &Address) -> Option<&mut PoolState> {
        self.pools.get_mut(address)
    }

    fn insert(&mut self, pool: PoolState) {
        self.pools.insert(pool.address(), pool);
    }

    fn remove(&mut self, address: &Address) -> Option<PoolState> {
        self.pools.remove(address)
    }
}
