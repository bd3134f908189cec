//! In-memory pool config store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;

use crate::config::PoolConfig;
use crate::domain::Address;
use crate::error::AmmError;
use crate::traits::PoolStore;

/// Thread-safe `HashMap` of pool records.
///
/// All data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryPoolStore {
    pools: RwLock<HashMap<Address, PoolConfig>>,
}

impl InMemoryPoolStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.read().len()
    }

    /// Returns `true` if no pool is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.read().is_empty()
    }
}

impl PoolStore for InMemoryPoolStore {
    fn get(&self, pool: &Address) -> Result<Option<PoolConfig>, AmmError> {
        Ok(self.pools.read().get(pool).cloned())
    }

    fn insert_new(&self, pool: Address, config: PoolConfig) -> Result<(), AmmError> {
        match self.pools.write().entry(pool) {
            Entry::Occupied(_) => Err(AmmError::DuplicatePool(pool)),
            Entry::Vacant(slot) => {
                slot.insert(config);
                Ok(())
            }
        }
    }

    fn update(&self, pool: &Address, config: PoolConfig) -> Result<(), AmmError> {
        match self.pools.write().get_mut(pool) {
            Some(existing) => {
                *existing = config;
                Ok(())
            }
            None => Err(AmmError::PoolNotFound(*pool)),
        }
    }

    fn remove(&self, pool: &Address) -> Result<Option<PoolConfig>, AmmError> {
        Ok(self.pools.write().remove(pool))
    }

    fn pool_ids(&self) -> Result<Vec<Address>, AmmError> {
        Ok(self.pools.read().keys().copied().collect())
    }
}
