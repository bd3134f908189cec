//! Collaborator seam for pool configuration records.
//!
//! A [`PoolStore`] maps a pool address to its [`PoolConfig`].  Creation
//! is a single create-if-absent step, so two racing `initialize` calls
//! for the same seed cannot both succeed.

use crate::config::PoolConfig;
use crate::domain::Address;
use crate::error::AmmError;

/// Keyed store of pool configuration records.
pub trait PoolStore: Send + Sync {
    /// Reads the record of `pool`, if any.
    ///
    /// # Errors
    ///
    /// Implementations backed by I/O report failures as
    /// [`AmmError::InvalidConfiguration`].
    fn get(&self, pool: &Address) -> Result<Option<PoolConfig>, AmmError>;

    /// Inserts `config` under `pool` only if no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DuplicatePool`] if `pool` already has a record.
    fn insert_new(&self, pool: Address, config: PoolConfig) -> Result<(), AmmError>;

    /// Replaces the existing record of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `pool` has no record.
    fn update(&self, pool: &Address, config: PoolConfig) -> Result<(), AmmError>;

    /// Removes and returns the record of `pool`.
    ///
    /// # Errors
    ///
    /// Implementations backed by I/O report failures as
    /// [`AmmError::InvalidConfiguration`].
    fn remove(&self, pool: &Address) -> Result<Option<PoolConfig>, AmmError>;

    /// Addresses of every stored pool, in no particular order.
    ///
    /// # Errors
    ///
    /// Implementations backed by I/O report failures as
    /// [`AmmError::InvalidConfiguration`].
    fn pool_ids(&self) -> Result<Vec<Address>, AmmError>;
}
