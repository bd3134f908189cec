//! Per-pool serialization.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::Address;

/// One exclusive lock per pool address.
///
/// Operations on the same pool run one at a time; operations on
/// different pools never contend beyond the brief lookup of the lock
/// itself.
///
/// An entry lives only while some caller holds or waits for it, so the
/// table never outgrows the number of operations in flight, whatever
/// addresses callers pass in.
#[derive(Debug, Default)]
pub struct PoolLocks {
    locks: Mutex<HashMap<Address, Arc<Mutex<()>>>>,
}

impl PoolLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock of `pool`.
    pub fn with_pool<T>(&self, pool: Address, f: impl FnOnce() -> T) -> T {
        let handle = self.acquire(pool);
        let out = {
            let _guard = handle.lock();
            f()
        };
        drop(handle);
        self.release(&pool);
        out
    }

    /// Number of pools with an operation holding or awaiting their lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Returns `true` if no pool lock is held or awaited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }

    fn acquire(&self, pool: Address) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(pool).or_default())
    }

    /// Drops the entry of `pool` once the table holds its only reference.
    ///
    /// Clones are only taken under the table lock, so an entry whose count
    /// is one has no other holder.
    fn release(&self, pool: &Address) {
        let mut locks = self.locks.lock();
        if locks.get(pool).is_some_and(|h| Arc::strong_count(h) == 1) {
            locks.remove(pool);
        }
    }
}
