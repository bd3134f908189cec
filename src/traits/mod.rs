//! Collaborator seams the engine is generic over.
//!
//! [`ReserveLedger`] moves, mints and burns tokens atomically.
//! [`PoolStore`] keeps one [`PoolConfig`](crate::config::PoolConfig) per
//! pool.  The crate ships in-memory implementations of both in
//! [`ledger`](crate::ledger) and [`store`](crate::store).

mod pool_store;
mod reserve_ledger;

pub use pool_store::PoolStore;
pub use reserve_ledger::ReserveLedger;
