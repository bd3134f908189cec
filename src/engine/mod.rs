//! The engine: operation sequencing over the ledger and config store.

mod amm_engine;
mod pool_locks;
#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use amm_engine::{AmmEngine, LiquidityQuote};
pub use pool_locks::PoolLocks;
