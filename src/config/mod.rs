//! Pool records and engine settings.
//!
//! [`PoolConfig`] is the single authoritative record per pool kept by a
//! [`PoolStore`](crate::traits::PoolStore).  [`EngineSettings`] carries
//! the engine-wide knobs: the derivation namespace and the first-deposit
//! policy.

mod pool_config;
mod settings;

pub use pool_config::PoolConfig;
pub use settings::{EngineSettings, FirstDepositPolicy, DEFAULT_NAMESPACE};
