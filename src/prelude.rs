//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use xy_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Address, Amount, BasisPoints, DepositResult, Liquidity, MintPair, PoolAccounts, PoolReserves,
    Rounding, SwapDirection, SwapResult, SwapSpec, TokenAccount, WithdrawResult,
};

// Re-export core traits
pub use crate::traits::{PoolStore, ReserveLedger};

// Re-export math utilities
pub use crate::math::{CheckedArithmetic, SwapQuote};

// Re-export configuration
pub use crate::config::{EngineSettings, FirstDepositPolicy, PoolConfig};

// Re-export error types
pub use crate::error::{AmmError, BoundSide, ErrorKind, Result};

// Re-export the engine and reference collaborators
pub use crate::engine::{AmmEngine, LiquidityQuote};
pub use crate::ledger::InMemoryLedger;
pub use crate::store::InMemoryPoolStore;
