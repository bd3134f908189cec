//! Fundamental domain value types used throughout the AMM core.
//!
//! This module contains the value types that model a two-reserve pool:
//! amounts, LP quantities, fees, identities, ledger accounts, reserve
//! snapshots, and the request/receipt shapes of the four operations.
//! Types with invariants use newtypes with validated constructors.

mod accounts;
mod address;
mod amount;
mod basis_points;
mod liquidity;
mod liquidity_change;
mod mint_pair;
mod reserves;
mod rounding;
mod swap_result;
mod swap_spec;

pub use accounts::{PoolAccounts, TokenAccount};
pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use liquidity::Liquidity;
pub use liquidity_change::{ChangeType, LiquidityChange};
pub use mint_pair::MintPair;
pub use reserves::PoolReserves;
pub use rounding::Rounding;
pub use swap_result::{DepositResult, SwapResult, WithdrawResult};
pub use swap_spec::{SwapDirection, SwapSpec};
