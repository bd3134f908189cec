//! Receipts returned by successful engine operations.

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity, SwapDirection};

/// Outcome of a swap.
///
/// `amount_in` is the full amount debited from the caller; `fee` is the
/// part of it that was not priced and stays in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    /// Direction that was executed.
    pub direction: SwapDirection,
    /// Amount debited from the caller.
    pub amount_in: Amount,
    /// Amount credited to the caller.
    pub amount_out: Amount,
    /// Fee retained by the pool.
    pub fee: Amount,
    /// Engine-wide sequence number of the operation.
    pub sequence: u64,
}

/// Outcome of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositResult {
    /// LP tokens minted to the caller.
    pub lp_minted: Liquidity,
    /// X moved from the caller into the vault.
    pub amount_x: Amount,
    /// Y moved from the caller into the vault.
    pub amount_y: Amount,
    /// Engine-wide sequence number of the operation.
    pub sequence: u64,
}

/// Outcome of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WithdrawResult {
    /// LP tokens burned from the caller.
    pub lp_burned: Liquidity,
    /// X paid out of the vault.
    pub amount_x: Amount,
    /// Y paid out of the vault.
    pub amount_y: Amount,
    /// Engine-wide sequence number of the operation.
    pub sequence: u64,
}
