//! Snapshot of a pool's reserves and LP supply.

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity, SwapDirection};

/// A consistent snapshot of both vault balances and the LP supply.
///
/// The engine reads one of these under the pool lock and computes every
/// amount of an operation from it.
///
/// # Invariants
///
/// After every successful operation, `lp_supply == 0` if and only if both
/// reserves are zero, and a non-zero supply implies both reserves are
/// non-zero.  [`is_consistent`](Self::is_consistent) checks this.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Amount, Liquidity, PoolReserves};
///
/// let r = PoolReserves::new(Amount::new(4), Amount::new(9), Liquidity::new(6));
/// assert_eq!(r.invariant(), 36);
/// assert!(r.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PoolReserves {
    /// Balance of the X vault.
    pub reserve_x: Amount,
    /// Balance of the Y vault.
    pub reserve_y: Amount,
    /// Total LP tokens outstanding.
    pub lp_supply: Liquidity,
}

impl PoolReserves {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(reserve_x: Amount, reserve_y: Amount, lp_supply: Liquidity) -> Self {
        Self {
            reserve_x,
            reserve_y,
            lp_supply,
        }
    }

    /// The constant-product value `reserve_x * reserve_y`, exact in `u128`.
    #[must_use]
    pub const fn invariant(&self) -> u128 {
        self.reserve_x.widen() * self.reserve_y.widen()
    }

    /// Returns `true` when no LP tokens are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lp_supply.is_zero()
    }

    /// Returns `true` when the supply/reserve invariants hold.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        if self.lp_supply.is_zero() {
            self.reserve_x.is_zero() && self.reserve_y.is_zero()
        } else {
            !self.reserve_x.is_zero() && !self.reserve_y.is_zero()
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a swap in `direction`.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::XToY => (self.reserve_x, self.reserve_y),
            SwapDirection::YToX => (self.reserve_y, self.reserve_x),
        }
    }
}
