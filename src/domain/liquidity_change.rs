//! Liquidity requests: deposits and withdrawals with slippage bounds.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity};
use crate::error::AmmError;

/// Descriptor for the type of liquidity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChangeType {
    /// LP tokens are minted against new reserves.
    Deposit = 0,
    /// LP tokens are burned for a share of the reserves.
    Withdraw = 1,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// A validated request to change a pool's liquidity.
///
/// Deposits carry upper bounds on what the caller pays, withdrawals carry
/// lower bounds on what the caller receives.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Amount, Liquidity, LiquidityChange};
///
/// let change = LiquidityChange::deposit(Liquidity::new(10), Amount::new(100), Amount::new(100));
/// assert!(change.is_ok());
/// assert!(LiquidityChange::withdraw(Liquidity::ZERO, Amount::ZERO, Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidityChange {
    /// Mint `lp` tokens, paying at most `max_x` and `max_y`.
    Deposit {
        /// LP tokens requested.
        lp: Liquidity,
        /// Most X the caller will pay.
        max_x: Amount,
        /// Most Y the caller will pay.
        max_y: Amount,
    },
    /// Burn `lp` tokens, receiving at least `min_x` and `min_y`.
    Withdraw {
        /// LP tokens to burn.
        lp: Liquidity,
        /// Least X the caller accepts.
        min_x: Amount,
        /// Least Y the caller accepts.
        min_y: Amount,
    },
}

impl LiquidityChange {
    /// Creates a `Deposit` request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAmount`] if `lp`, `max_x` or `max_y` is
    /// zero; a deposit that pays nothing on one side can never succeed.
    pub const fn deposit(
        lp: Liquidity,
        max_x: Amount,
        max_y: Amount,
    ) -> crate::error::Result<Self> {
        if lp.is_zero() {
            return Err(AmmError::ZeroAmount("deposit lp amount must be non-zero"));
        }
        if max_x.is_zero() || max_y.is_zero() {
            return Err(AmmError::ZeroAmount("deposit bounds must be non-zero"));
        }
        Ok(Self::Deposit { lp, max_x, max_y })
    }

    /// Creates a `Withdraw` request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAmount`] if `lp` is zero.
    pub const fn withdraw(
        lp: Liquidity,
        min_x: Amount,
        min_y: Amount,
    ) -> crate::error::Result<Self> {
        if lp.is_zero() {
            return Err(AmmError::ZeroAmount("withdraw lp amount must be non-zero"));
        }
        Ok(Self::Withdraw { lp, min_x, min_y })
    }

    /// Returns the [`ChangeType`] descriptor for this variant.
    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        match self {
            Self::Deposit { .. } => ChangeType::Deposit,
            Self::Withdraw { .. } => ChangeType::Withdraw,
        }
    }

    /// LP tokens minted or burned.
    #[must_use]
    pub const fn lp(&self) -> Liquidity {
        match self {
            Self::Deposit { lp, .. } | Self::Withdraw { lp, .. } => *lp,
        }
    }
}

impl fmt::Display for LiquidityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit { lp, max_x, max_y } => {
                write!(f, "Deposit(lp={lp}, max_x={max_x}, max_y={max_y})")
            }
            Self::Withdraw { lp, min_x, min_y } => {
                write!(f, "Withdraw(lp={lp}, min_x={min_x}, min_y={min_y})")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn deposit_valid() {
        let Ok(change) =
            LiquidityChange::deposit(Liquidity::new(5), Amount::new(10), Amount::new(20))
        else {
            panic!("expected Ok");
        };
        assert_eq!(change.change_type(), ChangeType::Deposit);
        assert_eq!(change.lp(), Liquidity::new(5));
    }

    #[test]
    fn deposit_zero_lp_rejected() {
        let result = LiquidityChange::deposit(Liquidity::ZERO, Amount::new(1), Amount::new(1));
        assert!(matches!(result, Err(AmmError::ZeroAmount(_))));
    }

    #[test]
    fn deposit_zero_bound_rejected() {
        let result = LiquidityChange::deposit(Liquidity::new(1), Amount::ZERO, Amount::new(1));
        assert!(matches!(result, Err(AmmError::ZeroAmount(_))));
    }

    #[test]
    fn withdraw_allows_zero_minimums() {
        let Ok(change) = LiquidityChange::withdraw(Liquidity::new(3), Amount::ZERO, Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        assert_eq!(change.change_type(), ChangeType::Withdraw);
    }

    #[test]
    fn withdraw_zero_lp_rejected() {
        let result = LiquidityChange::withdraw(Liquidity::ZERO, Amount::new(1), Amount::new(1));
        assert!(matches!(result, Err(AmmError::ZeroAmount(_))));
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display() {
        let Ok(change) = LiquidityChange::withdraw(Liquidity::new(3), Amount::new(1), Amount::new(2))
        else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{change}"), "Withdraw(lp=3, min_x=1, min_y=2)");
    }
}
