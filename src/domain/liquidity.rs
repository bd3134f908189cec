//! LP token quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// A quantity of LP tokens: a proportional claim on both reserves.
///
/// Kept distinct from [`Amount`] so reserve balances and LP balances
/// cannot be mixed up in the share formulas.  The LP mint is a ledger mint
/// like any other, so conversions to and from [`Amount`] are lossless.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// assert_eq!(a.checked_add(&Liquidity::new(500)), Some(Liquidity::new(1_500)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Liquidity(u64);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u64` value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64` value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the LP quantity as a ledger amount of the LP mint.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }

    /// Reads an LP mint ledger amount as a liquidity quantity.
    pub const fn from_amount(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
