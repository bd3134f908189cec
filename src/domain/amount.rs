//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Rounding;
use crate::error::AmmError;

/// A token balance in the mint's smallest unit.
///
/// Balances are `u64`, matching what a token ledger stores.  Products of
/// two amounts (the constant-product invariant, proportional shares) are
/// computed in `u128` through [`widen`](Self::widen) and narrowed back with
/// [`from_wide`](Self::from_wide), which fails instead of truncating.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(u64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest balance a ledger account can hold.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a new `Amount` from a raw `u64` value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64` value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the value widened to `u128` for intermediate products.
    #[must_use]
    pub const fn widen(&self) -> u128 {
        self.0 as u128
    }

    /// Narrows a `u128` intermediate back into an `Amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] tagged with `context` if `value`
    /// does not fit in a `u64`.
    pub const fn from_wide(value: u128, context: &'static str) -> crate::error::Result<Self> {
        if value > u64::MAX as u128 {
            return Err(AmmError::Overflow(context));
        }
        Ok(Self(value as u64))
    }

    /// Returns `true` if the amount is zero.
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

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match rounding.div(self.0 as u128, divisor.0 as u128) {
            // quotient of a u64 by a non-zero u64 always fits
            Some(q) => Some(Self(q as u64)),
            None => None,
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
