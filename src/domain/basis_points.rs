//! Swap fee expressed in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Basis-point denominator (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// A swap fee in basis points (1 bp = 0.01%).
///
/// Valid fees are strictly below 100%: a 10 000 bp fee would leave no
/// input to price.  The constructor enforces this, so an existing
/// `BasisPoints` is always a usable fee.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Amount, BasisPoints};
///
/// let fee = BasisPoints::new(100).expect("1% is valid");
/// let net = fee.net_of_fee(Amount::new(10_000_000)).expect("no overflow");
/// assert_eq!(net, Amount::new(9_900_000));
/// assert!(BasisPoints::new(10_000).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// Creates a fee from raw basis points.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `value >= 10_000`.
    pub const fn new(value: u16) -> crate::error::Result<Self> {
        if value >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidFee("fee must be below 10000 basis points"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying basis points.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `10_000 - fee`, the share of the input that is priced.
    #[must_use]
    pub const fn complement(&self) -> u16 {
        BPS_DENOMINATOR - self.0
    }

    /// Portion of `amount_in` that enters the pricing formula:
    /// `floor(amount_in × (10 000 − fee) / 10 000)`.
    ///
    /// # Errors
    ///
    /// Never fails for `u64` inputs; the `Result` keeps the checked
    /// contract of the math layer.
    pub fn net_of_fee(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        let scaled = amount_in
            .widen()
            .checked_mul(u128::from(self.complement()))
            .ok_or(AmmError::Overflow("fee scaling overflow"))?;
        let net = Rounding::Down
            .div(scaled, u128::from(BPS_DENOMINATOR))
            .ok_or(AmmError::DivisionByZero)?;
        Amount::from_wide(net, "net input overflow")
    }

    /// Fee retained by the pool: `amount_in − net_of_fee(amount_in)`.
    ///
    /// Because the net input rounds down, the fee effectively rounds up.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`net_of_fee`](Self::net_of_fee).
    pub fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        let net = self.net_of_fee(amount_in)?;
        amount_in
            .checked_sub(&net)
            .ok_or(AmmError::Overflow("fee underflow"))
    }
}

impl TryFrom<u16> for BasisPoints {
    type Error = AmmError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BasisPoints> for u16 {
    fn from(bp: BasisPoints) -> Self {
        bp.0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
