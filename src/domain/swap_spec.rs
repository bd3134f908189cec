//! Swap request specification.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// Which reserve a swap pays into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SwapDirection {
    /// Pay X, receive Y.
    XToY = 0,
    /// Pay Y, receive X.
    YToX = 1,
}

impl SwapDirection {
    /// Maps the `is_x` flag of the wire-level swap call.
    #[must_use]
    pub const fn from_is_x(is_x: bool) -> Self {
        if is_x {
            Self::XToY
        } else {
            Self::YToX
        }
    }

    /// Returns `true` when X is the input side.
    #[must_use]
    pub const fn is_x(&self) -> bool {
        matches!(self, Self::XToY)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::XToY => Self::YToX,
            Self::YToX => Self::XToY,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XToY => write!(f, "XToY"),
            Self::YToX => write!(f, "YToX"),
        }
    }
}

/// An exact-input swap request with a minimum-output slippage bound.
///
/// # Invariants
///
/// `amount_in` is always non-zero.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Amount, SwapDirection, SwapSpec};
///
/// let spec = SwapSpec::exact_in(SwapDirection::XToY, Amount::new(1000), Amount::new(1));
/// assert!(spec.is_ok());
/// assert!(SwapSpec::exact_in(SwapDirection::XToY, Amount::ZERO, Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapSpec {
    direction: SwapDirection,
    amount_in: Amount,
    min_out: Amount,
}

impl SwapSpec {
    /// Creates an exact-input swap specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAmount`] if `amount_in` is zero.
    pub const fn exact_in(
        direction: SwapDirection,
        amount_in: Amount,
        min_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount("swap amount_in must be non-zero"));
        }
        Ok(Self {
            direction,
            amount_in,
            min_out,
        })
    }

    /// Swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Full input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Smallest acceptable output.
    pub const fn min_out(&self) -> Amount {
        self.min_out
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(in={}, min_out={})",
            self.direction, self.amount_in, self.min_out
        )
    }
}
