//! Widened multiply-then-divide with explicit rounding.
//!
//! Every proportional formula in the pool has the shape `a × b / d` over
//! `u64` operands.  [`mul_div`] evaluates it in `u128`, where the product
//! of two `u64` values always fits, and narrows the quotient back.
//!
//! # Convention
//!
//! **Always round against the user** (pool-favorable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Tokens paid into the pool (deposit) | [`Rounding::Up`] |
//! | Tokens paid out of the pool (withdraw, swap output) | [`Rounding::Down`] |
//! | Fee | [`Rounding::Up`] (net input rounds down) |
//!
//! # Examples
//!
//! ```
//! use xy_amm::domain::Rounding;
//! use xy_amm::math::mul_div;
//!
//! assert_eq!(mul_div(10, 10, 3, Rounding::Down), Ok(33));
//! assert_eq!(mul_div(10, 10, 3, Rounding::Up), Ok(34));
//! assert!(mul_div(u64::MAX, 2, 1, Rounding::Down).is_err());
//! ```

use crate::domain::Rounding;
use crate::error::AmmError;

/// Computes `a × b / d` in `u128` with the given rounding direction.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in a `u64`.
pub fn mul_div(a: u64, b: u64, d: u64, rounding: Rounding) -> Result<u64, AmmError> {
    let product = u128::from(a) * u128::from(b);
    let q = rounding
        .div(product, u128::from(d))
        .ok_or(AmmError::DivisionByZero)?;
    u64::try_from(q).map_err(|_| AmmError::Overflow("mul_div quotient exceeds u64"))
}
