//! Invariant math: integer-only arithmetic for pool state transitions.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on domain types, [`mul_div`] for widened proportional formulas, and the
//! constant-product and share formulas in [`curve`].
//!
//! Nothing here uses floating point; every result is bit-exact.

mod checked;
pub mod curve;
mod rounding;

pub use checked::CheckedArithmetic;
pub use curve::{
    deposit_amounts, initial_liquidity, isqrt, quote_swap, withdraw_amounts, SwapQuote,
};
pub use rounding::mul_div;
