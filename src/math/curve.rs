//! Constant-product pricing and proportional-share formulas.
//!
//! Pure functions over a [`PoolReserves`] snapshot.  Nothing here touches
//! a ledger; the engine calls these under the pool lock, then turns the
//! result into a ledger batch.
//!
//! # Swap (exact in, fee on input)
//!
//! 1. `net_in = floor(amount_in × (10 000 − fee) / 10 000)`
//! 2. `reserve_out' = ceil(reserve_in × reserve_out / (reserve_in + net_in))`
//! 3. `amount_out = reserve_out − reserve_out'`
//!
//! Step 3 equals `floor(reserve_out × net_in / (reserve_in + net_in))`.  The
//! full `amount_in` is credited to the pool, so
//! `(reserve_in + amount_in) × reserve_out' ≥ k` and the invariant never
//! decreases, strictly increasing whenever a fee is taken.
//!
//! # Liquidity
//!
//! - deposit: `amount = ceil(lp × reserve / supply)` per side
//! - withdraw: `amount = floor(lp × reserve / supply)` per side
//! - first deposit: `lp = isqrt(x × y)`

use serde::{Deserialize, Serialize};

use super::{mul_div, CheckedArithmetic};
use crate::domain::{Amount, BasisPoints, Liquidity, PoolReserves, Rounding, SwapDirection};
use crate::error::AmmError;

/// Priced swap, before any ledger effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Direction being priced.
    pub direction: SwapDirection,
    /// Full input, fee included.
    pub amount_in: Amount,
    /// Part of `amount_in` withheld from pricing.
    pub fee: Amount,
    /// Output paid from the opposite reserve.
    pub amount_out: Amount,
}

/// Integer square root via Newton's method: `floor(√n)`.
///
/// # Examples
///
/// ```
/// use xy_amm::math::isqrt;
///
/// assert_eq!(isqrt(99), 9);
/// assert_eq!(isqrt(100), 10);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = n / 2 + (n & 1);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Prices an exact-input swap against `reserves`.
///
/// With `net = amount_in × (10_000 − fee) / 10_000` rounded down, the
/// output is `reserve_out − ceil(k / (reserve_in + net))`.  This differs
/// on purpose from `reserve_out − floor(k / (reserve_in + net))`, which can
/// pay one unit more and let `k` fall on a fee-free swap (reserves 3/3,
/// input 1: `k` 9 → 8).
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is empty, the
///   output rounds to zero, or the output would drain `reserve_out`.
/// - [`AmmError::Overflow`] if `reserve_in + amount_in` exceeds `u64`.
pub fn quote_swap(
    reserves: &PoolReserves,
    direction: SwapDirection,
    amount_in: Amount,
    fee: BasisPoints,
) -> Result<SwapQuote, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroAmount("swap amount_in must be non-zero"));
    }
    let (reserve_in, reserve_out) = reserves.oriented(direction);
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity("pool has no reserves"));
    }
    if reserve_in.checked_add(&amount_in).is_none() {
        return Err(AmmError::Overflow("reserve_in overflow after swap"));
    }

    let net_in = fee.net_of_fee(amount_in)?;
    let fee_amount = amount_in.safe_sub(&net_in)?;

    let k = reserve_in.widen() * reserve_out.widen();
    let denominator = reserve_in.widen() + net_in.widen();
    let new_reserve_out = Rounding::Up
        .div(k, denominator)
        .ok_or(AmmError::DivisionByZero)?;
    let amount_out = reserve_out
        .widen()
        .checked_sub(new_reserve_out)
        .ok_or(AmmError::Overflow("swap output underflow"))?;
    let amount_out = Amount::from_wide(amount_out, "swap output overflow")?;

    if amount_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity("swap output rounds to zero"));
    }
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity("swap would drain reserve"));
    }

    Ok(SwapQuote {
        direction,
        amount_in,
        fee: fee_amount,
        amount_out,
    })
}

/// LP minted by a geometric-mean first deposit: `isqrt(amount_x × amount_y)`.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if the result is zero.
pub fn initial_liquidity(amount_x: Amount, amount_y: Amount) -> Result<Liquidity, AmmError> {
    // isqrt of a product of two u64 values always fits in u64
    let root = isqrt(amount_x.widen() * amount_y.widen());
    let lp = u64::try_from(root).map_err(|_| AmmError::Overflow("initial liquidity overflow"))?;
    if lp == 0 {
        return Err(AmmError::InsufficientLiquidity(
            "first deposit too small to mint liquidity",
        ));
    }
    Ok(Liquidity::new(lp))
}

/// Tokens required to mint `lp` into a non-empty pool, rounded up.
///
/// Returns `(amount_x, amount_y)`.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if the pool has no LP supply.
/// - [`AmmError::Overflow`] if an amount, a new reserve, or the new LP
///   supply exceeds `u64`.
pub fn deposit_amounts(
    reserves: &PoolReserves,
    lp: Liquidity,
) -> Result<(Amount, Amount), AmmError> {
    let supply = reserves.lp_supply;
    if supply.is_zero() {
        return Err(AmmError::InsufficientLiquidity(
            "proportional deposit needs existing liquidity",
        ));
    }
    supply.safe_add(&lp)?;

    let amount_x = mul_div(lp.get(), reserves.reserve_x.get(), supply.get(), Rounding::Up)?;
    let amount_y = mul_div(lp.get(), reserves.reserve_y.get(), supply.get(), Rounding::Up)?;
    let (amount_x, amount_y) = (Amount::new(amount_x), Amount::new(amount_y));

    reserves.reserve_x.safe_add(&amount_x)?;
    reserves.reserve_y.safe_add(&amount_y)?;
    Ok((amount_x, amount_y))
}

/// Tokens released by burning `lp`, rounded down.
///
/// Burning the entire supply returns exactly the reserves.  Returns
/// `(amount_x, amount_y)`.
///
/// # Errors
///
/// - [`AmmError::InsufficientLpBalance`] if `lp` exceeds the supply.
/// - [`AmmError::InsufficientLiquidity`] if both amounts round to zero.
pub fn withdraw_amounts(
    reserves: &PoolReserves,
    lp: Liquidity,
) -> Result<(Amount, Amount), AmmError> {
    let supply = reserves.lp_supply;
    if lp > supply {
        return Err(AmmError::InsufficientLpBalance {
            requested: lp.get(),
            available: supply.get(),
        });
    }

    let amount_x = mul_div(lp.get(), reserves.reserve_x.get(), supply.get(), Rounding::Down)?;
    let amount_y = mul_div(lp.get(), reserves.reserve_y.get(), supply.get(), Rounding::Down)?;

    if amount_x == 0 && amount_y == 0 {
        return Err(AmmError::InsufficientLiquidity("withdrawal rounds to zero"));
    }
    Ok((Amount::new(amount_x), Amount::new(amount_y)))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fee(bps: u16) -> BasisPoints {
        let Ok(f) = BasisPoints::new(bps) else {
            panic!("valid fee");
        };
        f
    }

    fn pool(x: u64, y: u64, lp: u64) -> PoolReserves {
        PoolReserves::new(Amount::new(x), Amount::new(y), Liquidity::new(lp))
    }

    fn after_swap(r: &PoolReserves, q: &SwapQuote) -> PoolReserves {
        match q.direction {
            SwapDirection::XToY => pool(
                r.reserve_x.get() + q.amount_in.get(),
                r.reserve_y.get() - q.amount_out.get(),
                r.lp_supply.get(),
            ),
            SwapDirection::YToX => pool(
                r.reserve_x.get() - q.amount_out.get(),
                r.reserve_y.get() + q.amount_in.get(),
                r.lp_supply.get(),
            ),
        }
    }

    // -- isqrt ----------------------------------------------------------------

    #[test]
    fn isqrt_small_values() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
    }

    #[test]
    fn isqrt_u64_square() {
        let m = u128::from(u64::MAX);
        assert_eq!(isqrt(m * m), m);
        assert_eq!(isqrt(m * m - 1), m - 1);
    }

    #[test]
    fn isqrt_u128_max() {
        let r = isqrt(u128::MAX);
        assert!(r * r <= u128::MAX);
        assert_eq!(r, u128::from(u64::MAX));
    }

    // -- quote_swap -----------------------------------------------------------

    #[test]
    fn swap_one_percent_fee_reference_values() {
        let r = pool(100_000_000, 100_000_000, 100_000_000);
        let Ok(q) = quote_swap(&r, SwapDirection::XToY, Amount::new(10_000_000), fee(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.fee, Amount::new(100_000));
        assert_eq!(q.amount_out, Amount::new(9_008_189));
    }

    #[test]
    fn swap_equals_floor_formula() {
        let r = pool(1_234_567, 7_654_321, 1);
        let Ok(q) = quote_swap(&r, SwapDirection::YToX, Amount::new(99_999), fee(30)) else {
            panic!("expected Ok");
        };
        let net = 99_999u128 * 9_970 / 10_000;
        let expected = 1_234_567u128 * net / (7_654_321u128 + net);
        assert_eq!(u128::from(q.amount_out.get()), expected);
    }

    #[test]
    fn swap_grows_invariant_with_fee() {
        let r = pool(5_000, 9_000, 1);
        let Ok(q) = quote_swap(&r, SwapDirection::XToY, Amount::new(700), fee(25)) else {
            panic!("expected Ok");
        };
        assert!(after_swap(&r, &q).invariant() > r.invariant());
    }

    #[test]
    fn swap_zero_fee_never_shrinks_invariant() {
        let r = pool(333, 777, 1);
        let Ok(q) = quote_swap(&r, SwapDirection::YToX, Amount::new(101), BasisPoints::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(q.fee, Amount::ZERO);
        assert!(after_swap(&r, &q).invariant() >= r.invariant());
    }

    #[test]
    fn swap_rounds_new_reserve_up() {
        // floor(k / (reserve_in + net)) would pay 1 and leave 4 × 2 = 8 < 9
        let r = pool(3, 3, 1);
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, Amount::new(1), BasisPoints::ZERO),
            Err(AmmError::InsufficientLiquidity(_))
        ));

        let r = pool(100_000_000, 100_000_000, 1);
        let Ok(q) = quote_swap(&r, SwapDirection::XToY, Amount::new(10_000_000), fee(100)) else {
            panic!("expected Ok");
        };
        let k = r.invariant();
        let floor_out = 100_000_000u128 - k / (100_000_000u128 + 9_900_000);
        assert_eq!(u128::from(q.amount_out.get()) + 1, floor_out);
    }

    #[test]
    fn swap_zero_input_rejected() {
        let r = pool(10, 10, 10);
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, Amount::ZERO, fee(0)),
            Err(AmmError::ZeroAmount(_))
        ));
    }

    #[test]
    fn swap_on_empty_pool_rejected() {
        let r = PoolReserves::default();
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, Amount::new(10), fee(0)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn swap_output_rounding_to_zero_rejected() {
        let r = pool(1_000_000, 10, 1);
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, Amount::new(1), fee(0)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn swap_never_drains_output_side() {
        let r = pool(1, 1, 1);
        let huge = Amount::new(u64::MAX - 1);
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, huge, fee(0)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn swap_reserve_overflow_detected() {
        let r = pool(u64::MAX - 5, 1_000, 1);
        assert!(matches!(
            quote_swap(&r, SwapDirection::XToY, Amount::new(10), fee(0)),
            Err(AmmError::Overflow(_))
        ));
    }

    // -- initial_liquidity ----------------------------------------------------

    #[test]
    fn initial_is_geometric_mean() {
        assert_eq!(
            initial_liquidity(Amount::new(100_000_000), Amount::new(100_000_000)),
            Ok(Liquidity::new(100_000_000))
        );
        assert_eq!(
            initial_liquidity(Amount::new(2), Amount::new(8)),
            Ok(Liquidity::new(4))
        );
        assert_eq!(
            initial_liquidity(Amount::MAX, Amount::MAX),
            Ok(Liquidity::new(u64::MAX))
        );
    }

    #[test]
    fn initial_zero_side_rejected() {
        assert!(matches!(
            initial_liquidity(Amount::ZERO, Amount::new(9)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    // -- deposit_amounts ------------------------------------------------------

    #[test]
    fn deposit_is_proportional() {
        let r = pool(100_000_000, 100_000_000, 100_000_000);
        assert_eq!(
            deposit_amounts(&r, Liquidity::new(50_000_000)),
            Ok((Amount::new(50_000_000), Amount::new(50_000_000)))
        );
    }

    #[test]
    fn deposit_rounds_up() {
        let r = pool(10, 7, 3);
        assert_eq!(
            deposit_amounts(&r, Liquidity::new(1)),
            Ok((Amount::new(4), Amount::new(3)))
        );
    }

    #[test]
    fn deposit_into_empty_pool_rejected() {
        assert!(matches!(
            deposit_amounts(&PoolReserves::default(), Liquidity::new(1)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn deposit_supply_overflow_detected() {
        let r = pool(10, 10, u64::MAX);
        assert!(matches!(
            deposit_amounts(&r, Liquidity::new(1)),
            Err(AmmError::Overflow(_))
        ));
    }

    // -- withdraw_amounts -----------------------------------------------------

    #[test]
    fn withdraw_rounds_down() {
        let r = pool(10, 7, 3);
        assert_eq!(
            withdraw_amounts(&r, Liquidity::new(1)),
            Ok((Amount::new(3), Amount::new(2)))
        );
    }

    #[test]
    fn withdraw_full_supply_is_exact() {
        let r = pool(1_000_003, 999_999_937, 31_622_777);
        assert_eq!(
            withdraw_amounts(&r, Liquidity::new(31_622_777)),
            Ok((Amount::new(1_000_003), Amount::new(999_999_937)))
        );
    }

    #[test]
    fn withdraw_more_than_supply_rejected() {
        let r = pool(10, 10, 10);
        assert_eq!(
            withdraw_amounts(&r, Liquidity::new(11)),
            Err(AmmError::InsufficientLpBalance {
                requested: 11,
                available: 10
            })
        );
    }

    #[test]
    fn withdraw_dust_rejected() {
        let r = pool(1, 1, 1_000);
        assert!(matches!(
            withdraw_amounts(&r, Liquidity::new(1)),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }
}
