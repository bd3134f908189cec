//! Property-based tests for the engine's economic invariants.
//!
//! 1. **Invariant growth**: `x × y` never decreases across a swap.
//! 2. **Proportionality**: deposits pay the ceiling of the pro-rata share.
//! 3. **No free liquidity**: deposit then withdraw never returns more.
//! 4. **Round-trip bound**: X→Y→X returns at most the original input.
//! 5. **Conservation**: per-mint totals are unchanged by any operation.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::AmmEngine;
use crate::config::EngineSettings;
use crate::domain::{Address, Amount, Liquidity, PoolReserves, SwapDirection, SwapSpec, TokenAccount};
use crate::error::{AmmError, ErrorKind};
use crate::ledger::InMemoryLedger;
use crate::store::InMemoryPoolStore;
use crate::traits::ReserveLedger;

type Engine = AmmEngine<InMemoryLedger, InMemoryPoolStore>;

const MINT_X: [u8; 32] = [0x0A; 32];
const MINT_Y: [u8; 32] = [0x0E; 32];
const LP: [u8; 32] = [0x51; 32];
const TRADER: [u8; 32] = [0x52; 32];
const FUNDING: u64 = 1 << 40;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn mint_x() -> Address {
    Address::from_bytes(MINT_X)
}

fn mint_y() -> Address {
    Address::from_bytes(MINT_Y)
}

/// Engine with one pool seeded by `LP` at `(rx, ry)`; `TRADER` is funded.
fn seeded(rx: u64, ry: u64, fee: u16) -> (Engine, Address) {
    let Ok(engine) = AmmEngine::in_memory(EngineSettings::default()) else {
        panic!("valid settings");
    };
    for mint in [mint_x(), mint_y()] {
        let Ok(()) = engine.ledger().create_mint(mint, None) else {
            panic!("new mint");
        };
        for user in [LP, TRADER] {
            let account = TokenAccount::new(Address::from_bytes(user), mint);
            let Ok(()) = engine.ledger().airdrop(account, Amount::new(FUNDING)) else {
                panic!("funded");
            };
        }
    }
    let Ok(pool) = engine.initialize(1, fee, mint_x(), mint_y(), None) else {
        panic!("initialized");
    };
    let Ok(_) = engine.deposit(
        pool,
        Address::from_bytes(LP),
        Liquidity::new(1),
        Amount::new(rx),
        Amount::new(ry),
    ) else {
        panic!("seeded");
    };
    (engine, pool)
}

fn reserves(engine: &Engine, pool: Address) -> PoolReserves {
    let Ok(r) = engine.reserves(pool) else {
        panic!("pool exists");
    };
    r
}

fn balance(engine: &Engine, owner: Address, mint: Address) -> u128 {
    let Ok(b) = engine.ledger().balance(&TokenAccount::new(owner, mint)) else {
        panic!("known mint");
    };
    b.widen()
}

/// Sum of every balance of `mint` this test setup can touch.
fn total(engine: &Engine, pool: Address, mint: Address) -> u128 {
    [Address::from_bytes(LP), Address::from_bytes(TRADER), pool]
        .into_iter()
        .map(|owner| balance(engine, owner, mint))
        .sum()
}

/// Reserves too thin for the request or a trader short of funds.
fn is_expected_rejection(err: &AmmError) -> bool {
    matches!(err.kind(), ErrorKind::Liquidity | ErrorKind::Ledger)
}

/// Rejects the case on an expected rejection, fails it on any other error.
fn settled<T>(result: Result<T, AmmError>) -> Result<T, TestCaseError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_expected_rejection(&e) => Err(TestCaseError::reject(e.to_string())),
        Err(e) => Err(TestCaseError::fail(format!("unexpected rejection: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [1_000, 1_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000_000u64
}

/// Fees up to 5%.
fn fee_strategy() -> impl Strategy<Value = u16> {
    0u16..=500u16
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    any::<bool>().prop_map(SwapDirection::from_is_x)
}

// ---------------------------------------------------------------------------
// Property 1: Invariant growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_never_decreases(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        fee in fee_strategy(),
        direction in direction_strategy(),
        amount in 1u64..=100_000_000u64,
    ) {
        let (engine, pool) = seeded(rx, ry, fee);
        let before = reserves(&engine, pool);
        let spec = settled(SwapSpec::exact_in(direction, Amount::new(amount), Amount::ZERO))?;
        let receipt = settled(engine.swap(pool, Address::from_bytes(TRADER), spec))?;
        let after = reserves(&engine, pool);

        prop_assert!(after.invariant() >= before.invariant());
        if !receipt.fee.is_zero() {
            prop_assert!(
                after.invariant() > before.invariant(),
                "fee {} was taken but k did not grow",
                receipt.fee
            );
        }
        prop_assert_eq!(after.lp_supply, before.lp_supply);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Proportionality
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_pays_ceiling_share(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        share in 1u64..=1_000_000u64,
    ) {
        let (engine, pool) = seeded(rx, ry, 30);
        let before = reserves(&engine, pool);
        let lp = Liquidity::new(share);
        let receipt = settled(engine.deposit(
            pool,
            Address::from_bytes(TRADER),
            lp,
            Amount::MAX,
            Amount::MAX,
        ))?;
        let supply = before.lp_supply.as_amount().widen();

        for (paid, reserve) in [
            (receipt.amount_x, before.reserve_x),
            (receipt.amount_y, before.reserve_y),
        ] {
            let owed = lp.as_amount().widen() * reserve.widen();
            prop_assert!(paid.widen() * supply >= owed);
            prop_assert!(paid.widen().saturating_sub(1) * supply < owed);
        }
        prop_assert_eq!(receipt.lp_minted, lp);
    }
}

// ---------------------------------------------------------------------------
// Property 3: No free liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_withdraw_never_profits(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        share in 1u64..=1_000_000u64,
    ) {
        let (engine, pool) = seeded(rx, ry, 30);
        let trader = Address::from_bytes(TRADER);
        let deposit = settled(engine.deposit(pool, trader, Liquidity::new(share), Amount::MAX, Amount::MAX))?;
        let withdraw = settled(engine.withdraw(pool, trader, deposit.lp_minted, Amount::ZERO, Amount::ZERO))?;
        prop_assert!(withdraw.amount_x <= deposit.amount_x);
        prop_assert!(withdraw.amount_y <= deposit.amount_y);
        prop_assert!(reserves(&engine, pool).is_consistent());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Round-trip bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let (engine, pool) = seeded(rx, ry, fee);
        let trader = Address::from_bytes(TRADER);
        let swap_in = (rx / 1_000).max(1);

        let there = settled(engine.swap_exact_in(pool, trader, true, Amount::new(swap_in), Amount::ZERO))?;
        let back = settled(engine.swap_exact_in(pool, trader, false, there.amount_out, Amount::ZERO))?;
        prop_assert!(
            back.amount_out.get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out, swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_operations_conserve_tokens(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        fee in fee_strategy(),
        ops in prop::collection::vec((0u8..3, 1u64..=10_000_000u64), 1..12),
    ) {
        let (engine, pool) = seeded(rx, ry, fee);
        let trader = Address::from_bytes(TRADER);
        let start = (total(&engine, pool, mint_x()), total(&engine, pool, mint_y()));

        for (op, value) in ops {
            // Failed steps leave balances untouched; the sequence continues.
            let result = match op {
                0 => engine.swap_exact_in(pool, trader, value % 2 == 0, Amount::new(value), Amount::ZERO).map(|_| ()),
                1 => engine.deposit(pool, trader, Liquidity::new(value), Amount::MAX, Amount::MAX).map(|_| ()),
                _ => engine.withdraw(pool, trader, Liquidity::new(value), Amount::ZERO, Amount::ZERO).map(|_| ()),
            };
            if let Err(e) = result {
                prop_assert!(is_expected_rejection(&e), "unexpected rejection: {}", e);
            }
            prop_assert!(reserves(&engine, pool).is_consistent());
        }

        prop_assert_eq!(total(&engine, pool, mint_x()), start.0);
        prop_assert_eq!(total(&engine, pool, mint_y()), start.1);
    }
}
