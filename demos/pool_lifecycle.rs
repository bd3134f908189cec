//! Constant-product pool lifecycle demo.
//!
//! Loads engine settings from TOML, creates a pool, seeds it, swaps both
//! ways, locks and unlocks it, and withdraws everything.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example pool_lifecycle
//! ```

use std::env;

use xy_amm::config::EngineSettings;
use xy_amm::domain::{Address, Amount, Liquidity, SwapDirection, SwapSpec, TokenAccount};
use xy_amm::engine::AmmEngine;

const SETTINGS: &str = r#"
namespace = "xy-amm/demo"
first_deposit = "geometric_mean"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== XY AMM (x · y = k) ===\n");

    // ── 1. Engine and tokens ────────────────────────────────────────────
    let settings = EngineSettings::from_toml_str(SETTINGS)?;
    println!("Namespace:      {}", settings.namespace);
    println!("First deposit:  {}", settings.first_deposit);
    let engine = AmmEngine::in_memory(settings)?;

    let usdc = Address::from_bytes([1u8; 32]);
    let weth = Address::from_bytes([2u8; 32]);
    let admin = Address::from_bytes([0xAD; 32]);
    let trader = Address::from_bytes([0x7A; 32]);
    for mint in [usdc, weth] {
        engine.ledger().create_mint(mint, None)?;
        for owner in [admin, trader] {
            engine
                .ledger()
                .airdrop(TokenAccount::new(owner, mint), Amount::new(10_000_000))?;
        }
    }

    // ── 2. Create a 0.30% pool ──────────────────────────────────────────
    let pool = engine.initialize(1, 30, usdc, weth, Some(admin))?;
    let config = engine.pool_config(pool)?;
    println!("\nPool {pool}");
    println!("  Fee:          {}", config.fee());
    println!("  Bumps:        config={} lp={}", config.config_bump(), config.lp_bump());

    // ── 3. Seed with 1M of each side ────────────────────────────────────
    let seeded = engine.deposit(
        pool,
        admin,
        Liquidity::new(1),
        Amount::new(1_000_000),
        Amount::new(1_000_000),
    )?;
    println!("\n--- Seed ---");
    println!("  LP minted:    {}", seeded.lp_minted);
    println!("  Reserves:     {:?}", engine.reserves(pool)?);

    // ── 4. Quote, then swap 10 000 USDC for WETH ────────────────────────
    let quote = engine.quote_swap(pool, SwapDirection::XToY, Amount::new(10_000))?;
    let spec = SwapSpec::exact_in(SwapDirection::XToY, Amount::new(10_000), quote.amount_out)?;
    let result = engine.swap(pool, trader, spec)?;
    println!("\n--- Swap {spec} ---");
    println!("  Amount out:   {}", result.amount_out);
    println!("  Fee:          {}", result.fee);
    println!("  Sequence:     {}", result.sequence);

    // ── 5. Swap back ────────────────────────────────────────────────────
    let back = engine.swap_exact_in(pool, trader, false, result.amount_out, Amount::new(1))?;
    println!("\n--- Swap back ---");
    println!("  Amount out:   {} (started with 10000)", back.amount_out);

    // ── 6. Lock blocks trading ──────────────────────────────────────────
    engine.lock(pool, admin)?;
    match engine.swap_exact_in(pool, trader, true, Amount::new(1_000), Amount::new(1)) {
        Ok(_) => println!("\nunexpected: swap on a locked pool succeeded"),
        Err(e) => println!("\nLocked pool rejects swaps: {e} (kind {:?})", e.kind()),
    }
    engine.unlock(pool, admin)?;

    // ── 7. Withdraw everything ──────────────────────────────────────────
    let supply = engine.reserves(pool)?.lp_supply;
    let out = engine.withdraw(pool, admin, supply, Amount::new(1), Amount::new(1))?;
    println!("\n--- Withdraw all ---");
    println!("  Returned:     {} USDC + {} WETH", out.amount_x, out.amount_y);
    println!("  Reserves:     {:?}", engine.reserves(pool)?);

    println!("\n=== Done ===");
    Ok(())
}
