//! # XY AMM
//!
//! Constant-product (`x · y = k`) automated market maker core: pool
//! initialization, proportional liquidity provision and fee-bearing swaps
//! between two fungible tokens.
//!
//! The engine owns no balances.  Token movements go through a
//! [`ReserveLedger`](traits::ReserveLedger) and pool records live in a
//! [`PoolStore`](traits::PoolStore); in-memory implementations of both
//! ship with the crate.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xy-amm = "0.1"
//! ```
//!
//! ## Create a pool, deposit, and swap
//!
//! ```rust
//! use xy_amm::config::EngineSettings;
//! use xy_amm::domain::{Address, Amount, Liquidity, SwapDirection, SwapSpec, TokenAccount};
//! use xy_amm::engine::AmmEngine;
//!
//! let engine = AmmEngine::in_memory(EngineSettings::default()).expect("valid settings");
//!
//! // 1. Two mints and a funded user
//! let usdc = Address::from_bytes([1u8; 32]);
//! let weth = Address::from_bytes([2u8; 32]);
//! let alice = Address::from_bytes([9u8; 32]);
//! for mint in [usdc, weth] {
//!     engine.ledger().create_mint(mint, None).expect("new mint");
//!     engine
//!         .ledger()
//!         .airdrop(TokenAccount::new(alice, mint), Amount::new(10_000_000))
//!         .expect("funded");
//! }
//!
//! // 2. A 0.30% pool under seed 1
//! let pool = engine.initialize(1, 30, usdc, weth, Some(alice)).expect("created");
//!
//! // 3. Seed it with 1M of each side
//! let receipt = engine
//!     .deposit(pool, alice, Liquidity::new(1), Amount::new(1_000_000), Amount::new(1_000_000))
//!     .expect("deposited");
//! assert_eq!(receipt.lp_minted, Liquidity::new(1_000_000));
//!
//! // 4. Sell 10 000 USDC for WETH
//! let spec = SwapSpec::exact_in(SwapDirection::XToY, Amount::new(10_000), Amount::new(9_000))
//!     .expect("non-zero");
//! let result = engine.swap(pool, alice, spec).expect("swap succeeded");
//!
//! assert!(result.amount_out.get() >= 9_000);
//! assert_eq!(result.fee.get(), 30);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  initialize / deposit / withdraw / swap / lock
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  AmmEngine   │  per-pool lock, snapshot, price, check bounds
//! └──┬───────┬──┘
//!    │       │ one atomic LedgerBatch per operation
//!    │       ▼
//!    │  ┌─────────────┐
//!    │  │ReserveLedger │  vaults, LP mint, user accounts
//!    │  └─────────────┘
//!    ▼
//! ┌─────────────┐
//! │  PoolStore   │  one PoolConfig per derived pool address
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Liquidity`](domain::Liquidity), [`Address`](domain::Address), receipts |
//! | [`math`]   | Checked arithmetic, constant-product and share formulas |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) records and TOML [`EngineSettings`](config::EngineSettings) |
//! | [`derivation`] | Deterministic pool and LP-mint addresses with bumps |
//! | [`traits`] | Collaborator seams: [`ReserveLedger`](traits::ReserveLedger), [`PoolStore`](traits::PoolStore) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) and [`LedgerBatch`](ledger::LedgerBatch) |
//! | [`store`]  | [`InMemoryPoolStore`](store::InMemoryPoolStore) |
//! | [`engine`] | [`AmmEngine`](engine::AmmEngine) and per-pool locking |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod derivation;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod math;
pub mod prelude;
pub mod store;
pub mod traits;
