//! The AMM engine: pool lifecycle, liquidity and swaps.
//!
//! Every mutating operation follows the same shape:
//!
//! 1. validate the request shape (zero amounts, fee range, mint pair);
//! 2. take the pool's lock;
//! 3. load the [`PoolConfig`] and read one reserve snapshot;
//! 4. price the operation with [`crate::math`] and check slippage bounds;
//! 5. issue one atomic [`LedgerBatch`].
//!
//! Any error before step 5 leaves the ledger and the store untouched, and
//! step 5 itself is all-or-nothing.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, instrument, warn};

use super::PoolLocks;
use crate::config::{EngineSettings, FirstDepositPolicy, PoolConfig};
use crate::derivation::{create_address, lp_mint_address, pool_address, LP_SEED};
use crate::domain::{
    Address, Amount, BasisPoints, DepositResult, Liquidity, LiquidityChange, MintPair,
    PoolAccounts, PoolReserves, SwapDirection, SwapResult, SwapSpec, TokenAccount,
    WithdrawResult,
};
use crate::error::{AmmError, BoundSide, ErrorKind};
use crate::ledger::{InMemoryLedger, LedgerBatch};
use crate::math::{self, SwapQuote};
use crate::store::InMemoryPoolStore;
use crate::traits::{PoolStore, ReserveLedger};

/// Token amounts a liquidity operation would move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityQuote {
    /// LP tokens minted or burned.
    pub lp: Liquidity,
    /// X paid in (deposit) or out (withdraw).
    pub amount_x: Amount,
    /// Y paid in (deposit) or out (withdraw).
    pub amount_y: Amount,
}

/// Constant-product AMM engine over a [`ReserveLedger`] and a
/// [`PoolStore`].
///
/// The engine owns no balances.  Each pool's vaults are ledger accounts
/// owned by the pool address, and its LP mint is controlled by the pool
/// address, so funds move only through the operations below.
///
/// # Examples
///
/// ```
/// use xy_amm::config::EngineSettings;
/// use xy_amm::domain::{Address, Amount, Liquidity, SwapDirection, SwapSpec, TokenAccount};
/// use xy_amm::engine::AmmEngine;
///
/// let engine = AmmEngine::in_memory(EngineSettings::default()).expect("valid settings");
/// let (x, y) = (Address::from_bytes([1; 32]), Address::from_bytes([2; 32]));
/// let alice = Address::from_bytes([9; 32]);
/// engine.ledger().create_mint(x, None).expect("new mint");
/// engine.ledger().create_mint(y, None).expect("new mint");
/// engine.ledger().airdrop(TokenAccount::new(alice, x), Amount::new(1_000_000)).expect("funded");
/// engine.ledger().airdrop(TokenAccount::new(alice, y), Amount::new(1_000_000)).expect("funded");
///
/// let pool = engine.initialize(1, 30, x, y, None).expect("created");
/// engine
///     .deposit(pool, alice, Liquidity::new(1), Amount::new(500_000), Amount::new(500_000))
///     .expect("deposited");
/// let spec = SwapSpec::exact_in(SwapDirection::XToY, Amount::new(10_000), Amount::new(1))
///     .expect("non-zero");
/// let receipt = engine.swap(pool, alice, spec).expect("swapped");
/// assert!(receipt.amount_out.get() > 0);
/// ```
#[derive(Debug)]
pub struct AmmEngine<L, S> {
    ledger: L,
    store: S,
    settings: EngineSettings,
    locks: PoolLocks,
    sequence: AtomicU64,
}

impl AmmEngine<InMemoryLedger, InMemoryPoolStore> {
    /// Engine over a fresh [`InMemoryLedger`] and [`InMemoryPoolStore`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `settings` are invalid.
    pub fn in_memory(settings: EngineSettings) -> Result<Self, AmmError> {
        Self::new(InMemoryLedger::new(), InMemoryPoolStore::new(), settings)
    }
}

impl<L: ReserveLedger, S: PoolStore> AmmEngine<L, S> {
    /// Creates an engine over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `settings` are invalid.
    pub fn new(ledger: L, store: S, settings: EngineSettings) -> Result<Self, AmmError> {
        settings.validate()?;
        Ok(Self {
            ledger,
            store,
            settings,
            locks: PoolLocks::new(),
            sequence: AtomicU64::new(0),
        })
    }

    /// The underlying ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The underlying config store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The engine settings.
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Address of the pool created with `seed`, whether or not it exists.
    ///
    /// # Errors
    ///
    /// Propagates derivation errors.
    pub fn pool_address(&self, seed: u64) -> Result<Address, AmmError> {
        Ok(pool_address(&self.settings.namespace, seed)?.0)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Creates a pool for `(mint_x, mint_y)` under `seed`.
    ///
    /// Stores an unlocked [`PoolConfig`], then opens the LP mint and both
    /// vaults on the ledger.  If the ledger step fails the record is
    /// removed again.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if `fee >= 10_000`.
    /// - [`AmmError::IdenticalMints`] if `mint_x == mint_y`.
    /// - [`AmmError::DuplicatePool`] if a pool with this seed exists.
    /// - Ledger errors from provisioning, e.g. [`AmmError::MintNotFound`].
    #[instrument(skip_all, fields(seed = seed, fee = fee))]
    pub fn initialize(
        &self,
        seed: u64,
        fee: u16,
        mint_x: Address,
        mint_y: Address,
        authority: Option<Address>,
    ) -> Result<Address, AmmError> {
        let fee = BasisPoints::new(fee)?;
        let mints = MintPair::new(mint_x, mint_y)?;
        let (pool, config_bump) = pool_address(&self.settings.namespace, seed)?;
        let (lp_mint, lp_bump) = lp_mint_address(&self.settings.namespace, &pool)?;
        let config = PoolConfig::new(seed, authority, mints, fee, config_bump, lp_bump);
        let accounts = PoolAccounts {
            config: pool,
            lp_mint,
            vault_x: TokenAccount::new(pool, mints.mint_x()),
            vault_y: TokenAccount::new(pool, mints.mint_y()),
        };

        self.locks.with_pool(pool, || {
            self.store.insert_new(pool, config)?;
            if let Err(e) = self.ledger.open_pool_accounts(&accounts) {
                warn!(pool = %pool.short(), error = %e, "provisioning failed, removing pool record");
                self.store.remove(&pool)?;
                return Err(e);
            }
            info!(pool = %pool.short(), seed, fee = fee.get(), "pool initialized");
            Ok(pool)
        })
    }

    /// Sets the lock flag of `pool`; only the pool authority may do so.
    ///
    /// Setting the flag to its current value succeeds without writing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if the pool does not exist.
    /// - [`AmmError::Unauthorized`] if `signer` is not the authority or
    ///   the pool has none.
    #[instrument(skip_all, fields(pool = %pool.short(), locked = locked))]
    pub fn set_locked(
        &self,
        pool: Address,
        signer: Address,
        locked: bool,
    ) -> Result<PoolConfig, AmmError> {
        self.locks.with_pool(pool, || {
            let config = self.load(pool)?;
            config.ensure_authority(signer)?;
            if config.is_locked() == locked {
                return Ok(config);
            }
            let updated = config.with_locked(locked);
            self.store.update(&pool, updated.clone())?;
            info!(pool = %pool.short(), locked, "pool lock changed");
            Ok(updated)
        })
    }

    /// Locks `pool`.
    ///
    /// # Errors
    ///
    /// See [`set_locked`](Self::set_locked).
    pub fn lock(&self, pool: Address, signer: Address) -> Result<PoolConfig, AmmError> {
        self.set_locked(pool, signer, true)
    }

    /// Unlocks `pool`.
    ///
    /// # Errors
    ///
    /// See [`set_locked`](Self::set_locked).
    pub fn unlock(&self, pool: Address, signer: Address) -> Result<PoolConfig, AmmError> {
        self.set_locked(pool, signer, false)
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    /// Mints `lp` LP tokens to `user` against X and Y from `user`.
    ///
    /// Into an empty pool the caller pays exactly `max_x` and `max_y` and
    /// the minted amount follows the engine's [`FirstDepositPolicy`].
    /// Otherwise the caller pays `ceil(lp × reserve / supply)` per side.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `lp`, `max_x` or `max_y` is zero.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolLocked`].
    /// - [`AmmError::SlippageExceeded`] if a required amount exceeds its
    ///   bound, or a geometric-mean first deposit mints less than `lp`.
    /// - [`AmmError::Overflow`] on arithmetic overflow.
    /// - [`AmmError::InsufficientBalance`] if `user` cannot pay.
    #[instrument(skip_all, fields(pool = %pool.short(), lp = lp.get()))]
    pub fn deposit(
        &self,
        pool: Address,
        user: Address,
        lp: Liquidity,
        max_x: Amount,
        max_y: Amount,
    ) -> Result<DepositResult, AmmError> {
        let change = LiquidityChange::deposit(lp, max_x, max_y)?;
        self.locks
            .with_pool(pool, || {
                let (config, accounts) = self.load_unlocked(pool)?;
                let reserves = self.snapshot(&accounts)?;
                let quote = self.price_liquidity(&reserves, &change)?;

                let batch = LedgerBatch::new()
                    .transfer(
                        TokenAccount::new(user, config.mint_x()),
                        accounts.vault_x,
                        quote.amount_x,
                        user,
                    )
                    .transfer(
                        TokenAccount::new(user, config.mint_y()),
                        accounts.vault_y,
                        quote.amount_y,
                        user,
                    )
                    .mint(accounts.lp_account(user), quote.lp.as_amount(), pool);
                self.ledger.apply(&batch)?;

                let sequence = self.next_sequence();
                debug!(
                    pool = %pool.short(),
                    lp = quote.lp.get(),
                    amount_x = quote.amount_x.get(),
                    amount_y = quote.amount_y.get(),
                    sequence,
                    "deposit settled"
                );
                Ok(DepositResult {
                    lp_minted: quote.lp,
                    amount_x: quote.amount_x,
                    amount_y: quote.amount_y,
                    sequence,
                })
            })
            .inspect_err(log_rejection)
    }

    /// Burns `lp` LP tokens from `user` for a proportional share of both
    /// reserves, rounded down.
    ///
    /// Burning the whole remaining supply pays out the exact reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `lp` is zero.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolLocked`].
    /// - [`AmmError::InsufficientLpBalance`] if `user` holds less than `lp`.
    /// - [`AmmError::SlippageExceeded`] if an amount is below its minimum.
    /// - [`AmmError::InsufficientLiquidity`] if both amounts round to zero.
    #[instrument(skip_all, fields(pool = %pool.short(), lp = lp.get()))]
    pub fn withdraw(
        &self,
        pool: Address,
        user: Address,
        lp: Liquidity,
        min_x: Amount,
        min_y: Amount,
    ) -> Result<WithdrawResult, AmmError> {
        let change = LiquidityChange::withdraw(lp, min_x, min_y)?;
        self.locks
            .with_pool(pool, || {
                let (config, accounts) = self.load_unlocked(pool)?;
                let user_lp = accounts.lp_account(user);
                let held = self.ledger.balance(&user_lp)?;
                if lp.as_amount() > held {
                    return Err(AmmError::InsufficientLpBalance {
                        requested: lp.get(),
                        available: held.get(),
                    });
                }
                let reserves = self.snapshot(&accounts)?;
                let quote = self.price_liquidity(&reserves, &change)?;

                let batch = LedgerBatch::new()
                    .burn(user_lp, lp.as_amount(), user)
                    .transfer(
                        accounts.vault_x,
                        TokenAccount::new(user, config.mint_x()),
                        quote.amount_x,
                        pool,
                    )
                    .transfer(
                        accounts.vault_y,
                        TokenAccount::new(user, config.mint_y()),
                        quote.amount_y,
                        pool,
                    );
                self.ledger.apply(&batch)?;

                let sequence = self.next_sequence();
                debug!(
                    pool = %pool.short(),
                    lp = lp.get(),
                    amount_x = quote.amount_x.get(),
                    amount_y = quote.amount_y.get(),
                    sequence,
                    "withdraw settled"
                );
                Ok(WithdrawResult {
                    lp_burned: lp,
                    amount_x: quote.amount_x,
                    amount_y: quote.amount_y,
                    sequence,
                })
            })
            .inspect_err(log_rejection)
    }

    // -----------------------------------------------------------------------
    // Swaps
    // -----------------------------------------------------------------------

    /// Swaps `spec.amount_in()` of one reserve token for the other.
    ///
    /// The full input is credited to the pool; the fee is withheld from
    /// pricing only, so it accrues to LP holders.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolLocked`].
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty or the
    ///   output is zero or would drain the reserve.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `spec.min_out()`.
    /// - [`AmmError::Overflow`] on arithmetic overflow.
    /// - [`AmmError::InsufficientBalance`] if `user` cannot pay.
    #[instrument(skip_all, fields(pool = %pool.short(), spec = %spec))]
    pub fn swap(
        &self,
        pool: Address,
        user: Address,
        spec: SwapSpec,
    ) -> Result<SwapResult, AmmError> {
        self.locks
            .with_pool(pool, || {
                let (config, accounts) = self.load_unlocked(pool)?;
                let reserves = self.snapshot(&accounts)?;
                let quote = math::quote_swap(
                    &reserves,
                    spec.direction(),
                    spec.amount_in(),
                    config.fee(),
                )?;
                if quote.amount_out < spec.min_out() {
                    return Err(AmmError::SlippageExceeded {
                        side: BoundSide::Out,
                        bound: spec.min_out().get(),
                        actual: quote.amount_out.get(),
                    });
                }

                let (mint_in, mint_out) = config.mints().ordered(spec.direction());
                let (vault_in, vault_out) = accounts.vaults(spec.direction());
                let batch = LedgerBatch::new()
                    .transfer(
                        TokenAccount::new(user, mint_in),
                        vault_in,
                        quote.amount_in,
                        user,
                    )
                    .transfer(
                        vault_out,
                        TokenAccount::new(user, mint_out),
                        quote.amount_out,
                        pool,
                    );
                self.ledger.apply(&batch)?;

                let sequence = self.next_sequence();
                debug!(
                    pool = %pool.short(),
                    direction = %spec.direction(),
                    amount_in = quote.amount_in.get(),
                    amount_out = quote.amount_out.get(),
                    fee = quote.fee.get(),
                    sequence,
                    "swap settled"
                );
                Ok(SwapResult {
                    direction: spec.direction(),
                    amount_in: quote.amount_in,
                    amount_out: quote.amount_out,
                    fee: quote.fee,
                    sequence,
                })
            })
            .inspect_err(log_rejection)
    }

    /// Swap entry point in the `(is_x, amount, min)` call shape.
    ///
    /// # Errors
    ///
    /// [`AmmError::ZeroAmount`] if `amount_in` is zero, otherwise see
    /// [`swap`](Self::swap).
    pub fn swap_exact_in(
        &self,
        pool: Address,
        user: Address,
        is_x: bool,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let spec = SwapSpec::exact_in(SwapDirection::from_is_x(is_x), amount_in, min_out)?;
        self.swap(pool, user, spec)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The configuration record of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if the pool does not exist.
    pub fn pool_config(&self, pool: Address) -> Result<PoolConfig, AmmError> {
        self.locks.with_pool(pool, || self.load(pool))
    }

    /// The ledger entries of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if the pool does not exist.
    pub fn pool_accounts(&self, pool: Address) -> Result<PoolAccounts, AmmError> {
        self.locks.with_pool(pool, || {
            let config = self.load(pool)?;
            self.accounts_for(pool, &config)
        })
    }

    /// A consistent snapshot of both reserves and the LP supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if the pool does not exist.
    pub fn reserves(&self, pool: Address) -> Result<PoolReserves, AmmError> {
        self.locks.with_pool(pool, || {
            let config = self.load(pool)?;
            self.snapshot(&self.accounts_for(pool, &config)?)
        })
    }

    /// Prices a swap without executing it.  Ignores the lock flag.
    ///
    /// # Errors
    ///
    /// Same pricing errors as [`swap`](Self::swap), without slippage.
    pub fn quote_swap(
        &self,
        pool: Address,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote, AmmError> {
        self.locks.with_pool(pool, || {
            let config = self.load(pool)?;
            let reserves = self.snapshot(&self.accounts_for(pool, &config)?)?;
            math::quote_swap(&reserves, direction, amount_in, config.fee())
        })
    }

    /// Prices a deposit without executing it, including bound checks.
    ///
    /// # Errors
    ///
    /// Same validation and pricing errors as [`deposit`](Self::deposit).
    pub fn quote_deposit(
        &self,
        pool: Address,
        lp: Liquidity,
        max_x: Amount,
        max_y: Amount,
    ) -> Result<LiquidityQuote, AmmError> {
        let change = LiquidityChange::deposit(lp, max_x, max_y)?;
        self.quote_liquidity(pool, &change)
    }

    /// Prices a withdrawal without executing it, including bound checks.
    ///
    /// # Errors
    ///
    /// Same validation and pricing errors as [`withdraw`](Self::withdraw),
    /// except that no holder balance is checked.
    pub fn quote_withdraw(
        &self,
        pool: Address,
        lp: Liquidity,
        min_x: Amount,
        min_y: Amount,
    ) -> Result<LiquidityQuote, AmmError> {
        let change = LiquidityChange::withdraw(lp, min_x, min_y)?;
        self.quote_liquidity(pool, &change)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn load(&self, pool: Address) -> Result<PoolConfig, AmmError> {
        self.store
            .get(&pool)?
            .ok_or(AmmError::PoolNotFound(pool))
    }

    fn load_unlocked(&self, pool: Address) -> Result<(PoolConfig, PoolAccounts), AmmError> {
        let config = self.load(pool)?;
        config.ensure_unlocked(pool)?;
        let accounts = self.accounts_for(pool, &config)?;
        Ok((config, accounts))
    }

    fn accounts_for(&self, pool: Address, config: &PoolConfig) -> Result<PoolAccounts, AmmError> {
        let lp_mint = create_address(
            &self.settings.namespace,
            &[LP_SEED, pool.as_bytes()],
            config.lp_bump(),
        )?;
        Ok(PoolAccounts {
            config: pool,
            lp_mint,
            vault_x: TokenAccount::new(pool, config.mint_x()),
            vault_y: TokenAccount::new(pool, config.mint_y()),
        })
    }

    fn snapshot(&self, accounts: &PoolAccounts) -> Result<PoolReserves, AmmError> {
        Ok(PoolReserves::new(
            self.ledger.balance(&accounts.vault_x)?,
            self.ledger.balance(&accounts.vault_y)?,
            Liquidity::from_amount(self.ledger.supply(&accounts.lp_mint)?),
        ))
    }

    fn quote_liquidity(
        &self,
        pool: Address,
        change: &LiquidityChange,
    ) -> Result<LiquidityQuote, AmmError> {
        self.locks.with_pool(pool, || {
            let config = self.load(pool)?;
            let reserves = self.snapshot(&self.accounts_for(pool, &config)?)?;
            self.price_liquidity(&reserves, change)
        })
    }

    fn price_liquidity(
        &self,
        reserves: &PoolReserves,
        change: &LiquidityChange,
    ) -> Result<LiquidityQuote, AmmError> {
        match *change {
            LiquidityChange::Deposit { lp, max_x, max_y } if reserves.is_empty() => {
                let minted = match self.settings.first_deposit {
                    FirstDepositPolicy::Requested => lp,
                    FirstDepositPolicy::GeometricMean => {
                        let minted = math::initial_liquidity(max_x, max_y)?;
                        if minted < lp {
                            return Err(AmmError::SlippageExceeded {
                                side: BoundSide::Lp,
                                bound: lp.get(),
                                actual: minted.get(),
                            });
                        }
                        minted
                    }
                };
                Ok(LiquidityQuote {
                    lp: minted,
                    amount_x: max_x,
                    amount_y: max_y,
                })
            }
            LiquidityChange::Deposit { lp, max_x, max_y } => {
                let (amount_x, amount_y) = math::deposit_amounts(reserves, lp)?;
                check_at_most(BoundSide::X, amount_x, max_x)?;
                check_at_most(BoundSide::Y, amount_y, max_y)?;
                Ok(LiquidityQuote {
                    lp,
                    amount_x,
                    amount_y,
                })
            }
            LiquidityChange::Withdraw { lp, min_x, min_y } => {
                let (amount_x, amount_y) = math::withdraw_amounts(reserves, lp)?;
                check_at_least(BoundSide::X, amount_x, min_x)?;
                check_at_least(BoundSide::Y, amount_y, min_y)?;
                Ok(LiquidityQuote {
                    lp,
                    amount_x,
                    amount_y,
                })
            }
        }
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

fn check_at_most(side: BoundSide, actual: Amount, bound: Amount) -> Result<(), AmmError> {
    if actual > bound {
        return Err(AmmError::SlippageExceeded {
            side,
            bound: bound.get(),
            actual: actual.get(),
        });
    }
    Ok(())
}

fn check_at_least(side: BoundSide, actual: Amount, bound: Amount) -> Result<(), AmmError> {
    if actual < bound {
        return Err(AmmError::SlippageExceeded {
            side,
            bound: bound.get(),
            actual: actual.get(),
        });
    }
    Ok(())
}

fn log_rejection(err: &AmmError) {
    match err.kind() {
        ErrorKind::Slippage | ErrorKind::Locked => warn!(error = %err, "operation rejected"),
        _ => debug!(error = %err, "operation failed"),
    }
}
