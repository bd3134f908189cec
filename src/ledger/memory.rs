//! In-memory reference ledger.
//!
//! Suitable for tests, simulations and the demo program.  All state is
//! lost when the ledger is dropped.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::{LedgerBatch, LedgerOp};
use crate::domain::{Address, Amount, PoolAccounts, TokenAccount};
use crate::error::AmmError;
use crate::traits::ReserveLedger;

#[derive(Debug, Clone, Copy)]
struct MintState {
    authority: Option<Address>,
    supply: u64,
}

#[derive(Debug, Default)]
struct LedgerState {
    mints: HashMap<Address, MintState>,
    balances: HashMap<TokenAccount, u64>,
}

impl LedgerState {
    fn mint(&self, mint: &Address) -> Result<&MintState, AmmError> {
        self.mints.get(mint).ok_or(AmmError::MintNotFound(*mint))
    }
}

/// Pending writes of one batch, layered over the committed state.
#[derive(Default)]
struct Overlay {
    balances: HashMap<TokenAccount, u64>,
    supplies: HashMap<Address, u64>,
}

impl Overlay {
    fn balance(&self, base: &LedgerState, account: &TokenAccount) -> u64 {
        self.balances
            .get(account)
            .or_else(|| base.balances.get(account))
            .copied()
            .unwrap_or(0)
    }

    fn supply(&self, mint: &Address, state: &MintState) -> u64 {
        self.supplies.get(mint).copied().unwrap_or(state.supply)
    }

    fn stage(&mut self, base: &LedgerState, op: &LedgerOp) -> Result<(), AmmError> {
        match *op {
            LedgerOp::Debit {
                account,
                amount,
                authority,
            } => {
                base.mint(&account.mint)?;
                if authority != account.owner {
                    return Err(AmmError::Unauthorized("debit signer does not own account"));
                }
                let available = self.balance(base, &account);
                let next = available
                    .checked_sub(amount.get())
                    .ok_or(AmmError::InsufficientBalance {
                        requested: amount.get(),
                        available,
                    })?;
                self.balances.insert(account, next);
            }
            LedgerOp::Credit { account, amount } => {
                base.mint(&account.mint)?;
                let next = self
                    .balance(base, &account)
                    .checked_add(amount.get())
                    .ok_or(AmmError::Overflow("ledger balance overflow"))?;
                self.balances.insert(account, next);
            }
            LedgerOp::Mint {
                to,
                amount,
                authority,
            } => {
                let state = base.mint(&to.mint)?;
                if state.authority != Some(authority) {
                    return Err(AmmError::Unauthorized("signer is not the mint authority"));
                }
                let supply = self
                    .supply(&to.mint, state)
                    .checked_add(amount.get())
                    .ok_or(AmmError::Overflow("mint supply overflow"))?;
                let balance = self
                    .balance(base, &to)
                    .checked_add(amount.get())
                    .ok_or(AmmError::Overflow("ledger balance overflow"))?;
                self.supplies.insert(to.mint, supply);
                self.balances.insert(to, balance);
            }
            LedgerOp::Burn {
                from,
                amount,
                authority,
            } => {
                let state = base.mint(&from.mint)?;
                if authority != from.owner {
                    return Err(AmmError::Unauthorized("burn signer does not own account"));
                }
                let available = self.balance(base, &from);
                let balance = available
                    .checked_sub(amount.get())
                    .ok_or(AmmError::InsufficientBalance {
                        requested: amount.get(),
                        available,
                    })?;
                let supply = self
                    .supply(&from.mint, state)
                    .checked_sub(amount.get())
                    .ok_or(AmmError::Overflow("mint supply underflow"))?;
                self.supplies.insert(from.mint, supply);
                self.balances.insert(from, balance);
            }
        }
        Ok(())
    }

    fn commit(self, base: &mut LedgerState) {
        base.balances.extend(self.balances);
        for (mint, supply) in self.supplies {
            if let Some(state) = base.mints.get_mut(&mint) {
                state.supply = supply;
            }
        }
    }
}

/// Thread-safe in-memory [`ReserveLedger`].
///
/// Balances are keyed by [`TokenAccount`].  Mints must be registered with
/// [`create_mint`](Self::create_mint) before accounts of that mint can be
/// used; [`airdrop`](Self::airdrop) funds accounts without a mint
/// authority signature.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Address, Amount, TokenAccount};
/// use xy_amm::ledger::InMemoryLedger;
/// use xy_amm::traits::ReserveLedger;
///
/// let ledger = InMemoryLedger::new();
/// let mint = Address::from_bytes([1; 32]);
/// let alice = TokenAccount::new(Address::from_bytes([2; 32]), mint);
/// ledger.create_mint(mint, None).expect("new mint");
/// ledger.airdrop(alice, Amount::new(500)).expect("funded");
/// assert_eq!(ledger.balance(&alice).expect("known mint"), Amount::new(500));
/// assert_eq!(ledger.supply(&mint).expect("known mint"), Amount::new(500));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mint` with zero supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DuplicateAccount`] if the mint exists.
    pub fn create_mint(&self, mint: Address, authority: Option<Address>) -> Result<(), AmmError> {
        let mut state = self.state.write();
        if state.mints.contains_key(&mint) {
            return Err(AmmError::DuplicateAccount("mint already exists"));
        }
        state.mints.insert(
            mint,
            MintState {
                authority,
                supply: 0,
            },
        );
        debug!(mint = %mint.short(), "mint created");
        Ok(())
    }

    /// Creates `amount` tokens directly in `account`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MintNotFound`] if the mint does not exist.
    /// - [`AmmError::Overflow`] if the balance or supply would overflow.
    pub fn airdrop(&self, account: TokenAccount, amount: Amount) -> Result<(), AmmError> {
        let mut state = self.state.write();
        let supply = state
            .mint(&account.mint)?
            .supply
            .checked_add(amount.get())
            .ok_or(AmmError::Overflow("mint supply overflow"))?;
        let balance = state
            .balances
            .get(&account)
            .copied()
            .unwrap_or(0)
            .checked_add(amount.get())
            .ok_or(AmmError::Overflow("ledger balance overflow"))?;
        if let Some(mint) = state.mints.get_mut(&account.mint) {
            mint.supply = supply;
        }
        state.balances.insert(account, balance);
        Ok(())
    }
}

impl ReserveLedger for InMemoryLedger {
    fn open_pool_accounts(&self, accounts: &PoolAccounts) -> Result<(), AmmError> {
        let mut state = self.state.write();
        state.mint(&accounts.vault_x.mint)?;
        state.mint(&accounts.vault_y.mint)?;
        if state.mints.contains_key(&accounts.lp_mint) {
            return Err(AmmError::DuplicateAccount("lp mint already exists"));
        }
        if state.balances.contains_key(&accounts.vault_x)
            || state.balances.contains_key(&accounts.vault_y)
        {
            return Err(AmmError::DuplicateAccount("vault already exists"));
        }

        state.mints.insert(
            accounts.lp_mint,
            MintState {
                authority: Some(accounts.config),
                supply: 0,
            },
        );
        state.balances.insert(accounts.vault_x, 0);
        state.balances.insert(accounts.vault_y, 0);
        debug!(pool = %accounts.config.short(), "pool accounts opened");
        Ok(())
    }

    fn balance(&self, account: &TokenAccount) -> Result<Amount, AmmError> {
        let state = self.state.read();
        state.mint(&account.mint)?;
        Ok(Amount::new(
            state.balances.get(account).copied().unwrap_or(0),
        ))
    }

    fn supply(&self, mint: &Address) -> Result<Amount, AmmError> {
        let state = self.state.read();
        Ok(Amount::new(state.mint(mint)?.supply))
    }

    fn apply(&self, batch: &LedgerBatch) -> Result<(), AmmError> {
        let mut state = self.state.write();
        let mut overlay = Overlay::default();
        for op in batch.ops() {
            overlay.stage(&state, op)?;
        }
        overlay.commit(&mut state);
        debug!(ops = batch.len(), "ledger batch applied");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn acct(owner: u8, mint: u8) -> TokenAccount {
        TokenAccount::new(addr(owner), addr(mint))
    }

    fn ledger_with_mints() -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        for m in [10u8, 11] {
            let Ok(()) = ledger.create_mint(addr(m), None) else {
                panic!("new mint");
            };
        }
        ledger
    }

    fn pool_accounts() -> PoolAccounts {
        PoolAccounts {
            config: addr(1),
            lp_mint: addr(12),
            vault_x: acct(1, 10),
            vault_y: acct(1, 11),
        }
    }

    fn balance(ledger: &InMemoryLedger, account: &TokenAccount) -> u64 {
        let Ok(b) = ledger.balance(account) else {
            panic!("known mint");
        };
        b.get()
    }

    // -- Mints and airdrops ---------------------------------------------------

    #[test]
    fn duplicate_mint_rejected() {
        let ledger = ledger_with_mints();
        assert!(matches!(
            ledger.create_mint(addr(10), None),
            Err(AmmError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn airdrop_increases_supply() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::new(40)) else {
            panic!("funded");
        };
        assert_eq!(balance(&ledger, &acct(5, 10)), 40);
        assert_eq!(ledger.supply(&addr(10)), Ok(Amount::new(40)));
    }

    #[test]
    fn unknown_mint_reported() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.balance(&acct(1, 99)),
            Err(AmmError::MintNotFound(addr(99)))
        );
        assert!(ledger.airdrop(acct(1, 99), Amount::new(1)).is_err());
    }

    // -- Pool provisioning ----------------------------------------------------

    #[test]
    fn open_pool_accounts_creates_lp_mint_and_vaults() {
        let ledger = ledger_with_mints();
        let accounts = pool_accounts();
        let Ok(()) = ledger.open_pool_accounts(&accounts) else {
            panic!("opened");
        };
        assert_eq!(ledger.supply(&accounts.lp_mint), Ok(Amount::ZERO));
        assert_eq!(balance(&ledger, &accounts.vault_x), 0);
    }

    #[test]
    fn open_pool_accounts_twice_rejected() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.open_pool_accounts(&pool_accounts()) else {
            panic!("opened");
        };
        assert!(matches!(
            ledger.open_pool_accounts(&pool_accounts()),
            Err(AmmError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn open_pool_accounts_needs_reserve_mints() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.open_pool_accounts(&pool_accounts()),
            Err(AmmError::MintNotFound(addr(10)))
        );
        assert_eq!(
            ledger.supply(&addr(12)),
            Err(AmmError::MintNotFound(addr(12)))
        );
    }

    #[test]
    fn prefunded_vault_blocks_provisioning() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(1, 10), Amount::new(1)) else {
            panic!("funded");
        };
        assert!(matches!(
            ledger.open_pool_accounts(&pool_accounts()),
            Err(AmmError::DuplicateAccount(_))
        ));
    }

    // -- Batches --------------------------------------------------------------

    #[test]
    fn transfer_moves_balance() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::new(100)) else {
            panic!("funded");
        };
        let batch = LedgerBatch::new().transfer(acct(5, 10), acct(6, 10), Amount::new(30), addr(5));
        assert!(ledger.apply(&batch).is_ok());
        assert_eq!(balance(&ledger, &acct(5, 10)), 70);
        assert_eq!(balance(&ledger, &acct(6, 10)), 30);
        assert_eq!(ledger.supply(&addr(10)), Ok(Amount::new(100)));
    }

    #[test]
    fn failing_op_rolls_back_whole_batch() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::new(100)) else {
            panic!("funded");
        };
        let batch = LedgerBatch::new()
            .transfer(acct(5, 10), acct(6, 10), Amount::new(30), addr(5))
            .debit(acct(5, 11), Amount::new(1), addr(5));
        assert_eq!(
            ledger.apply(&batch),
            Err(AmmError::InsufficientBalance {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(balance(&ledger, &acct(5, 10)), 100);
        assert_eq!(balance(&ledger, &acct(6, 10)), 0);
    }

    #[test]
    fn running_balance_is_used_within_batch() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::new(10)) else {
            panic!("funded");
        };
        let batch = LedgerBatch::new()
            .debit(acct(5, 10), Amount::new(10), addr(5))
            .debit(acct(5, 10), Amount::new(1), addr(5));
        assert!(matches!(
            ledger.apply(&batch),
            Err(AmmError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn debit_requires_owner() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::new(10)) else {
            panic!("funded");
        };
        let batch = LedgerBatch::new().debit(acct(5, 10), Amount::new(1), addr(6));
        assert!(matches!(
            ledger.apply(&batch),
            Err(AmmError::Unauthorized(_))
        ));
    }

    #[test]
    fn mint_and_burn_follow_authority() {
        let ledger = ledger_with_mints();
        let accounts = pool_accounts();
        let Ok(()) = ledger.open_pool_accounts(&accounts) else {
            panic!("opened");
        };
        let user_lp = accounts.lp_account(addr(5));

        let forged = LedgerBatch::new().mint(user_lp, Amount::new(9), addr(5));
        assert!(matches!(ledger.apply(&forged), Err(AmmError::Unauthorized(_))));

        let minted = LedgerBatch::new().mint(user_lp, Amount::new(9), accounts.config);
        assert!(ledger.apply(&minted).is_ok());
        assert_eq!(ledger.supply(&accounts.lp_mint), Ok(Amount::new(9)));

        let burned = LedgerBatch::new().burn(user_lp, Amount::new(4), addr(5));
        assert!(ledger.apply(&burned).is_ok());
        assert_eq!(ledger.supply(&accounts.lp_mint), Ok(Amount::new(5)));
        assert_eq!(balance(&ledger, &user_lp), 5);
    }

    #[test]
    fn credit_overflow_detected() {
        let ledger = ledger_with_mints();
        let Ok(()) = ledger.airdrop(acct(5, 10), Amount::MAX) else {
            panic!("funded");
        };
        let batch = LedgerBatch::new().credit(acct(5, 10), Amount::new(1));
        assert!(matches!(ledger.apply(&batch), Err(AmmError::Overflow(_))));
    }
}
