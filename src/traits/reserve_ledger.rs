//! Collaborator seam for token balances.
//!
//! The engine never holds balances itself.  It reads a snapshot through
//! [`ReserveLedger::balance`] and [`ReserveLedger::supply`], then issues a
//! single [`LedgerBatch`] per operation.
//!
//! # Atomicity Contract
//!
//! [`apply`](ReserveLedger::apply) is all-or-nothing: if any operation in
//! the batch fails, no balance or supply changes.  The engine relies on
//! this to keep every operation free of partial effects.
//!
//! # Ownership Contract
//!
//! A debit or burn succeeds only when `authority` equals the account
//! owner, and a mint only when `authority` is the mint authority.  Pool
//! vaults are owned by the pool address and the LP mint is controlled by
//! it, so only the engine can move pool funds.

use crate::domain::{Address, Amount, PoolAccounts, TokenAccount};
use crate::error::AmmError;
use crate::ledger::LedgerBatch;

/// Token ledger the engine settles against.
///
/// Implementations must be safe to share across threads; the engine calls
/// them from whichever thread holds a pool's lock.
pub trait ReserveLedger: Send + Sync {
    /// Provisions a pool: creates the LP mint (zero supply, authority
    /// `accounts.config`) and both empty vaults, atomically.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MintNotFound`] if a reserve mint does not exist.
    /// - [`AmmError::DuplicateAccount`] if the LP mint or a vault exists.
    fn open_pool_accounts(&self, accounts: &PoolAccounts) -> Result<(), AmmError>;

    /// Balance of `account`; accounts never credited hold zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MintNotFound`] if `account.mint` does not exist.
    fn balance(&self, account: &TokenAccount) -> Result<Amount, AmmError>;

    /// Total supply of `mint`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MintNotFound`] if `mint` does not exist.
    fn supply(&self, mint: &Address) -> Result<Amount, AmmError>;

    /// Applies every operation in `batch`, or none of them.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if a debit or burn exceeds the
    ///   running balance.
    /// - [`AmmError::Unauthorized`] if a signer does not own the account
    ///   or control the mint.
    /// - [`AmmError::MintNotFound`] if an operation names an unknown mint.
    /// - [`AmmError::Overflow`] if a balance or supply would exceed `u64`.
    fn apply(&self, batch: &LedgerBatch) -> Result<(), AmmError>;
}
