//! Ledger account identities touched by the engine.

use serde::{Deserialize, Serialize};

use super::{Address, SwapDirection};

/// A token account: the balance `owner` holds of `mint`.
///
/// The ledger keys balances by this pair, so every user has at most one
/// account per mint, the same shape as an associated token account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAccount {
    /// Principal allowed to debit the account.
    pub owner: Address,
    /// Mint the balance is denominated in.
    pub mint: Address,
}

impl TokenAccount {
    /// Creates a token account identity.
    #[must_use]
    pub const fn new(owner: Address, mint: Address) -> Self {
        Self { owner, mint }
    }
}

/// The ledger entries a pool owns.
///
/// `config` is the pool's identity and also the authority over both
/// vaults and the LP mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolAccounts {
    /// Pool identity and vault/mint authority.
    pub config: Address,
    /// LP mint, derived from `config`.
    pub lp_mint: Address,
    /// Vault holding `reserve_x`.
    pub vault_x: TokenAccount,
    /// Vault holding `reserve_y`.
    pub vault_y: TokenAccount,
}

impl PoolAccounts {
    /// Returns `(vault_in, vault_out)` for a swap in `direction`.
    #[must_use]
    pub const fn vaults(&self, direction: SwapDirection) -> (TokenAccount, TokenAccount) {
        match direction {
            SwapDirection::XToY => (self.vault_x, self.vault_y),
            SwapDirection::YToX => (self.vault_y, self.vault_x),
        }
    }

    /// A user's LP token account for this pool.
    #[must_use]
    pub const fn lp_account(&self, owner: Address) -> TokenAccount {
        TokenAccount::new(owner, self.lp_mint)
    }
}
