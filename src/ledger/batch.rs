//! Atomic groups of ledger operations.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, TokenAccount};

/// A single balance mutation.
///
/// Every operation that removes tokens names the `authority` signing for
/// it; the ledger rejects the whole batch if that authority does not own
/// the account (debit, burn) or control the mint (mint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerOp {
    /// Remove `amount` from `account`, signed by its owner.
    Debit {
        /// Source account.
        account: TokenAccount,
        /// Amount removed.
        amount: Amount,
        /// Signer; must equal `account.owner`.
        authority: Address,
    },
    /// Add `amount` to `account`.
    Credit {
        /// Destination account.
        account: TokenAccount,
        /// Amount added.
        amount: Amount,
    },
    /// Create `amount` new tokens of `to.mint` in `to`.
    Mint {
        /// Destination account.
        to: TokenAccount,
        /// Amount created.
        amount: Amount,
        /// Signer; must be the mint authority.
        authority: Address,
    },
    /// Destroy `amount` tokens of `from.mint` held in `from`.
    Burn {
        /// Source account.
        from: TokenAccount,
        /// Amount destroyed.
        amount: Amount,
        /// Signer; must equal `from.owner`.
        authority: Address,
    },
}

/// Ordered list of [`LedgerOp`]s applied all-or-nothing.
///
/// Operations are validated in order against the running state of the
/// batch, so a credit earlier in the batch can fund a debit later in it.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Address, Amount, TokenAccount};
/// use xy_amm::ledger::LedgerBatch;
///
/// let user = Address::from_bytes([1; 32]);
/// let pool = Address::from_bytes([2; 32]);
/// let mint = Address::from_bytes([3; 32]);
/// let batch = LedgerBatch::new()
///     .transfer(TokenAccount::new(user, mint), TokenAccount::new(pool, mint), Amount::new(5), user);
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBatch {
    ops: Vec<LedgerOp>,
}

impl LedgerBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Appends a debit.
    #[must_use]
    pub fn debit(mut self, account: TokenAccount, amount: Amount, authority: Address) -> Self {
        self.ops.push(LedgerOp::Debit {
            account,
            amount,
            authority,
        });
        self
    }

    /// Appends a credit.
    #[must_use]
    pub fn credit(mut self, account: TokenAccount, amount: Amount) -> Self {
        self.ops.push(LedgerOp::Credit { account, amount });
        self
    }

    /// Appends a debit of `from` followed by a credit of `to`.
    #[must_use]
    pub fn transfer(
        self,
        from: TokenAccount,
        to: TokenAccount,
        amount: Amount,
        authority: Address,
    ) -> Self {
        self.debit(from, amount, authority).credit(to, amount)
    }

    /// Appends a mint.
    #[must_use]
    pub fn mint(mut self, to: TokenAccount, amount: Amount, authority: Address) -> Self {
        self.ops.push(LedgerOp::Mint {
            to,
            amount,
            authority,
        });
        self
    }

    /// Appends a burn.
    #[must_use]
    pub fn burn(mut self, from: TokenAccount, amount: Amount, authority: Address) -> Self {
        self.ops.push(LedgerOp::Burn {
            from,
            amount,
            authority,
        });
        self
    }

    /// The operations in application order.
    #[must_use]
    pub fn ops(&self) -> &[LedgerOp] {
        &self.ops
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if the batch has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
