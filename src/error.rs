//! Unified error types for the AMM core.
//!
//! Every fallible operation in the crate returns [`AmmError`].  Each
//! variant belongs to exactly one [`ErrorKind`], so callers can decide
//! whether to resubmit with different bounds or abort without matching
//! on every variant.

use crate::domain::Address;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Coarse classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request: bad fee, zero amount, identical mints, duplicate pool.
    Validation,
    /// A computed amount violated the caller's slippage bound.
    Slippage,
    /// Reserves or LP balances cannot satisfy the request.
    Liquidity,
    /// Arithmetic left the representable range.
    Overflow,
    /// The pool is locked.
    Locked,
    /// A pool, account or mint does not exist.
    NotFound,
    /// The signer is not allowed to perform the action.
    Unauthorized,
    /// A ledger-level balance or account rule was violated.
    Ledger,
    /// Engine settings could not be parsed or are inconsistent.
    Configuration,
}

/// Which side of a pool a slippage bound applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundSide {
    /// Token X amount.
    X,
    /// Token Y amount.
    Y,
    /// Swap output.
    Out,
    /// LP tokens minted on a first deposit.
    Lp,
}

impl core::fmt::Display for BoundSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Out => write!(f, "out"),
            Self::Lp => write!(f, "lp"),
        }
    }
}

/// Errors produced by the AMM engine, its math, and the reference
/// collaborators.
///
/// No variant is ever produced after a ledger mutation has been applied:
/// every check runs against a snapshot before the atomic batch is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// Fee is outside `0..10_000` basis points.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Pool was configured with the same mint on both sides.
    #[error("mint X and mint Y must be distinct")]
    IdenticalMints,

    /// A pool with the derived identity already exists.
    #[error("pool {0} already exists")]
    DuplicatePool(Address),

    /// A required amount was zero.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// The computed amount violates the caller's bound.
    #[error("slippage exceeded on {side}: bound {bound}, actual {actual}")]
    SlippageExceeded {
        /// Side the bound applied to.
        side: BoundSide,
        /// Caller-supplied bound.
        bound: u64,
        /// Amount the pool computed.
        actual: u64,
    },

    /// Reserves cannot satisfy the request without breaking an invariant.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// Caller tried to burn more LP than they hold.
    #[error("insufficient LP balance: requested {requested}, available {available}")]
    InsufficientLpBalance {
        /// LP tokens the caller asked to burn.
        requested: u64,
        /// LP tokens the caller holds.
        available: u64,
    },

    /// A ledger debit exceeds the account balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount to debit.
        requested: u64,
        /// Amount held.
        available: u64,
    },

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// The pool is locked for deposits, withdrawals and swaps.
    #[error("pool {0} is locked")]
    PoolLocked(Address),

    /// No pool is registered under the identity.
    #[error("pool {0} not found")]
    PoolNotFound(Address),

    /// The signer lacks the authority for the action.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Ledger account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(&'static str),

    /// Ledger mint does not exist.
    #[error("mint {0} not found")]
    MintNotFound(Address),

    /// Ledger account or mint already exists.
    #[error("ledger entry already exists: {0}")]
    DuplicateAccount(&'static str),

    /// Engine settings are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl AmmError {
    /// Returns the [`ErrorKind`] this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFee(_)
            | Self::IdenticalMints
            | Self::DuplicatePool(_)
            | Self::ZeroAmount(_) => ErrorKind::Validation,
            Self::SlippageExceeded { .. } => ErrorKind::Slippage,
            Self::InsufficientLiquidity(_) | Self::InsufficientLpBalance { .. } => {
                ErrorKind::Liquidity
            }
            Self::Overflow(_) | Self::DivisionByZero => ErrorKind::Overflow,
            Self::PoolLocked(_) => ErrorKind::Locked,
            Self::PoolNotFound(_) | Self::AccountNotFound(_) | Self::MintNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::InsufficientBalance { .. } | Self::DuplicateAccount(_) => ErrorKind::Ledger,
            Self::InvalidConfiguration(_) => ErrorKind::Configuration,
        }
    }

    /// Returns `true` if resubmitting with adjusted bounds could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Slippage)
    }
}
