//! The authoritative per-pool configuration record.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints, MintPair};
use crate::error::AmmError;

/// Configuration record of a single pool.
///
/// Created once by `initialize` and keyed by the pool address derived from
/// `seed`.  Every field except `locked` is immutable afterwards: there is
/// no setter for the fee, the mints or the bumps.
///
/// # Validation
///
/// - `mint_x != mint_y` (enforced by [`MintPair`]).
/// - `fee < 10 000` bp (enforced by [`BasisPoints`]).
///
/// Records read back from a persistent store should be passed through
/// [`validate`](Self::validate), since deserialization of the mint pair
/// does not re-check distinctness.
///
/// # Examples
///
/// ```
/// use xy_amm::config::PoolConfig;
/// use xy_amm::domain::{Address, BasisPoints, MintPair};
///
/// let mints = MintPair::new(Address::from_bytes([1; 32]), Address::from_bytes([2; 32]))
///     .expect("distinct");
/// let fee = BasisPoints::new(100).expect("valid fee");
/// let config = PoolConfig::new(1, None, mints, fee, 255, 254);
/// assert_eq!(config.seed(), 1);
/// assert!(!config.is_locked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    seed: u64,
    authority: Option<Address>,
    mints: MintPair,
    fee: BasisPoints,
    config_bump: u8,
    lp_bump: u8,
    locked: bool,
}

impl PoolConfig {
    /// Creates an unlocked pool record.
    #[must_use]
    pub const fn new(
        seed: u64,
        authority: Option<Address>,
        mints: MintPair,
        fee: BasisPoints,
        config_bump: u8,
        lp_bump: u8,
    ) -> Self {
        Self {
            seed,
            authority,
            mints,
            fee,
            config_bump,
            lp_bump,
            locked: false,
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalMints`] if both mints are the same.
    /// - [`AmmError::InvalidFee`] if the fee is out of range.
    pub fn validate(&self) -> Result<(), AmmError> {
        MintPair::new(self.mints.mint_x(), self.mints.mint_y())?;
        BasisPoints::new(self.fee.get())?;
        Ok(())
    }

    /// Caller-chosen seed the pool address is derived from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Identity allowed to lock and unlock the pool, if any.
    #[must_use]
    pub const fn authority(&self) -> Option<Address> {
        self.authority
    }

    /// The reserve mints.
    #[must_use]
    pub const fn mints(&self) -> &MintPair {
        &self.mints
    }

    /// Mint backing `reserve_x`.
    #[must_use]
    pub const fn mint_x(&self) -> Address {
        self.mints.mint_x()
    }

    /// Mint backing `reserve_y`.
    #[must_use]
    pub const fn mint_y(&self) -> Address {
        self.mints.mint_y()
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Bump that produced the pool address.
    #[must_use]
    pub const fn config_bump(&self) -> u8 {
        self.config_bump
    }

    /// Bump that produced the LP mint address.
    #[must_use]
    pub const fn lp_bump(&self) -> u8 {
        self.lp_bump
    }

    /// Whether deposits, withdrawals and swaps are currently rejected.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns a copy with the lock flag set to `locked`.
    #[must_use]
    pub fn with_locked(&self, locked: bool) -> Self {
        Self {
            locked,
            ..self.clone()
        }
    }

    /// Fails with [`AmmError::PoolLocked`] if the pool is locked.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolLocked`] naming `pool`.
    pub const fn ensure_unlocked(&self, pool: Address) -> Result<(), AmmError> {
        if self.locked {
            return Err(AmmError::PoolLocked(pool));
        }
        Ok(())
    }

    /// Checks that `signer` may change the lock state.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] if the pool has no authority or
    /// `signer` is not it.
    pub fn ensure_authority(&self, signer: Address) -> Result<(), AmmError> {
        match self.authority {
            None => Err(AmmError::Unauthorized("pool has no authority")),
            Some(authority) if authority == signer => Ok(()),
            Some(_) => Err(AmmError::Unauthorized("signer is not the pool authority")),
        }
    }
}
