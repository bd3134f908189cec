//! The two reserve mints of a pool.

use serde::{Deserialize, Serialize};

use super::{Address, SwapDirection};
use crate::error::AmmError;

/// Ordered pair of distinct reserve mints.
///
/// Unlike a canonical token pair the order is caller-defined and
/// meaningful: `mint_x` backs `reserve_x` and `mint_y` backs `reserve_y`,
/// and swap directions are expressed relative to it.
///
/// # Examples
///
/// ```
/// use xy_amm::domain::{Address, MintPair};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
/// let pair = MintPair::new(x, y).expect("distinct");
/// assert_eq!(pair.mint_x(), x);
/// assert!(MintPair::new(x, x).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MintPair {
    mint_x: Address,
    mint_y: Address,
}

impl MintPair {
    /// Creates a pair from two mints in `(x, y)` order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalMints`] if both mints are the same.
    pub fn new(mint_x: Address, mint_y: Address) -> crate::error::Result<Self> {
        if mint_x == mint_y {
            return Err(AmmError::IdenticalMints);
        }
        Ok(Self { mint_x, mint_y })
    }

    /// Mint backing `reserve_x`.
    #[must_use]
    pub const fn mint_x(&self) -> Address {
        self.mint_x
    }

    /// Mint backing `reserve_y`.
    #[must_use]
    pub const fn mint_y(&self) -> Address {
        self.mint_y
    }

    /// Returns `(mint_in, mint_out)` for a swap in `direction`.
    #[must_use]
    pub const fn ordered(&self, direction: SwapDirection) -> (Address, Address) {
        match direction {
            SwapDirection::XToY => (self.mint_x, self.mint_y),
            SwapDirection::YToX => (self.mint_y, self.mint_x),
        }
    }
}
