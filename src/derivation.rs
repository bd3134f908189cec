//! Deterministic address derivation from seeds.
//!
//! Pool and LP mint addresses are pure functions of the engine namespace
//! and a list of seeds, so the same `seed` always names the same pool and
//! two pools can never share an address without sharing a seed.
//!
//! The preimage is `domain || len(namespace) || namespace || (len(seed) ||
//! seed)* || bump`, hashed with BLAKE3.  Lengths are little-endian `u32`,
//! so no two seed lists produce the same preimage.
//!
//! # Examples
//!
//! ```
//! use xy_amm::derivation::{create_address, derive_address, pool_address};
//!
//! let (pool, bump) = pool_address("xy-amm/v1", 1).expect("derivable");
//! let again = create_address("xy-amm/v1", &[b"config", &1u64.to_le_bytes()], bump)
//!     .expect("derivable");
//! assert_eq!(pool, again);
//! assert_ne!(pool, pool_address("xy-amm/v1", 2).expect("derivable").0);
//! ```

use blake3::Hasher;

use crate::domain::Address;
use crate::error::AmmError;

/// Domain tag prefixed to every preimage.
const DERIVATION_DOMAIN: &[u8] = b"XY_AMM_ADDRESS_V1";

/// Seed prefix of pool config addresses.
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed prefix of LP mint addresses.
pub const LP_SEED: &[u8] = b"lp";

/// Hashes `namespace`, `seeds` and `bump` into an address.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] if a seed is longer than
/// `u32::MAX` bytes or the result is the reserved zero address.
pub fn create_address(namespace: &str, seeds: &[&[u8]], bump: u8) -> Result<Address, AmmError> {
    let mut hasher = Hasher::new();
    hasher.update(DERIVATION_DOMAIN);
    update_prefixed(&mut hasher, namespace.as_bytes())?;
    for seed in seeds {
        update_prefixed(&mut hasher, seed)?;
    }
    hasher.update(&[bump]);

    let hash = hasher.finalize();
    let address = Address::from_bytes(*hash.as_bytes());
    if address.is_zero() {
        return Err(AmmError::InvalidConfiguration(
            "derivation produced the reserved address".to_owned(),
        ));
    }
    Ok(address)
}

/// Finds the highest bump in `255..=0` that yields a usable address.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] if a seed is too long or
/// no bump produces a usable address.
pub fn derive_address(namespace: &str, seeds: &[&[u8]]) -> Result<(Address, u8), AmmError> {
    if !fits_u32(namespace.as_bytes()) || !seeds.iter().all(|s| fits_u32(s)) {
        return Err(AmmError::InvalidConfiguration(
            "derivation seed too long".to_owned(),
        ));
    }
    for bump in (0..=u8::MAX).rev() {
        if let Ok(address) = create_address(namespace, seeds, bump) {
            return Ok((address, bump));
        }
    }
    Err(AmmError::InvalidConfiguration(
        "no bump yields a usable address".to_owned(),
    ))
}

/// Address and bump of the pool created with `seed`.
///
/// # Errors
///
/// Propagates [`derive_address`] errors.
pub fn pool_address(namespace: &str, seed: u64) -> Result<(Address, u8), AmmError> {
    derive_address(namespace, &[CONFIG_SEED, &seed.to_le_bytes()])
}

/// Address and bump of the LP mint of `pool`.
///
/// # Errors
///
/// Propagates [`derive_address`] errors.
pub fn lp_mint_address(namespace: &str, pool: &Address) -> Result<(Address, u8), AmmError> {
    derive_address(namespace, &[LP_SEED, pool.as_bytes()])
}

fn fits_u32(bytes: &[u8]) -> bool {
    u32::try_from(bytes.len()).is_ok()
}

fn update_prefixed(hasher: &mut Hasher, bytes: &[u8]) -> Result<(), AmmError> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| AmmError::InvalidConfiguration("derivation seed too long".to_owned()))?;
    hasher.update(&len.to_le_bytes());
    hasher.update(bytes);
    Ok(())
}
