//! Derived addresses of a pool and its accounts.

use crate::constants::{AUTH_SEED, POOL_LP_MINT_SEED, POOL_SEED, POOL_VAULT_SEED};
use crate::domain::{Address, SwapDirection};
use crate::traits::AddressDeriver;

/// Every address a pool owns, derived deterministically from its config
/// and canonically ordered mints.
///
/// | Account | Seeds |
/// |---------|-------|
/// | pool | `POOL_SEED, config, mint0, mint1` |
/// | authority | `AUTH_SEED` |
/// | vault _i_ | `POOL_VAULT_SEED, pool, mint_i` |
/// | LP mint | `POOL_LP_MINT_SEED, pool` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolAddresses {
    /// The pool record.
    pub pool: Address,
    /// Signs for vault withdrawals and LP minting.
    pub authority: Address,
    /// Holds asset0.
    pub vault0: Address,
    /// Holds asset1.
    pub vault1: Address,
    /// Issues LP shares.
    pub lp_mint: Address,
}

impl PoolAddresses {
    /// Derives all addresses for a pool under `amm_config`.
    ///
    /// `mint0` must be the lower of the two mints.
    pub fn derive<D: AddressDeriver + ?Sized>(
        deriver: &D,
        amm_config: &Address,
        mint0: &Address,
        mint1: &Address,
    ) -> Self {
        let pool = deriver.derive_program_address(&[
            POOL_SEED,
            amm_config.as_bytes(),
            mint0.as_bytes(),
            mint1.as_bytes(),
        ]);
        Self {
            pool,
            authority: deriver.derive_program_address(&[AUTH_SEED]),
            vault0: deriver.derive_program_address(&[
                POOL_VAULT_SEED,
                pool.as_bytes(),
                mint0.as_bytes(),
            ]),
            vault1: deriver.derive_program_address(&[
                POOL_VAULT_SEED,
                pool.as_bytes(),
                mint1.as_bytes(),
            ]),
            lp_mint: deriver.derive_program_address(&[POOL_LP_MINT_SEED, pool.as_bytes()]),
        }
    }

    /// Returns `(input vault, output vault)` for a swap direction.
    #[must_use]
    pub const fn directed_vaults(&self, direction: SwapDirection) -> (Address, Address) {
        match direction {
            SwapDirection::ZeroForOne => (self.vault0, self.vault1),
            SwapDirection::OneForZero => (self.vault1, self.vault0),
        }
    }
}
