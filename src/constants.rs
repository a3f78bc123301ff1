//! Protocol-wide constants: rate denominators, the locked LP amount and the
//! seeds handed to the addressing collaborator.

/// Denominator for trade, protocol and fund fee rates (parts per million).
pub const FEE_RATE_DENOMINATOR: u64 = 1_000_000;

/// Denominator for external transfer-fee basis points (10 000 = 100%).
pub const MAX_BASIS_POINTS: u16 = 10_000;

/// LP shares minted at initialization that nobody can ever redeem.
pub const LOCKED_LP_AMOUNT: u64 = 100;

/// Seed prefix for AMM config addresses (`[AMM_CONFIG_SEED, index_be]`).
pub const AMM_CONFIG_SEED: &[u8] = b"amm_config";

/// Seed prefix for pool addresses (`[POOL_SEED, config, mint0, mint1]`).
pub const POOL_SEED: &[u8] = b"pool";

/// Seed prefix for pool vaults (`[POOL_VAULT_SEED, pool, mint]`).
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed prefix for the LP mint (`[POOL_LP_MINT_SEED, pool]`).
pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";

/// Seed for the authority that signs vault transfers and LP mints.
pub const AUTH_SEED: &[u8] = b"vault_and_lp_mint_auth_seed";
