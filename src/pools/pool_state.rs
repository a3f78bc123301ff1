//! Persisted pool record.

use super::PoolAddresses;
use crate::domain::{Address, Amount, AssetPair, LpShares, SwapDirection};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Whether a pool accepts swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStatus {
    /// Swaps allowed.
    #[default]
    Active,
    /// Swaps rejected with [`AmmError::PoolPaused`].
    Paused,
}

/// Live vault balances, read from the ledger by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VaultBalances {
    /// Balance of the asset0 vault.
    pub vault0: Amount,
    /// Balance of the asset1 vault.
    pub vault1: Amount,
}

impl VaultBalances {
    /// Creates a snapshot.
    pub const fn new(vault0: Amount, vault1: Amount) -> Self {
        Self { vault0, vault1 }
    }
}

/// Protocol and fund fees accrued on one asset and not yet collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccruedFees {
    /// Owed to the protocol.
    pub protocol: Amount,
    /// Owed to the fund.
    pub fund: Amount,
}

impl AccruedFees {
    fn total(&self) -> Result<Amount> {
        self.protocol.safe_add(&self.fund)
    }
}

/// One constant-product pool.
///
/// Balances are not stored here: the vaults live on the ledger and are
/// supplied as [`VaultBalances`].  What the pool tracks is everything the
/// ledger cannot tell: which part of each vault is owed to the protocol
/// and fund rather than to LPs, the LP supply, and the lifecycle flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    addresses: PoolAddresses,
    amm_config: Address,
    amm_config_index: u16,
    assets: AssetPair,
    lp_supply: LpShares,
    fees0: AccruedFees,
    fees1: AccruedFees,
    created_at: u64,
    open_time: u64,
    status: PoolStatus,
    in_progress: bool,
}

impl PoolState {
    /// Creates a fresh pool record with zeroed fee counters.
    #[must_use]
    pub fn new(
        addresses: PoolAddresses,
        amm_config: Address,
        amm_config_index: u16,
        assets: AssetPair,
        lp_supply: LpShares,
        created_at: u64,
        open_time: u64,
    ) -> Self {
        Self {
            addresses,
            amm_config,
            amm_config_index,
            assets,
            lp_supply,
            fees0: AccruedFees::default(),
            fees1: AccruedFees::default(),
            created_at,
            open_time,
            status: PoolStatus::Active,
            in_progress: false,
        }
    }

    /// The pool's address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.addresses.pool
    }

    /// All derived addresses.
    #[must_use]
    pub const fn addresses(&self) -> &PoolAddresses {
        &self.addresses
    }

    /// Address of the governing config.
    #[must_use]
    pub const fn amm_config(&self) -> Address {
        self.amm_config
    }

    /// Index of the governing config.
    #[must_use]
    pub const fn amm_config_index(&self) -> u16 {
        self.amm_config_index
    }

    /// The canonically ordered assets.
    #[must_use]
    pub const fn assets(&self) -> &AssetPair {
        &self.assets
    }

    /// Total LP supply, including the locked amount.
    #[must_use]
    pub const fn lp_supply(&self) -> LpShares {
        self.lp_supply
    }

    /// Fees accrued on asset0.
    #[must_use]
    pub const fn fees0(&self) -> &AccruedFees {
        &self.fees0
    }

    /// Fees accrued on asset1.
    #[must_use]
    pub const fn fees1(&self) -> &AccruedFees {
        &self.fees1
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }

    /// First timestamp at which swaps are accepted.
    #[must_use]
    pub const fn open_time(&self) -> u64 {
        self.open_time
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.status
    }

    /// Sets the status.
    pub fn set_status(&mut self, status: PoolStatus) {
        self.status = status;
    }

    /// Returns `true` while an operation holds the pool.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Engages the in-progress guard.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReentrantCall`] if it is already engaged.
    pub fn begin_operation(&mut self) -> Result<()> {
        if self.in_progress {
            return Err(AmmError::ReentrantCall);
        }
        self.in_progress = true;
        Ok(())
    }

    /// Releases the in-progress guard.
    pub fn end_operation(&mut self) {
        self.in_progress = false;
    }

    /// Fails unless the pool accepts swaps at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolPaused`] if paused.
    /// - [`AmmError::PoolNotOpen`] if `now < open_time`.
    pub fn ensure_tradable(&self, now: u64) -> Result<()> {
        if self.status == PoolStatus::Paused {
            return Err(AmmError::PoolPaused);
        }
        if now < self.open_time {
            return Err(AmmError::PoolNotOpen {
                open_time: self.open_time,
                now,
            });
        }
        Ok(())
    }

    /// Vault balances net of accrued protocol and fund fees.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if a vault holds less than
    /// the fees owed from it.
    pub fn tradable_reserves(&self, vaults: &VaultBalances) -> Result<(Amount, Amount)> {
        let reserve0 = vaults.vault0.safe_sub(&self.fees0.total()?)?;
        let reserve1 = vaults.vault1.safe_sub(&self.fees1.total()?)?;
        Ok((reserve0, reserve1))
    }

    /// Tradable reserves as `(input, output)` for a swap direction.
    ///
    /// # Errors
    ///
    /// See [`tradable_reserves`](Self::tradable_reserves).
    pub fn directed_reserves(
        &self,
        vaults: &VaultBalances,
        direction: SwapDirection,
    ) -> Result<(Amount, Amount)> {
        let (reserve0, reserve1) = self.tradable_reserves(vaults)?;
        Ok(match direction {
            SwapDirection::ZeroForOne => (reserve0, reserve1),
            SwapDirection::OneForZero => (reserve1, reserve0),
        })
    }

    /// Adds protocol and fund fees collected on the input asset of a swap.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if a counter overflows;
    /// neither counter changes in that case.
    pub fn accrue_fees(
        &mut self,
        direction: SwapDirection,
        protocol: Amount,
        fund: Amount,
    ) -> Result<()> {
        let fees = match direction {
            SwapDirection::ZeroForOne => &mut self.fees0,
            SwapDirection::OneForZero => &mut self.fees1,
        };
        let updated = AccruedFees {
            protocol: fees.protocol.safe_add(&protocol)?,
            fund: fees.fund.safe_add(&fund)?,
        };
        *fees = updated;
        Ok(())
    }
}
