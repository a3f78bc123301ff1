//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use cpswap_engine::prelude::*;
//! ```

pub use crate::domain::{
    AccountMeta, Address, Amount, AssetDescriptor, AssetPair, BasisPoints, FeeRate, LpShares,
    SwapDirection, SwapMode, SwapQuote, SwapSpec, TransferFeeConfig, TransferHookConfig,
};

pub use crate::traits::{
    AccountDataSource, AddressDeriver, LedgerContext, Transfer, TransferLeg, TransferRequest,
};

pub use crate::math::{CheckedArithmetic, Rounding};

pub use crate::config::{AmmConfig, AmmConfigRegistry, ConfigStore, FeeRates, FeeRecipients};

pub use crate::fees::FeeCalculator;

pub use crate::pools::{
    Deposit, InitializeParams, InitializedPool, PoolInitializer, PoolState, PoolStatus, PoolStore,
    SwapAccounts, SwapEngine, VaultBalances,
};

pub use crate::error::{AmmError, Result, TransferError};
