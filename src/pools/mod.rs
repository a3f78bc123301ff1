//! Pool records, pool creation and swap execution.
//!
//! | Item | Role |
//! |------|------|
//! | [`PoolState`] | The persisted record of one pool |
//! | [`PoolAddresses`] | Every address a pool owns, derived from seeds |
//! | [`PoolStore`] | Storage seam for pool records |
//! | [`PoolInitializer`] | Creates a pool and seeds it with the first deposit |
//! | [`SwapEngine`] | Quotes and executes base-input and base-output swaps |
//!
//! A pool never holds balances itself.  Vault balances live on the ledger
//! and are passed in as [`VaultBalances`] whenever a price is needed.

mod addresses;
mod initializer;
mod pool_state;
mod store;
mod swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;
#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod test_support;

pub use addresses::PoolAddresses;
pub use initializer::{Deposit, InitializeParams, InitializedPool, PoolInitializer};
pub use pool_state::{AccruedFees, PoolState, PoolStatus, VaultBalances};
pub use store::{InMemoryPoolStore, PoolStore};
pub use swap::{SwapAccounts, SwapEngine};
