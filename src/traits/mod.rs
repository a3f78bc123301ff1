//! Seams to the external ledger.
//!
//! The engine computes; the ledger moves value, derives addresses and
//! stores raw account data.  [`Transfer`], [`AddressDeriver`] and
//! [`AccountDataSource`] are the three capabilities it needs, bundled per
//! call in a [`LedgerContext`].

mod account_source;
mod addressing;
mod context;
mod transfer;

pub use account_source::AccountDataSource;
pub use addressing::AddressDeriver;
pub use context::LedgerContext;
pub use transfer::{transfer_checked, Transfer, TransferLeg, TransferRequest};
