//! Fundamental domain value types used throughout the engine.
//!
//! Amounts, rates, addresses, asset descriptors and swap specifications.
//! All of them are small `Copy` newtypes or plain structs; constructors that
//! can fail validate their invariants up front.

mod account_meta;
mod address;
mod amount;
mod asset;
mod asset_pair;
mod basis_points;
mod fee_rate;
mod lp_shares;
mod swap_quote;
mod swap_spec;

pub use account_meta::AccountMeta;
pub use address::Address;
pub use amount::Amount;
pub use asset::{AssetDescriptor, TransferFeeConfig, TransferHookConfig};
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use fee_rate::FeeRate;
pub use lp_shares::LpShares;
pub use swap_quote::{SwapMode, SwapQuote};
pub use swap_spec::{SwapDirection, SwapSpec};
