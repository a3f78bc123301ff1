//! Transfer-hook support.
//!
//! Assets with a transfer hook invoke a third-party program on every
//! transfer, and that program expects extra accounts.  [`TransferHookAdapter`]
//! resolves them from the list the asset publishes, encoded as described in
//! [`extra_account_meta`](self::extra_account_meta).

mod adapter;
pub mod extra_account_meta;

pub use adapter::TransferHookAdapter;
pub use extra_account_meta::{
    pack_extra_account_metas, unpack_extra_account_metas, AddressConfig, ExtraAccountMeta,
    PodExtraAccountMeta, Seed, EXECUTE_DISCRIMINATOR,
};
