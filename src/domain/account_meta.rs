//! Account references passed through to transfer requests.

use super::Address;

/// One account a transfer instruction must carry, with its access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountMeta {
    /// The account address.
    pub address: Address,
    /// Whether the account must sign.
    pub is_signer: bool,
    /// Whether the account is written.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable, non-signing account.
    #[must_use]
    pub const fn writable(address: Address) -> Self {
        Self {
            address,
            is_signer: false,
            is_writable: true,
        }
    }

    /// A read-only, non-signing account.
    #[must_use]
    pub const fn readonly(address: Address) -> Self {
        Self {
            address,
            is_signer: false,
            is_writable: false,
        }
    }
}
