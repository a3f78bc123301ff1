//! Asset descriptors and the transfer extensions an asset may carry.

use super::{Address, Amount, BasisPoints};
use crate::error::AmmError;

/// The fee an asset's own transfer program deducts from every transfer.
///
/// `fee = min(ceil(amount × basis_points / 10 000), maximum_fee)`.  The
/// engine never collects this fee; it only models it so that quotes are
/// exact about what actually lands where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTransferFeeConfig"))]
pub struct TransferFeeConfig {
    basis_points: BasisPoints,
    maximum_fee: Amount,
}

/// Unvalidated wire form; deserialization goes through
/// [`TransferFeeConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTransferFeeConfig {
    basis_points: BasisPoints,
    maximum_fee: Amount,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTransferFeeConfig> for TransferFeeConfig {
    type Error = AmmError;

    fn try_from(raw: RawTransferFeeConfig) -> Result<Self, Self::Error> {
        Self::new(raw.basis_points, raw.maximum_fee)
    }
}

impl TransferFeeConfig {
    /// Creates a transfer-fee description.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] if `basis_points` exceeds 100%.
    pub fn new(basis_points: BasisPoints, maximum_fee: Amount) -> Result<Self, AmmError> {
        if !basis_points.is_valid_percent() {
            return Err(AmmError::InvalidFeeRate(
                "transfer fee basis points exceed 100%",
            ));
        }
        Ok(Self {
            basis_points,
            maximum_fee,
        })
    }

    /// Returns the fee rate in basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.basis_points
    }

    /// Returns the per-transfer fee cap.
    pub const fn maximum_fee(&self) -> Amount {
        self.maximum_fee
    }

    /// Returns `true` if this configuration can never deduct anything.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.basis_points.get() == 0 || self.maximum_fee.is_zero()
    }
}

/// A third-party program that must run on every transfer of the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferHookConfig {
    program_id: Address,
    extra_accounts_list: Address,
}

impl TransferHookConfig {
    /// Creates a hook description.
    #[must_use]
    pub const fn new(program_id: Address, extra_accounts_list: Address) -> Self {
        Self {
            program_id,
            extra_accounts_list,
        }
    }

    /// Returns the hook program.
    #[must_use]
    pub const fn program_id(&self) -> Address {
        self.program_id
    }

    /// Returns the account holding the hook's declared extra-account list.
    #[must_use]
    pub const fn extra_accounts_list(&self) -> Address {
        self.extra_accounts_list
    }
}

/// Everything the engine needs to know about one side of a pool.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::{Address, Amount, AssetDescriptor, BasisPoints, TransferFeeConfig};
///
/// let program = Address::from_bytes([9u8; 32]);
/// let plain = AssetDescriptor::new(Address::from_bytes([1u8; 32]), program, 6);
/// assert!(plain.is_plain());
///
/// let fee = TransferFeeConfig::new(BasisPoints::new(100), Amount::new(50_000_000))
///     .expect("valid basis points");
/// let taxed = plain.with_transfer_fee(fee);
/// assert!(!taxed.is_plain());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetDescriptor {
    mint: Address,
    transfer_program: Address,
    decimals: u8,
    transfer_fee: Option<TransferFeeConfig>,
    transfer_hook: Option<TransferHookConfig>,
}

impl AssetDescriptor {
    /// Describes a plain asset: no transfer fee, no transfer hook.
    #[must_use]
    pub const fn new(mint: Address, transfer_program: Address, decimals: u8) -> Self {
        Self {
            mint,
            transfer_program,
            decimals,
            transfer_fee: None,
            transfer_hook: None,
        }
    }

    /// Attaches a transfer-fee extension.
    #[must_use]
    pub fn with_transfer_fee(mut self, fee: TransferFeeConfig) -> Self {
        self.transfer_fee = Some(fee);
        self
    }

    /// Attaches a transfer-hook extension.
    #[must_use]
    pub fn with_transfer_hook(mut self, hook: TransferHookConfig) -> Self {
        self.transfer_hook = Some(hook);
        self
    }

    /// Returns the asset identifier.
    #[must_use]
    pub const fn mint(&self) -> Address {
        self.mint
    }

    /// Returns the program that owns the asset and executes its transfers.
    #[must_use]
    pub const fn transfer_program(&self) -> Address {
        self.transfer_program
    }

    /// Returns the number of decimals of the asset.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the transfer-fee extension, if any.
    #[must_use]
    pub const fn transfer_fee(&self) -> Option<&TransferFeeConfig> {
        self.transfer_fee.as_ref()
    }

    /// Returns the transfer-hook extension, if any.
    #[must_use]
    pub const fn transfer_hook(&self) -> Option<&TransferHookConfig> {
        self.transfer_hook.as_ref()
    }

    /// Returns `true` if transfers of this asset move exactly the requested
    /// amount and call no third-party code.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.transfer_fee.is_none() && self.transfer_hook.is_none()
    }

    /// Returns `true` if transfers of this asset invoke a hook program.
    #[must_use]
    pub const fn has_transfer_hook(&self) -> bool {
        self.transfer_hook.is_some()
    }
}
