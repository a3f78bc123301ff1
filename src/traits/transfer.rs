//! The asset-transfer collaborator.
//!
//! The engine never moves value itself.  It builds a [`TransferRequest`]
//! for every movement it predicts and hands it to an implementation of
//! [`Transfer`], which reports how much the destination was actually
//! credited.  For assets with a transfer fee that is less than the request;
//! the engine checks the reported figure against its own prediction.

use crate::domain::{AccountMeta, Address, Amount, AssetDescriptor, LpShares};
use crate::error::{AmmError, Result, TransferError};

/// Source, destination and signer of one asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferLeg {
    /// Account debited.
    pub source: Address,
    /// Account credited.
    pub destination: Address,
    /// Owner of `source`, authorizing the movement.
    pub authority: Address,
    /// Amount debited from `source`.
    pub amount: Amount,
}

/// Everything a transfer program needs to move one asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransferRequest {
    /// Program that owns the asset and executes the transfer.
    pub transfer_program: Address,
    /// The asset being moved.
    pub mint: Address,
    /// Decimals of the asset, for checked transfers.
    pub decimals: u8,
    /// Accounts and amount.
    pub leg: TransferLeg,
    /// Extra accounts the asset's transfer hook requires, in the order the
    /// hook expects.  Empty for assets without a hook.
    pub extra_accounts: Vec<AccountMeta>,
}

impl TransferRequest {
    /// Builds a request for `asset`.
    #[must_use]
    pub fn new(asset: &AssetDescriptor, leg: TransferLeg, extra_accounts: Vec<AccountMeta>) -> Self {
        Self {
            transfer_program: asset.transfer_program(),
            mint: asset.mint(),
            decimals: asset.decimals(),
            leg,
            extra_accounts,
        }
    }
}

/// Executes asset movements on the external ledger.
pub trait Transfer {
    /// Moves `request.leg.amount` of `request.mint`, returning the amount
    /// actually credited to the destination.
    ///
    /// # Errors
    ///
    /// Any rejection by the ledger or the asset's transfer program.
    fn transfer(&mut self, request: &TransferRequest) -> core::result::Result<Amount, TransferError>;

    /// Moves native currency, used for the flat pool-creation fee.
    ///
    /// # Errors
    ///
    /// Any rejection by the ledger, such as insufficient funds.
    fn transfer_native(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<(), TransferError>;

    /// Mints LP shares to `destination`.
    ///
    /// # Errors
    ///
    /// Any rejection by the ledger.
    fn mint_to(
        &mut self,
        lp_mint: &Address,
        destination: &Address,
        amount: LpShares,
    ) -> core::result::Result<(), TransferError>;
}

/// Submits `request` and checks that exactly `expected` was credited.
///
/// # Errors
///
/// - [`AmmError::TransferFailed`] if the collaborator rejects the request.
/// - [`AmmError::TransferAmountMismatch`] if the credited amount differs
///   from `expected`.
pub fn transfer_checked<T: Transfer + ?Sized>(
    transfer: &mut T,
    request: &TransferRequest,
    expected: Amount,
) -> Result<Amount> {
    let received = transfer
        .transfer(request)
        .map_err(AmmError::TransferFailed)?;
    if received != expected {
        return Err(AmmError::TransferAmountMismatch {
            expected: expected.get(),
            actual: received.get(),
        });
    }
    Ok(received)
}
