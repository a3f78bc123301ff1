//! Pool creation with the initial deposit.

use tracing::{info, warn};

use super::{PoolAddresses, PoolState, PoolStore};
use crate::config::AmmConfig;
use crate::constants::LOCKED_LP_AMOUNT;
use crate::domain::{Address, Amount, AssetDescriptor, AssetPair, LpShares};
use crate::error::{AmmError, Result};
use crate::fees::FeeCalculator;
use crate::hooks::TransferHookAdapter;
use crate::math::{CheckedArithmetic, ConstantProductCurve};
use crate::traits::{
    transfer_checked, AccountDataSource, AddressDeriver, LedgerContext, Transfer, TransferLeg,
    TransferRequest,
};

/// One side of the initial deposit, as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deposit {
    /// The asset deposited.
    pub asset: AssetDescriptor,
    /// Amount sent by the depositor, before the asset's transfer fee.
    pub amount: Amount,
    /// Depositor's account holding the asset.
    pub source: Address,
}

/// Arguments of [`PoolInitializer::initialize`].
///
/// The two deposits may be given in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InitializeParams {
    /// First deposit.
    pub deposit_a: Deposit,
    /// Second deposit.
    pub deposit_b: Deposit,
    /// Signs the deposits and pays the creation fee.
    pub depositor: Address,
    /// Receives the minted LP shares.
    pub lp_destination: Address,
    /// Requested open time; values not after the current time are moved
    /// to one second after it.
    pub open_time: u64,
}

/// Result of a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InitializedPool {
    /// The stored pool record.
    pub pool: PoolState,
    /// LP shares credited to the depositor (total supply minus the locked
    /// amount).
    pub lp_minted: LpShares,
}

/// Creates pools in a caller-owned [`PoolStore`].
pub struct PoolInitializer<'a, P: PoolStore + ?Sized> {
    pools: &'a mut P,
}

impl<'a, P: PoolStore + ?Sized> PoolInitializer<'a, P> {
    /// Wraps a store.
    pub fn new(pools: &'a mut P) -> Self {
        Self { pools }
    }

    /// Creates the pool for `config` and the two deposited assets, seeding
    /// it with the deposits.
    ///
    /// The LP supply is `floor(sqrt(net0 × net1))` over the amounts that
    /// reach the vaults.  [`LOCKED_LP_AMOUNT`] of it is never minted to
    /// anyone; the depositor receives the rest.
    ///
    /// The pool is stored with its in-progress guard engaged before any
    /// asset moves, and removed again if any movement fails, so a failed
    /// call leaves no pool behind.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if both deposits use the same mint.
    /// - [`AmmError::ZeroInitialLiquidity`] if either amount is zero.
    /// - [`AmmError::DegenerateTransferFee`] if a transfer fee would
    ///   consume a whole deposit.
    /// - [`AmmError::InitialLiquidityTooLow`] if the LP supply would not
    ///   exceed the locked amount.
    /// - [`AmmError::PoolAlreadyExists`] if the pool address is taken.
    /// - [`AmmError::HookAccountResolutionFailure`] if a hook list cannot
    ///   be resolved.
    /// - [`AmmError::CreateFeePaymentFailed`] if the creation fee cannot be
    ///   paid.
    /// - [`AmmError::TransferFailed`] / [`AmmError::TransferAmountMismatch`]
    ///   if a deposit or the LP mint fails.
    pub fn initialize<T, D, A>(
        &mut self,
        config: &AmmConfig,
        params: &InitializeParams,
        ctx: &mut LedgerContext<'_, T, D, A>,
    ) -> Result<InitializedPool>
    where
        T: Transfer + ?Sized,
        D: AddressDeriver + ?Sized,
        A: AccountDataSource + ?Sized,
    {
        let (pair, deposit0, deposit1) = AssetPair::canonicalize(
            params.deposit_a.asset,
            (params.deposit_a.amount, params.deposit_a.source),
            params.deposit_b.asset,
            (params.deposit_b.amount, params.deposit_b.source),
        )?;
        let (amount0, source0) = deposit0;
        let (amount1, source1) = deposit1;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::ZeroInitialLiquidity);
        }
        let net0 = Self::net_deposit(pair.asset0(), amount0)?;
        let net1 = Self::net_deposit(pair.asset1(), amount1)?;

        let lp_total = ConstantProductCurve::initial_lp_supply(net0, net1);
        if lp_total.get() <= LOCKED_LP_AMOUNT {
            return Err(AmmError::InitialLiquidityTooLow {
                lp_total: lp_total.get(),
                locked: LOCKED_LP_AMOUNT,
            });
        }
        let lp_minted = lp_total.safe_sub(&LpShares::new(LOCKED_LP_AMOUNT))?;

        let addresses = PoolAddresses::derive(
            ctx.deriver,
            &config.address(),
            &pair.asset0().mint(),
            &pair.asset1().mint(),
        );
        if self.pools.contains(&addresses.pool) {
            warn!(pool = %addresses.pool, "pool already exists");
            return Err(AmmError::PoolAlreadyExists);
        }

        let deposits = [
            (pair.asset0(), source0, addresses.vault0, amount0, net0),
            (pair.asset1(), source1, addresses.vault1, amount1, net1),
        ];
        let mut requests = Vec::with_capacity(deposits.len());
        for (asset, source, vault, amount, net) in deposits {
            let leg = TransferLeg {
                source,
                destination: vault,
                authority: params.depositor,
                amount,
            };
            let extras =
                TransferHookAdapter::resolve_extra_accounts(asset, &leg, ctx.account_data, ctx.deriver)?;
            requests.push((
                asset.has_transfer_hook(),
                TransferRequest::new(asset, leg, extras),
                net,
            ));
        }

        let open_time = if params.open_time <= ctx.now {
            ctx.now
                .checked_add(1)
                .ok_or(AmmError::ArithmeticOverflow("open time overflow"))?
        } else {
            params.open_time
        };
        let mut pool = PoolState::new(
            addresses,
            config.address(),
            config.index(),
            pair,
            lp_total,
            ctx.now,
            open_time,
        );
        pool.begin_operation()?;
        self.pools.insert(pool.clone());

        if let Err(e) = Self::move_funds(config, params, &addresses, lp_minted, &requests, ctx) {
            self.pools.remove(&addresses.pool);
            warn!(pool = %addresses.pool, error = %e, "pool initialization rolled back");
            return Err(e);
        }

        pool.end_operation();
        if let Some(stored) = self.pools.get_mut(&addresses.pool) {
            stored.end_operation();
        }
        info!(
            pool = %addresses.pool,
            amm_config = config.index(),
            mint0 = %pair.asset0().mint(),
            mint1 = %pair.asset1().mint(),
            reserve0 = net0.get(),
            reserve1 = net1.get(),
            lp_supply = lp_total.get(),
            open_time,
            "pool initialized"
        );
        Ok(InitializedPool { pool, lp_minted })
    }

    fn net_deposit(asset: &AssetDescriptor, amount: Amount) -> Result<Amount> {
        let (net, _) = FeeCalculator::amount_after_transfer_fee(amount, asset.transfer_fee())?;
        if net.is_zero() {
            return Err(AmmError::DegenerateTransferFee);
        }
        Ok(net)
    }

    /// Creation fee, plain deposits, LP mint, then hook-bearing deposits.
    fn move_funds<T, D, A>(
        config: &AmmConfig,
        params: &InitializeParams,
        addresses: &PoolAddresses,
        lp_minted: LpShares,
        requests: &[(bool, TransferRequest, Amount)],
        ctx: &mut LedgerContext<'_, T, D, A>,
    ) -> Result<()>
    where
        T: Transfer + ?Sized,
        D: AddressDeriver + ?Sized,
        A: AccountDataSource + ?Sized,
    {
        if !config.create_fee().is_zero() {
            ctx.transfer
                .transfer_native(
                    &params.depositor,
                    &config.recipients().create_fee_receiver,
                    config.create_fee(),
                )
                .map_err(AmmError::CreateFeePaymentFailed)?;
        }
        for (_, request, expected) in requests.iter().filter(|(hooked, ..)| !hooked) {
            transfer_checked(&mut *ctx.transfer, request, *expected)?;
        }
        ctx.transfer
            .mint_to(&addresses.lp_mint, &params.lp_destination, lp_minted)
            .map_err(AmmError::TransferFailed)?;
        for (_, request, expected) in requests.iter().filter(|(hooked, ..)| *hooked) {
            transfer_checked(&mut *ctx.transfer, request, *expected)?;
        }
        Ok(())
    }
}
