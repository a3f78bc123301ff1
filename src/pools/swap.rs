//! Swap pricing and execution.
//!
//! Quoting is pure: given a pool, its config and a vault snapshot it
//! produces a [`SwapQuote`] describing every amount the swap would move.
//! [`SwapEngine::execute`] wraps a quote in the full atomic operation:
//! status checks, the reentrancy guard, fee accrual and the transfers.
//!
//! # Base input
//!
//! ```text
//! to_vault   = amount_in − input_transfer_fee(amount_in)
//! trade_fee  = ceil(to_vault × rate / 1e6)
//! out        = floor(r_out × (to_vault − trade_fee) / (r_in + to_vault − trade_fee))
//! net_out    = out − output_transfer_fee(out)
//! ```
//!
//! # Base output
//!
//! The requested amount is what the recipient nets.  It is grossed up by
//! the output asset's inverse transfer fee, run backwards through the curve
//! with ceiling division, grossed up for the trade fee and finally for the
//! input asset's inverse transfer fee.

use tracing::{debug, info, warn};

use super::{PoolState, VaultBalances};
use crate::config::AmmConfig;
use crate::domain::{
    Address, Amount, AssetDescriptor, SwapDirection, SwapMode, SwapQuote, SwapSpec,
};
use crate::error::{AmmError, Result};
use crate::fees::FeeCalculator;
use crate::hooks::TransferHookAdapter;
use crate::math::{CheckedArithmetic, ConstantProductCurve};
use crate::traits::{
    transfer_checked, AccountDataSource, AddressDeriver, LedgerContext, Transfer, TransferLeg,
    TransferRequest,
};

/// The caller-side accounts of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapAccounts {
    /// Signs for the input transfer.
    pub payer: Address,
    /// Payer's account holding the input asset.
    pub input_source: Address,
    /// Recipient's account for the output asset.
    pub output_destination: Address,
}

/// Stateless swap engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapEngine;

impl SwapEngine {
    /// Quotes a swap that sends exactly `amount_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroTradingTokens`] if `amount_in` is zero or the
    ///   output rounds to zero.
    /// - [`AmmError::SlippageExceeded`] if the net output is below
    ///   `min_amount_out`.
    /// - [`AmmError::InvariantViolation`] if the post-swap product would
    ///   shrink.
    /// - [`AmmError::ArithmeticOverflow`] on overflow.
    pub fn swap_base_input(
        pool: &PoolState,
        config: &AmmConfig,
        vaults: &VaultBalances,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapQuote> {
        Self::ensure_config(pool, config)?;
        if amount_in.is_zero() {
            return Err(AmmError::ZeroTradingTokens);
        }
        let (input_asset, output_asset) = pool.assets().directed(direction);
        let (reserve_in, reserve_out) = pool.directed_reserves(vaults, direction)?;

        let (amount_in_to_vault, input_transfer_fee) =
            FeeCalculator::amount_after_transfer_fee(amount_in, input_asset.transfer_fee())?;
        let trade_fee = FeeCalculator::trade_fee(amount_in_to_vault, config.trade_fee_rate())?;
        let amount_swapped = amount_in_to_vault.safe_sub(&trade_fee)?;
        let gross_amount_out =
            ConstantProductCurve::swap_base_input_without_fees(amount_swapped, reserve_in, reserve_out)?;
        if gross_amount_out.is_zero() {
            return Err(AmmError::ZeroTradingTokens);
        }
        let (net_amount_out, output_transfer_fee) =
            FeeCalculator::amount_after_transfer_fee(gross_amount_out, output_asset.transfer_fee())?;

        let quote = Self::assemble(
            config,
            direction,
            SwapMode::BaseInput,
            amount_in,
            input_transfer_fee,
            amount_in_to_vault,
            trade_fee,
            gross_amount_out,
            output_transfer_fee,
            net_amount_out,
        )?;
        Self::check_post_swap_invariant(&quote, reserve_in, reserve_out)?;

        if net_amount_out < min_amount_out {
            return Err(AmmError::SlippageExceeded {
                limit: min_amount_out.get(),
                actual: net_amount_out.get(),
            });
        }
        debug!(
            %direction,
            amount_in = amount_in.get(),
            trade_fee = trade_fee.get(),
            amount_out = net_amount_out.get(),
            "quoted base-input swap"
        );
        Ok(quote)
    }

    /// Quotes a swap that delivers exactly `amount_out` to the recipient,
    /// after the output asset's own transfer fee.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroTradingTokens`] if `amount_out` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the gross output would
    ///   drain the output reserve.
    /// - [`AmmError::SlippageExceeded`] if the required input exceeds
    ///   `max_amount_in`.
    /// - [`AmmError::InvariantViolation`] if the post-swap product would
    ///   shrink.
    /// - [`AmmError::ArithmeticOverflow`] on overflow.
    pub fn swap_base_output(
        pool: &PoolState,
        config: &AmmConfig,
        vaults: &VaultBalances,
        direction: SwapDirection,
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> Result<SwapQuote> {
        Self::ensure_config(pool, config)?;
        if amount_out.is_zero() {
            return Err(AmmError::ZeroTradingTokens);
        }
        let (input_asset, output_asset) = pool.assets().directed(direction);
        let (reserve_in, reserve_out) = pool.directed_reserves(vaults, direction)?;

        let output_transfer_fee = Self::inverse_transfer_fee(output_asset, amount_out)?;
        let gross_amount_out = amount_out.safe_add(&output_transfer_fee)?;
        let amount_swapped =
            ConstantProductCurve::swap_base_output_without_fees(gross_amount_out, reserve_in, reserve_out)?;
        let amount_in_to_vault =
            FeeCalculator::pre_trade_fee_amount(amount_swapped, config.trade_fee_rate())?;
        let trade_fee = FeeCalculator::trade_fee(amount_in_to_vault, config.trade_fee_rate())?;
        let input_transfer_fee = Self::inverse_transfer_fee(input_asset, amount_in_to_vault)?;
        let amount_in = amount_in_to_vault.safe_add(&input_transfer_fee)?;

        let quote = Self::assemble(
            config,
            direction,
            SwapMode::BaseOutput,
            amount_in,
            input_transfer_fee,
            amount_in_to_vault,
            trade_fee,
            gross_amount_out,
            output_transfer_fee,
            amount_out,
        )?;
        Self::check_post_swap_invariant(&quote, reserve_in, reserve_out)?;

        if amount_in > max_amount_in {
            return Err(AmmError::SlippageExceeded {
                limit: max_amount_in.get(),
                actual: amount_in.get(),
            });
        }
        debug!(
            %direction,
            amount_out = amount_out.get(),
            trade_fee = trade_fee.get(),
            amount_in = amount_in.get(),
            "quoted base-output swap"
        );
        Ok(quote)
    }

    /// Quotes `spec` in `direction`.
    ///
    /// # Errors
    ///
    /// See [`swap_base_input`](Self::swap_base_input) and
    /// [`swap_base_output`](Self::swap_base_output).
    pub fn quote(
        pool: &PoolState,
        config: &AmmConfig,
        vaults: &VaultBalances,
        direction: SwapDirection,
        spec: SwapSpec,
    ) -> Result<SwapQuote> {
        match spec {
            SwapSpec::BaseInput {
                amount_in,
                min_amount_out,
            } => Self::swap_base_input(pool, config, vaults, direction, amount_in, min_amount_out),
            SwapSpec::BaseOutput {
                amount_out,
                max_amount_in,
            } => Self::swap_base_output(pool, config, vaults, direction, amount_out, max_amount_in),
        }
    }

    /// Executes a swap atomically.
    ///
    /// Every amount is computed and every hook account resolved before the
    /// first transfer.  Protocol and fund fees are accrued, then the input
    /// and output transfers run, plain assets first and hook-bearing assets
    /// last.  On any failure the pool record is restored to its state
    /// before the call.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolPaused`] / [`AmmError::PoolNotOpen`] if the pool
    ///   does not accept swaps at `ctx.now`.
    /// - [`AmmError::ReentrantCall`] if the pool is already mid-operation.
    /// - Any quote error.
    /// - [`AmmError::HookAccountResolutionFailure`] if a hook list cannot
    ///   be resolved.
    /// - [`AmmError::TransferFailed`] / [`AmmError::TransferAmountMismatch`]
    ///   if the ledger rejects or misreports a transfer.
    pub fn execute<T, D, A>(
        pool: &mut PoolState,
        config: &AmmConfig,
        vaults: &VaultBalances,
        direction: SwapDirection,
        spec: SwapSpec,
        accounts: &SwapAccounts,
        ctx: &mut LedgerContext<'_, T, D, A>,
    ) -> Result<SwapQuote>
    where
        T: Transfer + ?Sized,
        D: AddressDeriver + ?Sized,
        A: AccountDataSource + ?Sized,
    {
        if let Err(e) = pool.ensure_tradable(ctx.now) {
            warn!(pool = %pool.address(), error = %e, "swap rejected");
            return Err(e);
        }
        let snapshot = pool.clone();
        pool.begin_operation()?;

        match Self::execute_guarded(pool, config, vaults, direction, spec, accounts, ctx) {
            Ok(quote) => {
                pool.end_operation();
                info!(
                    pool = %pool.address(),
                    %direction,
                    amount_in = quote.amount_in.get(),
                    amount_out = quote.net_amount_out.get(),
                    trade_fee = quote.trade_fee.get(),
                    "swap executed"
                );
                Ok(quote)
            }
            Err(e) => {
                *pool = snapshot;
                warn!(pool = %pool.address(), %direction, error = %e, "swap failed");
                Err(e)
            }
        }
    }

    fn execute_guarded<T, D, A>(
        pool: &mut PoolState,
        config: &AmmConfig,
        vaults: &VaultBalances,
        direction: SwapDirection,
        spec: SwapSpec,
        accounts: &SwapAccounts,
        ctx: &mut LedgerContext<'_, T, D, A>,
    ) -> Result<SwapQuote>
    where
        T: Transfer + ?Sized,
        D: AddressDeriver + ?Sized,
        A: AccountDataSource + ?Sized,
    {
        let quote = Self::quote(pool, config, vaults, direction, spec)?;

        let (input_asset, output_asset) = pool.assets().directed(direction);
        let (input_asset, output_asset) = (*input_asset, *output_asset);
        let (input_vault, output_vault) = pool.addresses().directed_vaults(direction);

        let input_leg = TransferLeg {
            source: accounts.input_source,
            destination: input_vault,
            authority: accounts.payer,
            amount: quote.amount_in,
        };
        let output_leg = TransferLeg {
            source: output_vault,
            destination: accounts.output_destination,
            authority: pool.addresses().authority,
            amount: quote.gross_amount_out,
        };
        let input_extras =
            TransferHookAdapter::resolve_extra_accounts(&input_asset, &input_leg, ctx.account_data, ctx.deriver)?;
        let output_extras = TransferHookAdapter::resolve_extra_accounts(
            &output_asset,
            &output_leg,
            ctx.account_data,
            ctx.deriver,
        )?;

        pool.accrue_fees(direction, quote.protocol_fee, quote.fund_fee)?;

        let mut transfers = [
            (
                input_asset.has_transfer_hook(),
                TransferRequest::new(&input_asset, input_leg, input_extras),
                quote.amount_in_to_vault,
            ),
            (
                output_asset.has_transfer_hook(),
                TransferRequest::new(&output_asset, output_leg, output_extras),
                quote.net_amount_out,
            ),
        ];
        transfers.sort_by_key(|(hooked, _, _)| *hooked);
        for (_, request, expected) in &transfers {
            transfer_checked(&mut *ctx.transfer, request, *expected)?;
        }
        Ok(quote)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        config: &AmmConfig,
        direction: SwapDirection,
        mode: SwapMode,
        amount_in: Amount,
        input_transfer_fee: Amount,
        amount_in_to_vault: Amount,
        trade_fee: Amount,
        gross_amount_out: Amount,
        output_transfer_fee: Amount,
        net_amount_out: Amount,
    ) -> Result<SwapQuote> {
        let rates = config.fee_rates();
        let split = FeeCalculator::split_protocol_and_fund(
            trade_fee,
            rates.protocol_fee_rate(),
            rates.fund_fee_rate(),
        )?;
        Ok(SwapQuote {
            direction,
            mode,
            amount_in,
            input_transfer_fee,
            amount_in_to_vault,
            trade_fee,
            protocol_fee: split.protocol,
            fund_fee: split.fund,
            lp_fee: split.lp,
            gross_amount_out,
            output_transfer_fee,
            net_amount_out,
        })
    }

    /// Re-checks `x · y = k` against tradable reserves after the swap: the
    /// input reserve gains everything that landed in the vault except the
    /// protocol and fund fees, the output reserve loses the gross output.
    fn check_post_swap_invariant(
        quote: &SwapQuote,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<()> {
        let new_reserve_in = reserve_in
            .safe_add(&quote.amount_in_to_vault)?
            .safe_sub(&quote.protocol_fee)?
            .safe_sub(&quote.fund_fee)?;
        let new_reserve_out = reserve_out.safe_sub(&quote.gross_amount_out)?;
        ConstantProductCurve::check_invariant(
            (reserve_in, reserve_out),
            (new_reserve_in, new_reserve_out),
        )
    }

    fn inverse_transfer_fee(asset: &AssetDescriptor, post_fee_amount: Amount) -> Result<Amount> {
        match asset.transfer_fee() {
            Some(config) => FeeCalculator::external_transfer_fee_inverse(post_fee_amount, config),
            None => Ok(Amount::ZERO),
        }
    }

    fn ensure_config(pool: &PoolState, config: &AmmConfig) -> Result<()> {
        if pool.amm_config() != config.address() {
            return Err(AmmError::ConfigNotFound(pool.amm_config_index()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AccountMeta, BasisPoints, TransferFeeConfig, TransferHookConfig};
    use crate::hooks::{pack_extra_account_metas, ExtraAccountMeta};
    use crate::pools::test_support::{
        addr, config, plain_asset, Env, TRADER_ACCOUNT0, TRADER_ACCOUNT1,
    };
    use crate::pools::{PoolStatus, PoolStore};

    fn base_input(amount_in: u64, min_out: u64) -> SwapSpec {
        let Ok(spec) = SwapSpec::base_input(Amount::new(amount_in), Amount::new(min_out)) else {
            panic!("expected Ok");
        };
        spec
    }

    fn base_output(amount_out: u64, max_in: u64) -> SwapSpec {
        let Ok(spec) = SwapSpec::base_output(Amount::new(amount_out), Amount::new(max_in)) else {
            panic!("expected Ok");
        };
        spec
    }

    // -- quoting ------------------------------------------------------------

    #[test]
    fn zero_fee_base_input() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        let Ok(quote) = env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(100, 0))
        else {
            panic!("expected Ok");
        };
        assert_eq!(quote.net_amount_out, Amount::new(90));
        assert_eq!(quote.trade_fee, Amount::ZERO);
        let vaults = env.vaults(&pool.address());
        assert_eq!(vaults, VaultBalances::new(Amount::new(1_100), Amount::new(910)));
    }

    #[test]
    fn one_percent_fee_base_input() {
        let mut env = Env::new(config(10_000, 0, 0));
        let pool = env.open(plain_asset(1), 10_000_000_000, plain_asset(2), 10_000_000_000);
        let before = env.ledger.balance(&TRADER_ACCOUNT1);
        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_input(100_000_000, 0),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.trade_fee, Amount::new(1_000_000));
        assert_eq!(quote.amount_swapped(), Amount::new(99_000_000));
        assert_eq!(quote.net_amount_out, Amount::new(98_029_507));
        assert_eq!(env.ledger.balance(&TRADER_ACCOUNT1) - before, 98_029_507);
    }

    #[test]
    fn one_percent_fee_base_output() {
        let mut env = Env::new(config(10_000, 0, 0));
        let pool = env.open(plain_asset(1), 10_000_000_000, plain_asset(2), 10_000_000_000);
        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::OneForZero,
            base_output(100_000_000, u64::MAX),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.amount_swapped(), Amount::new(101_010_102));
        assert_eq!(quote.amount_in, Amount::new(102_030_407));
        assert_eq!(quote.trade_fee, Amount::new(1_020_305));
        assert_eq!(quote.net_amount_out, Amount::new(100_000_000));
    }

    #[test]
    fn protocol_and_fund_fees_accrue_on_input_asset() {
        let mut env = Env::new(config(2_500, 120_000, 40_000));
        let pool = env.open(plain_asset(1), 1_000_000_000, plain_asset(2), 1_000_000_000);
        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_input(1_000_000, 0),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.trade_fee, Amount::new(2_500));
        assert_eq!(quote.protocol_fee, Amount::new(300));
        assert_eq!(quote.fund_fee, Amount::new(100));
        assert_eq!(quote.lp_fee, Amount::new(2_100));

        let Some(state) = env.pools.get(&pool.address()) else {
            panic!("pool stored");
        };
        assert_eq!(state.fees0().protocol, Amount::new(300));
        assert_eq!(state.fees0().fund, Amount::new(100));
        assert_eq!(state.fees1().protocol, Amount::ZERO);

        let vaults = env.vaults(&pool.address());
        let Ok((reserve0, _)) = state.tradable_reserves(&vaults) else {
            panic!("expected Ok");
        };
        assert_eq!(reserve0.get(), vaults.vault0.get() - 400);
    }

    #[test]
    fn base_output_exact_and_slippage() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_output(90, 98)),
            Err(AmmError::SlippageExceeded {
                limit: 98,
                actual: 99
            })
        );
        let Ok(quote) = env.swap(&pool.address(), SwapDirection::ZeroForOne, base_output(90, 99))
        else {
            panic!("expected Ok");
        };
        assert_eq!(quote.amount_in, Amount::new(99));
    }

    #[test]
    fn base_input_slippage_leaves_everything_untouched() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        let vaults = env.vaults(&pool.address());
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(100, 91)),
            Err(AmmError::SlippageExceeded {
                limit: 91,
                actual: 90
            })
        );
        assert_eq!(env.vaults(&pool.address()), vaults);
        assert_eq!(env.pools.get(&pool.address()), Some(&pool));
    }

    #[test]
    fn dust_input_is_rejected() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(1, 0)),
            Err(AmmError::ZeroTradingTokens)
        );
    }

    #[test]
    fn draining_output_is_rejected() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        assert_eq!(
            env.swap(
                &pool.address(),
                SwapDirection::ZeroForOne,
                base_output(1_000, u64::MAX)
            ),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn foreign_config_is_rejected() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        let vaults = env.vaults(&pool.address());
        let Ok(other) = AmmConfig::new(
            0,
            addr(0x99),
            addr(0xC1),
            *env.config.fee_rates(),
            Amount::ZERO,
            *env.config.recipients(),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(
            SwapEngine::quote(&pool, &other, &vaults, SwapDirection::ZeroForOne, base_input(10, 0)),
            Err(AmmError::ConfigNotFound(0))
        );
    }

    // -- transfer fees ------------------------------------------------------

    #[test]
    fn base_output_nets_exact_amount_after_output_transfer_fee() {
        let Ok(fee) = TransferFeeConfig::new(BasisPoints::new(100), Amount::new(50_000_000)) else {
            panic!("expected Ok");
        };
        let taxed = plain_asset(2).with_transfer_fee(fee);
        let mut env = Env::new(config(2_500, 0, 0));
        let pool = env.open(plain_asset(1), 10_000_000_000, taxed, 10_000_000_000);
        let before = env.ledger.balance(&TRADER_ACCOUNT1);
        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_output(1_000_000, u64::MAX),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.output_transfer_fee, Amount::new(10_102));
        assert_eq!(quote.gross_amount_out, Amount::new(1_010_102));
        assert_eq!(env.ledger.balance(&TRADER_ACCOUNT1) - before, 1_000_000);
    }

    #[test]
    fn base_input_pays_input_transfer_fee_first() {
        let Ok(fee) = TransferFeeConfig::new(BasisPoints::new(100), Amount::new(50_000_000)) else {
            panic!("expected Ok");
        };
        let taxed = plain_asset(1).with_transfer_fee(fee);
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(taxed, 10_000_000_000, plain_asset(2), 10_000_000_000);
        let before = env.ledger.balance(&TRADER_ACCOUNT0);
        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_input(1_000_000, 0),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.input_transfer_fee, Amount::new(10_000));
        assert_eq!(quote.amount_in_to_vault, Amount::new(990_000));
        assert_eq!(before - env.ledger.balance(&TRADER_ACCOUNT0), 1_000_000);
    }

    #[test]
    fn base_output_grosses_up_both_transfer_fees() {
        let Ok(fee) = TransferFeeConfig::new(BasisPoints::new(250), Amount::new(1_000_000)) else {
            panic!("expected Ok");
        };
        let mut env = Env::new(config(2_500, 120_000, 40_000));
        let pool = env.open(
            plain_asset(1).with_transfer_fee(fee),
            10_000_000_000,
            plain_asset(2).with_transfer_fee(fee),
            10_000_000_000,
        );
        let vaults = pool.addresses();
        assert_eq!(env.ledger.balance(&vaults.vault0), 9_999_000_000);
        let payer_before = env.ledger.balance(&TRADER_ACCOUNT0);
        let recipient_before = env.ledger.balance(&TRADER_ACCOUNT1);

        let Ok(quote) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_output(5_000_000, 5_275_588),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.output_transfer_fee, Amount::new(128_206));
        assert_eq!(quote.gross_amount_out, Amount::new(5_128_206));
        assert_eq!(quote.amount_in_to_vault, Amount::new(5_143_698));
        assert_eq!(quote.trade_fee, Amount::new(12_860));
        assert_eq!(quote.input_transfer_fee, Amount::new(131_890));
        assert_eq!(quote.amount_in, Amount::new(5_275_588));
        assert_eq!(quote.protocol_fee, Amount::new(1_543));
        assert_eq!(quote.fund_fee, Amount::new(514));

        assert_eq!(payer_before - env.ledger.balance(&TRADER_ACCOUNT0), 5_275_588);
        assert_eq!(env.ledger.balance(&vaults.vault0), 9_999_000_000 + 5_143_698);
        assert_eq!(env.ledger.balance(&vaults.vault1), 9_999_000_000 - 5_128_206);
        assert_eq!(env.ledger.balance(&TRADER_ACCOUNT1) - recipient_before, 5_000_000);

        // one unit less headroom trips slippage
        let Err(AmmError::SlippageExceeded { limit, .. }) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_output(5_000_000, 5_000_000),
        ) else {
            panic!("expected SlippageExceeded");
        };
        assert_eq!(limit, 5_000_000);
    }

    // -- execution ----------------------------------------------------------

    #[test]
    fn paused_and_unopened_pools_reject_swaps() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        env.now = pool.open_time() - 1;
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(100, 0)),
            Err(AmmError::PoolNotOpen {
                open_time: pool.open_time(),
                now: pool.open_time() - 1
            })
        );
        env.now = pool.open_time();
        if let Some(state) = env.pools.get_mut(&pool.address()) {
            state.set_status(PoolStatus::Paused);
        }
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(100, 0)),
            Err(AmmError::PoolPaused)
        );
    }

    #[test]
    fn reentry_is_rejected() {
        let mut env = Env::new(config(0, 0, 0));
        let pool = env.open(plain_asset(1), 1_000, plain_asset(2), 1_000);
        if let Some(state) = env.pools.get_mut(&pool.address()) {
            assert!(state.begin_operation().is_ok());
        }
        assert_eq!(
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(100, 0)),
            Err(AmmError::ReentrantCall)
        );
        assert_eq!(env.ledger.log.len(), 2);
    }

    #[test]
    fn failed_transfer_restores_pool() {
        let mut env = Env::new(config(2_500, 120_000, 40_000));
        let pool = env.open(plain_asset(1), 1_000_000_000, plain_asset(2), 1_000_000_000);
        env.ledger.reject_mint = Some(addr(2));
        let Err(AmmError::TransferFailed(e)) = env.swap(
            &pool.address(),
            SwapDirection::ZeroForOne,
            base_input(1_000_000, 0),
        ) else {
            panic!("expected TransferFailed");
        };
        assert_eq!(e.reason(), "mint frozen");
        let Some(state) = env.pools.get(&pool.address()) else {
            panic!("pool stored");
        };
        assert_eq!(state, &pool);
        assert!(!state.is_in_progress());
    }

    #[test]
    fn hook_transfers_run_last_with_resolved_accounts() {
        let list = addr(0x71);
        let hook_program = addr(0x70);
        let hooked =
            plain_asset(1).with_transfer_hook(TransferHookConfig::new(hook_program, list));
        let mut env = Env::new(config(0, 0, 0));
        let Ok(data) = pack_extra_account_metas(&[ExtraAccountMeta::fixed(addr(0x72), false, true)])
        else {
            panic!("expected Ok");
        };
        env.account_data.insert(list, data);
        let pool = env.open(hooked, 1_000_000, plain_asset(2), 1_000_000);

        // Initialization: plain deposit, then the hooked one.
        assert_eq!(env.ledger.log[0].mint, addr(2));
        assert_eq!(env.ledger.log[1].mint, addr(1));

        let Ok(_) = env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(1_000, 0))
        else {
            panic!("expected Ok");
        };
        let output = &env.ledger.log[2];
        let input = &env.ledger.log[3];
        assert_eq!(output.mint, addr(2));
        assert!(output.extra_accounts.is_empty());
        assert_eq!(input.mint, addr(1));
        assert_eq!(input.leg.source, TRADER_ACCOUNT0);
        assert_eq!(
            input.extra_accounts,
            vec![
                AccountMeta::writable(addr(0x72)),
                AccountMeta::readonly(hook_program),
                AccountMeta::readonly(list),
            ]
        );
    }

    #[test]
    fn unresolvable_hook_aborts_before_any_transfer() {
        let list = addr(0x71);
        let hooked = plain_asset(2).with_transfer_hook(TransferHookConfig::new(addr(0x70), list));
        let mut env = Env::new(config(0, 0, 0));
        let Ok(data) = pack_extra_account_metas(&[]) else {
            panic!("expected Ok");
        };
        env.account_data.insert(list, data);
        let pool = env.open(plain_asset(1), 1_000_000, hooked, 1_000_000);
        env.account_data.clear();
        let logged = env.ledger.log.len();

        let Err(AmmError::HookAccountResolutionFailure(_)) =
            env.swap(&pool.address(), SwapDirection::ZeroForOne, base_input(1_000, 0))
        else {
            panic!("expected HookAccountResolutionFailure");
        };
        assert_eq!(env.ledger.log.len(), logged);
    }
}
