//! Property-based tests using `proptest` for pricing invariants.
//!
//! 1. **Invariant preservation**: the product of tradable reserves never
//!    decreases across a quoted swap, with or without transfer fees on
//!    either asset.
//! 2. **Fee conservation**: protocol, fund and LP shares sum to the trade
//!    fee.
//! 3. **Round trips**: buying back what was just sold costs at least what
//!    was received; buying the output of a sale costs at most the input.
//! 4. **Canonical ordering**: pool creation does not depend on argument
//!    order.
//! 5. **Inverse transfer fee**: grossing up then deducting yields the
//!    requested amount.

use proptest::prelude::*;

use super::test_support::{addr, config, plain_asset};
use super::{PoolAddresses, PoolState, SwapEngine, VaultBalances};
use crate::config::AmmConfig;
use crate::domain::{
    Amount, AssetDescriptor, AssetPair, BasisPoints, FeeRate, LpShares, SwapDirection, SwapQuote,
    TransferFeeConfig,
};
use crate::error::{AmmError, Result};
use crate::fees::FeeCalculator;
use crate::math::ConstantProductCurve;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(mint: u8, fee: Option<TransferFeeConfig>) -> AssetDescriptor {
    match fee {
        Some(fee) => plain_asset(mint).with_transfer_fee(fee),
        None => plain_asset(mint),
    }
}

fn make_pool(
    cfg: &AmmConfig,
    fee0: Option<TransferFeeConfig>,
    fee1: Option<TransferFeeConfig>,
) -> PoolState {
    let Ok(pair) = AssetPair::new(asset(1, fee0), asset(2, fee1)) else {
        panic!("valid pair");
    };
    let addresses = PoolAddresses {
        pool: addr(0x10),
        authority: addr(0x11),
        vault0: addr(0x12),
        vault1: addr(0x13),
        lp_mint: addr(0x14),
    };
    PoolState::new(addresses, cfg.address(), cfg.index(), pair, LpShares::new(1), 0, 0)
}

fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000_000_000
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    any::<bool>().prop_map(SwapDirection::from_input_is_asset0)
}

/// `(trade, protocol, fund)` with `protocol + fund ≤ 1e6`.
fn rates_strategy() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..=100_000, 0u64..=1_000_000).prop_flat_map(|(trade, protocol)| {
        (Just(trade), Just(protocol), 0u64..=(1_000_000 - protocol))
    })
}

/// No transfer fee, or up to 20% with an arbitrary cap.
fn transfer_fee_strategy() -> impl Strategy<Value = Option<TransferFeeConfig>> {
    prop_oneof![
        Just(None),
        (0u16..=2_000, 0u64..=1_000_000_000)
            .prop_map(|(bp, max)| TransferFeeConfig::new(BasisPoints::new(bp), Amount::new(max)).ok()),
    ]
}

fn directed(vaults: &VaultBalances, direction: SwapDirection) -> (Amount, Amount) {
    match direction {
        SwapDirection::ZeroForOne => (vaults.vault0, vaults.vault1),
        SwapDirection::OneForZero => (vaults.vault1, vaults.vault0),
    }
}

/// A base-input quote may only fail because the output rounds to zero;
/// such cases are rejected, and proptest fails the run if too many are.
fn expect_sale(result: Result<SwapQuote>) -> core::result::Result<SwapQuote, TestCaseError> {
    match result {
        Ok(quote) => Ok(quote),
        Err(AmmError::ZeroTradingTokens) => Err(TestCaseError::reject("output rounds to zero")),
        Err(e) => Err(TestCaseError::fail(format!("unexpected base-input error: {e}"))),
    }
}

/// Base-output quotes in these properties always stay clear of the
/// reserve, so any error is a failure.
fn expect_purchase(result: Result<SwapQuote>) -> core::result::Result<SwapQuote, TestCaseError> {
    result.map_err(|e| TestCaseError::fail(format!("unexpected base-output error: {e}")))
}

// ---------------------------------------------------------------------------
// Property 1: Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_invariant_preserved_base_input(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        (trade, protocol, fund) in rates_strategy(),
        fee0 in transfer_fee_strategy(),
        fee1 in transfer_fee_strategy(),
        direction in direction_strategy(),
        fraction in 1u64..=1_000,
    ) {
        let cfg = config(trade, protocol, fund);
        let pool = make_pool(&cfg, fee0, fee1);
        let vaults = VaultBalances::new(Amount::new(r0), Amount::new(r1));
        let (r_in, r_out) = directed(&vaults, direction);
        let amount_in = (r_in.get() / 1_000 * fraction).max(1);

        let quote = expect_sale(SwapEngine::swap_base_input(
            &pool, &cfg, &vaults, direction, Amount::new(amount_in), Amount::ZERO,
        ))?;
        prop_assert_eq!(
            quote.amount_in_to_vault.get() + quote.input_transfer_fee.get(),
            amount_in
        );
        prop_assert_eq!(
            quote.net_amount_out.get() + quote.output_transfer_fee.get(),
            quote.gross_amount_out.get()
        );
        let new_in = r_in.get() + quote.amount_in_to_vault.get()
            - quote.protocol_fee.get() - quote.fund_fee.get();
        let new_out = r_out.get() - quote.gross_amount_out.get();
        prop_assert!(
            ConstantProductCurve::invariant(Amount::new(new_in), Amount::new(new_out))
                >= ConstantProductCurve::invariant(r_in, r_out)
        );
        prop_assert!(quote.gross_amount_out < r_out);
    }

    #[test]
    fn prop_invariant_preserved_base_output(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        (trade, protocol, fund) in rates_strategy(),
        fee0 in transfer_fee_strategy(),
        fee1 in transfer_fee_strategy(),
        direction in direction_strategy(),
        fraction in 1u64..=700,
    ) {
        let cfg = config(trade, protocol, fund);
        let pool = make_pool(&cfg, fee0, fee1);
        let vaults = VaultBalances::new(Amount::new(r0), Amount::new(r1));
        let (r_in, r_out) = directed(&vaults, direction);
        let amount_out = (r_out.get() / 1_000 * fraction).max(1);

        let quote = expect_purchase(SwapEngine::swap_base_output(
            &pool, &cfg, &vaults, direction, Amount::new(amount_out), Amount::MAX,
        ))?;
        prop_assert_eq!(quote.net_amount_out, Amount::new(amount_out));
        prop_assert_eq!(
            quote.amount_in_to_vault.get() + quote.input_transfer_fee.get(),
            quote.amount_in.get()
        );
        let new_in = r_in.get() + quote.amount_in_to_vault.get()
            - quote.protocol_fee.get() - quote.fund_fee.get();
        let new_out = r_out.get() - quote.gross_amount_out.get();
        prop_assert!(
            ConstantProductCurve::invariant(Amount::new(new_in), Amount::new(new_out))
                >= ConstantProductCurve::invariant(r_in, r_out)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Fee conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fee_split_sums_to_trade_fee(
        amount in 0u64..=u64::MAX / 2,
        (trade, protocol, fund) in rates_strategy(),
    ) {
        let Ok(fee) = FeeCalculator::trade_fee(Amount::new(amount), FeeRate::new(trade)) else {
            return Err(TestCaseError::fail("valid rate"));
        };
        prop_assert!(fee.get() <= amount);
        let Ok(split) = FeeCalculator::split_protocol_and_fund(
            fee, FeeRate::new(protocol), FeeRate::new(fund),
        ) else {
            return Err(TestCaseError::fail("valid shares"));
        };
        prop_assert_eq!(split.protocol.get() + split.fund.get() + split.lp.get(), fee.get());
    }

    #[test]
    fn prop_trade_fee_monotonic(
        small in 0u64..=1_000_000_000,
        extra in 0u64..=1_000_000_000,
        trade in 0u64..=1_000_000,
    ) {
        let rate = FeeRate::new(trade);
        let (Ok(a), Ok(b)) = (
            FeeCalculator::trade_fee(Amount::new(small), rate),
            FeeCalculator::trade_fee(Amount::new(small + extra), rate),
        ) else {
            return Err(TestCaseError::fail("valid rate"));
        };
        prop_assert!(a <= b);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Round trips
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_buying_back_costs_at_least_proceeds(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        trade in 0u64..=100_000,
        fee0 in transfer_fee_strategy(),
        fee1 in transfer_fee_strategy(),
        direction in direction_strategy(),
        fraction in 1u64..=500,
    ) {
        let cfg = config(trade, 0, 0);
        let pool = make_pool(&cfg, fee0, fee1);
        let vaults = VaultBalances::new(Amount::new(r0), Amount::new(r1));
        let (r_in, _) = directed(&vaults, direction);
        let sold = Amount::new((r_in.get() / 1_000 * fraction).max(1));

        let sale = expect_sale(SwapEngine::swap_base_input(
            &pool, &cfg, &vaults, direction, sold, Amount::ZERO,
        ))?;
        let buy_back = expect_purchase(SwapEngine::swap_base_output(
            &pool, &cfg, &vaults, direction.reverse(), sold, Amount::MAX,
        ))?;
        prop_assert!(
            buy_back.amount_in >= sale.net_amount_out,
            "buy back {} < proceeds {}",
            buy_back.amount_in.get(),
            sale.net_amount_out.get()
        );
    }

    #[test]
    fn prop_exact_output_never_costs_more_than_exact_input(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        (trade, protocol, fund) in rates_strategy(),
        fee0 in transfer_fee_strategy(),
        fee1 in transfer_fee_strategy(),
        direction in direction_strategy(),
        fraction in 1u64..=1_000,
    ) {
        let cfg = config(trade, protocol, fund);
        let pool = make_pool(&cfg, fee0, fee1);
        let vaults = VaultBalances::new(Amount::new(r0), Amount::new(r1));
        let (r_in, _) = directed(&vaults, direction);
        let amount_in = Amount::new((r_in.get() / 1_000 * fraction).max(1));

        let sale = expect_sale(SwapEngine::swap_base_input(
            &pool, &cfg, &vaults, direction, amount_in, Amount::ZERO,
        ))?;
        prop_assume!(!sale.net_amount_out.is_zero());
        let purchase = expect_purchase(SwapEngine::swap_base_output(
            &pool, &cfg, &vaults, direction, sale.net_amount_out, Amount::MAX,
        ))?;
        prop_assert!(purchase.amount_in <= amount_in);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Canonical ordering
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_canonicalization_commutes(
        a in 0u8..=255,
        b in 0u8..=255,
        x in any::<u64>(),
        y in any::<u64>(),
    ) {
        prop_assume!(a != b);
        let (Ok(forward), Ok(reverse)) = (
            AssetPair::canonicalize(plain_asset(a), x, plain_asset(b), y),
            AssetPair::canonicalize(plain_asset(b), y, plain_asset(a), x),
        ) else {
            return Err(TestCaseError::fail("distinct mints must canonicalize"));
        };
        prop_assert_eq!(forward, reverse);
        prop_assert!(forward.0.asset0().mint() < forward.0.asset1().mint());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Inverse transfer fee
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_inverse_transfer_fee_round_trips(
        post in 0u64..=1_000_000_000_000,
        bp in 0u16..10_000,
        max in 0u64..=1_000_000_000,
    ) {
        let Ok(cfg) = TransferFeeConfig::new(BasisPoints::new(bp), Amount::new(max)) else {
            return Err(TestCaseError::fail("valid basis points"));
        };
        let Ok(fee) = FeeCalculator::external_transfer_fee_inverse(Amount::new(post), &cfg) else {
            return Err(TestCaseError::fail("inverse fee must be consistent"));
        };
        prop_assert!(fee.get() <= max);
        let Ok((net, forward_fee)) = FeeCalculator::amount_after_transfer_fee(
            Amount::new(post + fee.get()),
            Some(&cfg),
        ) else {
            return Err(TestCaseError::fail("forward fee"));
        };
        prop_assert_eq!(forward_fee, fee);
        prop_assert_eq!(net, Amount::new(post));
    }
}
