//! Fee arithmetic: the trade fee, its protocol/fund/LP split, and the
//! transfer fees imposed by the assets' own transfer programs.
//!
//! Rounding always favours the pool.  The trade fee rounds up; the protocol
//! and fund shares round down so the remainder stays with LPs; transfer
//! fees round up, as the transfer programs themselves do.
//!
//! # Examples
//!
//! ```
//! use cpswap_engine::domain::{Amount, FeeRate};
//! use cpswap_engine::fees::FeeCalculator;
//!
//! let fee = FeeCalculator::trade_fee(Amount::new(100_000_000), FeeRate::new(10_000));
//! assert_eq!(fee, Ok(Amount::new(1_000_000)));
//!
//! let split = FeeCalculator::split_protocol_and_fund(
//!     Amount::new(1_000_000),
//!     FeeRate::new(120_000),
//!     FeeRate::new(40_000),
//! )
//! .expect("valid rates");
//! assert_eq!(split.protocol, Amount::new(120_000));
//! assert_eq!(split.fund, Amount::new(40_000));
//! assert_eq!(split.lp, Amount::new(840_000));
//! ```

use crate::constants::{FEE_RATE_DENOMINATOR, MAX_BASIS_POINTS};
use crate::domain::{Amount, BasisPoints, FeeRate, TransferFeeConfig};
use crate::error::{AmmError, Result};
use crate::math::{div_round, CheckedArithmetic, Rounding};

/// The three destinations of a collected trade fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSplit {
    /// Accrued to the protocol fee counter.
    pub protocol: Amount,
    /// Accrued to the fund fee counter.
    pub fund: Amount,
    /// Left in the reserve for liquidity providers.
    pub lp: Amount,
}

impl FeeSplit {
    /// Sum of the three parts, which always equals the trade fee it was
    /// carved from.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] on overflow.
    pub fn total(&self) -> Result<Amount> {
        self.protocol.safe_add(&self.fund)?.safe_add(&self.lp)
    }
}

/// Stateless fee calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeCalculator;

impl FeeCalculator {
    /// Fails with [`AmmError::InvalidFeeRate`] if `rate` exceeds 100%.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn validate_rate(rate: FeeRate, what: &'static str) -> Result<()> {
        rate.validate(what)
    }

    /// `ceil(amount × rate / 1 000 000)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if `rate` exceeds 100%.
    /// - [`AmmError::FeeExceedsAmount`] if the fee would exceed `amount`.
    pub fn trade_fee(amount: Amount, rate: FeeRate) -> Result<Amount> {
        Self::validate_rate(rate, "trade fee rate exceeds 100%")?;
        let fee = rate.apply(amount.as_u128(), Rounding::Up)?;
        if fee > amount.as_u128() {
            return Err(AmmError::FeeExceedsAmount("trade fee"));
        }
        Amount::from_u128(fee).ok_or(AmmError::ArithmeticOverflow("trade fee overflow"))
    }

    /// Carves the protocol and fund shares out of a collected trade fee.
    ///
    /// `protocol = floor(fee × protocol_rate / D)`,
    /// `fund = floor(fee × fund_rate / D)`, and LPs keep the rest.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if either rate exceeds 100% or their
    ///   sum does.
    /// - [`AmmError::FeeExceedsAmount`] if the two shares exceed the fee.
    pub fn split_protocol_and_fund(
        trade_fee: Amount,
        protocol_fee_rate: FeeRate,
        fund_fee_rate: FeeRate,
    ) -> Result<FeeSplit> {
        Self::validate_rate(protocol_fee_rate, "protocol fee rate exceeds 100%")?;
        Self::validate_rate(fund_fee_rate, "fund fee rate exceeds 100%")?;
        if protocol_fee_rate.get() + fund_fee_rate.get() > FEE_RATE_DENOMINATOR {
            return Err(AmmError::InvalidFeeRate(
                "protocol and fund fee rates exceed 100% together",
            ));
        }

        let protocol = protocol_fee_rate.apply(trade_fee.as_u128(), Rounding::Down)?;
        let fund = fund_fee_rate.apply(trade_fee.as_u128(), Rounding::Down)?;
        let owed = protocol + fund;
        if owed > trade_fee.as_u128() {
            return Err(AmmError::FeeExceedsAmount("protocol and fund fees"));
        }

        // both parts are bounded by trade_fee, which is a u64
        Ok(FeeSplit {
            protocol: Amount::new(protocol as u64),
            fund: Amount::new(fund as u64),
            lp: Amount::new((trade_fee.as_u128() - owed) as u64),
        })
    }

    /// Fee the asset's transfer program deducts from a transfer of
    /// `amount`: `min(ceil(amount × bp / 10 000), maximum_fee)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] if `basis_points` exceeds 100%.
    pub fn external_transfer_fee(
        amount: Amount,
        basis_points: BasisPoints,
        maximum_fee: Amount,
    ) -> Result<Amount> {
        if !basis_points.is_valid_percent() {
            return Err(AmmError::InvalidFeeRate(
                "transfer fee basis points exceed 100%",
            ));
        }
        if basis_points.get() == 0 || amount.is_zero() {
            return Ok(Amount::ZERO);
        }
        let raw = div_round(
            amount.as_u128() * basis_points.get() as u128,
            MAX_BASIS_POINTS as u128,
            Rounding::Up,
        )
        .ok_or(AmmError::DivisionByZero)?;
        // raw <= amount, so it fits u64
        Ok(Amount::new(raw as u64).min(maximum_fee))
    }

    /// Splits `amount` in transit into `(net, fee)` for an asset with an
    /// optional transfer-fee extension.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::external_transfer_fee`] errors.
    pub fn amount_after_transfer_fee(
        amount: Amount,
        config: Option<&TransferFeeConfig>,
    ) -> Result<(Amount, Amount)> {
        let fee = match config {
            Some(c) => Self::external_transfer_fee(amount, c.basis_points(), c.maximum_fee())?,
            None => Amount::ZERO,
        };
        Ok((amount.safe_sub(&fee)?, fee))
    }

    /// Fee to add on top of `post_fee_amount` so that the recipient nets
    /// exactly `post_fee_amount`.
    ///
    /// The result is re-applied forwards and must reproduce itself.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if the basis points exceed 100%.
    /// - [`AmmError::ArithmeticOverflow`] if `post + fee` overflows.
    /// - [`AmmError::TransferFeeCalculationMismatch`] if the forward fee on
    ///   `post + fee` differs from `fee`.
    pub fn external_transfer_fee_inverse(
        post_fee_amount: Amount,
        config: &TransferFeeConfig,
    ) -> Result<Amount> {
        let bp = config.basis_points();
        let maximum_fee = config.maximum_fee();
        if !bp.is_valid_percent() {
            return Err(AmmError::InvalidFeeRate(
                "transfer fee basis points exceed 100%",
            ));
        }
        if post_fee_amount.is_zero() || bp.get() == 0 {
            return Ok(Amount::ZERO);
        }

        let fee = if bp.is_full() {
            maximum_fee
        } else {
            let denominator = (MAX_BASIS_POINTS - bp.get()) as u128;
            let pre = div_round(
                post_fee_amount.as_u128() * MAX_BASIS_POINTS as u128,
                denominator,
                Rounding::Up,
            )
            .ok_or(AmmError::DivisionByZero)?;
            let raw = pre - post_fee_amount.as_u128();
            if raw >= maximum_fee.as_u128() {
                maximum_fee
            } else {
                Amount::new(raw as u64)
            }
        };

        let pre_fee_amount = post_fee_amount
            .checked_add(&fee)
            .ok_or(AmmError::ArithmeticOverflow("pre-transfer-fee amount overflow"))?;
        let forward = Self::external_transfer_fee(pre_fee_amount, bp, maximum_fee)?;
        if forward != fee {
            return Err(AmmError::TransferFeeCalculationMismatch);
        }
        Ok(fee)
    }

    /// Smallest input whose remainder after the trade fee still covers
    /// `post_fee_amount`: `ceil(post × D / (D − rate))`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if `rate` is 100% or more.
    /// - [`AmmError::ArithmeticOverflow`] if the result does not fit `u64`.
    pub fn pre_trade_fee_amount(post_fee_amount: Amount, rate: FeeRate) -> Result<Amount> {
        Self::validate_rate(rate, "trade fee rate exceeds 100%")?;
        if rate.is_zero() {
            return Ok(post_fee_amount);
        }
        if rate == FeeRate::MAX {
            return Err(AmmError::InvalidFeeRate(
                "trade fee rate of 100% cannot be inverted",
            ));
        }
        let pre = div_round(
            post_fee_amount.as_u128() * FEE_RATE_DENOMINATOR as u128,
            (FEE_RATE_DENOMINATOR - rate.get()) as u128,
            Rounding::Up,
        )
        .ok_or(AmmError::DivisionByZero)?;
        Amount::from_u128(pre).ok_or(AmmError::ArithmeticOverflow("pre-trade-fee amount overflow"))
    }
}
