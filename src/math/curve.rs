//! Constant-product curve math (`x · y = k`), fee-free.
//!
//! Fees are applied around these functions by the swap engine; the curve
//! itself only moves amounts between two reserves.  All intermediates are
//! `u128`, which holds the product of any two `u64` reserves exactly.

use super::{div_round, isqrt, Rounding};
use crate::domain::{Amount, LpShares};
use crate::error::{AmmError, Result};

/// Stateless calculator for the constant-product invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Output for a fixed input: `floor(r_out × a / (r_in + a))`.
    ///
    /// Rounding down guarantees `(r_in + a)(r_out − out) ≥ r_in × r_out`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ArithmeticOverflow`] if `r_in + a` overflows `u64`
    ///   or the result does not fit.
    /// - [`AmmError::DivisionByZero`] if both `r_in` and `a` are zero.
    pub fn swap_base_input_without_fees(
        source_amount: Amount,
        swap_source_amount: Amount,
        swap_destination_amount: Amount,
    ) -> Result<Amount> {
        let numerator = swap_destination_amount.as_u128() * source_amount.as_u128();
        let denominator = swap_source_amount
            .get()
            .checked_add(source_amount.get())
            .ok_or(AmmError::ArithmeticOverflow("input reserve overflow"))?;
        let out = div_round(numerator, denominator as u128, Rounding::Down)
            .ok_or(AmmError::DivisionByZero)?;
        Amount::from_u128(out).ok_or(AmmError::ArithmeticOverflow("output amount overflow"))
    }

    /// Input for a fixed output: `ceil(r_in × b / (r_out − b))`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if `b ≥ r_out`.
    /// - [`AmmError::ArithmeticOverflow`] if the result does not fit `u64`.
    pub fn swap_base_output_without_fees(
        destination_amount: Amount,
        swap_source_amount: Amount,
        swap_destination_amount: Amount,
    ) -> Result<Amount> {
        if destination_amount >= swap_destination_amount {
            return Err(AmmError::InsufficientLiquidity);
        }
        let numerator = swap_source_amount.as_u128() * destination_amount.as_u128();
        let denominator = swap_destination_amount.as_u128() - destination_amount.as_u128();
        let input = div_round(numerator, denominator, Rounding::Up)
            .ok_or(AmmError::DivisionByZero)?;
        Amount::from_u128(input).ok_or(AmmError::ArithmeticOverflow("input amount overflow"))
    }

    /// `reserve0 × reserve1`, exact.
    #[must_use]
    pub const fn invariant(reserve0: Amount, reserve1: Amount) -> u128 {
        reserve0.as_u128() * reserve1.as_u128()
    }

    /// Fails unless the product of the reserves did not decrease.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] if `after < before`.
    pub fn check_invariant(before: (Amount, Amount), after: (Amount, Amount)) -> Result<()> {
        if Self::invariant(after.0, after.1) < Self::invariant(before.0, before.1) {
            return Err(AmmError::InvariantViolation);
        }
        Ok(())
    }

    /// Total LP supply for an initial deposit: `floor(sqrt(a0 × a1))`.
    #[must_use]
    pub const fn initial_lp_supply(amount0: Amount, amount1: Amount) -> LpShares {
        // sqrt of a product of two u64 values fits u64
        LpShares::new(isqrt(Self::invariant(amount0, amount1)) as u64)
    }
}
