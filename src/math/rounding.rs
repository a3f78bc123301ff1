//! Rounding direction and rounded integer division.
//!
//! Every division in the engine states which way it rounds.  The rule is
//! that rounding always favours the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Output leaving the vault | [`Rounding::Down`] |
//! | Input required from the payer | [`Rounding::Up`] |
//! | Trade fee | [`Rounding::Up`] |
//! | Protocol / fund share of the trade fee | [`Rounding::Down`] |
//!
//! # Examples
//!
//! ```
//! use cpswap_engine::math::{div_round, Rounding};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

/// Direction in which a non-exact quotient is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    Down,
}

/// Divides two `u128` values, rounding as requested.
///
/// Returns [`None`] if `denominator` is zero.  Ceiling division never
/// overflows, even for `numerator == u128::MAX`.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        Rounding::Up => {
            // quotient < u128::MAX whenever a remainder exists
            if numerator % denominator == 0 {
                Some(quotient)
            } else {
                Some(quotient + 1)
            }
        }
    }
}
