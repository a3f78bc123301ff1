//! Fee rates in parts per million.

use core::fmt;

use crate::constants::FEE_RATE_DENOMINATOR;
use crate::error::AmmError;
use crate::math::{div_round, Rounding};

/// A fee rate expressed as a numerator over [`FEE_RATE_DENOMINATOR`]
/// (1 000 000 = 100%).
///
/// Used for the trade fee and for the protocol and fund shares carved out
/// of it.  Any `u64` can be held; [`validate`](Self::validate) rejects
/// values above the denominator.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::FeeRate;
///
/// let one_percent = FeeRate::new(10_000);
/// assert!(one_percent.is_valid());
/// assert!(!FeeRate::new(1_000_001).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate(u64);

impl FeeRate {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX: Self = Self(FEE_RATE_DENOMINATOR);

    /// Creates a rate from a raw parts-per-million value.
    #[must_use]
    pub const fn new(ppm: u64) -> Self {
        Self(ppm)
    }

    /// Returns the raw parts-per-million value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the rate lies in `[0, FEE_RATE_DENOMINATOR]`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 <= FEE_RATE_DENOMINATOR
    }

    /// Fails with [`AmmError::InvalidFeeRate`] if the rate exceeds 100%.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] carrying `what` as context.
    pub fn validate(&self, what: &'static str) -> crate::error::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AmmError::InvalidFeeRate(what))
        }
    }

    /// Computes `value × rate / FEE_RATE_DENOMINATOR` with explicit
    /// rounding, entirely in `u128`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the product overflows.
    pub fn apply(&self, value: u128, rounding: Rounding) -> crate::error::Result<u128> {
        let product = match value.checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(AmmError::ArithmeticOverflow("fee rate apply overflow")),
        };
        match div_round(product, FEE_RATE_DENOMINATOR as u128, rounding) {
            Some(v) => Ok(v),
            None => Err(AmmError::DivisionByZero),
        }
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}
