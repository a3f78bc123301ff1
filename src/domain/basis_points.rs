//! Basis-point representation for external transfer-fee rates.

use core::fmt;

use crate::constants::MAX_BASIS_POINTS;

/// A percentage in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Only used to describe fees that an asset's own transfer program
/// deducts; the engine's own fees are [`FeeRate`](super::FeeRate)s.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::BasisPoints;
///
/// let bp = BasisPoints::new(100);
/// assert!(bp.is_valid_percent());
/// assert!(!bp.is_full());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(MAX_BASIS_POINTS);

    /// Creates a value from raw basis points.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BASIS_POINTS
    }

    /// Returns `true` for exactly 100%.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.0 == MAX_BASIS_POINTS
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
