//! LP-share quantities.

use core::fmt;

/// A quantity of LP shares: a claim on a proportional part of a pool's
/// reserves.
///
/// Kept distinct from [`Amount`](super::Amount) because it never denotes
/// a quantity of either pooled asset.  At initialization the total supply
/// is `floor(sqrt(reserve0 × reserve1))`, which always fits in `u64` for
/// `u64` reserves.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::LpShares;
///
/// let total = LpShares::new(10_000);
/// let locked = LpShares::new(100);
/// assert_eq!(total.checked_sub(&locked), Some(LpShares::new(9_900)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpShares(u64);

impl LpShares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a share quantity from a raw `u64`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64`.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for LpShares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
