//! Raw token amount with checked arithmetic.

use core::fmt;

/// A raw token amount in the asset's smallest unit.
///
/// Ledger balances are `u64`; every pricing formula widens to `u128` for
/// its intermediates and narrows back with a checked conversion, so a
/// result that does not fit is an error rather than a truncation.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::Amount;
///
/// assert_eq!(Amount::new(10).checked_sub(&Amount::new(3)), Some(Amount::new(7)));
/// assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates an `Amount` from a raw `u64`.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Narrows a `u128` intermediate, returning `None` if it does not fit.
    pub const fn from_u128(value: u128) -> Option<Self> {
        if value > u64::MAX as u128 {
            None
        } else {
            Some(Self(value as u64))
        }
    }

    /// Returns the underlying `u64`.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the value widened to `u128`.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0 as u128
    }

    /// Returns `true` if the amount is zero.
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

    /// Returns the smaller of two amounts.
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
