//! Canonically ordered pair of distinct assets.

use super::{Address, AssetDescriptor, SwapDirection};
use crate::error::AmmError;

/// The two assets of a pool, ordered so that `asset0.mint < asset1.mint`
/// by raw byte comparison.
///
/// The ordering is load-bearing: it makes the pool address a pure function
/// of the unordered pair and gives every swap an unambiguous direction.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::{Address, AssetDescriptor, AssetPair};
///
/// let program = Address::from_bytes([9u8; 32]);
/// let a = AssetDescriptor::new(Address::from_bytes([1u8; 32]), program, 6);
/// let b = AssetDescriptor::new(Address::from_bytes([2u8; 32]), program, 9);
///
/// let pair = AssetPair::new(b, a).expect("distinct mints");
/// assert_eq!(pair.asset0(), &a);
/// assert_eq!(pair.asset1(), &b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    asset0: AssetDescriptor,
    asset1: AssetDescriptor,
}

impl AssetPair {
    /// Orders two assets canonically.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if both share the same mint.
    pub fn new(a: AssetDescriptor, b: AssetDescriptor) -> Result<Self, AmmError> {
        Self::canonicalize(a, (), b, ()).map(|(pair, (), ())| pair)
    }

    /// Orders two assets canonically, carrying a per-asset payload (an
    /// amount, a source account) along with each one.
    ///
    /// Returns the pair and the payloads in `(asset0, asset1)` order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if both share the same mint.
    pub fn canonicalize<T>(
        a: AssetDescriptor,
        payload_a: T,
        b: AssetDescriptor,
        payload_b: T,
    ) -> Result<(Self, T, T), AmmError> {
        match a.mint().cmp(&b.mint()) {
            core::cmp::Ordering::Less => Ok((
                Self {
                    asset0: a,
                    asset1: b,
                },
                payload_a,
                payload_b,
            )),
            core::cmp::Ordering::Greater => Ok((
                Self {
                    asset0: b,
                    asset1: a,
                },
                payload_b,
                payload_a,
            )),
            core::cmp::Ordering::Equal => Err(AmmError::InvalidAsset(
                "pool requires two distinct mints",
            )),
        }
    }

    /// Returns the asset with the lower mint.
    #[must_use]
    pub const fn asset0(&self) -> &AssetDescriptor {
        &self.asset0
    }

    /// Returns the asset with the higher mint.
    #[must_use]
    pub const fn asset1(&self) -> &AssetDescriptor {
        &self.asset1
    }

    /// Returns `(input, output)` descriptors for a swap direction.
    #[must_use]
    pub const fn directed(&self, direction: SwapDirection) -> (&AssetDescriptor, &AssetDescriptor) {
        match direction {
            SwapDirection::ZeroForOne => (&self.asset0, &self.asset1),
            SwapDirection::OneForZero => (&self.asset1, &self.asset0),
        }
    }

    /// Returns the swap direction that sells `input_mint`, or `None` if the
    /// mint is not part of the pair.
    #[must_use]
    pub fn direction_for_input(&self, input_mint: &Address) -> Option<SwapDirection> {
        if *input_mint == self.asset0.mint() {
            Some(SwapDirection::ZeroForOne)
        } else if *input_mint == self.asset1.mint() {
            Some(SwapDirection::OneForZero)
        } else {
            None
        }
    }
}
