//! Swap direction and swap specification.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// Which pool asset is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell asset0, receive asset1.
    ZeroForOne,
    /// Sell asset1, receive asset0.
    OneForZero,
}

impl SwapDirection {
    /// Maps the `input_is_asset0` flag to a direction.
    #[must_use]
    pub const fn from_input_is_asset0(input_is_asset0: bool) -> Self {
        if input_is_asset0 {
            Self::ZeroForOne
        } else {
            Self::OneForZero
        }
    }

    /// Returns `true` if asset0 is the input.
    #[must_use]
    pub const fn input_is_asset0(&self) -> bool {
        matches!(self, Self::ZeroForOne)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0->1"),
            Self::OneForZero => write!(f, "1->0"),
        }
    }
}

/// What drives a swap, together with the caller's slippage bound.
///
/// # Invariants
///
/// The driving amount is always non-zero.
///
/// # Examples
///
/// ```
/// use cpswap_engine::domain::{Amount, SwapSpec};
///
/// let spec = SwapSpec::base_input(Amount::new(1_000), Amount::new(900));
/// assert!(spec.is_ok());
/// assert!(SwapSpec::base_output(Amount::ZERO, Amount::MAX).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapSpec {
    /// Fixed input; the output must be at least `min_amount_out`.
    BaseInput {
        /// Amount the payer sends.
        amount_in: Amount,
        /// Smallest acceptable net output.
        min_amount_out: Amount,
    },
    /// Fixed net output; the input may be at most `max_amount_in`.
    BaseOutput {
        /// Amount the recipient must receive, after the output asset's own
        /// transfer fee.
        amount_out: Amount,
        /// Largest acceptable input.
        max_amount_in: Amount,
    },
}

impl SwapSpec {
    /// Creates a base-input specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroTradingTokens`] if `amount_in` is zero.
    pub fn base_input(amount_in: Amount, min_amount_out: Amount) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroTradingTokens);
        }
        Ok(Self::BaseInput {
            amount_in,
            min_amount_out,
        })
    }

    /// Creates a base-output specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroTradingTokens`] if `amount_out` is zero.
    pub fn base_output(
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> crate::error::Result<Self> {
        if amount_out.is_zero() {
            return Err(AmmError::ZeroTradingTokens);
        }
        Ok(Self::BaseOutput {
            amount_out,
            max_amount_in,
        })
    }

    /// Returns `true` for [`SwapSpec::BaseInput`].
    #[must_use]
    pub const fn is_base_input(&self) -> bool {
        matches!(self, Self::BaseInput { .. })
    }

    /// Returns the driving amount regardless of variant.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::BaseInput { amount_in, .. } => *amount_in,
            Self::BaseOutput { amount_out, .. } => *amount_out,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseInput {
                amount_in,
                min_amount_out,
            } => write!(f, "BaseInput(in={amount_in}, min_out={min_amount_out})"),
            Self::BaseOutput {
                amount_out,
                max_amount_in,
            } => write!(f, "BaseOutput(out={amount_out}, max_in={max_amount_in})"),
        }
    }
}
