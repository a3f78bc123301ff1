//! Unified error types for the swap engine.
//!
//! Every fallible operation in the crate returns [`AmmError`].  An error
//! always aborts the whole operation: no reserve, fee-counter or LP-supply
//! mutation survives a failed call.
//!
//! Only [`AmmError::SlippageExceeded`], [`AmmError::PoolPaused`] and
//! [`AmmError::PoolNotOpen`] are expected, recoverable conditions (see
//! [`AmmError::is_recoverable`]); everything else points at a programming
//! or configuration defect in the caller.

use thiserror::Error;

/// Failure reported by the external transfer collaborator.
///
/// The engine never inspects the reason; it is carried verbatim inside
/// [`AmmError::TransferFailed`] or [`AmmError::CreateFeePaymentFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TransferError {
    reason: String,
}

impl TransferError {
    /// Creates a new transfer error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason reported by the collaborator.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Error taxonomy for configuration, pool initialization, swaps, fee
/// arithmetic and transfer-hook resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A fee rate lies outside `[0, denominator]`, or the protocol and fund
    /// shares together exceed the whole trade fee.
    #[error("invalid fee rate: {0}")]
    InvalidFeeRate(&'static str),

    /// An AMM config with this index already exists.
    #[error("amm config index {0} is already in use")]
    ConfigIndexInUse(u16),

    /// No AMM config is registered under this index.
    #[error("amm config index {0} not found")]
    ConfigNotFound(u16),

    /// One of the initial deposit amounts is zero.
    #[error("initial liquidity must be non-zero for both assets")]
    ZeroInitialLiquidity,

    /// The initial deposit is too small to cover the permanently locked LP
    /// amount.
    #[error("initial liquidity {lp_total} does not exceed the locked amount {locked}")]
    InitialLiquidityTooLow {
        /// LP shares the deposit would back.
        lp_total: u64,
        /// LP shares that are locked forever.
        locked: u64,
    },

    /// An asset's transfer fee would consume the entire amount in transit.
    #[error("transfer fee deducts the whole amount in transit")]
    DegenerateTransferFee,

    /// A pool for this config and asset pair already exists.
    #[error("pool already exists for this config and asset pair")]
    PoolAlreadyExists,

    /// No pool is stored under the given address.
    #[error("pool not found")]
    PoolNotFound,

    /// The flat pool-creation fee could not be paid.
    #[error("create fee payment failed: {0}")]
    CreateFeePaymentFailed(TransferError),

    /// The swap result violates the caller's slippage bound.
    #[error("slippage exceeded: limit {limit}, actual {actual}")]
    SlippageExceeded {
        /// The caller's `min_amount_out` or `max_amount_in`.
        limit: u64,
        /// The amount the swap would actually produce or require.
        actual: u64,
    },

    /// Swaps are disabled on this pool.
    #[error("pool is paused")]
    PoolPaused,

    /// The pool does not accept swaps before its open time.
    #[error("pool opens at {open_time}, current time {now}")]
    PoolNotOpen {
        /// Pool open timestamp.
        open_time: u64,
        /// Timestamp supplied by the caller.
        now: u64,
    },

    /// A fee computed from an amount would exceed that amount.
    #[error("fee exceeds the amount it is taken from: {0}")]
    FeeExceedsAmount(&'static str),

    /// The asset's extra-account list is malformed or references accounts
    /// that cannot be resolved from the transfer context.
    #[error("transfer hook account resolution failed: {0}")]
    HookAccountResolutionFailure(&'static str),

    /// An intermediate computation left the representable range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Division by zero in a pricing formula.
    #[error("division by zero")]
    DivisionByZero,

    /// The two assets of a pool must be distinct.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// The swap would produce (or request) zero tokens.
    #[error("swap amount rounds to zero tokens")]
    ZeroTradingTokens,

    /// The pool cannot provide the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The post-swap constant product would be smaller than before.
    #[error("constant-product invariant would decrease")]
    InvariantViolation,

    /// The pool is already in the middle of an operation.
    #[error("pool re-entered while an operation is in progress")]
    ReentrantCall,

    /// The transfer collaborator rejected an asset movement.
    #[error("transfer failed: {0}")]
    TransferFailed(TransferError),

    /// The collaborator credited a different amount than the engine
    /// predicted from the asset's transfer-fee configuration.
    #[error("transfer credited {actual}, expected {expected}")]
    TransferAmountMismatch {
        /// Amount the engine predicted.
        expected: u64,
        /// Amount the collaborator reported.
        actual: u64,
    },

    /// The inverse transfer fee does not reproduce itself when applied
    /// forwards.
    #[error("inverse transfer fee does not match the forward fee")]
    TransferFeeCalculationMismatch,
}

impl AmmError {
    /// Returns `true` for conditions a caller can recover from by retrying
    /// with new parameters or at a later time.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SlippageExceeded { .. } | Self::PoolPaused | Self::PoolNotOpen { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_errors() {
        assert!(AmmError::PoolPaused.is_recoverable());
        assert!(AmmError::SlippageExceeded { limit: 1, actual: 0 }.is_recoverable());
        assert!(AmmError::PoolNotOpen {
            open_time: 10,
            now: 5
        }
        .is_recoverable());
    }

    #[test]
    fn fatal_errors() {
        assert!(!AmmError::ConfigIndexInUse(0).is_recoverable());
        assert!(!AmmError::ArithmeticOverflow("x").is_recoverable());
        assert!(!AmmError::HookAccountResolutionFailure("x").is_recoverable());
    }

    #[test]
    fn display_carries_context() {
        let e = AmmError::SlippageExceeded {
            limit: 100,
            actual: 99,
        };
        assert_eq!(e.to_string(), "slippage exceeded: limit 100, actual 99");
        let e = AmmError::CreateFeePaymentFailed(TransferError::new("insufficient lamports"));
        assert_eq!(
            e.to_string(),
            "create fee payment failed: insufficient lamports"
        );
    }

    #[test]
    fn transfer_error_reason() {
        let e = TransferError::new("frozen account");
        assert_eq!(e.reason(), "frozen account");
    }
}
