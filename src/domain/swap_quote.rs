//! The full breakdown of a priced swap.

use super::{Amount, SwapDirection};

/// Which side of a swap the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapMode {
    /// The input amount was fixed.
    BaseInput,
    /// The net output amount was fixed.
    BaseOutput,
}

/// Every amount a swap moves, computed before any asset moves.
///
/// Amounts follow the flow of the input asset into the vault and the output
/// asset out of it:
///
/// ```text
/// amount_in ─(input transfer fee)─▶ amount_in_to_vault
///     = trade_fee (protocol + fund + lp) + amount swapped on the curve
/// gross_amount_out ─(output transfer fee)─▶ net_amount_out
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    /// Direction of the swap.
    pub direction: SwapDirection,
    /// Mode the quote was computed in.
    pub mode: SwapMode,
    /// What the payer sends.
    pub amount_in: Amount,
    /// Deducted by the input asset's transfer program in transit.
    pub input_transfer_fee: Amount,
    /// What lands in the input vault.
    pub amount_in_to_vault: Amount,
    /// Total trade fee charged on `amount_in_to_vault`.
    pub trade_fee: Amount,
    /// Protocol share of the trade fee, accrued to the pool counters.
    pub protocol_fee: Amount,
    /// Fund share of the trade fee, accrued to the pool counters.
    pub fund_fee: Amount,
    /// Remainder of the trade fee, left in the reserve for LPs.
    pub lp_fee: Amount,
    /// What leaves the output vault.
    pub gross_amount_out: Amount,
    /// Deducted by the output asset's transfer program in transit.
    pub output_transfer_fee: Amount,
    /// What the recipient receives.
    pub net_amount_out: Amount,
}

impl SwapQuote {
    /// Returns the input amount that actually traded against the curve.
    pub const fn amount_swapped(&self) -> Amount {
        Amount::new(
            self.amount_in_to_vault
                .get()
                .saturating_sub(self.trade_fee.get()),
        )
    }
}
