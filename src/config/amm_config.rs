//! AMM configuration records.

use crate::constants::FEE_RATE_DENOMINATOR;
use crate::domain::{Address, Amount, FeeRate};
use crate::error::{AmmError, Result};

/// The three fee rates of an AMM config, in parts per million.
///
/// `trade_fee_rate` is charged on swap input and must stay below 100%, as
/// a pool that keeps the whole input can never price an exact output.
/// `protocol_fee_rate` and `fund_fee_rate` are shares *of the trade fee*,
/// not of the input, so together they may not exceed 100%.
///
/// # Examples
///
/// ```
/// use cpswap_engine::config::FeeRates;
/// use cpswap_engine::domain::FeeRate;
///
/// let ok = FeeRates::new(FeeRate::new(2_500), FeeRate::new(120_000), FeeRate::new(40_000));
/// assert!(ok.is_ok());
///
/// let over = FeeRates::new(FeeRate::new(2_500), FeeRate::new(700_000), FeeRate::new(400_000));
/// assert!(over.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFeeRates"))]
pub struct FeeRates {
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFeeRates {
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFeeRates> for FeeRates {
    type Error = AmmError;

    fn try_from(raw: RawFeeRates) -> Result<Self> {
        Self::new(raw.trade_fee_rate, raw.protocol_fee_rate, raw.fund_fee_rate)
    }
}

impl FeeRates {
    /// Creates a validated set of rates.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] if the trade fee rate is 100%
    /// or more, a share exceeds 100%, or the protocol and fund shares
    /// exceed 100% together.
    pub fn new(
        trade_fee_rate: FeeRate,
        protocol_fee_rate: FeeRate,
        fund_fee_rate: FeeRate,
    ) -> Result<Self> {
        let rates = Self {
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
        };
        rates.validate()?;
        Ok(rates)
    }

    /// Re-checks every rate invariant.
    ///
    /// # Errors
    ///
    /// See [`FeeRates::new`].
    pub fn validate(&self) -> Result<()> {
        self.trade_fee_rate.validate("trade fee rate exceeds 100%")?;
        if self.trade_fee_rate == FeeRate::MAX {
            return Err(AmmError::InvalidFeeRate("trade fee rate must be below 100%"));
        }
        self.protocol_fee_rate
            .validate("protocol fee rate exceeds 100%")?;
        self.fund_fee_rate.validate("fund fee rate exceeds 100%")?;
        if self.protocol_fee_rate.get() + self.fund_fee_rate.get() > FEE_RATE_DENOMINATOR {
            return Err(AmmError::InvalidFeeRate(
                "protocol and fund fee rates exceed 100% together",
            ));
        }
        Ok(())
    }

    /// Fee charged on swap input.
    #[must_use]
    pub const fn trade_fee_rate(&self) -> FeeRate {
        self.trade_fee_rate
    }

    /// Protocol share of the trade fee.
    #[must_use]
    pub const fn protocol_fee_rate(&self) -> FeeRate {
        self.protocol_fee_rate
    }

    /// Fund share of the trade fee.
    #[must_use]
    pub const fn fund_fee_rate(&self) -> FeeRate {
        self.fund_fee_rate
    }
}

/// Where the fees governed by a config are owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRecipients {
    /// Owner of accrued protocol fees.
    pub protocol_owner: Address,
    /// Owner of accrued fund fees.
    pub fund_owner: Address,
    /// Receives the flat pool-creation fee.
    pub create_fee_receiver: Address,
}

/// An immutable fee schedule shared by every pool created under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmConfig {
    index: u16,
    address: Address,
    authority: Address,
    fee_rates: FeeRates,
    create_fee: Amount,
    recipients: FeeRecipients,
}

impl AmmConfig {
    /// Creates a config record.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] if `fee_rates` fails
    /// validation.
    pub fn new(
        index: u16,
        address: Address,
        authority: Address,
        fee_rates: FeeRates,
        create_fee: Amount,
        recipients: FeeRecipients,
    ) -> Result<Self> {
        fee_rates.validate()?;
        Ok(Self {
            index,
            address,
            authority,
            fee_rates,
            create_fee,
            recipients,
        })
    }

    /// Unique index in the registry.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Address derived from the index.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account that created the config.
    #[must_use]
    pub const fn authority(&self) -> Address {
        self.authority
    }

    /// The fee schedule.
    #[must_use]
    pub const fn fee_rates(&self) -> &FeeRates {
        &self.fee_rates
    }

    /// Shortcut for `fee_rates().trade_fee_rate()`.
    #[must_use]
    pub const fn trade_fee_rate(&self) -> FeeRate {
        self.fee_rates.trade_fee_rate
    }

    /// Flat fee charged once per pool creation, in native currency.
    pub const fn create_fee(&self) -> Amount {
        self.create_fee
    }

    /// Fee recipients.
    #[must_use]
    pub const fn recipients(&self) -> &FeeRecipients {
        &self.recipients
    }
}
