//! Keyed storage and creation of AMM configs.

use std::collections::BTreeMap;

use tracing::{info, warn};

use super::{AmmConfig, FeeRates, FeeRecipients};
use crate::constants::AMM_CONFIG_SEED;
use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::traits::AddressDeriver;

/// Persistent storage for [`AmmConfig`] records, keyed by index.
pub trait ConfigStore {
    /// Returns the config stored under `index`.
    fn get(&self, index: u16) -> Option<&AmmConfig>;

    /// Stores `config` under its index, replacing nothing: callers check
    /// [`contains`](Self::contains) first.
    fn insert(&mut self, config: AmmConfig);

    /// Number of stored configs.
    fn len(&self) -> usize;

    /// Returns `true` if a config is stored under `index`.
    fn contains(&self, index: u16) -> bool {
        self.get(index).is_some()
    }

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`ConfigStore`] backed by a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InMemoryConfigStore {
    configs: BTreeMap<u16, AmmConfig>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over stored configs in index order.
    pub fn iter(&self) -> impl Iterator<Item = &AmmConfig> {
        self.configs.values()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(&self, index: u16) -> Option<&AmmConfig> {
        self.configs.get(&index)
    }

    fn insert(&mut self, config: AmmConfig) {
        self.configs.entry(config.index()).or_insert(config);
    }

    fn len(&self) -> usize {
        self.configs.len()
    }
}

/// Creates and looks up AMM configs in a caller-owned [`ConfigStore`].
///
/// Holds no state of its own; every call goes straight to the borrowed
/// store.
///
/// # Examples
///
/// ```
/// use cpswap_engine::config::{AmmConfigRegistry, FeeRates, FeeRecipients, InMemoryConfigStore};
/// use cpswap_engine::domain::{Address, Amount, FeeRate};
/// use cpswap_engine::traits::AddressDeriver;
///
/// struct FirstByte;
/// impl AddressDeriver for FirstByte {
///     fn program_id(&self) -> Address { Address::from_bytes([0xaa; 32]) }
///     fn derive(&self, _program: &Address, seeds: &[&[u8]]) -> Address {
///         let mut bytes = [0u8; 32];
///         bytes[0] = seeds.last().and_then(|s| s.last()).copied().unwrap_or(0);
///         Address::from_bytes(bytes)
///     }
/// }
///
/// let mut store = InMemoryConfigStore::new();
/// let mut registry = AmmConfigRegistry::new(&mut store);
/// let rates = FeeRates::new(FeeRate::new(2_500), FeeRate::new(120_000), FeeRate::new(40_000))
///     .expect("valid rates");
///
/// let created = registry
///     .create_config(&FirstByte, 0, Address::zero(), rates, Amount::ZERO, FeeRecipients::default())
///     .expect("fresh index");
/// assert_eq!(registry.get_config(0), Ok(created));
/// assert!(registry.create_config(&FirstByte, 0, Address::zero(), rates, Amount::ZERO,
///     FeeRecipients::default()).is_err());
/// ```
pub struct AmmConfigRegistry<'a, S: ConfigStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: ConfigStore + ?Sized> AmmConfigRegistry<'a, S> {
    /// Wraps a store.
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Creates and stores the config for `index`.
    ///
    /// The config address is derived from `[AMM_CONFIG_SEED, index (BE)]`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if `fee_rates` fails validation.
    /// - [`AmmError::ConfigIndexInUse`] if `index` is taken.  The stored
    ///   config is left untouched.
    pub fn create_config<D: AddressDeriver + ?Sized>(
        &mut self,
        deriver: &D,
        index: u16,
        authority: Address,
        fee_rates: FeeRates,
        create_fee: Amount,
        recipients: FeeRecipients,
    ) -> Result<AmmConfig> {
        if self.store.contains(index) {
            warn!(index, "amm config index already in use");
            return Err(AmmError::ConfigIndexInUse(index));
        }
        let index_bytes = index.to_be_bytes();
        let address = deriver.derive_program_address(&[AMM_CONFIG_SEED, &index_bytes]);
        let config = AmmConfig::new(index, address, authority, fee_rates, create_fee, recipients)?;
        self.store.insert(config);
        info!(
            index,
            %address,
            trade_fee_rate = fee_rates.trade_fee_rate().get(),
            protocol_fee_rate = fee_rates.protocol_fee_rate().get(),
            fund_fee_rate = fee_rates.fund_fee_rate().get(),
            create_fee = create_fee.get(),
            "amm config created"
        );
        Ok(config)
    }

    /// Returns the config stored under `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ConfigNotFound`] if there is none.
    pub fn get_config(&self, index: u16) -> Result<AmmConfig> {
        self.store
            .get(index)
            .copied()
            .ok_or(AmmError::ConfigNotFound(index))
    }

    /// Returns `true` if a config exists for `index`.
    pub fn contains(&self, index: u16) -> bool {
        self.store.contains(index)
    }

    /// Number of configs in the store.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the store holds no config.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
