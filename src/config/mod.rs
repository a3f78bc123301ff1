//! AMM configuration: fee schedules and the registry that stores them.
//!
//! An [`AmmConfig`] is created once through [`AmmConfigRegistry`] and never
//! changes afterwards.  Every pool references exactly one config, which
//! decides its trade fee, how that fee is split, and the flat creation fee.

mod amm_config;
mod registry;

pub use amm_config::{AmmConfig, FeeRates, FeeRecipients};
pub use registry::{AmmConfigRegistry, ConfigStore, InMemoryConfigStore};
