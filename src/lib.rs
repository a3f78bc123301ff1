//! # cpswap-engine
//!
//! Constant-product (`x · y = k`) AMM engine: fee-rate configurations,
//! pool initialization and base-input / base-output swaps, for assets that
//! may charge a transfer fee or invoke a transfer hook.
//!
//! The engine is pure computation plus bookkeeping.  Value moves through
//! three caller-supplied collaborators (see [`traits`]): a transfer
//! executor, an address deriver and a raw account-data reader.  Every
//! operation either completes fully or leaves no trace in engine state.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | yes | `Serialize` / `Deserialize` for configs, pool records and quotes |
//!
//! # Quick Start
//!
//! ```rust
//! use cpswap_engine::config::{AmmConfigRegistry, FeeRates, FeeRecipients, InMemoryConfigStore};
//! use cpswap_engine::domain::{
//!     Address, Amount, AssetDescriptor, AssetPair, FeeRate, LpShares, SwapDirection, SwapSpec,
//! };
//! use cpswap_engine::pools::{PoolAddresses, PoolState, SwapEngine, VaultBalances};
//! use cpswap_engine::traits::AddressDeriver;
//!
//! // Toy deriver: a real ledger hashes program and seeds.
//! struct XorDeriver;
//! impl AddressDeriver for XorDeriver {
//!     fn program_id(&self) -> Address {
//!         Address::from_bytes([0xAA; 32])
//!     }
//!     fn derive(&self, program: &Address, seeds: &[&[u8]]) -> Address {
//!         let mut out = *program.as_bytes();
//!         for (i, b) in seeds.iter().flat_map(|s| s.iter()).enumerate() {
//!             out[i % 32] ^= b.rotate_left(i as u32 % 8);
//!         }
//!         Address::from_bytes(out)
//!     }
//! }
//!
//! // 1. Register a 0.25% fee schedule (12% of it to the protocol, 4% to the fund)
//! let mut store = InMemoryConfigStore::new();
//! let rates = FeeRates::new(FeeRate::new(2_500), FeeRate::new(120_000), FeeRate::new(40_000))?;
//! let config = AmmConfigRegistry::new(&mut store).create_config(
//!     &XorDeriver,
//!     0,
//!     Address::zero(),
//!     rates,
//!     Amount::ZERO,
//!     FeeRecipients::default(),
//! )?;
//!
//! // 2. Describe a pool and its vault balances
//! let program = Address::from_bytes([9; 32]);
//! let usdc = AssetDescriptor::new(Address::from_bytes([1; 32]), program, 6);
//! let wsol = AssetDescriptor::new(Address::from_bytes([2; 32]), program, 9);
//! let pair = AssetPair::new(usdc, wsol)?;
//! let addresses = PoolAddresses::derive(
//!     &XorDeriver,
//!     &config.address(),
//!     &pair.asset0().mint(),
//!     &pair.asset1().mint(),
//! );
//! let pool = PoolState::new(addresses, config.address(), 0, pair, LpShares::new(1_000_000), 0, 0);
//! let vaults = VaultBalances::new(Amount::new(1_000_000), Amount::new(1_000_000));
//!
//! // 3. Quote selling 10 000 units of asset0
//! let spec = SwapSpec::base_input(Amount::new(10_000), Amount::new(9_000))?;
//! let quote = SwapEngine::quote(&pool, &config, &vaults, SwapDirection::ZeroForOne, spec)?;
//! assert_eq!(quote.trade_fee, Amount::new(25));
//! assert_eq!(quote.net_amount_out, Amount::new(9_876));
//! # Ok::<(), cpswap_engine::error::AmmError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ AmmConfigRegistry│  fee schedules, created once, immutable
//! └────────┬─────────┘
//!          │ &AmmConfig
//!          ▼
//! ┌──────────────────┐     ┌─────────────────────┐
//! │ PoolInitializer  │     │ SwapEngine          │  quote → accrue → transfer
//! └────────┬─────────┘     └──────────┬──────────┘
//!          │ FeeCalculator, ConstantProductCurve, TransferHookAdapter
//!          ▼                          ▼
//! ┌────────────────────────────────────────────┐
//! │ LedgerContext: Transfer, AddressDeriver,    │  caller-supplied
//! │ AccountDataSource                           │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`FeeRate`](domain::FeeRate), [`AssetDescriptor`](domain::AssetDescriptor), [`SwapQuote`](domain::SwapQuote), etc. |
//! | [`config`] | [`AmmConfig`](config::AmmConfig) and the [`AmmConfigRegistry`](config::AmmConfigRegistry) |
//! | [`pools`]  | [`PoolState`](pools::PoolState), [`PoolInitializer`](pools::PoolInitializer), [`SwapEngine`](pools::SwapEngine) |
//! | [`fees`]   | [`FeeCalculator`](fees::FeeCalculator): trade fees, fee splits, transfer fees and their inverses |
//! | [`hooks`]  | Transfer-hook extra-account lists and their resolution |
//! | [`traits`] | Collaborator seams: [`Transfer`](traits::Transfer), [`AddressDeriver`](traits::AddressDeriver), [`AccountDataSource`](traits::AccountDataSource) |
//! | [`math`]   | Directed rounding, checked arithmetic, integer square root, curve formulas |
//! | [`constants`] | Rate denominators, locked LP amount, address seeds |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod fees;
pub mod hooks;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
