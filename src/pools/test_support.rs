//! Shared fixtures for pool tests: an in-memory ledger and a hashing
//! address deriver.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use super::{
    Deposit, InMemoryPoolStore, InitializeParams, InitializedPool, PoolInitializer, PoolState,
    PoolStore, SwapAccounts, SwapEngine, VaultBalances,
};
use crate::config::{AmmConfig, FeeRates, FeeRecipients};
use crate::domain::{
    Address, Amount, AssetDescriptor, BasisPoints, FeeRate, LpShares, SwapDirection, SwapQuote, SwapSpec,
};
use crate::error::{AmmError, Result, TransferError};
use crate::fees::FeeCalculator;
use crate::traits::{AddressDeriver, LedgerContext, Transfer, TransferRequest};

pub(crate) const fn addr(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

pub(crate) const TOKEN_PROGRAM: Address = addr(0xF0);
pub(crate) const DEPOSITOR: Address = addr(0xD0);
pub(crate) const DEPOSIT_SOURCE_A: Address = addr(0xD1);
pub(crate) const DEPOSIT_SOURCE_B: Address = addr(0xD2);
pub(crate) const LP_DESTINATION: Address = addr(0xD3);
pub(crate) const CREATE_FEE_RECEIVER: Address = addr(0xD4);
pub(crate) const TRADER: Address = addr(0xE0);
pub(crate) const TRADER_ACCOUNT0: Address = addr(0xE1);
pub(crate) const TRADER_ACCOUNT1: Address = addr(0xE2);
pub(crate) const TRADER_FUNDS: u64 = 1 << 60;

pub(crate) fn plain_asset(b: u8) -> AssetDescriptor {
    AssetDescriptor::new(addr(b), TOKEN_PROGRAM, 6)
}

pub(crate) fn config(trade: u64, protocol: u64, fund: u64) -> AmmConfig {
    let Ok(rates) = FeeRates::new(FeeRate::new(trade), FeeRate::new(protocol), FeeRate::new(fund))
    else {
        panic!("valid rates");
    };
    let recipients = FeeRecipients {
        protocol_owner: addr(0xC2),
        fund_owner: addr(0xC3),
        create_fee_receiver: CREATE_FEE_RECEIVER,
    };
    let Ok(cfg) = AmmConfig::new(0, addr(0xC0), addr(0xC1), rates, Amount::ZERO, recipients)
    else {
        panic!("valid config");
    };
    cfg
}

/// `sha256(program || len(seed) || seed || ...)`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sha256Deriver;

impl AddressDeriver for Sha256Deriver {
    fn program_id(&self) -> Address {
        addr(0xAA)
    }

    fn derive(&self, program: &Address, seeds: &[&[u8]]) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(program.as_bytes());
        for seed in seeds {
            hasher.update([seed.len() as u8]);
            hasher.update(seed);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Address::from_bytes(bytes)
    }
}

/// Balances keyed by account; every account holds a single asset.
#[derive(Debug, Default)]
pub(crate) struct MockLedger {
    pub balances: BTreeMap<Address, u64>,
    pub native: BTreeMap<Address, u64>,
    pub lp: BTreeMap<Address, u64>,
    pub transfer_fees: BTreeMap<Address, (BasisPoints, Amount)>,
    pub reject_mint: Option<Address>,
    pub reject_lp_mint: bool,
    pub log: Vec<TransferRequest>,
}

impl MockLedger {
    pub(crate) fn balance(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub(crate) fn credit(&mut self, account: Address, amount: u64) {
        *self.balances.entry(account).or_default() += amount;
    }

    /// Registers the transfer fee the ledger charges for `asset`.
    pub(crate) fn register(&mut self, asset: &AssetDescriptor) {
        if let Some(fee) = asset.transfer_fee() {
            self.transfer_fees
                .insert(asset.mint(), (fee.basis_points(), fee.maximum_fee()));
        }
    }
}

impl Transfer for MockLedger {
    fn transfer(&mut self, request: &TransferRequest) -> core::result::Result<Amount, TransferError> {
        if self.reject_mint == Some(request.mint) {
            return Err(TransferError::new("mint frozen"));
        }
        let leg = &request.leg;
        let available = self.balance(&leg.source);
        let remaining = available
            .checked_sub(leg.amount.get())
            .ok_or_else(|| TransferError::new("insufficient funds"))?;
        let fee = match self.transfer_fees.get(&request.mint) {
            Some((bp, max)) => FeeCalculator::external_transfer_fee(leg.amount, *bp, *max)
                .map_err(|e| TransferError::new(e.to_string()))?
                .get(),
            None => 0,
        };
        let credited = leg.amount.get() - fee;
        self.balances.insert(leg.source, remaining);
        self.credit(leg.destination, credited);
        self.log.push(request.clone());
        Ok(Amount::new(credited))
    }

    fn transfer_native(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<(), TransferError> {
        let available = self.native.get(from).copied().unwrap_or(0);
        let remaining = available
            .checked_sub(amount.get())
            .ok_or_else(|| TransferError::new("insufficient lamports"))?;
        self.native.insert(*from, remaining);
        *self.native.entry(*to).or_default() += amount.get();
        Ok(())
    }

    fn mint_to(
        &mut self,
        _lp_mint: &Address,
        destination: &Address,
        amount: LpShares,
    ) -> core::result::Result<(), TransferError> {
        if self.reject_lp_mint {
            return Err(TransferError::new("lp mint authority mismatch"));
        }
        *self.lp.entry(*destination).or_default() += amount.get();
        Ok(())
    }
}

/// One config, one pool store and a ledger, wired together.
pub(crate) struct Env {
    pub config: AmmConfig,
    pub ledger: MockLedger,
    pub deriver: Sha256Deriver,
    pub account_data: BTreeMap<Address, Vec<u8>>,
    pub pools: InMemoryPoolStore,
    pub now: u64,
}

impl Env {
    pub(crate) fn new(config: AmmConfig) -> Self {
        Self {
            config,
            ledger: MockLedger::default(),
            deriver: Sha256Deriver,
            account_data: BTreeMap::new(),
            pools: InMemoryPoolStore::new(),
            now: 1_000,
        }
    }

    pub(crate) fn params(
        asset_a: AssetDescriptor,
        amount_a: u64,
        asset_b: AssetDescriptor,
        amount_b: u64,
    ) -> InitializeParams {
        InitializeParams {
            deposit_a: Deposit {
                asset: asset_a,
                amount: Amount::new(amount_a),
                source: DEPOSIT_SOURCE_A,
            },
            deposit_b: Deposit {
                asset: asset_b,
                amount: Amount::new(amount_b),
                source: DEPOSIT_SOURCE_B,
            },
            depositor: DEPOSITOR,
            lp_destination: LP_DESTINATION,
            open_time: 0,
        }
    }

    /// Funds the deposit sources and runs the initializer.
    pub(crate) fn initialize(&mut self, params: &InitializeParams) -> Result<InitializedPool> {
        self.ledger.register(&params.deposit_a.asset);
        self.ledger.register(&params.deposit_b.asset);
        self.ledger
            .credit(params.deposit_a.source, params.deposit_a.amount.get());
        self.ledger
            .credit(params.deposit_b.source, params.deposit_b.amount.get());
        let mut ctx = LedgerContext::new(
            &mut self.ledger,
            &self.deriver,
            &self.account_data,
            self.now,
        );
        PoolInitializer::new(&mut self.pools).initialize(&self.config, params, &mut ctx)
    }

    /// Initializes a pool, funds the trader on both sides and moves the
    /// clock to the pool's open time.
    pub(crate) fn open(
        &mut self,
        asset_a: AssetDescriptor,
        amount_a: u64,
        asset_b: AssetDescriptor,
        amount_b: u64,
    ) -> PoolState {
        let Ok(created) = self.initialize(&Self::params(asset_a, amount_a, asset_b, amount_b))
        else {
            panic!("expected Ok");
        };
        self.ledger.credit(TRADER_ACCOUNT0, TRADER_FUNDS);
        self.ledger.credit(TRADER_ACCOUNT1, TRADER_FUNDS);
        self.now = created.pool.open_time();
        created.pool
    }

    pub(crate) fn vaults(&self, pool: &Address) -> VaultBalances {
        let Some(state) = self.pools.get(pool) else {
            panic!("pool not stored");
        };
        VaultBalances::new(
            Amount::new(self.ledger.balance(&state.addresses().vault0)),
            Amount::new(self.ledger.balance(&state.addresses().vault1)),
        )
    }

    pub(crate) fn accounts(direction: SwapDirection) -> SwapAccounts {
        let (input_source, output_destination) = match direction {
            SwapDirection::ZeroForOne => (TRADER_ACCOUNT0, TRADER_ACCOUNT1),
            SwapDirection::OneForZero => (TRADER_ACCOUNT1, TRADER_ACCOUNT0),
        };
        SwapAccounts {
            payer: TRADER,
            input_source,
            output_destination,
        }
    }

    pub(crate) fn swap(
        &mut self,
        pool: &Address,
        direction: SwapDirection,
        spec: SwapSpec,
    ) -> Result<SwapQuote> {
        let vaults = self.vaults(pool);
        let state = self.pools.get_mut(pool).ok_or(AmmError::PoolNotFound)?;
        let mut ctx = LedgerContext::new(
            &mut self.ledger,
            &self.deriver,
            &self.account_data,
            self.now,
        );
        SwapEngine::execute(
            state,
            &self.config,
            &vaults,
            direction,
            spec,
            &Self::accounts(direction),
            &mut ctx,
        )
    }
}
