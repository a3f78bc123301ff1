//! Constant-product pool walkthrough against an in-memory ledger.
//!
//! Registers a fee schedule, creates a pool with a transfer-fee asset on
//! one side, and runs a base-input and a base-output swap.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=cpswap_engine=debug cargo run --example constant_product_swap
//! ```

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

use cpswap_engine::config::{AmmConfigRegistry, FeeRates, FeeRecipients, InMemoryConfigStore};
use cpswap_engine::domain::{
    Address, Amount, AssetDescriptor, BasisPoints, FeeRate, LpShares, SwapSpec,
    TransferFeeConfig,
};
use cpswap_engine::error::TransferError;
use cpswap_engine::fees::FeeCalculator;
use cpswap_engine::pools::{
    Deposit, InMemoryPoolStore, InitializeParams, PoolInitializer, PoolStore, SwapAccounts,
    SwapEngine, VaultBalances,
};
use cpswap_engine::traits::{AddressDeriver, LedgerContext, Transfer, TransferRequest};

struct Sha256Deriver;

impl AddressDeriver for Sha256Deriver {
    fn program_id(&self) -> Address {
        Address::from_bytes([0xAA; 32])
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

#[derive(Default)]
struct Ledger {
    tokens: BTreeMap<Address, u64>,
    fees: BTreeMap<Address, TransferFeeConfig>,
    lp: BTreeMap<Address, u64>,
}

impl Ledger {
    fn balance(&self, account: &Address) -> u64 {
        self.tokens.get(account).copied().unwrap_or(0)
    }
}

impl Transfer for Ledger {
    fn transfer(&mut self, request: &TransferRequest) -> Result<Amount, TransferError> {
        let leg = &request.leg;
        let remaining = self
            .balance(&leg.source)
            .checked_sub(leg.amount.get())
            .ok_or_else(|| TransferError::new("insufficient funds"))?;
        let (credited, _) =
            FeeCalculator::amount_after_transfer_fee(leg.amount, self.fees.get(&request.mint))
                .map_err(|e| TransferError::new(e.to_string()))?;
        self.tokens.insert(leg.source, remaining);
        *self.tokens.entry(leg.destination).or_default() += credited.get();
        Ok(credited)
    }

    fn transfer_native(
        &mut self,
        _from: &Address,
        _to: &Address,
        _amount: Amount,
    ) -> Result<(), TransferError> {
        Ok(())
    }

    fn mint_to(
        &mut self,
        _lp_mint: &Address,
        destination: &Address,
        amount: LpShares,
    ) -> Result<(), TransferError> {
        *self.lp.entry(*destination).or_default() += amount.get();
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Constant Product Swap ===\n");

    // ── 1. Register a 0.25% fee schedule ───────────────────────────────
    let mut configs = InMemoryConfigStore::new();
    let rates = FeeRates::new(FeeRate::new(2_500), FeeRate::new(120_000), FeeRate::new(40_000))?;
    let config = AmmConfigRegistry::new(&mut configs).create_config(
        &Sha256Deriver,
        0,
        Address::from_bytes([0xA0; 32]),
        rates,
        Amount::ZERO,
        FeeRecipients::default(),
    )?;
    println!("Config #{} at {}", config.index(), config.address());
    println!("  Trade fee:   {}", config.trade_fee_rate());

    // ── 2. Describe the assets ─────────────────────────────────────────
    //    The "taxed" asset keeps 1% (capped at 50 units) of every transfer.
    let program = Address::from_bytes([0xF0; 32]);
    let taxed_fee = TransferFeeConfig::new(BasisPoints::new(100), Amount::new(50_000_000))?;
    let taxed = AssetDescriptor::new(Address::from_bytes([1; 32]), program, 6)
        .with_transfer_fee(taxed_fee);
    let plain = AssetDescriptor::new(Address::from_bytes([2; 32]), program, 9);

    let mut ledger = Ledger::default();
    ledger.fees.insert(taxed.mint(), taxed_fee);
    let creator = Address::from_bytes([0xB0; 32]);
    let source_taxed = Address::from_bytes([0xB1; 32]);
    let source_plain = Address::from_bytes([0xB2; 32]);
    ledger.tokens.insert(source_taxed, 20_000_000_000);
    ledger.tokens.insert(source_plain, 20_000_000_000);

    // ── 3. Create the pool ─────────────────────────────────────────────
    let account_data: BTreeMap<Address, Vec<u8>> = BTreeMap::new();
    let mut pools = InMemoryPoolStore::new();
    let params = InitializeParams {
        deposit_a: Deposit {
            asset: plain,
            amount: Amount::new(10_000_000_000),
            source: source_plain,
        },
        deposit_b: Deposit {
            asset: taxed,
            amount: Amount::new(10_000_000_000),
            source: source_taxed,
        },
        depositor: creator,
        lp_destination: creator,
        open_time: 0,
    };
    let created = {
        let mut ctx = LedgerContext::new(&mut ledger, &Sha256Deriver, &account_data, 1_000);
        PoolInitializer::new(&mut pools).initialize(&config, &params, &mut ctx)?
    };
    let pool_address = created.pool.address();
    let vaults = created.pool.addresses();
    println!("\nPool {pool_address}");
    println!("  Vault 0:     {}", ledger.balance(&vaults.vault0));
    println!("  Vault 1:     {}", ledger.balance(&vaults.vault1));
    println!("  LP minted:   {}", created.lp_minted);
    println!("  LP held:     {:?}", ledger.lp.get(&creator));

    // ── 4. Sell 100 taxed units for the plain asset ────────────────────
    let accounts = SwapAccounts {
        payer: creator,
        input_source: source_taxed,
        output_destination: source_plain,
    };
    let now = created.pool.open_time();
    let Some(direction) = created.pool.assets().direction_for_input(&taxed.mint()) else {
        return Err("taxed asset not in pool".into());
    };
    let spec = SwapSpec::base_input(Amount::new(100_000_000), Amount::new(90_000_000))?;
    let sell = {
        let balances = VaultBalances::new(
            Amount::new(ledger.balance(&vaults.vault0)),
            Amount::new(ledger.balance(&vaults.vault1)),
        );
        let pool = pools.get_mut(&pool_address).ok_or("pool missing")?;
        let mut ctx = LedgerContext::new(&mut ledger, &Sha256Deriver, &account_data, now);
        SwapEngine::execute(pool, &config, &balances, direction, spec, &accounts, &mut ctx)?
    };
    println!("\n--- Swap {direction}: {spec} ---");
    println!("  Transfer fee: {}", sell.input_transfer_fee);
    println!("  Trade fee:    {}", sell.trade_fee);
    println!("  Protocol:     {}", sell.protocol_fee);
    println!("  Received:     {}", sell.net_amount_out);

    // ── 5. Buy exactly 10 taxed units back ─────────────────────────────
    let reverse = direction.reverse();
    let back_accounts = SwapAccounts {
        payer: creator,
        input_source: source_plain,
        output_destination: source_taxed,
    };
    let spec = SwapSpec::base_output(Amount::new(10_000_000), Amount::new(20_000_000))?;
    let buy = {
        let balances = VaultBalances::new(
            Amount::new(ledger.balance(&vaults.vault0)),
            Amount::new(ledger.balance(&vaults.vault1)),
        );
        let pool = pools.get_mut(&pool_address).ok_or("pool missing")?;
        let mut ctx = LedgerContext::new(&mut ledger, &Sha256Deriver, &account_data, now);
        SwapEngine::execute(pool, &config, &balances, reverse, spec, &back_accounts, &mut ctx)?
    };
    println!("\n--- Swap {reverse}: {spec} ---");
    println!("  Paid:         {}", buy.amount_in);
    println!("  Transfer fee: {}", buy.output_transfer_fee);
    println!("  Received:     {}", buy.net_amount_out);

    if let Some(pool) = pools.get(&pool_address) {
        println!("\nAccrued on asset0: {:?}", pool.fees0());
        println!("Accrued on asset1: {:?}", pool.fees1());
    }

    println!("\n=== Done ===");
    Ok(())
}
