//! Resolution of the extra accounts a transfer hook requires.

use tracing::debug;

use super::extra_account_meta::{
    unpack_extra_account_metas, AddressConfig, Seed, EXECUTE_DISCRIMINATOR,
};
use crate::domain::{AccountMeta, Address, AssetDescriptor};
use crate::error::{AmmError, Result};
use crate::traits::{AccountDataSource, AddressDeriver, TransferLeg};

/// Turns an asset's published extra-account list into concrete account
/// metas for one transfer.
///
/// Stateless: everything it needs comes from the asset descriptor, the
/// transfer leg and the two collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferHookAdapter;

impl TransferHookAdapter {
    /// Resolves the accounts to append to a transfer of `asset` along
    /// `leg`.
    ///
    /// Returns the resolved extras in list order, followed by the hook
    /// program and the list account.  Assets without a hook yield an empty
    /// list.
    ///
    /// Seeds and program indices refer to the execute instruction's
    /// accounts: `0` source, `1` mint, `2` destination, `3` authority,
    /// `4` the list account, then every extra resolved so far.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::HookAccountResolutionFailure`] if the list
    /// account is missing or malformed, or an entry refers to an account,
    /// instruction-data range or account-data range that does not exist.
    pub fn resolve_extra_accounts<S, D>(
        asset: &AssetDescriptor,
        leg: &TransferLeg,
        accounts: &S,
        deriver: &D,
    ) -> Result<Vec<AccountMeta>>
    where
        S: AccountDataSource + ?Sized,
        D: AddressDeriver + ?Sized,
    {
        let Some(hook) = asset.transfer_hook() else {
            return Ok(Vec::new());
        };
        let list_address = hook.extra_accounts_list();
        let data = accounts
            .account_data(&list_address)
            .ok_or(AmmError::HookAccountResolutionFailure(
                "extra account list not found",
            ))?;
        let metas = unpack_extra_account_metas(data)?;

        let mut instruction_data = Vec::with_capacity(16);
        instruction_data.extend_from_slice(&EXECUTE_DISCRIMINATOR);
        instruction_data.extend_from_slice(&leg.amount.get().to_le_bytes());

        let mut keys = vec![
            leg.source,
            asset.mint(),
            leg.destination,
            leg.authority,
            list_address,
        ];
        let mut resolved = Vec::with_capacity(metas.len() + 2);
        for meta in &metas {
            let address = match &meta.address_config {
                AddressConfig::Fixed(address) => *address,
                AddressConfig::HookDerived(seeds) => {
                    let seeds = Self::seed_bytes(seeds, &instruction_data, &keys, accounts)?;
                    let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
                    deriver.derive(&hook.program_id(), &refs)
                }
                AddressConfig::ExternalDerived {
                    program_index,
                    seeds,
                } => {
                    let program = *keys.get(*program_index as usize).ok_or(
                        AmmError::HookAccountResolutionFailure("program index out of range"),
                    )?;
                    let seeds = Self::seed_bytes(seeds, &instruction_data, &keys, accounts)?;
                    let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
                    deriver.derive(&program, &refs)
                }
            };
            keys.push(address);
            resolved.push(AccountMeta {
                address,
                is_signer: meta.is_signer,
                is_writable: meta.is_writable,
            });
        }
        resolved.push(AccountMeta::readonly(hook.program_id()));
        resolved.push(AccountMeta::readonly(list_address));

        debug!(
            mint = %asset.mint(),
            hook_program = %hook.program_id(),
            extras = metas.len(),
            "resolved transfer hook accounts"
        );
        Ok(resolved)
    }

    fn seed_bytes<S: AccountDataSource + ?Sized>(
        seeds: &[Seed],
        instruction_data: &[u8],
        keys: &[Address],
        accounts: &S,
    ) -> Result<Vec<Vec<u8>>> {
        seeds
            .iter()
            .map(|seed| match seed {
                Seed::Literal(bytes) => Ok(bytes.clone()),
                Seed::InstructionData { index, length } => {
                    let start = *index as usize;
                    instruction_data
                        .get(start..start + *length as usize)
                        .map(<[u8]>::to_vec)
                        .ok_or(AmmError::HookAccountResolutionFailure(
                            "instruction data seed out of range",
                        ))
                }
                Seed::AccountKey { index } => keys
                    .get(*index as usize)
                    .map(|key| key.as_bytes().to_vec())
                    .ok_or(AmmError::HookAccountResolutionFailure(
                        "account key seed out of range",
                    )),
                Seed::AccountData {
                    account_index,
                    data_index,
                    length,
                } => {
                    let key = keys.get(*account_index as usize).ok_or(
                        AmmError::HookAccountResolutionFailure("account data seed out of range"),
                    )?;
                    let data = accounts.account_data(key).ok_or(
                        AmmError::HookAccountResolutionFailure("account data seed account not found"),
                    )?;
                    let start = *data_index as usize;
                    data.get(start..start + *length as usize)
                        .map(<[u8]>::to_vec)
                        .ok_or(AmmError::HookAccountResolutionFailure(
                            "account data seed out of range",
                        ))
                }
            })
            .collect()
    }
}
