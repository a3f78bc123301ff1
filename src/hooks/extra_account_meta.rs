//! Extra-account lists published by transfer-hook assets.
//!
//! A hook-bearing asset stores, in a dedicated account, the list of extra
//! accounts its hook program needs on every transfer.  The layout is a
//! single little-endian TLV record:
//!
//! ```text
//! [0..8)    execute-instruction discriminator
//! [8..12)   u32 value length (4 + 35 × count)
//! [12..16)  u32 entry count
//! [16..)    count × PodExtraAccountMeta
//! ```
//!
//! Each entry either names a fixed address or describes how to derive one
//! from seeds that refer to the transfer being executed.
//!
//! Packed seeds, terminated by a zero byte:
//!
//! ```text
//! 1 len bytes..                          literal
//! 2 index length                         instruction-data slice
//! 3 index                                account key
//! 4 account_index data_index length      account-data slice
//! ```

use bytemuck::{Pod, Zeroable};

use crate::domain::Address;
use crate::error::{AmmError, Result};

/// Discriminator of the hook interface's `execute` instruction.  Prefixes
/// both the extra-account list and the execute instruction data.
pub const EXECUTE_DISCRIMINATOR: [u8; 8] = [105, 37, 101, 197, 75, 251, 102, 26];

const HEADER_LEN: usize = core::mem::size_of::<PodListHeader>();
const ENTRY_LEN: usize = core::mem::size_of::<PodExtraAccountMeta>();
const SEED_CONFIG_LEN: usize = 32;

const ENTRY_FIXED: u8 = 0;
const ENTRY_HOOK_DERIVED: u8 = 1;
const ENTRY_EXTERNAL_DERIVED_BASE: u8 = 128;

const SEED_END: u8 = 0;
const SEED_LITERAL: u8 = 1;
const SEED_INSTRUCTION_DATA: u8 = 2;
const SEED_ACCOUNT_KEY: u8 = 3;
const SEED_ACCOUNT_DATA: u8 = 4;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
struct PodListHeader {
    discriminator: [u8; 8],
    length: [u8; 4],
    count: [u8; 4],
}

/// One 35-byte list entry, exactly as stored.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PodExtraAccountMeta {
    /// `0` fixed, `1` hook-derived, `128 + i` derived under account `i`.
    pub discriminator: u8,
    /// Fixed address, or packed seeds.
    pub address_config: [u8; 32],
    /// `0` or `1`.
    pub is_signer: u8,
    /// `0` or `1`.
    pub is_writable: u8,
}

/// A component of a derived address's seeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    /// Literal bytes.
    Literal(Vec<u8>),
    /// A slice of the execute instruction data.
    InstructionData {
        /// Byte offset into the instruction data.
        index: u8,
        /// Number of bytes.
        length: u8,
    },
    /// The key of an account already in the execute account list.
    AccountKey {
        /// Position in the account list.
        index: u8,
    },
    /// A slice of the data stored in an account already in the execute
    /// account list, such as the owner field of a token account.
    AccountData {
        /// Position of the account in the account list.
        account_index: u8,
        /// Byte offset into the account's data.
        data_index: u8,
        /// Number of bytes.
        length: u8,
    },
}

/// How an extra account's address is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressConfig {
    /// A fixed address.
    Fixed(Address),
    /// Derived from `seeds` under the hook program itself.
    HookDerived(Vec<Seed>),
    /// Derived from `seeds` under the program found at `program_index` in
    /// the execute account list.
    ExternalDerived {
        /// Account-list position of the owning program.
        program_index: u8,
        /// Seeds.
        seeds: Vec<Seed>,
    },
}

/// One decoded entry of an extra-account list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtraAccountMeta {
    /// How to find the address.
    pub address_config: AddressConfig,
    /// Whether the account must sign.
    pub is_signer: bool,
    /// Whether the account is written.
    pub is_writable: bool,
}

impl ExtraAccountMeta {
    /// An entry naming a fixed address.
    #[must_use]
    pub const fn fixed(address: Address, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address_config: AddressConfig::Fixed(address),
            is_signer,
            is_writable,
        }
    }

    /// An entry derived under the hook program.
    #[must_use]
    pub const fn hook_derived(seeds: Vec<Seed>, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address_config: AddressConfig::HookDerived(seeds),
            is_signer,
            is_writable,
        }
    }

    /// An entry derived under the program at `program_index`.
    #[must_use]
    pub const fn external_derived(
        program_index: u8,
        seeds: Vec<Seed>,
        is_signer: bool,
        is_writable: bool,
    ) -> Self {
        Self {
            address_config: AddressConfig::ExternalDerived {
                program_index,
                seeds,
            },
            is_signer,
            is_writable,
        }
    }

    /// Encodes the entry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::HookAccountResolutionFailure`] if the seeds do
    /// not fit in 32 bytes, a literal is longer than 255 bytes, or the
    /// program index is 128 or more.
    pub fn to_pod(&self) -> Result<PodExtraAccountMeta> {
        let (discriminator, address_config) = match &self.address_config {
            AddressConfig::Fixed(address) => (ENTRY_FIXED, *address.as_bytes()),
            AddressConfig::HookDerived(seeds) => (ENTRY_HOOK_DERIVED, pack_seeds(seeds)?),
            AddressConfig::ExternalDerived {
                program_index,
                seeds,
            } => {
                if *program_index >= ENTRY_EXTERNAL_DERIVED_BASE {
                    return Err(AmmError::HookAccountResolutionFailure(
                        "program index out of range",
                    ));
                }
                (
                    ENTRY_EXTERNAL_DERIVED_BASE + program_index,
                    pack_seeds(seeds)?,
                )
            }
        };
        Ok(PodExtraAccountMeta {
            discriminator,
            address_config,
            is_signer: u8::from(self.is_signer),
            is_writable: u8::from(self.is_writable),
        })
    }

    /// Decodes a stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::HookAccountResolutionFailure`] for an unknown
    /// entry discriminator, malformed seeds or a flag other than `0`/`1`.
    pub fn from_pod(pod: &PodExtraAccountMeta) -> Result<Self> {
        let address_config = match pod.discriminator {
            ENTRY_FIXED => AddressConfig::Fixed(Address::from_bytes(pod.address_config)),
            ENTRY_HOOK_DERIVED => AddressConfig::HookDerived(unpack_seeds(&pod.address_config)?),
            d if d >= ENTRY_EXTERNAL_DERIVED_BASE => AddressConfig::ExternalDerived {
                program_index: d - ENTRY_EXTERNAL_DERIVED_BASE,
                seeds: unpack_seeds(&pod.address_config)?,
            },
            _ => {
                return Err(AmmError::HookAccountResolutionFailure(
                    "unknown extra account discriminator",
                ))
            }
        };
        Ok(Self {
            address_config,
            is_signer: decode_flag(pod.is_signer)?,
            is_writable: decode_flag(pod.is_writable)?,
        })
    }
}

fn decode_flag(byte: u8) -> Result<bool> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(AmmError::HookAccountResolutionFailure(
            "account flag is not a boolean",
        )),
    }
}

fn pack_seeds(seeds: &[Seed]) -> Result<[u8; SEED_CONFIG_LEN]> {
    let mut packed = Vec::with_capacity(SEED_CONFIG_LEN);
    for seed in seeds {
        match seed {
            Seed::Literal(bytes) => {
                let len = u8::try_from(bytes.len()).map_err(|_| {
                    AmmError::HookAccountResolutionFailure("literal seed too long")
                })?;
                packed.push(SEED_LITERAL);
                packed.push(len);
                packed.extend_from_slice(bytes);
            }
            Seed::InstructionData { index, length } => {
                packed.extend_from_slice(&[SEED_INSTRUCTION_DATA, *index, *length]);
            }
            Seed::AccountKey { index } => {
                packed.extend_from_slice(&[SEED_ACCOUNT_KEY, *index]);
            }
            Seed::AccountData {
                account_index,
                data_index,
                length,
            } => {
                packed.extend_from_slice(&[SEED_ACCOUNT_DATA, *account_index, *data_index, *length]);
            }
        }
    }
    if packed.len() > SEED_CONFIG_LEN {
        return Err(AmmError::HookAccountResolutionFailure(
            "seed configuration exceeds 32 bytes",
        ));
    }
    let mut out = [0u8; SEED_CONFIG_LEN];
    out[..packed.len()].copy_from_slice(&packed);
    Ok(out)
}

fn unpack_seeds(config: &[u8; SEED_CONFIG_LEN]) -> Result<Vec<Seed>> {
    const TRUNCATED: AmmError = AmmError::HookAccountResolutionFailure("truncated seed");

    let mut seeds = Vec::new();
    let mut pos = 0;
    while pos < SEED_CONFIG_LEN {
        match config[pos] {
            SEED_END => break,
            SEED_LITERAL => {
                let len = *config.get(pos + 1).ok_or(TRUNCATED)? as usize;
                let bytes = config.get(pos + 2..pos + 2 + len).ok_or(TRUNCATED)?;
                seeds.push(Seed::Literal(bytes.to_vec()));
                pos += 2 + len;
            }
            SEED_INSTRUCTION_DATA => {
                let [index, length] = config
                    .get(pos + 1..pos + 3)
                    .and_then(|s| <[u8; 2]>::try_from(s).ok())
                    .ok_or(TRUNCATED)?;
                seeds.push(Seed::InstructionData { index, length });
                pos += 3;
            }
            SEED_ACCOUNT_KEY => {
                let index = *config.get(pos + 1).ok_or(TRUNCATED)?;
                seeds.push(Seed::AccountKey { index });
                pos += 2;
            }
            SEED_ACCOUNT_DATA => {
                let [account_index, data_index, length] = config
                    .get(pos + 1..pos + 4)
                    .and_then(|s| <[u8; 3]>::try_from(s).ok())
                    .ok_or(TRUNCATED)?;
                seeds.push(Seed::AccountData {
                    account_index,
                    data_index,
                    length,
                });
                pos += 4;
            }
            _ => {
                return Err(AmmError::HookAccountResolutionFailure(
                    "unknown seed discriminator",
                ))
            }
        }
    }
    Ok(seeds)
}

/// Serializes a complete extra-account list.
///
/// # Errors
///
/// Propagates [`ExtraAccountMeta::to_pod`] failures, or fails if the list
/// has more than `u32::MAX` entries.
pub fn pack_extra_account_metas(metas: &[ExtraAccountMeta]) -> Result<Vec<u8>> {
    let count = u32::try_from(metas.len())
        .map_err(|_| AmmError::HookAccountResolutionFailure("too many extra accounts"))?;
    let length = count
        .checked_mul(ENTRY_LEN as u32)
        .and_then(|v| v.checked_add(4))
        .ok_or(AmmError::HookAccountResolutionFailure("too many extra accounts"))?;

    let header = PodListHeader {
        discriminator: EXECUTE_DISCRIMINATOR,
        length: length.to_le_bytes(),
        count: count.to_le_bytes(),
    };
    let mut data = Vec::with_capacity(HEADER_LEN + metas.len() * ENTRY_LEN);
    data.extend_from_slice(bytemuck::bytes_of(&header));
    for meta in metas {
        data.extend_from_slice(bytemuck::bytes_of(&meta.to_pod()?));
    }
    Ok(data)
}

/// Parses a complete extra-account list.
///
/// Trailing bytes past the declared length are ignored, as account data
/// may be over-allocated.
///
/// # Errors
///
/// Returns [`AmmError::HookAccountResolutionFailure`] if the data is
/// truncated, carries the wrong discriminator, declares a length that
/// disagrees with its entry count, or contains an undecodable entry.
pub fn unpack_extra_account_metas(data: &[u8]) -> Result<Vec<ExtraAccountMeta>> {
    let header_bytes = data
        .get(..HEADER_LEN)
        .ok_or(AmmError::HookAccountResolutionFailure("extra account list truncated"))?;
    let header: PodListHeader = bytemuck::pod_read_unaligned(header_bytes);
    if header.discriminator != EXECUTE_DISCRIMINATOR {
        return Err(AmmError::HookAccountResolutionFailure(
            "extra account list discriminator mismatch",
        ));
    }

    let length = u32::from_le_bytes(header.length) as usize;
    let count = u32::from_le_bytes(header.count) as usize;
    let expected = count
        .checked_mul(ENTRY_LEN)
        .and_then(|v| v.checked_add(4))
        .ok_or(AmmError::HookAccountResolutionFailure("extra account count overflow"))?;
    if length != expected {
        return Err(AmmError::HookAccountResolutionFailure(
            "extra account list length does not match entry count",
        ));
    }

    let entries = data
        .get(HEADER_LEN..HEADER_LEN + count * ENTRY_LEN)
        .ok_or(AmmError::HookAccountResolutionFailure("extra account list truncated"))?;
    let pods: &[PodExtraAccountMeta] = bytemuck::try_cast_slice(entries)
        .map_err(|_| AmmError::HookAccountResolutionFailure("misaligned extra account entries"))?;
    pods.iter().map(ExtraAccountMeta::from_pod).collect()
}
