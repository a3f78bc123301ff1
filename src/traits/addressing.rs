//! Deterministic address derivation.

use crate::domain::Address;

/// Derives program-owned addresses from seeds.
///
/// The engine only chooses seeds; hashing them into an address is the
/// ledger's business.  Implementations must be deterministic: the same
/// program and seeds always yield the same address.
pub trait AddressDeriver {
    /// The program on whose behalf the engine derives its own addresses.
    fn program_id(&self) -> Address;

    /// Derives the address owned by `program` for `seeds`.
    fn derive(&self, program: &Address, seeds: &[&[u8]]) -> Address;

    /// Derives an address owned by [`program_id`](Self::program_id).
    fn derive_program_address(&self, seeds: &[&[u8]]) -> Address {
        self.derive(&self.program_id(), seeds)
    }
}
