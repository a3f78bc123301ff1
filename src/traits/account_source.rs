//! Read-only access to raw account data.

use std::collections::BTreeMap;

use crate::domain::Address;

/// Looks up the raw bytes stored at an address.
///
/// Used to read the extra-account lists that transfer-hook assets publish.
pub trait AccountDataSource {
    /// Returns the account's data, or `None` if no such account exists.
    fn account_data(&self, address: &Address) -> Option<&[u8]>;
}

impl AccountDataSource for BTreeMap<Address, Vec<u8>> {
    fn account_data(&self, address: &Address) -> Option<&[u8]> {
        self.get(address).map(Vec::as_slice)
    }
}
