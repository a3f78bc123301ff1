//! Bundle of collaborators an operation runs against.

use super::{AccountDataSource, AddressDeriver, Transfer};

/// The external ledger as seen by one engine operation.
///
/// Borrowed for the duration of a single call; the engine keeps no
/// reference to any collaborator between calls.
pub struct LedgerContext<'a, T: ?Sized, D: ?Sized, A: ?Sized> {
    /// Executes asset movements.
    pub transfer: &'a mut T,
    /// Derives program-owned addresses.
    pub deriver: &'a D,
    /// Reads hook extra-account lists.
    pub account_data: &'a A,
    /// Current ledger time in seconds.
    pub now: u64,
}

impl<'a, T, D, A> LedgerContext<'a, T, D, A>
where
    T: Transfer + ?Sized,
    D: AddressDeriver + ?Sized,
    A: AccountDataSource + ?Sized,
{
    /// Creates a context.
    pub fn new(transfer: &'a mut T, deriver: &'a D, account_data: &'a A, now: u64) -> Self {
        Self {
            transfer,
            deriver,
            account_data,
            now,
        }
    }
}
