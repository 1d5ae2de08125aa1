//! Account balance ledger (read side).

use crate::StoreError;
use lockvote_types::{AccountId, AssetId};

/// Read access to account balances.
///
/// Balance changes are staged with [`crate::ChangeSet::adjust_balance`] and
/// applied on commit.
pub trait BalanceStore {
    /// Balance of `account` in `asset`, in raw units. Unknown accounts hold zero.
    fn get_balance(&self, account: &AccountId, asset: &AssetId) -> Result<u64, StoreError>;
}
