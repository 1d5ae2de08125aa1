//! Staking position records and their storage trait.

use crate::StoreError;
use lockvote_types::{AccountId, Asset, StakingId, Timestamp, WitnessId};
use serde::{Deserialize, Serialize};

/// One active staking lock.
///
/// A position exists from the moment it is created until it is claimed; it is
/// never stored in any other state. `staking_days` and `weight` are fixed at
/// creation. Only `trust_node` changes during the position's life.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPosition {
    pub id: StakingId,
    /// Account holding the economic claim on `amount`.
    pub owner: AccountId,
    /// Anchor of the lock term.
    pub create_date_time: Timestamp,
    /// Lock term in whole days.
    pub staking_days: u32,
    /// Vote-weight multiplier.
    pub weight: u32,
    /// Program that governed creation. Kept for audit, never re-validated.
    pub program_id: String,
    /// Locked principal.
    pub amount: Asset,
    /// Witness currently receiving this position's contribution.
    pub trust_node: WitnessId,
    pub is_valid: bool,
}

impl StakingPosition {
    /// Vote weight this position adds to its trust node: `amount × weight`.
    pub fn contribution(&self) -> u128 {
        self.amount.weighted(self.weight)
    }

    /// Persisted encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Indexed staking position storage.
///
/// Backends keep a unique index on `id`, a non-unique index on `owner`, and a
/// composite index on `(trust_node, id)`. Every multi-position result is
/// ordered by id so iteration is identical on every node.
pub trait StakingStore {
    fn get_position(&self, id: &StakingId) -> Result<Option<StakingPosition>, StoreError>;

    /// Positions owned by `owner`, ordered by id.
    fn positions_by_owner(&self, owner: &AccountId) -> Result<Vec<StakingPosition>, StoreError>;

    /// Positions whose trust node is `witness`, ordered by id.
    fn positions_by_trust_node(
        &self,
        witness: &WitnessId,
    ) -> Result<Vec<StakingPosition>, StoreError>;

    /// All positions, ordered by id.
    fn iter_positions(&self) -> Result<Vec<StakingPosition>, StoreError>;

    /// Id the next inserted position will receive. Ids are never reused.
    fn next_position_id(&self) -> Result<StakingId, StoreError>;

    fn position_count(&self) -> Result<u64, StoreError> {
        self.iter_positions().map(|v| v.len() as u64)
    }
}
