//! Witness (delegate) registry storage trait.

use crate::StoreError;
use lockvote_types::{AccountId, WitnessId};
use serde::{Deserialize, Serialize};

/// The part of a witness record the staking subsystem reads and mutates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRecord {
    pub id: WitnessId,
    /// Account operating the witness.
    pub witness_account: AccountId,
    /// Whether the witness may receive new vote weight.
    pub is_valid: bool,
    /// Aggregate vote weight from staking positions and any other source.
    pub total_vote_weight: u128,
}

pub trait WitnessStore {
    fn get_witness(&self, id: &WitnessId) -> Result<Option<WitnessRecord>, StoreError>;

    /// All witnesses, ordered by id.
    fn iter_witnesses(&self) -> Result<Vec<WitnessRecord>, StoreError>;
}
