//! Staged mutations for one state transition.
//!
//! An operation's apply phase never writes to a store directly. It records
//! position writes, balance deltas and new vote-weight totals here, then the
//! whole set is handed to [`StateCommit::commit`]. Backends validate every
//! staged write before applying any of them, so a rejected commit leaves the
//! store untouched.
//!
//! # Usage
//!
//! ```ignore
//! let mut changes = ChangeSet::new();
//! changes.insert_position(position);
//! changes.adjust_balance(owner, asset, -(amount as i128));
//! changes.set_vote_weight(witness, new_total);
//! store.commit(changes)?;
//! ```
//!
//! Entries are kept in ordered maps, so the commit order is identical on
//! every node.

use crate::staking::StakingPosition;
use crate::StoreError;
use lockvote_types::{AccountId, AssetId, StakingId, WitnessId};
use std::collections::BTreeMap;

/// A staged write to the position store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionWrite {
    /// A new position; its id must be the store's next id.
    Insert(StakingPosition),
    /// Replace an existing position with this value.
    Replace(StakingPosition),
    /// Delete an existing position.
    Remove(StakingId),
}

impl PositionWrite {
    pub fn id(&self) -> StakingId {
        match self {
            Self::Insert(pos) | Self::Replace(pos) => pos.id,
            Self::Remove(id) => *id,
        }
    }
}

/// Mutations staged by one operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    positions: BTreeMap<StakingId, PositionWrite>,
    balance_deltas: BTreeMap<(AccountId, AssetId), i128>,
    vote_weights: BTreeMap<WitnessId, u128>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.balance_deltas.is_empty() && self.vote_weights.is_empty()
    }

    pub fn insert_position(&mut self, position: StakingPosition) {
        self.positions
            .insert(position.id, PositionWrite::Insert(position));
    }

    /// Stage a new value for a position. Replacing a position inserted in the
    /// same set keeps it an insert.
    pub fn replace_position(&mut self, position: StakingPosition) {
        let write = match self.positions.get(&position.id) {
            Some(PositionWrite::Insert(_)) => PositionWrite::Insert(position),
            _ => PositionWrite::Replace(position),
        };
        self.positions.insert(write.id(), write);
    }

    pub fn remove_position(&mut self, id: StakingId) {
        self.positions.insert(id, PositionWrite::Remove(id));
    }

    /// Accumulate a signed balance change for `account` in `asset`.
    pub fn adjust_balance(&mut self, account: AccountId, asset: AssetId, delta: i128) {
        *self.balance_deltas.entry((account, asset)).or_insert(0) += delta;
    }

    /// Stage the new total vote weight of a witness.
    pub fn set_vote_weight(&mut self, witness: WitnessId, total: u128) {
        self.vote_weights.insert(witness, total);
    }

    /// The staged total for `witness`, if this set already touched it.
    pub fn staged_vote_weight(&self, witness: &WitnessId) -> Option<u128> {
        self.vote_weights.get(witness).copied()
    }

    pub fn staged_position(&self, id: &StakingId) -> Option<&PositionWrite> {
        self.positions.get(id)
    }

    /// The accumulated delta for `account` in `asset`.
    pub fn balance_delta(&self, account: &AccountId, asset: &AssetId) -> i128 {
        self.balance_deltas
            .get(&(*account, *asset))
            .copied()
            .unwrap_or(0)
    }

    pub fn position_writes(&self) -> impl Iterator<Item = &PositionWrite> {
        self.positions.values()
    }

    pub fn balance_deltas(&self) -> impl Iterator<Item = (&(AccountId, AssetId), &i128)> {
        self.balance_deltas.iter()
    }

    pub fn vote_weights(&self) -> impl Iterator<Item = (&WitnessId, &u128)> {
        self.vote_weights.iter()
    }
}

/// Atomic application of a [`ChangeSet`].
pub trait StateCommit {
    /// Apply every staged write, or none of them.
    ///
    /// Implementations must reject the whole set if any write is invalid
    /// against current state: an insert whose id is not the next id, a
    /// replace or remove of a missing position, a balance that would go
    /// negative, or a vote weight for an unknown witness.
    fn commit(&self, changes: ChangeSet) -> Result<(), StoreError>;
}
