//! Nullable store: thread-safe in-memory chain state for testing.

use crate::clock::NullClock;
use lockvote_store::{
    BalanceStore, ChainStateStore, ChangeSet, PositionWrite, StakingPosition, StakingStore,
    StateCommit, StoreError, WitnessRecord, WitnessStore,
};
use lockvote_types::{AccountId, AssetId, ChainParameters, StakingId, Timestamp, WitnessId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Default)]
struct NullState {
    /// Positions in their persisted encoding, keyed by id.
    positions: BTreeMap<StakingId, Vec<u8>>,
    by_owner: BTreeSet<(AccountId, StakingId)>,
    by_trust_node: BTreeSet<(WitnessId, StakingId)>,
    next_position_id: u64,
    balances: BTreeMap<(AccountId, AssetId), u64>,
    witnesses: BTreeMap<WitnessId, WitnessRecord>,
    params: ChainParameters,
}

impl NullState {
    fn decode(&self, id: &StakingId) -> Result<Option<StakingPosition>, StoreError> {
        self.positions
            .get(id)
            .map(|bytes| StakingPosition::from_bytes(bytes))
            .transpose()
    }

    fn decode_all<'a>(
        &self,
        ids: impl Iterator<Item = &'a StakingId>,
    ) -> Result<Vec<StakingPosition>, StoreError> {
        ids.map(|id| {
            self.decode(id)?
                .ok_or_else(|| StoreError::NotFound(format!("indexed position {id}")))
        })
        .collect()
    }

    /// Check every staged write against current state without mutating it.
    fn validate(
        &self,
        changes: &ChangeSet,
    ) -> Result<BTreeMap<(AccountId, AssetId), u64>, StoreError> {
        let mut next_id = self.next_position_id;
        for write in changes.position_writes() {
            match write {
                PositionWrite::Insert(pos) => {
                    if pos.id.instance() != next_id {
                        return Err(StoreError::CommitRejected(format!(
                            "insert of position {} but next id is {}",
                            pos.id,
                            StakingId::new(next_id)
                        )));
                    }
                    next_id += 1;
                }
                PositionWrite::Replace(pos) => {
                    if !self.positions.contains_key(&pos.id) {
                        return Err(StoreError::CommitRejected(format!(
                            "replace of missing position {}",
                            pos.id
                        )));
                    }
                }
                PositionWrite::Remove(id) => {
                    if !self.positions.contains_key(id) {
                        return Err(StoreError::CommitRejected(format!(
                            "remove of missing position {id}"
                        )));
                    }
                }
            }
        }

        let mut balances = BTreeMap::new();
        for (&(account, asset), &delta) in changes.balance_deltas() {
            let current = self.balances.get(&(account, asset)).copied().unwrap_or(0);
            let updated = i128::from(current) + delta;
            let updated = u64::try_from(updated).map_err(|_| {
                StoreError::CommitRejected(format!(
                    "balance of {account} in {asset} would become {updated}"
                ))
            })?;
            balances.insert((account, asset), updated);
        }

        for (witness, _) in changes.vote_weights() {
            if !self.witnesses.contains_key(witness) {
                return Err(StoreError::CommitRejected(format!(
                    "vote weight for unknown witness {witness}"
                )));
            }
        }

        Ok(balances)
    }
}

/// An in-memory implementation of every store trait.
///
/// Holds positions, balances, witnesses and chain parameters behind a single
/// lock so a commit is observed all at once. Head block time comes from an
/// owned [`NullClock`].
pub struct NullStore {
    state: Mutex<NullState>,
    clock: NullClock,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(NullState {
                next_position_id: 1,
                ..NullState::default()
            }),
            clock: NullClock::default(),
        }
    }

    /// A store with the given chain parameters and head time.
    pub fn with_params(params: ChainParameters, head_time: Timestamp) -> Self {
        let store = Self::new();
        store.set_chain_parameters(params);
        store.clock.set(head_time.as_secs());
        store
    }

    pub fn clock(&self) -> &NullClock {
        &self.clock
    }

    pub fn set_chain_parameters(&self, params: ChainParameters) {
        self.state.lock().unwrap().params = params;
    }

    /// Overwrite a balance directly (test setup).
    pub fn set_balance(&self, account: AccountId, asset: AssetId, amount: u64) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert((account, asset), amount);
    }

    /// Register or overwrite a witness (test setup).
    pub fn put_witness(&self, record: WitnessRecord) {
        self.state
            .lock()
            .unwrap()
            .witnesses
            .insert(record.id, record);
    }

    /// Register a valid witness with zero vote weight.
    pub fn add_witness(&self, id: WitnessId) {
        self.put_witness(WitnessRecord {
            id,
            witness_account: AccountId::new(id.instance()),
            is_valid: true,
            total_vote_weight: 0,
        });
    }

    /// Overwrite a witness's vote weight directly, bypassing staking.
    pub fn set_vote_weight(&self, id: &WitnessId, total: u128) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let witness = state
            .witnesses
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        witness.total_vote_weight = total;
        Ok(())
    }

    pub fn set_witness_valid(&self, id: &WitnessId, is_valid: bool) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let witness = state
            .witnesses
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        witness.is_valid = is_valid;
        Ok(())
    }

    /// Current total vote weight of a witness; zero if unknown.
    pub fn vote_weight(&self, id: &WitnessId) -> u128 {
        self.state
            .lock()
            .unwrap()
            .witnesses
            .get(id)
            .map(|w| w.total_vote_weight)
            .unwrap_or(0)
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingStore for NullStore {
    fn get_position(&self, id: &StakingId) -> Result<Option<StakingPosition>, StoreError> {
        self.state.lock().unwrap().decode(id)
    }

    fn positions_by_owner(&self, owner: &AccountId) -> Result<Vec<StakingPosition>, StoreError> {
        let state = self.state.lock().unwrap();
        let ids: Vec<StakingId> = state
            .by_owner
            .range((*owner, StakingId::new(0))..=(*owner, StakingId::new(u64::MAX)))
            .map(|(_, id)| *id)
            .collect();
        state.decode_all(ids.iter())
    }

    fn positions_by_trust_node(
        &self,
        witness: &WitnessId,
    ) -> Result<Vec<StakingPosition>, StoreError> {
        let state = self.state.lock().unwrap();
        let ids: Vec<StakingId> = state
            .by_trust_node
            .range((*witness, StakingId::new(0))..=(*witness, StakingId::new(u64::MAX)))
            .map(|(_, id)| *id)
            .collect();
        state.decode_all(ids.iter())
    }

    fn iter_positions(&self) -> Result<Vec<StakingPosition>, StoreError> {
        let state = self.state.lock().unwrap();
        state.decode_all(state.positions.keys())
    }

    fn next_position_id(&self) -> Result<StakingId, StoreError> {
        Ok(StakingId::new(self.state.lock().unwrap().next_position_id))
    }

    fn position_count(&self) -> Result<u64, StoreError> {
        Ok(self.state.lock().unwrap().positions.len() as u64)
    }
}

impl BalanceStore for NullStore {
    fn get_balance(&self, account: &AccountId, asset: &AssetId) -> Result<u64, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .balances
            .get(&(*account, *asset))
            .copied()
            .unwrap_or(0))
    }
}

impl WitnessStore for NullStore {
    fn get_witness(&self, id: &WitnessId) -> Result<Option<WitnessRecord>, StoreError> {
        Ok(self.state.lock().unwrap().witnesses.get(id).cloned())
    }

    fn iter_witnesses(&self) -> Result<Vec<WitnessRecord>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .witnesses
            .values()
            .cloned()
            .collect())
    }
}

impl ChainStateStore for NullStore {
    fn head_block_time(&self) -> Result<Timestamp, StoreError> {
        Ok(self.clock.now())
    }

    fn chain_parameters(&self) -> Result<ChainParameters, StoreError> {
        Ok(self.state.lock().unwrap().params.clone())
    }
}

impl StateCommit for NullStore {
    fn commit(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let balances = state.validate(&changes)?;

        // Decode and encode everything first so nothing below can fail.
        let mut staged = Vec::new();
        for write in changes.position_writes() {
            let id = write.id();
            let previous = state.decode(&id)?;
            let encoded = match write {
                PositionWrite::Insert(pos) | PositionWrite::Replace(pos) => {
                    Some((pos, pos.to_bytes()?))
                }
                PositionWrite::Remove(_) => None,
            };
            staged.push((id, previous, encoded));
        }

        for (id, previous, encoded) in staged {
            if let Some(old) = previous {
                state.by_owner.remove(&(old.owner, id));
                state.by_trust_node.remove(&(old.trust_node, id));
            }
            match encoded {
                Some((pos, bytes)) => {
                    state.by_owner.insert((pos.owner, id));
                    state.by_trust_node.insert((pos.trust_node, id));
                    state.positions.insert(id, bytes);
                    state.next_position_id = state.next_position_id.max(id.instance() + 1);
                }
                None => {
                    state.positions.remove(&id);
                }
            }
        }

        state.balances.extend(balances);
        for (witness, total) in changes.vote_weights() {
            if let Some(record) = state.witnesses.get_mut(witness) {
                record.total_vote_weight = *total;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockvote_types::Asset;

    fn position(id: u64, owner: u64, trust_node: u64) -> StakingPosition {
        StakingPosition {
            id: StakingId::new(id),
            owner: AccountId::new(owner),
            create_date_time: Timestamp::new(0),
            staking_days: 30,
            weight: 2,
            program_id: "p30".into(),
            amount: Asset::core(1_000),
            trust_node: WitnessId::new(trust_node),
            is_valid: true,
        }
    }

    fn insert(store: &NullStore, owner: u64, trust_node: u64) -> StakingId {
        let id = store.next_position_id().unwrap();
        let mut changes = ChangeSet::new();
        changes.insert_position(position(id.instance(), owner, trust_node));
        store.commit(changes).unwrap();
        id
    }

    #[test]
    fn ids_start_at_one_and_are_never_reused() {
        let store = NullStore::new();
        let first = insert(&store, 1, 1);
        assert_eq!(first, StakingId::new(1));

        let mut changes = ChangeSet::new();
        changes.remove_position(first);
        store.commit(changes).unwrap();

        let second = insert(&store, 1, 1);
        assert_eq!(second, StakingId::new(2));
    }

    #[test]
    fn secondary_indexes_are_ordered_by_id() {
        let store = NullStore::new();
        store.add_witness(WitnessId::new(1));
        let a = insert(&store, 7, 1);
        let _b = insert(&store, 8, 2);
        let c = insert(&store, 7, 1);

        let owned: Vec<_> = store
            .positions_by_owner(&AccountId::new(7))
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(owned, vec![a, c]);

        let trusted: Vec<_> = store
            .positions_by_trust_node(&WitnessId::new(1))
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(trusted, vec![a, c]);
    }

    #[test]
    fn replace_moves_trust_node_index() {
        let store = NullStore::new();
        let id = insert(&store, 7, 1);
        let mut moved = store.get_position(&id).unwrap().unwrap();
        moved.trust_node = WitnessId::new(2);

        let mut changes = ChangeSet::new();
        changes.replace_position(moved);
        store.commit(changes).unwrap();

        assert!(store
            .positions_by_trust_node(&WitnessId::new(1))
            .unwrap()
            .is_empty());
        assert_eq!(
            store.positions_by_trust_node(&WitnessId::new(2)).unwrap().len(),
            1
        );
    }

    #[test]
    fn rejected_commit_leaves_state_untouched() {
        let store = NullStore::new();
        store.add_witness(WitnessId::new(1));
        store.set_balance(AccountId::new(7), AssetId::CORE, 500);

        let mut changes = ChangeSet::new();
        changes.insert_position(position(1, 7, 1));
        changes.set_vote_weight(WitnessId::new(1), 2_000);
        changes.adjust_balance(AccountId::new(7), AssetId::CORE, -1_000);

        let err = store.commit(changes).unwrap_err();
        assert!(matches!(err, StoreError::CommitRejected(_)));
        assert_eq!(store.position_count().unwrap(), 0);
        assert_eq!(store.vote_weight(&WitnessId::new(1)), 0);
        assert_eq!(
            store
                .get_balance(&AccountId::new(7), &AssetId::CORE)
                .unwrap(),
            500
        );
        assert_eq!(store.next_position_id().unwrap(), StakingId::new(1));
    }

    #[test]
    fn unknown_witness_rejects_commit() {
        let store = NullStore::new();
        let mut changes = ChangeSet::new();
        changes.set_vote_weight(WitnessId::new(9), 1);
        assert!(store.commit(changes).is_err());
    }

    #[test]
    fn out_of_sequence_insert_rejected() {
        let store = NullStore::new();
        let mut changes = ChangeSet::new();
        changes.insert_position(position(5, 1, 1));
        assert!(store.commit(changes).is_err());
    }

    #[test]
    fn remove_of_missing_position_rejected() {
        let store = NullStore::new();
        let mut changes = ChangeSet::new();
        changes.remove_position(StakingId::new(1));
        assert!(store.commit(changes).is_err());
    }
}
