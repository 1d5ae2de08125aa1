//! The single place a witness's vote weight is changed.
//!
//! Create adds a contribution, update moves one, claim removes one. All three
//! go through these functions so the counter arithmetic cannot diverge.
//! Totals are read through the change set first, so moving a contribution
//! from a witness to itself nets to zero.

use crate::error::StakingError;
use lockvote_store::{ChangeSet, WitnessStore};
use lockvote_types::WitnessId;

/// Current total of `witness`, including writes already staged in `changes`.
pub fn current_vote_weight<S: WitnessStore>(
    store: &S,
    changes: &ChangeSet,
    witness: &WitnessId,
) -> Result<u128, StakingError> {
    if let Some(total) = changes.staged_vote_weight(witness) {
        return Ok(total);
    }
    store
        .get_witness(witness)?
        .map(|record| record.total_vote_weight)
        .ok_or_else(|| StakingError::InconsistentState(format!("witness {witness} disappeared")))
}

/// Stage `witness.total_vote_weight += contribution`. Returns the new total.
pub fn add_contribution<S: WitnessStore>(
    store: &S,
    changes: &mut ChangeSet,
    witness: &WitnessId,
    contribution: u128,
) -> Result<u128, StakingError> {
    let total = current_vote_weight(store, changes, witness)?;
    let updated = total
        .checked_add(contribution)
        .ok_or(StakingError::Overflow)?;
    changes.set_vote_weight(*witness, updated);
    Ok(updated)
}

/// Stage `witness.total_vote_weight -= contribution`. Returns the new total.
///
/// A total smaller than the contribution means the counter no longer mirrors
/// the positions pointing at the witness; that is fatal.
pub fn remove_contribution<S: WitnessStore>(
    store: &S,
    changes: &mut ChangeSet,
    witness: &WitnessId,
    contribution: u128,
) -> Result<u128, StakingError> {
    let total = current_vote_weight(store, changes, witness)?;
    let updated = total
        .checked_sub(contribution)
        .ok_or(StakingError::VoteWeightUnderflow {
            witness: *witness,
            total,
            contribution,
        })?;
    changes.set_vote_weight(*witness, updated);
    Ok(updated)
}

/// Stage moving `contribution` from one witness to another.
pub fn move_contribution<S: WitnessStore>(
    store: &S,
    changes: &mut ChangeSet,
    from: &WitnessId,
    to: &WitnessId,
    contribution: u128,
) -> Result<(), StakingError> {
    remove_contribution(store, changes, from, contribution)?;
    add_contribution(store, changes, to, contribution)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockvote_nullables::NullStore;

    fn store_with(weights: &[(u64, u128)]) -> NullStore {
        let store = NullStore::new();
        for &(id, weight) in weights {
            let id = WitnessId::new(id);
            store.add_witness(id);
            store.set_vote_weight(&id, weight).unwrap();
        }
        store
    }

    #[test]
    fn add_reads_through_staged_value() {
        let store = store_with(&[(1, 100)]);
        let mut changes = ChangeSet::new();
        let w = WitnessId::new(1);
        assert_eq!(add_contribution(&store, &mut changes, &w, 50).unwrap(), 150);
        assert_eq!(add_contribution(&store, &mut changes, &w, 50).unwrap(), 200);
        // Nothing reaches the store until commit.
        assert_eq!(store.vote_weight(&w), 100);
    }

    #[test]
    fn remove_underflow_is_reported_with_totals() {
        let store = store_with(&[(1, 100)]);
        let mut changes = ChangeSet::new();
        let err = remove_contribution(&store, &mut changes, &WitnessId::new(1), 101).unwrap_err();
        match err {
            StakingError::VoteWeightUnderflow {
                total,
                contribution,
                ..
            } => {
                assert_eq!(total, 100);
                assert_eq!(contribution, 101);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(changes.is_empty());
    }

    #[test]
    fn move_to_same_witness_nets_zero() {
        let store = store_with(&[(1, 2_000)]);
        let mut changes = ChangeSet::new();
        let w = WitnessId::new(1);
        move_contribution(&store, &mut changes, &w, &w, 2_000).unwrap();
        assert_eq!(changes.staged_vote_weight(&w), Some(2_000));
    }

    #[test]
    fn move_shifts_exact_amount() {
        let store = store_with(&[(1, 5_000), (2, 10)]);
        let mut changes = ChangeSet::new();
        move_contribution(&store, &mut changes, &WitnessId::new(1), &WitnessId::new(2), 2_000)
            .unwrap();
        assert_eq!(changes.staged_vote_weight(&WitnessId::new(1)), Some(3_000));
        assert_eq!(changes.staged_vote_weight(&WitnessId::new(2)), Some(2_010));
    }

    #[test]
    fn missing_witness_is_inconsistent_state() {
        let store = NullStore::new();
        let mut changes = ChangeSet::new();
        let err = add_contribution(&store, &mut changes, &WitnessId::new(4), 1).unwrap_err();
        assert!(err.is_fatal());
    }
}
