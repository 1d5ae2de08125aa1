//! Read-side queries over staking positions.

use crate::error::StakingError;
use crate::term::TermStatus;
use lockvote_store::{ChainStateStore, StakingPosition, StakingStore};
use lockvote_types::{AccountId, StakingId, Timestamp, WitnessId};
use serde::Serialize;

/// Where a position stands at the current head time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionStatus {
    pub staking_id: StakingId,
    pub elapsed_days: u64,
    pub remaining_days: u64,
    /// Claimable, and no longer retargetable.
    pub matured: bool,
    /// First second at which the position can be claimed.
    pub matures_at: Timestamp,
}

/// Aggregate view of an account's positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub positions: usize,
    /// Sum of locked principal, in raw units.
    pub total_staked: u128,
    pub total_contribution: u128,
    /// Positions that can be claimed now.
    pub claimable: Vec<StakingId>,
}

pub struct StakingQuery<'a, S> {
    store: &'a S,
}

impl<'a, S> StakingQuery<'a, S>
where
    S: StakingStore + ChainStateStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn positions_by_owner(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<StakingPosition>, StakingError> {
        Ok(self.store.positions_by_owner(owner)?)
    }

    pub fn positions_by_trust_node(
        &self,
        witness: &WitnessId,
    ) -> Result<Vec<StakingPosition>, StakingError> {
        Ok(self.store.positions_by_trust_node(witness)?)
    }

    /// Vote weight staking positions currently lend to `witness`.
    pub fn staked_contribution(&self, witness: &WitnessId) -> Result<u128, StakingError> {
        self.store
            .positions_by_trust_node(witness)?
            .iter()
            .try_fold(0u128, |sum, p| sum.checked_add(p.contribution()))
            .ok_or(StakingError::Overflow)
    }

    /// `None` if the position does not exist.
    pub fn position_status(&self, id: &StakingId) -> Result<Option<PositionStatus>, StakingError> {
        let Some(position) = self.store.get_position(id)? else {
            return Ok(None);
        };
        let head_time = self.store.head_block_time()?;
        Ok(Some(status_of(&position, head_time)))
    }

    pub fn owner_summary(&self, owner: &AccountId) -> Result<OwnerSummary, StakingError> {
        let head_time = self.store.head_block_time()?;
        let mut summary = OwnerSummary::default();
        for position in self.store.positions_by_owner(owner)? {
            summary.positions += 1;
            summary.total_staked += u128::from(position.amount.amount);
            summary.total_contribution = summary
                .total_contribution
                .checked_add(position.contribution())
                .ok_or(StakingError::Overflow)?;
            if status_of(&position, head_time).matured {
                summary.claimable.push(position.id);
            }
        }
        Ok(summary)
    }
}

fn status_of(position: &StakingPosition, head_time: Timestamp) -> PositionStatus {
    let term = TermStatus::of(position.staking_days, position.create_date_time, head_time);
    let remaining_days = match term {
        TermStatus::Locked { remaining_days, .. } => remaining_days,
        TermStatus::Matured { .. } => 0,
    };
    PositionStatus {
        staking_id: position.id,
        elapsed_days: term.elapsed_days(),
        remaining_days,
        matured: term.is_matured(),
        matures_at: position
            .create_date_time
            .saturating_add_days(u64::from(position.staking_days)),
    }
}
