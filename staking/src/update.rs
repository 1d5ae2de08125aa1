//! `staking_update`: retarget a position's contribution to another witness.

use crate::context::StakingContext;
use crate::contribution::move_contribution;
use crate::error::StakingError;
use crate::evaluator::{Evaluated, Evaluator};
use crate::operation::StakingUpdateOp;
use crate::term::TermStatus;
use lockvote_store::{ChangeSet, StakingPosition, StakingStore, WitnessStore};
use lockvote_types::WitnessId;
use tracing::debug;

/// The position as evaluated and the witness it will point at.
#[derive(Debug)]
pub struct UpdateChecked {
    pub position: StakingPosition,
    pub trust_node: WitnessId,
}

pub struct StakingUpdateEvaluator<'c, 'a, S> {
    ctx: &'c StakingContext<'a, S>,
}

impl<'c, 'a, S> StakingUpdateEvaluator<'c, 'a, S> {
    pub fn new(ctx: &'c StakingContext<'a, S>) -> Self {
        Self { ctx }
    }
}

/// The new value of a retargeted position. Every other field is unchanged.
pub fn retarget(position: StakingPosition, trust_node: WitnessId) -> StakingPosition {
    StakingPosition {
        trust_node,
        ..position
    }
}

impl<S> Evaluator for StakingUpdateEvaluator<'_, '_, S>
where
    S: StakingStore + WitnessStore,
{
    type Operation = StakingUpdateOp;
    type Checked = UpdateChecked;
    type Output = ();

    fn evaluate(&self, op: &StakingUpdateOp) -> Result<Evaluated<UpdateChecked>, StakingError> {
        let store = self.ctx.store();

        let witness = store
            .get_witness(&op.trust_node)?
            .ok_or(StakingError::UnknownDelegate(op.trust_node))?;
        if !witness.is_valid {
            return Err(StakingError::InvalidDelegate(op.trust_node));
        }

        let position = store
            .get_position(&op.staking_id)?
            .ok_or(StakingError::UnknownPosition(op.staking_id))?;

        let status = TermStatus::of(
            position.staking_days,
            position.create_date_time,
            self.ctx.head_time(),
        );
        if status.is_matured() {
            return Err(StakingError::PositionMatured {
                staking_id: position.id,
                staking_days: position.staking_days,
                elapsed_days: status.elapsed_days(),
            });
        }

        debug!(
            staking_id = %position.id,
            from = %position.trust_node,
            to = %op.trust_node,
            "staking_update evaluated"
        );
        Ok(Evaluated::new(UpdateChecked {
            position,
            trust_node: op.trust_node,
        }))
    }

    fn apply(
        &self,
        evaluated: Evaluated<UpdateChecked>,
        changes: &mut ChangeSet,
    ) -> Result<(), StakingError> {
        let UpdateChecked {
            position,
            trust_node,
        } = evaluated.into_inner();
        let prev_trust_node = position.trust_node;
        let contribution = position.contribution();

        move_contribution(
            self.ctx.store(),
            changes,
            &prev_trust_node,
            &trust_node,
            contribution,
        )?;
        changes.replace_position(retarget(position, trust_node));
        Ok(())
    }
}
