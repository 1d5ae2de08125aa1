//! `staking_claim`: release a matured position.

use crate::context::StakingContext;
use crate::contribution::remove_contribution;
use crate::error::StakingError;
use crate::evaluator::{Evaluated, Evaluator};
use crate::operation::StakingClaimOp;
use crate::term::TermStatus;
use lockvote_store::{ChangeSet, StakingPosition, StakingStore, WitnessStore};
use tracing::debug;

pub struct StakingClaimEvaluator<'c, 'a, S> {
    ctx: &'c StakingContext<'a, S>,
}

impl<'c, 'a, S> StakingClaimEvaluator<'c, 'a, S> {
    pub fn new(ctx: &'c StakingContext<'a, S>) -> Self {
        Self { ctx }
    }
}

impl<S> Evaluator for StakingClaimEvaluator<'_, '_, S>
where
    S: StakingStore + WitnessStore,
{
    type Operation = StakingClaimOp;
    type Checked = StakingPosition;
    type Output = ();

    fn evaluate(&self, op: &StakingClaimOp) -> Result<Evaluated<StakingPosition>, StakingError> {
        let position = self
            .ctx
            .store()
            .get_position(&op.staking_id)?
            .ok_or(StakingError::UnknownPosition(op.staking_id))?;

        let status = TermStatus::of(
            position.staking_days,
            position.create_date_time,
            self.ctx.head_time(),
        );
        if !status.is_matured() {
            return Err(StakingError::NotYetMatured {
                staking_id: position.id,
                staking_days: position.staking_days,
                elapsed_days: status.elapsed_days(),
            });
        }

        debug!(
            staking_id = %position.id,
            owner = %position.owner,
            claimant = %op.owner,
            "staking_claim evaluated"
        );
        Ok(Evaluated::new(position))
    }

    /// The principal is credited to the position's recorded owner, whoever
    /// submitted the claim.
    fn apply(
        &self,
        evaluated: Evaluated<StakingPosition>,
        changes: &mut ChangeSet,
    ) -> Result<(), StakingError> {
        let position = evaluated.into_inner();

        remove_contribution(
            self.ctx.store(),
            changes,
            &position.trust_node,
            position.contribution(),
        )?;
        changes.adjust_balance(
            position.owner,
            position.amount.asset_id,
            i128::from(position.amount.amount),
        );
        changes.remove_position(position.id);
        Ok(())
    }
}
