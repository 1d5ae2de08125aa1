//! `staking_create`: open a position.

use crate::context::StakingContext;
use crate::contribution::add_contribution;
use crate::error::StakingError;
use crate::evaluator::{Evaluated, Evaluator};
use crate::operation::StakingCreateOp;
use lockvote_store::{
    BalanceStore, ChangeSet, PositionWrite, StakingPosition, StakingStore, WitnessStore,
};
use lockvote_types::StakingId;
use tracing::debug;

pub struct StakingCreateEvaluator<'c, 'a, S> {
    ctx: &'c StakingContext<'a, S>,
}

impl<'c, 'a, S> StakingCreateEvaluator<'c, 'a, S> {
    pub fn new(ctx: &'c StakingContext<'a, S>) -> Self {
        Self { ctx }
    }
}

impl<S> Evaluator for StakingCreateEvaluator<'_, '_, S>
where
    S: StakingStore + BalanceStore + WitnessStore,
{
    type Operation = StakingCreateOp;
    type Checked = StakingCreateOp;
    type Output = StakingId;

    /// Checks run in a fixed order; the first failure is reported.
    fn evaluate(&self, op: &StakingCreateOp) -> Result<Evaluated<StakingCreateOp>, StakingError> {
        let store = self.ctx.store();
        let params = self.ctx.params();

        if op.amount.asset_id != params.staking_asset {
            return Err(StakingError::InvalidAsset {
                expected: params.staking_asset,
                found: op.amount.asset_id,
            });
        }

        let available = store.get_balance(&op.owner, &params.staking_asset)?;
        if op.amount.amount > available {
            return Err(StakingError::InsufficientBalance {
                account: op.owner,
                needed: op.amount.amount,
                available,
            });
        }

        if op.amount.amount < params.min_staking_amount {
            return Err(StakingError::AmountTooSmall {
                amount: op.amount.amount,
                minimum: params.min_staking_amount,
            });
        }

        let programs = self.ctx.programs();
        if programs.is_empty() {
            return Err(StakingError::NoStakingPrograms);
        }
        let program = programs
            .get(&op.program_id)
            .ok_or_else(|| StakingError::UnknownProgram(op.program_id.clone()))?;
        if !program.is_valid {
            return Err(StakingError::ProgramOffline(op.program_id.clone()));
        }
        if program.weight != op.weight {
            return Err(StakingError::WeightMismatch {
                program_id: op.program_id.clone(),
                expected: program.weight,
                found: op.weight,
            });
        }
        if program.staking_days != op.staking_days {
            return Err(StakingError::TermMismatch {
                program_id: op.program_id.clone(),
                expected: program.staking_days,
                found: op.staking_days,
            });
        }

        let head_time = self.ctx.head_time();
        if op.create_date_time.abs_diff(head_time) > params.staking_expired_time {
            return Err(StakingError::StaleTimestamp {
                create_date_time: op.create_date_time,
                head_time,
                tolerance_secs: params.staking_expired_time,
            });
        }

        let witness = store
            .get_witness(&op.trust_node)?
            .ok_or(StakingError::UnknownDelegate(op.trust_node))?;
        if !witness.is_valid {
            return Err(StakingError::InvalidDelegate(op.trust_node));
        }

        debug!(
            owner = %op.owner,
            amount = %op.amount,
            program = %op.program_id,
            "staking_create evaluated"
        );
        Ok(Evaluated::new(op.clone()))
    }

    fn apply(
        &self,
        evaluated: Evaluated<StakingCreateOp>,
        changes: &mut ChangeSet,
    ) -> Result<StakingId, StakingError> {
        let store = self.ctx.store();
        let op = evaluated.into_inner();

        let staged_inserts = changes
            .position_writes()
            .filter(|w| matches!(w, PositionWrite::Insert(_)))
            .count() as u64;
        let id = StakingId::new(store.next_position_id()?.instance() + staged_inserts);

        let position = StakingPosition {
            id,
            owner: op.owner,
            create_date_time: op.create_date_time,
            staking_days: op.staking_days,
            weight: op.weight,
            program_id: op.program_id,
            amount: op.amount,
            trust_node: op.trust_node,
            is_valid: true,
        };
        let contribution = position.contribution();

        changes.adjust_balance(
            position.owner,
            position.amount.asset_id,
            -i128::from(position.amount.amount),
        );
        add_contribution(store, changes, &position.trust_node, contribution)?;
        changes.insert_position(position);
        Ok(id)
    }
}
