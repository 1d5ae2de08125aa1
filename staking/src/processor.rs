//! Staking operation processing pipeline.
//!
//! Each operation goes through three stages: evaluate, apply into a fresh
//! [`ChangeSet`], and one atomic commit. A rejected operation stages nothing.
//! A fatal error leaves the store as it was before the failing operation.

use crate::context::StakingContext;
use crate::error::StakingError;
use crate::evaluator::Evaluator;
use crate::operation::StakingOperation;
use crate::{StakingClaimEvaluator, StakingCreateEvaluator, StakingUpdateEvaluator};
use lockvote_store::{
    BalanceStore, ChainStateStore, ChangeSet, StakingStore, StateCommit, WitnessStore,
};
use lockvote_types::StakingId;
use lockvote_utils::{format_days, format_duration};
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn};

/// Outcome of a committed operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationResult {
    /// A position was opened under this id.
    Created(StakingId),
    /// An existing position was retargeted or claimed.
    Applied,
}

/// Per-operation outcomes of [`StakingProcessor::process_block`].
#[derive(Debug, Default)]
pub struct BlockReport {
    /// Committed operations by index in the block.
    pub applied: Vec<(usize, OperationResult)>,
    /// Rejected operations by index. Nothing was staged for them.
    pub rejected: Vec<(usize, StakingError)>,
    /// The fatal error that halted the block, if any. Operations after it
    /// were not attempted.
    pub halted: Option<(usize, StakingError)>,
}

impl BlockReport {
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Number of operations that reached an outcome.
    pub fn processed(&self) -> usize {
        self.applied.len() + self.rejected.len() + usize::from(self.halted.is_some())
    }
}

pub struct StakingProcessor<'a, S> {
    store: &'a S,
}

impl<'a, S> StakingProcessor<'a, S>
where
    S: StakingStore + BalanceStore + WitnessStore + ChainStateStore + StateCommit,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Process one operation against the current head time and parameters.
    pub fn process(&self, op: &StakingOperation) -> Result<OperationResult, StakingError> {
        let ctx = StakingContext::load(self.store)?;
        self.process_with(&ctx, op)
    }

    /// Process a block's operations in order under one context.
    ///
    /// Rejections are recorded and processing continues. The first fatal
    /// error stops the block; operations committed before it stay committed.
    pub fn process_block(&self, ops: &[StakingOperation]) -> Result<BlockReport, StakingError> {
        let started = Instant::now();
        let ctx = StakingContext::load(self.store)?;
        let mut report = BlockReport::default();

        for (index, op) in ops.iter().enumerate() {
            match self.process_with(&ctx, op) {
                Ok(result) => report.applied.push((index, result)),
                Err(e) if e.is_fatal() => {
                    report.halted = Some((index, e));
                    break;
                }
                Err(e) => report.rejected.push((index, e)),
            }
        }

        debug!(
            operations = ops.len(),
            applied = report.applied.len(),
            rejected = report.rejected.len(),
            halted = report.is_halted(),
            elapsed = %format_duration(started.elapsed()),
            "staking block processed"
        );
        Ok(report)
    }

    fn process_with(
        &self,
        ctx: &StakingContext<'a, S>,
        op: &StakingOperation,
    ) -> Result<OperationResult, StakingError> {
        let span = info_span!("staking_op", kind = op.kind());
        let _guard = span.enter();

        let result = self.execute(ctx, op);
        match &result {
            Ok(_) => {}
            Err(e) if e.is_fatal() => error!(error = %e, "staking operation failed, state fault"),
            Err(e) => warn!(error = %e, "staking operation rejected"),
        }
        result
    }

    fn execute(
        &self,
        ctx: &StakingContext<'a, S>,
        op: &StakingOperation,
    ) -> Result<OperationResult, StakingError> {
        match op {
            StakingOperation::StakingCreate(op) => {
                let id = self.run(&StakingCreateEvaluator::new(ctx), op)?;
                info!(
                    staking_id = %id,
                    owner = %op.owner,
                    trust_node = %op.trust_node,
                    amount = %op.amount,
                    term = %format_days(u64::from(op.staking_days)),
                    contribution = op.amount.weighted(op.weight),
                    "staking position created"
                );
                Ok(OperationResult::Created(id))
            }
            StakingOperation::StakingUpdate(op) => {
                self.run(&StakingUpdateEvaluator::new(ctx), op)?;
                info!(
                    staking_id = %op.staking_id,
                    trust_node = %op.trust_node,
                    "staking position retargeted"
                );
                Ok(OperationResult::Applied)
            }
            StakingOperation::StakingClaim(op) => {
                self.run(&StakingClaimEvaluator::new(ctx), op)?;
                info!(
                    staking_id = %op.staking_id,
                    owner = %op.owner,
                    "staking position claimed"
                );
                Ok(OperationResult::Applied)
            }
        }
    }

    /// Evaluate, apply and commit one operation.
    fn run<E: Evaluator>(&self, evaluator: &E, op: &E::Operation) -> Result<E::Output, StakingError> {
        let evaluated = evaluator.evaluate(op)?;
        let mut changes = ChangeSet::new();
        let output = evaluator.apply(evaluated, &mut changes)?;
        self.store.commit(changes)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{StakingClaimOp, StakingCreateOp, StakingUpdateOp};
    use lockvote_nullables::NullStore;
    use lockvote_types::{
        AccountId, Asset, AssetId, ChainExtension, ChainParameters, StakingWeight, Timestamp,
        WitnessId,
    };

    const T0: u64 = 1_700_000_000;
    const OWNER: AccountId = AccountId::new(17);
    const W1: WitnessId = WitnessId::new(1);
    const W2: WitnessId = WitnessId::new(2);

    fn store() -> NullStore {
        let params = ChainParameters {
            min_staking_amount: 1,
            extensions: vec![ChainExtension::StakingParams(vec![(
                "p30".into(),
                StakingWeight {
                    staking_days: 30,
                    weight: 2,
                    is_valid: true,
                },
            )])],
            ..ChainParameters::default()
        };
        let store = NullStore::with_params(params, Timestamp::new(T0));
        store.add_witness(W1);
        store.add_witness(W2);
        store.set_balance(OWNER, AssetId::CORE, 5_000);
        store
    }

    fn create(amount: u64) -> StakingOperation {
        StakingCreateOp {
            owner: OWNER,
            create_date_time: Timestamp::new(T0),
            staking_days: 30,
            weight: 2,
            program_id: "p30".into(),
            amount: Asset::core(amount),
            trust_node: W1,
        }
        .into()
    }

    #[test]
    fn create_commits_everything() {
        let store = store();
        let processor = StakingProcessor::new(&store);
        let result = processor.process(&create(1_000)).unwrap();
        assert_eq!(result, OperationResult::Created(StakingId::new(1)));
        assert_eq!(store.get_balance(&OWNER, &AssetId::CORE).unwrap(), 4_000);
        assert_eq!(store.vote_weight(&W1), 2_000);
        assert_eq!(store.position_count().unwrap(), 1);
    }

    #[test]
    fn degenerate_create_fields_report_evaluate_kinds() {
        let store = store();
        let processor = StakingProcessor::new(&store);
        let with = |edit: fn(&mut StakingCreateOp)| -> StakingOperation {
            let StakingOperation::StakingCreate(mut op) = create(1_000) else {
                unreachable!()
            };
            edit(&mut op);
            op.into()
        };

        let err = processor.process(&create(0)).unwrap_err();
        assert!(matches!(err, StakingError::AmountTooSmall { amount: 0, .. }));

        let err = processor.process(&with(|op| op.weight = 0)).unwrap_err();
        assert!(matches!(err, StakingError::WeightMismatch { found: 0, .. }));

        let err = processor.process(&with(|op| op.staking_days = 0)).unwrap_err();
        assert!(matches!(err, StakingError::TermMismatch { found: 0, .. }));

        let err = processor
            .process(&with(|op| op.program_id.clear()))
            .unwrap_err();
        assert!(matches!(err, StakingError::UnknownProgram(_)));

        assert_eq!(store.position_count().unwrap(), 0);
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let store = store();
        let err = StakingProcessor::new(&store)
            .process(&create(6_000))
            .unwrap_err();
        assert!(matches!(err, StakingError::InsufficientBalance { .. }));
        assert_eq!(store.get_balance(&OWNER, &AssetId::CORE).unwrap(), 5_000);
        assert_eq!(store.vote_weight(&W1), 0);
    }

    #[test]
    fn block_records_rejections_and_continues() {
        let store = store();
        let ops = vec![
            create(1_000),
            create(10_000),
            create(1_000),
            StakingUpdateOp {
                staking_id: StakingId::new(1),
                trust_node: W2,
            }
            .into(),
        ];
        let report = StakingProcessor::new(&store).process_block(&ops).unwrap();
        assert_eq!(
            report.applied,
            vec![
                (0, OperationResult::Created(StakingId::new(1))),
                (2, OperationResult::Created(StakingId::new(2))),
                (3, OperationResult::Applied),
            ]
        );
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, 1);
        assert!(!report.is_halted());
        assert_eq!(store.vote_weight(&W1), 2_000);
        assert_eq!(store.vote_weight(&W2), 2_000);
    }

    #[test]
    fn block_halts_on_fatal_error() {
        let store = store();
        let processor = StakingProcessor::new(&store);
        processor.process(&create(1_000)).unwrap();
        store.set_vote_weight(&W1, 0).unwrap();

        let ops = vec![
            StakingUpdateOp {
                staking_id: StakingId::new(1),
                trust_node: W2,
            }
            .into(),
            create(1_000),
        ];
        let report = processor.process_block(&ops).unwrap();
        assert!(report.applied.is_empty());
        assert!(matches!(
            report.halted,
            Some((0, StakingError::VoteWeightUnderflow { .. }))
        ));
        assert_eq!(report.processed(), 1);
        // Nothing from the failed update or the skipped create landed.
        assert_eq!(store.vote_weight(&W2), 0);
        assert_eq!(store.position_count().unwrap(), 1);
    }

    #[test]
    fn claim_before_term_is_rejected_not_fatal() {
        let store = store();
        let processor = StakingProcessor::new(&store);
        processor.process(&create(1_000)).unwrap();
        let err = processor
            .process(
                &StakingClaimOp {
                    owner: OWNER,
                    staking_id: StakingId::new(1),
                }
                .into(),
            )
            .unwrap_err();
        assert!(!err.is_fatal());
    }
}
