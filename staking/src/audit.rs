//! Vote-weight integrity check.
//!
//! Recomputes what staking positions lend each witness and compares it with
//! the stored `total_vote_weight`. Other subsystems may add weight of their
//! own, so a total above the staking sum is fine; a total below it means a
//! contribution was lost.

use crate::error::StakingError;
use lockvote_store::{StakingStore, WitnessStore};
use lockvote_types::WitnessId;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteWeightDiscrepancy {
    pub witness: WitnessId,
    pub total_vote_weight: u128,
    pub staked_contribution: u128,
}

impl VoteWeightDiscrepancy {
    /// How much vote weight is missing from the witness.
    pub fn shortfall(&self) -> u128 {
        self.staked_contribution - self.total_vote_weight
    }
}

#[derive(Debug, Default)]
pub struct AuditReport {
    pub witnesses_checked: u64,
    pub positions_checked: u64,
    pub discrepancies: Vec<VoteWeightDiscrepancy>,
}

impl AuditReport {
    pub fn is_healthy(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Check every witness against the positions pointing at it.
///
/// A position whose trust node is not a registered witness is reported with a
/// total of zero.
pub fn audit_vote_weights<S>(store: &S) -> Result<AuditReport, StakingError>
where
    S: StakingStore + WitnessStore,
{
    let mut report = AuditReport::default();

    let mut staked: BTreeMap<WitnessId, u128> = BTreeMap::new();
    for position in store.iter_positions()? {
        report.positions_checked += 1;
        let sum = staked.entry(position.trust_node).or_default();
        *sum = sum
            .checked_add(position.contribution())
            .ok_or(StakingError::Overflow)?;
    }

    for witness in store.iter_witnesses()? {
        report.witnesses_checked += 1;
        let staked_contribution = staked.remove(&witness.id).unwrap_or(0);
        if witness.total_vote_weight < staked_contribution {
            report.discrepancies.push(VoteWeightDiscrepancy {
                witness: witness.id,
                total_vote_weight: witness.total_vote_weight,
                staked_contribution,
            });
        }
    }
    for (witness, staked_contribution) in staked {
        report.discrepancies.push(VoteWeightDiscrepancy {
            witness,
            total_vote_weight: 0,
            staked_contribution,
        });
    }

    if report.is_healthy() {
        info!(
            witnesses = report.witnesses_checked,
            positions = report.positions_checked,
            "vote weight audit passed"
        );
    } else {
        for d in &report.discrepancies {
            warn!(
                witness = %d.witness,
                total = d.total_vote_weight,
                staked = d.staked_contribution,
                "vote weight below staked contribution"
            );
        }
    }
    Ok(report)
}
