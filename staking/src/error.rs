//! Staking errors.
//!
//! Evaluate-phase variants reject an operation before anything is staged; the
//! operation may be resubmitted with corrected input. Apply-phase variants
//! mean chain state already disagrees with itself and must halt processing.

use lockvote_store::StoreError;
use lockvote_types::{AccountId, AssetId, StakingId, Timestamp, WitnessId};
use thiserror::Error;

/// Which half of the evaluate/apply contract raised an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    Evaluate,
    Apply,
}

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("staking asset must be {expected}, got {found}")]
    InvalidAsset { expected: AssetId, found: AssetId },

    #[error("account {account} balance not enough: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountId,
        needed: u64,
        available: u64,
    },

    #[error("staking amount {amount} is below the minimum {minimum}")]
    AmountTooSmall { amount: u64, minimum: u64 },

    #[error("no staking programs configured")]
    NoStakingPrograms,

    #[error("unknown staking program {0:?}")]
    UnknownProgram(String),

    #[error("staking program {0:?} is offline")]
    ProgramOffline(String),

    #[error("program {program_id:?} has weight {expected}, operation says {found}")]
    WeightMismatch {
        program_id: String,
        expected: u32,
        found: u32,
    },

    #[error("program {program_id:?} has a {expected}-day term, operation says {found}")]
    TermMismatch {
        program_id: String,
        expected: u32,
        found: u32,
    },

    #[error("create_date_time {create_date_time} is more than {tolerance_secs}s from head time {head_time}")]
    StaleTimestamp {
        create_date_time: Timestamp,
        head_time: Timestamp,
        tolerance_secs: u64,
    },

    #[error("nonexistent trust node {0}")]
    UnknownDelegate(WitnessId),

    #[error("invalid trust node {0}")]
    InvalidDelegate(WitnessId),

    #[error("unknown staking position {0}")]
    UnknownPosition(StakingId),

    #[error("staking position {staking_id} expired: {elapsed_days} of {staking_days} days elapsed")]
    PositionMatured {
        staking_id: StakingId,
        staking_days: u32,
        elapsed_days: u64,
    },

    #[error("staking position {staking_id} not claimable yet: {elapsed_days} of {staking_days} days elapsed")]
    NotYetMatured {
        staking_id: StakingId,
        staking_days: u32,
        elapsed_days: u64,
    },

    #[error("vote weight of {witness} is {total}, cannot remove contribution {contribution}")]
    VoteWeightUnderflow {
        witness: WitnessId,
        total: u128,
        contribution: u128,
    },

    #[error("arithmetic overflow in vote weight")]
    Overflow,

    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl StakingError {
    pub fn phase(&self) -> ErrorPhase {
        match self {
            Self::VoteWeightUnderflow { .. }
            | Self::Overflow
            | Self::InconsistentState(_)
            | Self::Store(_) => ErrorPhase::Apply,
            _ => ErrorPhase::Evaluate,
        }
    }

    /// Whether processing must halt rather than reject the operation.
    pub fn is_fatal(&self) -> bool {
        self.phase() == ErrorPhase::Apply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_not_fatal() {
        let err = StakingError::NotYetMatured {
            staking_id: StakingId::new(1),
            staking_days: 30,
            elapsed_days: 20,
        };
        assert_eq!(err.phase(), ErrorPhase::Evaluate);
        assert!(!err.is_fatal());
        assert!(!StakingError::UnknownDelegate(WitnessId::new(1)).is_fatal());
    }

    #[test]
    fn underflow_is_fatal() {
        let err = StakingError::VoteWeightUnderflow {
            witness: WitnessId::new(1),
            total: 10,
            contribution: 20,
        };
        assert!(err.is_fatal());
        assert!(StakingError::Store(StoreError::Backend("disk".into())).is_fatal());
    }

    #[test]
    fn messages_name_offending_ids() {
        let err = StakingError::UnknownDelegate(WitnessId::new(9));
        assert_eq!(err.to_string(), "nonexistent trust node 1.6.9");
    }
}
