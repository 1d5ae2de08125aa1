//! Staking operations.

use lockvote_types::{AccountId, Asset, StakingId, Timestamp, WitnessId};
use serde::{Deserialize, Serialize};

/// Open a new staking position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingCreateOp {
    pub owner: AccountId,
    /// Must be within the tolerance window of the head block time.
    pub create_date_time: Timestamp,
    /// Must match the program's term.
    pub staking_days: u32,
    /// Must match the program's weight.
    pub weight: u32,
    pub program_id: String,
    pub amount: Asset,
    pub trust_node: WitnessId,
}

/// Point an unmatured position at a different witness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingUpdateOp {
    pub staking_id: StakingId,
    pub trust_node: WitnessId,
}

/// Reclaim the principal of a matured position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingClaimOp {
    pub owner: AccountId,
    pub staking_id: StakingId,
}

/// The unified staking operation enum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StakingOperation {
    StakingCreate(StakingCreateOp),
    StakingUpdate(StakingUpdateOp),
    StakingClaim(StakingClaimOp),
}

impl StakingOperation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StakingCreate(_) => "staking_create",
            Self::StakingUpdate(_) => "staking_update",
            Self::StakingClaim(_) => "staking_claim",
        }
    }
}

impl From<StakingCreateOp> for StakingOperation {
    fn from(op: StakingCreateOp) -> Self {
        Self::StakingCreate(op)
    }
}

impl From<StakingUpdateOp> for StakingOperation {
    fn from(op: StakingUpdateOp) -> Self {
        Self::StakingUpdate(op)
    }
}

impl From<StakingClaimOp> for StakingOperation {
    fn from(op: StakingClaimOp) -> Self {
        Self::StakingClaim(op)
    }
}
