//! Staking positions: lock funds for a fixed term and lend their weighted
//! vote to a witness.
//!
//! Three operations drive a position's life:
//! - **Create**: debit the owner, record the position, add its contribution
//!   (`amount × weight`) to the chosen witness
//! - **Update**: move the contribution to another witness before the term matures
//! - **Claim**: after maturity, remove the contribution, credit the principal
//!   back and delete the position
//!
//! Every operation is evaluated against current state first and applied only
//! if evaluation succeeded. Apply stages its writes in a
//! [`lockvote_store::ChangeSet`]; the [`StakingProcessor`] commits the set as
//! one unit. A witness's `total_vote_weight` therefore always includes exactly
//! one contribution per position pointing at it.

pub mod audit;
pub mod claim;
pub mod config;
pub mod context;
pub mod contribution;
pub mod create;
pub mod error;
pub mod evaluator;
pub mod operation;
pub mod processor;
pub mod program;
pub mod query;
pub mod term;
pub mod update;

pub use audit::{audit_vote_weights, AuditReport, VoteWeightDiscrepancy};
pub use claim::StakingClaimEvaluator;
pub use config::{ConfigError, ProgramConfig, StakingConfig};
pub use context::StakingContext;
pub use create::StakingCreateEvaluator;
pub use error::{ErrorPhase, StakingError};
pub use evaluator::{Evaluated, Evaluator};
pub use operation::{StakingClaimOp, StakingCreateOp, StakingOperation, StakingUpdateOp};
pub use processor::{BlockReport, OperationResult, StakingProcessor};
pub use program::{ProgramRegistry, StakingProgram};
pub use query::{OwnerSummary, PositionStatus, StakingQuery};
pub use term::TermStatus;
pub use update::StakingUpdateEvaluator;
