//! Abstract storage traits for the lockvote staking subsystem.
//!
//! Every storage backend (in-memory for testing, a persistent engine in a
//! node) implements these traits. The evaluators depend only on the traits.
//!
//! Reads go straight to a store. Writes never do: an operation stages its
//! mutations in a [`ChangeSet`] and hands the whole set to
//! [`StateCommit::commit`], which applies all of it or none of it.

pub mod balance;
pub mod chain;
pub mod change_set;
pub mod error;
pub mod staking;
pub mod witness;

pub use balance::BalanceStore;
pub use chain::ChainStateStore;
pub use change_set::{ChangeSet, PositionWrite, StateCommit};
pub use error::StoreError;
pub use staking::{StakingPosition, StakingStore};
pub use witness::{WitnessRecord, WitnessStore};
