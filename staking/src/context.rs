//! Chain state snapshot shared by the evaluators.

use crate::error::StakingError;
use crate::program::ProgramRegistry;
use lockvote_store::ChainStateStore;
use lockvote_types::{ChainParameters, Timestamp};

/// Everything an evaluator reads besides the stores themselves: the head
/// block time, the chain parameters and the program registry built from them.
///
/// Load one context per block; every operation in the block sees the same
/// head time and programs.
pub struct StakingContext<'a, S> {
    store: &'a S,
    params: ChainParameters,
    programs: ProgramRegistry,
    head_time: Timestamp,
}

impl<'a, S: ChainStateStore> StakingContext<'a, S> {
    /// Snapshot head time and parameters from the store.
    pub fn load(store: &'a S) -> Result<Self, StakingError> {
        let params = store.chain_parameters()?;
        let head_time = store.head_block_time()?;
        Ok(Self::new(store, params, head_time))
    }
}

impl<'a, S> StakingContext<'a, S> {
    pub fn new(store: &'a S, params: ChainParameters, head_time: Timestamp) -> Self {
        let programs = ProgramRegistry::from_chain_parameters(&params);
        Self {
            store,
            params,
            programs,
            head_time,
        }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn params(&self) -> &ChainParameters {
        &self.params
    }

    pub fn programs(&self) -> &ProgramRegistry {
        &self.programs
    }

    pub fn head_time(&self) -> Timestamp {
        self.head_time
    }
}
