//! Global chain state: head block time and chain parameters.

use crate::StoreError;
use lockvote_types::{ChainParameters, Timestamp};

pub trait ChainStateStore {
    /// Timestamp of the current head block. The only clock staking reads.
    fn head_block_time(&self) -> Result<Timestamp, StoreError>;

    /// Currently active chain parameters.
    fn chain_parameters(&self) -> Result<ChainParameters, StoreError>;
}
