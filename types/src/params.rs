//! Chain parameters read by the staking subsystem.
//!
//! Staking programs are not first-class parameters: they travel in the
//! parameters' extension list, next to extension kinds staking does not
//! interpret. Consumers should build a typed lookup from them once rather than
//! scanning the list per operation.

use crate::amount::BLOCKCHAIN_PRECISION;
use crate::ids::AssetId;
use serde::{Deserialize, Serialize};

/// Maximum distance (seconds) between an operation's `create_date_time` and
/// the head block time.
pub const STAKING_EXPIRED_TIME: u64 = 300;

/// Smallest stake accepted: one whole unit of the staking asset.
pub const DEFAULT_MIN_STAKING_AMOUNT: u64 = BLOCKCHAIN_PRECISION;

/// Terms of one staking program as carried in chain configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingWeight {
    /// Lock term in whole days.
    pub staking_days: u32,
    /// Vote-weight multiplier applied to the staked amount.
    pub weight: u32,
    /// Whether new positions may be opened under this program.
    pub is_valid: bool,
}

/// One entry of the chain parameters' extension list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainExtension {
    /// Staking programs keyed by program id, in registration order.
    StakingParams(Vec<(String, StakingWeight)>),
    /// An extension kind staking does not interpret.
    Opaque { tag: u16, payload: Vec<u8> },
}

/// Global chain parameters relevant to staking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    /// The only asset that may be staked.
    pub staking_asset: AssetId,
    /// Minimum `amount` (raw units) of a new position.
    pub min_staking_amount: u64,
    /// Tolerance window for `create_date_time`, in seconds.
    pub staking_expired_time: u64,
    pub extensions: Vec<ChainExtension>,
}

impl ChainParameters {
    /// The staking program list from the first `StakingParams` extension, if any.
    pub fn staking_params(&self) -> Option<&[(String, StakingWeight)]> {
        self.extensions.iter().find_map(|ext| match ext {
            ChainExtension::StakingParams(params) => Some(params.as_slice()),
            ChainExtension::Opaque { .. } => None,
        })
    }
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            staking_asset: AssetId::CORE,
            min_staking_amount: DEFAULT_MIN_STAKING_AMOUNT,
            staking_expired_time: STAKING_EXPIRED_TIME,
            extensions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(days: u32, w: u32) -> StakingWeight {
        StakingWeight {
            staking_days: days,
            weight: w,
            is_valid: true,
        }
    }

    #[test]
    fn staking_params_absent_by_default() {
        assert!(ChainParameters::default().staking_params().is_none());
    }

    #[test]
    fn staking_params_skips_opaque_and_takes_first() {
        let params = ChainParameters {
            extensions: vec![
                ChainExtension::Opaque {
                    tag: 7,
                    payload: vec![1, 2],
                },
                ChainExtension::StakingParams(vec![("p30".into(), weight(30, 2))]),
                ChainExtension::StakingParams(vec![("p90".into(), weight(90, 5))]),
            ],
            ..ChainParameters::default()
        };
        let found = params.staking_params().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "p30");
    }
}
