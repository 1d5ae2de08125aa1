//! Fundamental types for the lockvote staking subsystem.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! object identifiers, asset amounts, timestamps and chain parameters.

pub mod amount;
pub mod error;
pub mod ids;
pub mod params;
pub mod time;

pub use amount::{Asset, BLOCKCHAIN_PRECISION};
pub use error::IdParseError;
pub use ids::{AccountId, AssetId, StakingId, WitnessId};
pub use params::{
    ChainExtension, ChainParameters, StakingWeight, DEFAULT_MIN_STAKING_AMOUNT,
    STAKING_EXPIRED_TIME,
};
pub use time::{Timestamp, SECONDS_PER_DAY};
