//! Asset amounts.
//!
//! Amounts are fixed-point integers (u64) in the asset's smallest unit to avoid
//! floating-point errors. One whole unit of a 5-decimal asset is
//! [`BLOCKCHAIN_PRECISION`] raw units.

use crate::ids::AssetId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw units per whole unit of the core asset.
pub const BLOCKCHAIN_PRECISION: u64 = 100_000;

/// A quantity of a specific asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: AssetId,
    /// Raw units.
    pub amount: u64,
}

impl Asset {
    pub fn new(asset_id: AssetId, amount: u64) -> Self {
        Self { asset_id, amount }
    }

    /// An amount of the core asset.
    pub fn core(amount: u64) -> Self {
        Self::new(AssetId::CORE, amount)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Add two amounts of the same asset. `None` on asset mismatch or overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.asset_id != other.asset_id {
            return None;
        }
        self.amount.checked_add(other.amount).map(|amount| Self {
            asset_id: self.asset_id,
            amount,
        })
    }

    /// Subtract two amounts of the same asset. `None` on asset mismatch or underflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        if self.asset_id != other.asset_id {
            return None;
        }
        self.amount.checked_sub(other.amount).map(|amount| Self {
            asset_id: self.asset_id,
            amount,
        })
    }

    /// Amount scaled by a vote-weight multiplier. Cannot overflow in u128.
    pub fn weighted(&self, weight: u32) -> u128 {
        u128::from(self.amount) * u128::from(weight)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset_id)
    }
}
