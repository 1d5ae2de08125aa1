//! Object identifiers in `space.type.instance` form.
//!
//! Every chain object is addressed by a protocol space, an object type and a
//! monotonically assigned instance number. Only the instance is stored; the
//! space and type are fixed per identifier kind and appear in the textual form
//! (`1.2.17` is account 17, `1.6.3` is witness 3).

use crate::error::IdParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocol object space shared by all identifiers in this crate.
pub const PROTOCOL_SPACE: u8 = 1;

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident, $type_id:expr) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            /// Object type number within the protocol space.
            pub const TYPE_ID: u8 = $type_id;

            pub const fn new(instance: u64) -> Self {
                Self(instance)
            }

            pub const fn instance(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", PROTOCOL_SPACE, Self::TYPE_ID, self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_instance(s, Self::TYPE_ID).map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(instance: u64) -> Self {
                Self(instance)
            }
        }
    };
}

object_id!(
    /// An account on the chain; owns balances and staking positions.
    AccountId,
    2
);

object_id!(
    /// A registered asset. Instance 0 is the core asset.
    AssetId,
    3
);

object_id!(
    /// A block-producing witness (delegate) that receives vote weight.
    WitnessId,
    6
);

object_id!(
    /// A staking position. Assigned by the store, never reused.
    StakingId,
    27
);

impl AssetId {
    /// The chain's core asset.
    pub const CORE: Self = Self(0);
}

fn parse_instance(s: &str, expected_type: u8) -> Result<u64, IdParseError> {
    let mut parts = s.split('.');
    let (Some(space), Some(kind), Some(instance), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(IdParseError::Malformed(s.to_string()));
    };

    let space: u8 = space
        .parse()
        .map_err(|_| IdParseError::Malformed(s.to_string()))?;
    let kind: u8 = kind
        .parse()
        .map_err(|_| IdParseError::Malformed(s.to_string()))?;
    if space != PROTOCOL_SPACE || kind != expected_type {
        return Err(IdParseError::WrongType {
            expected: format!("{}.{}", PROTOCOL_SPACE, expected_type),
            found: format!("{}.{}", space, kind),
        });
    }
    instance
        .parse()
        .map_err(|_| IdParseError::Malformed(s.to_string()))
}
