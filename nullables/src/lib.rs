//! Nullable infrastructure for deterministic testing.
//!
//! The staking evaluators reach chain state only through the storage traits,
//! so tests run them against [`NullStore`]: every trait in memory, with setters
//! for balances, witnesses and parameters, and a [`NullClock`] that moves only
//! when told to.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
