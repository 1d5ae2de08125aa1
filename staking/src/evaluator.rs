//! The evaluate/apply contract.
//!
//! `evaluate` is pure validation against current state. On success it
//! returns an [`Evaluated`] token holding what it resolved; `apply` consumes
//! that token, so there is no way to call `apply` for an operation that was
//! not evaluated. `apply` stages writes into a [`ChangeSet`] and never
//! touches the store.

use crate::error::StakingError;
use lockvote_store::ChangeSet;

/// Proof that an operation passed evaluation.
///
/// Only evaluators in this crate can construct one.
#[derive(Debug)]
pub struct Evaluated<T> {
    checked: T,
}

impl<T> Evaluated<T> {
    pub(crate) fn new(checked: T) -> Self {
        Self { checked }
    }

    pub(crate) fn into_inner(self) -> T {
        self.checked
    }

    /// What evaluation resolved, for inspection.
    pub fn checked(&self) -> &T {
        &self.checked
    }
}

pub trait Evaluator {
    type Operation;
    /// State resolved during evaluation and carried to apply.
    type Checked;
    type Output;

    /// Validate `op` against current state. Must not stage or write anything.
    fn evaluate(&self, op: &Self::Operation) -> Result<Evaluated<Self::Checked>, StakingError>;

    /// Stage the operation's writes. Any error here is fatal.
    fn apply(
        &self,
        evaluated: Evaluated<Self::Checked>,
        changes: &mut ChangeSet,
    ) -> Result<Self::Output, StakingError>;
}
