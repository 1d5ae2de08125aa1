//! Typed lookup of staking programs.
//!
//! Programs arrive in the chain parameters' extension list as
//! `(program_id, StakingWeight)` pairs. The registry is built from that list
//! once and queried by key.

use lockvote_types::{ChainParameters, StakingWeight};
use std::collections::BTreeMap;

/// Terms a position is created under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakingProgram {
    pub program_id: String,
    pub staking_days: u32,
    pub weight: u32,
    pub is_valid: bool,
}

impl StakingProgram {
    fn new(program_id: &str, terms: &StakingWeight) -> Self {
        Self {
            program_id: program_id.to_string(),
            staking_days: terms.staking_days,
            weight: terms.weight,
            is_valid: terms.is_valid,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramRegistry {
    programs: BTreeMap<String, StakingProgram>,
}

impl ProgramRegistry {
    /// Build from the first staking extension of `params`.
    ///
    /// If a program id is listed twice, the earlier entry wins.
    pub fn from_chain_parameters(params: &ChainParameters) -> Self {
        let mut programs = BTreeMap::new();
        for (program_id, terms) in params.staking_params().unwrap_or_default() {
            programs
                .entry(program_id.clone())
                .or_insert_with(|| StakingProgram::new(program_id, terms));
        }
        Self { programs }
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn get(&self, program_id: &str) -> Option<&StakingProgram> {
        self.programs.get(program_id)
    }

    /// Programs ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &StakingProgram> {
        self.programs.values()
    }
}
