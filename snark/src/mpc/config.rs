use crate::{
    errors::{Result, SnarkError},
    polynomial::evaluation_domain,
};
use ark_poly::EvaluationDomain;
use kiln_algebra::prelude::*;

/// Parameters of a powers-of-tau ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyConfig {
    /// The accumulator holds `2^max_power` powers of τ in G2.
    pub max_power: u32,
    /// The largest number of accepted contributions.
    pub max_participants: usize,
}

impl Default for CeremonyConfig {
    fn default() -> Self {
        Self {
            max_power: 10,
            max_participants: 64,
        }
    }
}

impl CeremonyConfig {
    /// Return the accumulator size `2^max_power`.
    pub fn size(&self) -> usize {
        1usize << self.max_power
    }

    /// Check that the configuration is usable over the scalar field `F`.
    pub fn validate<F: Domain>(&self) -> Result<()> {
        if self.max_power == 0 || self.max_power >= usize::BITS || self.max_participants == 0 {
            return Err(SnarkError::InvalidCeremonyConfig);
        }
        match evaluation_domain::<F>(self.size()) {
            Ok(domain) if domain.size() == self.size() => Ok(()),
            _ => Err(SnarkError::InvalidCeremonyConfig),
        }
    }
}
