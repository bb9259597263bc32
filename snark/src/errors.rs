use ark_std::{error, fmt};
use kiln_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, SnarkError>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SnarkError {
    /// Algebra error.
    Algebra(AlgebraError),
    /// No evaluation domain of this size exists over the scalar field.
    DomainNotFound(usize),
    /// A constraint references a variable beyond `num_variables`.
    MalformedConstraintSystem,
    /// The primary input has the wrong length (expected, actual).
    PrimaryInputSizeMismatch(usize, usize),
    /// The auxiliary input has the wrong length (expected, actual).
    AuxiliaryInputSizeMismatch(usize, usize),
    /// The witness does not satisfy the constraint system.
    InvalidWitness,
    /// The key does not match the shape of its constraint system.
    KeyShapeMismatch,
    /// The accumulator cannot serve a domain of this size (needed, available).
    CeremonyTooSmall(usize, usize),
    /// The contribution at this position failed verification.
    InvalidContribution(usize),
    /// The contribution was built on an outdated accumulator.
    StaleContribution,
    /// Another contribution is being processed.
    CeremonyBusy,
    /// The ceremony no longer accepts contributions.
    CeremonyFinalized,
    /// The ceremony reached its participant limit.
    ParticipantLimitReached(usize),
    /// The ceremony configuration is unusable.
    InvalidCeremonyConfig,
    /// Could not serialize a record for hashing.
    SerializationError,
}

impl fmt::Display for SnarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SnarkError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            DomainNotFound(n) => write!(f, "No evaluation domain of size {}.", n),
            MalformedConstraintSystem => f.write_str("Constraint system is malformed."),
            PrimaryInputSizeMismatch(expected, actual) => write!(
                f,
                "Primary input has {} elements, expected {}.",
                actual, expected
            ),
            AuxiliaryInputSizeMismatch(expected, actual) => write!(
                f,
                "Auxiliary input has {} elements, expected {}.",
                actual, expected
            ),
            InvalidWitness => f.write_str("Proof error invalid witness."),
            KeyShapeMismatch => f.write_str("Key does not match its constraint system."),
            CeremonyTooSmall(needed, available) => write!(
                f,
                "Domain of size {} needed but the accumulator holds {} powers.",
                needed, available
            ),
            InvalidContribution(i) => write!(f, "Contribution {} is invalid.", i),
            StaleContribution => f.write_str("Contribution was built on an outdated state."),
            CeremonyBusy => f.write_str("Ceremony is busy, retry later."),
            CeremonyFinalized => f.write_str("Ceremony is finalized."),
            ParticipantLimitReached(n) => write!(f, "Ceremony is limited to {} participants.", n),
            InvalidCeremonyConfig => f.write_str("Ceremony configuration is invalid."),
            SerializationError => f.write_str("Serialization error."),
        }
    }
}

impl error::Error for SnarkError {}

impl From<AlgebraError> for SnarkError {
    fn from(e: AlgebraError) -> SnarkError {
        SnarkError::Algebra(e)
    }
}

impl From<bincode::Error> for SnarkError {
    fn from(_: bincode::Error) -> SnarkError {
        SnarkError::SerializationError
    }
}
