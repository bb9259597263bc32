use super::{
    accumulator::{verify_transform, Accumulator, PotPublicKey, PowersOfTau, PublicKey},
    config::CeremonyConfig,
    transcript::TranscriptHash,
};
use crate::errors::{Result, SnarkError};
use kiln_algebra::prelude::*;
use parking_lot::Mutex;

/// Everything an auditor needs to replay a finished ceremony with
/// [`verify_transcript`](super::verify_transcript).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyTranscript<G1, G2> {
    /// The public record of every accepted contribution, in order.
    pub public_keys: Vec<PublicKey<G1, G2>>,
    /// The final accumulator.
    pub accumulator: Accumulator<G1, G2>,
    /// The final transcript digest.
    pub digest: TranscriptHash,
}

/// The transcript over a particular pairing.
pub type CeremonyTranscriptOf<P> = CeremonyTranscript<<P as Pairing>::G1, <P as Pairing>::G2>;

struct CeremonyState<P: Pairing> {
    accumulator: PowersOfTau<P>,
    digest: TranscriptHash,
    public_keys: Vec<PotPublicKey<P>>,
    finalized: bool,
}

/// The single-writer coordinator of a powers-of-tau ceremony.
///
/// Participants fetch the [`current`](Ceremony::current) accumulator and
/// digest, contribute offline, and [`submit`](Ceremony::submit) the result.
/// A submission is verified before it replaces the state; only one is
/// processed at a time and concurrent ones are turned away.
pub struct Ceremony<P: Pairing> {
    config: CeremonyConfig,
    state: Mutex<CeremonyState<P>>,
}

impl<P: Pairing> Ceremony<P> {
    /// Start a ceremony with a fresh accumulator.
    pub fn new(config: CeremonyConfig) -> Result<Self> {
        config.validate::<P::ScalarField>()?;
        let size = config.size();
        Ok(Self {
            config,
            state: Mutex::new(CeremonyState {
                accumulator: PowersOfTau::<P>::new(size)?,
                digest: TranscriptHash::genesis(size),
                public_keys: vec![],
                finalized: false,
            }),
        })
    }

    /// Return the configuration.
    pub fn config(&self) -> &CeremonyConfig {
        &self.config
    }

    /// Return the number of accepted contributions.
    pub fn num_contributions(&self) -> usize {
        self.state.lock().public_keys.len()
    }

    /// Return a copy of the accumulator and the digest to build on.
    pub fn current(&self) -> (PowersOfTau<P>, TranscriptHash) {
        let state = self.state.lock();
        (state.accumulator.clone(), state.digest)
    }

    /// Verify a contribution built on `built_on` and make it current.
    ///
    /// On error the ceremony state is left as it was.
    pub fn submit<R: CryptoRng + RngCore>(
        &self,
        prng: &mut R,
        built_on: &TranscriptHash,
        after: PowersOfTau<P>,
        pk: PotPublicKey<P>,
    ) -> Result<TranscriptHash> {
        let mut state = self.state.try_lock().ok_or(SnarkError::CeremonyBusy)?;
        if state.finalized {
            return Err(SnarkError::CeremonyFinalized);
        }
        if *built_on != state.digest {
            return Err(SnarkError::StaleContribution);
        }
        let index = state.public_keys.len();
        if index >= self.config.max_participants {
            return Err(SnarkError::ParticipantLimitReached(self.config.max_participants));
        }
        if !verify_transform::<P, R>(prng, &state.accumulator, &after, &pk, &state.digest) {
            return Err(SnarkError::InvalidContribution(index));
        }

        let digest = state.digest.chain(&pk)?;
        state.accumulator = after;
        state.public_keys.push(pk);
        state.digest = digest;
        Ok(digest)
    }

    /// Stop accepting contributions and return the transcript.
    pub fn finalize(&self) -> Result<CeremonyTranscriptOf<P>> {
        let mut state = self.state.try_lock().ok_or(SnarkError::CeremonyBusy)?;
        if state.finalized {
            return Err(SnarkError::CeremonyFinalized);
        }
        state.finalized = true;
        Ok(CeremonyTranscript {
            public_keys: state.public_keys.clone(),
            accumulator: state.accumulator.clone(),
            digest: state.digest,
        })
    }
}
