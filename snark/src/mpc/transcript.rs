use crate::errors::Result;
use ark_std::fmt;
use kiln_algebra::{prelude::*, serialization::KilnFromToBytes};
use serde::Serialize;
use sha2::{Digest, Sha512};

const GENESIS_DOMAIN: &[u8] = b"Kiln powers of tau";

/// Personalization of the τ proof of knowledge.
pub const PERSONALIZATION_TAU: u8 = 0;
/// Personalization of the α proof of knowledge.
pub const PERSONALIZATION_ALPHA: u8 = 1;
/// Personalization of the β proof of knowledge.
pub const PERSONALIZATION_BETA: u8 = 2;
/// Personalization of the δ proof of knowledge.
pub const PERSONALIZATION_DELTA: u8 = 3;

/// A link of a SHA-512 hash chain over ceremony records.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranscriptHash(pub [u8; 64]);

impl TranscriptHash {
    /// The first link of the chain of a ceremony of the given size.
    pub fn genesis(size: usize) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(GENESIS_DOMAIN);
        hasher.update((size as u64).to_le_bytes());
        Self::from_hasher(hasher)
    }

    /// Hash a single record.
    pub fn of<T: Serialize>(record: &T) -> Result<Self> {
        let bytes = bincode::serialize(record)?;
        let mut hasher = Sha512::new();
        hasher.update(&bytes);
        Ok(Self::from_hasher(hasher))
    }

    /// The next link: `H(self ‖ bincode(record))`.
    pub fn chain<T: Serialize>(&self, record: &T) -> Result<Self> {
        let bytes = bincode::serialize(record)?;
        let mut hasher = Sha512::new();
        hasher.update(self.0);
        hasher.update(&bytes);
        Ok(Self::from_hasher(hasher))
    }

    fn from_hasher(hasher: Sha512) -> Self {
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }
}

impl fmt::Debug for TranscriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TranscriptHash({})", b64enc(&self.0))
    }
}

impl KilnFromToBytes for TranscriptHash {
    fn kiln_to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn kiln_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        let bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(bytes))
    }
}

serialize_deserialize!(TranscriptHash);

/// Derive the G2 point `r` a proof of knowledge `(s, s^x, r^x)` is bound to.
pub fn hash_to_g2<G1: Group, G2: Group>(
    personalization: u8,
    digest: &TranscriptHash,
    s: &G1,
    s_x: &G1,
) -> G2 {
    let mut hasher = Sha512::new();
    hasher.update([personalization]);
    hasher.update(digest.0);
    hasher.update(s.to_compressed_bytes());
    hasher.update(s_x.to_compressed_bytes());
    G2::from_hash(hasher)
}

/// Check that `g1.1 / g1.0 = g2.1 / g2.0` in the exponent, that is
/// `e(g1.0, g2.1) = e(g1.1, g2.0)`. Identity elements never pass.
pub fn same_ratio<P: Pairing>(g1: (&P::G1, &P::G1), g2: (&P::G2, &P::G2)) -> bool {
    if g1.0.is_identity() || g1.1.is_identity() || g2.0.is_identity() || g2.1.is_identity() {
        return false;
    }
    P::product_of_pairings(&[*g1.0, g1.1.neg()], &[*g2.1, *g2.0]) == P::Gt::get_identity()
}

/// Compress two vectors into `(Σ ρ_i·v1_i, Σ ρ_i·v2_i)` for random `ρ_i`.
///
/// If `v2_i = x·v1_i` for every `i` the result keeps the ratio `x`; otherwise
/// it does so only with negligible probability.
pub fn merge_pairs<G: Group, R: CryptoRng + RngCore>(prng: &mut R, v1: &[G], v2: &[G]) -> (G, G) {
    let n = v1.len().min(v2.len());
    let rho: Vec<G::ScalarType> = (0..n).map(|_| G::ScalarType::random(prng)).collect();
    let rho_refs: Vec<&G::ScalarType> = rho.iter().collect();
    let v1_refs: Vec<&G> = v1[..n].iter().collect();
    let v2_refs: Vec<&G> = v2[..n].iter().collect();
    (
        G::multi_exp(&rho_refs, &v1_refs),
        G::multi_exp(&rho_refs, &v2_refs),
    )
}

/// Compress a sequence of consecutive powers into a single ratio pair.
pub fn power_pairs<G: Group, R: CryptoRng + RngCore>(prng: &mut R, v: &[G]) -> (G, G) {
    if v.len() < 2 {
        return (G::get_identity(), G::get_identity());
    }
    merge_pairs(prng, &v[..v.len() - 1], &v[1..])
}
