use super::{
    mul_each,
    transcript::{
        hash_to_g2, power_pairs, same_ratio, TranscriptHash, PERSONALIZATION_ALPHA,
        PERSONALIZATION_BETA, PERSONALIZATION_TAU,
    },
};
use crate::{
    errors::{Result, SnarkError},
    polynomial::{domain_element, evaluation_domain},
    secret::Secret,
};
use ark_poly::EvaluationDomain;
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;
use zeroize::Zeroize;

/// The running state of a powers-of-tau ceremony of size `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accumulator<G1, G2> {
    /// `[τ^i]₁` for `i < 2n - 1`.
    pub tau_powers_g1: Vec<G1>,
    /// `[τ^i]₂` for `i < n`.
    pub tau_powers_g2: Vec<G2>,
    /// `[α·τ^i]₁` for `i < n`.
    pub alpha_tau_powers_g1: Vec<G1>,
    /// `[β·τ^i]₁` for `i < n`.
    pub beta_tau_powers_g1: Vec<G1>,
    /// `[β]₂`.
    pub beta_g2: G2,
}

/// The accumulator over a particular pairing.
pub type PowersOfTau<P> = Accumulator<<P as Pairing>::G1, <P as Pairing>::G2>;

/// The secret share of one participant.
#[derive(Debug)]
pub struct PrivateKey<F: Scalar> {
    /// The τ share.
    pub tau: Secret<F>,
    /// The α share.
    pub alpha: Secret<F>,
    /// The β share.
    pub beta: Secret<F>,
}

impl<F: Scalar> PrivateKey<F> {
    /// Sample non-zero shares.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self {
            tau: Secret::random(prng),
            alpha: Secret::random(prng),
            beta: Secret::random(prng),
        }
    }

    /// Build a key from known shares.
    pub fn new(tau: F, alpha: F, beta: F) -> Self {
        Self {
            tau: Secret::new(tau),
            alpha: Secret::new(alpha),
            beta: Secret::new(beta),
        }
    }
}

/// The public record of one contribution.
///
/// For each share `x` the participant publishes a pair `(s, s·x)` in G1 and
/// `r·x` in G2, where `r` is hashed from the pair and the transcript digest.
/// The `*_after_g1` fields are the accumulated values after the contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey<G1, G2> {
    /// `(s, s·τ)`.
    pub tau_g1: (G1, G1),
    /// `(s, s·α)`.
    pub alpha_g1: (G1, G1),
    /// `(s, s·β)`.
    pub beta_g1: (G1, G1),
    /// `r·τ`.
    pub tau_g2: G2,
    /// `r·α`.
    pub alpha_g2: G2,
    /// `r·β`.
    pub beta_g2: G2,
    /// `[τ]₁` after the contribution.
    pub tau_after_g1: G1,
    /// `[α]₁` after the contribution.
    pub alpha_after_g1: G1,
    /// `[β]₁` after the contribution.
    pub beta_after_g1: G1,
}

/// The public key over a particular pairing.
pub type PotPublicKey<P> = PublicKey<<P as Pairing>::G1, <P as Pairing>::G2>;

/// The accumulator interpolated over an evaluation domain of size `D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowersOfTauResult<G1, G2> {
    /// `[α]₁`.
    pub alpha_g1: G1,
    /// `[β]₁`.
    pub beta_g1: G1,
    /// `[β]₂`.
    pub beta_g2: G2,
    /// `[L_i(τ)]₁`.
    pub coeffs_g1: Vec<G1>,
    /// `[L_i(τ)]₂`.
    pub coeffs_g2: Vec<G2>,
    /// `[α·L_i(τ)]₁`.
    pub alpha_coeffs_g1: Vec<G1>,
    /// `[β·L_i(τ)]₁`.
    pub beta_coeffs_g1: Vec<G1>,
    /// `[τ^i·Z(τ)]₁` for `i < D - 1`.
    pub h: Vec<G1>,
}

impl<G1, G2> PowersOfTauResult<G1, G2> {
    /// Return the domain size `D`.
    pub fn domain_size(&self) -> usize {
        self.coeffs_g1.len()
    }
}

/// The ceremony result over a particular pairing.
pub type PowersOfTauResultOf<P> = PowersOfTauResult<<P as Pairing>::G1, <P as Pairing>::G2>;

fn proof_of_knowledge<G1, G2, R>(
    prng: &mut R,
    personalization: u8,
    digest: &TranscriptHash,
    x: &G1::ScalarType,
) -> ((G1, G1), G2)
where
    G1: Group,
    G2: Group<ScalarType = G1::ScalarType>,
    R: CryptoRng + RngCore,
{
    let s = G1::get_base().mul(&G1::ScalarType::random_nonzero(prng));
    let s_x = s.mul(x);
    let r: G2 = hash_to_g2(personalization, digest, &s, &s_x);
    ((s, s_x), r.mul(x))
}

impl<F, G1, G2> Accumulator<G1, G2>
where
    F: Domain,
    G1: Group<ScalarType = F>,
    G2: Group<ScalarType = F>,
{
    /// Create the accumulator of a ceremony of size `n`, with every
    /// trapdoor equal to one.
    pub fn new(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(SnarkError::InvalidCeremonyConfig);
        }
        Ok(Self {
            tau_powers_g1: vec![G1::get_base(); 2 * n - 1],
            tau_powers_g2: vec![G2::get_base(); n],
            alpha_tau_powers_g1: vec![G1::get_base(); n],
            beta_tau_powers_g1: vec![G1::get_base(); n],
            beta_g2: G2::get_base(),
        })
    }

    /// Return the size `n`.
    pub fn size(&self) -> usize {
        self.tau_powers_g2.len()
    }

    fn has_consistent_shape(&self) -> bool {
        let n = self.size();
        n >= 2
            && self.tau_powers_g1.len() == 2 * n - 1
            && self.alpha_tau_powers_g1.len() == n
            && self.beta_tau_powers_g1.len() == n
    }

    /// Multiply the trapdoors in the accumulator by the shares in `key`.
    pub fn transform(&mut self, key: &PrivateKey<F>) {
        let timer = start_timer!(|| format!("Transform accumulator of size {}", self.size()));
        let tau = key.tau.expose();

        let mut powers = Vec::with_capacity(self.tau_powers_g1.len());
        let mut acc = F::one();
        for _ in 0..self.tau_powers_g1.len() {
            powers.push(acc);
            acc *= tau;
        }
        acc.zeroize();

        let n = self.size();
        mul_each(&mut self.tau_powers_g1, &powers);
        mul_each(&mut self.tau_powers_g2, &powers[..n]);

        let mut alpha_powers: Vec<F> = powers[..n]
            .iter()
            .map(|p| *p * key.alpha.expose())
            .collect();
        mul_each(&mut self.alpha_tau_powers_g1, &alpha_powers);
        alpha_powers.zeroize();

        let mut beta_powers: Vec<F> = powers[..n]
            .iter()
            .map(|p| *p * key.beta.expose())
            .collect();
        mul_each(&mut self.beta_tau_powers_g1, &beta_powers);
        beta_powers.zeroize();
        powers.zeroize();

        self.beta_g2 = self.beta_g2.mul(key.beta.expose());
        end_timer!(timer);
    }

    /// Contribute fresh shares on top of the accumulator whose transcript
    /// digest is `digest`, returning the public record of the contribution.
    ///
    /// The shares are dropped, and wiped, before returning.
    pub fn contribute<R: CryptoRng + RngCore>(
        &mut self,
        prng: &mut R,
        digest: &TranscriptHash,
    ) -> Result<PublicKey<G1, G2>> {
        if !self.has_consistent_shape() {
            return Err(SnarkError::KeyShapeMismatch);
        }
        let key = PrivateKey::random(prng);
        let (tau_g1, tau_g2) =
            proof_of_knowledge::<G1, G2, R>(prng, PERSONALIZATION_TAU, digest, key.tau.expose());
        let (alpha_g1, alpha_g2) = proof_of_knowledge::<G1, G2, R>(
            prng,
            PERSONALIZATION_ALPHA,
            digest,
            key.alpha.expose(),
        );
        let (beta_g1, beta_g2) =
            proof_of_knowledge::<G1, G2, R>(prng, PERSONALIZATION_BETA, digest, key.beta.expose());

        self.transform(&key);

        Ok(PublicKey {
            tau_g1,
            alpha_g1,
            beta_g1,
            tau_g2,
            alpha_g2,
            beta_g2,
            tau_after_g1: self.tau_powers_g1[1],
            alpha_after_g1: self.alpha_tau_powers_g1[0],
            beta_after_g1: self.beta_tau_powers_g1[0],
        })
    }

    /// Check that the accumulator is anchored at the generators and that
    /// every vector holds consecutive powers of the same τ.
    pub fn is_well_formed<P, R>(&self, prng: &mut R) -> bool
    where
        P: Pairing<ScalarField = F, G1 = G1, G2 = G2>,
        R: CryptoRng + RngCore,
    {
        if !self.has_consistent_shape()
            || self.tau_powers_g1[0] != G1::get_base()
            || self.tau_powers_g2[0] != G2::get_base()
        {
            return false;
        }
        let g1 = (&self.tau_powers_g1[0], &self.tau_powers_g1[1]);
        let g2 = (&self.tau_powers_g2[0], &self.tau_powers_g2[1]);

        let (a, b) = power_pairs(prng, &self.tau_powers_g1);
        if !same_ratio::<P>((&a, &b), g2) {
            return false;
        }
        let (a, b) = power_pairs(prng, &self.tau_powers_g2);
        if !same_ratio::<P>(g1, (&a, &b)) {
            return false;
        }
        let (a, b) = power_pairs(prng, &self.alpha_tau_powers_g1);
        if !same_ratio::<P>((&a, &b), g2) {
            return false;
        }
        let (a, b) = power_pairs(prng, &self.beta_tau_powers_g1);
        if !same_ratio::<P>((&a, &b), g2) {
            return false;
        }
        same_ratio::<P>(
            (&self.tau_powers_g1[0], &self.beta_tau_powers_g1[0]),
            (&self.tau_powers_g2[0], &self.beta_g2),
        )
    }

    /// Interpolate the accumulator over the smallest evaluation domain of at
    /// least `required_domain_size` points.
    pub fn to_result(&self, required_domain_size: usize) -> Result<PowersOfTauResult<G1, G2>> {
        let timer = start_timer!(|| "Powers of tau to Lagrange form");
        if !self.has_consistent_shape() {
            return Err(SnarkError::KeyShapeMismatch);
        }
        let domain = evaluation_domain::<F>(required_domain_size)?;
        let m = domain.size();
        if m > self.size() {
            return Err(SnarkError::CeremonyTooSmall(m, self.size()));
        }
        let omega = domain_element(&domain, 1);

        let mut coeffs_g1 = self.tau_powers_g1[..m].to_vec();
        G1::ifft_in_place(&mut coeffs_g1, &omega)?;
        let mut coeffs_g2 = self.tau_powers_g2[..m].to_vec();
        G2::ifft_in_place(&mut coeffs_g2, &omega)?;
        let mut alpha_coeffs_g1 = self.alpha_tau_powers_g1[..m].to_vec();
        G1::ifft_in_place(&mut alpha_coeffs_g1, &omega)?;
        let mut beta_coeffs_g1 = self.beta_tau_powers_g1[..m].to_vec();
        G1::ifft_in_place(&mut beta_coeffs_g1, &omega)?;

        let h = (0..m - 1)
            .map(|i| self.tau_powers_g1[i + m] - &self.tau_powers_g1[i])
            .collect();

        end_timer!(timer);
        Ok(PowersOfTauResult {
            alpha_g1: self.alpha_tau_powers_g1[0],
            beta_g1: self.beta_tau_powers_g1[0],
            beta_g2: self.beta_g2,
            coeffs_g1,
            coeffs_g2,
            alpha_coeffs_g1,
            beta_coeffs_g1,
            h,
        })
    }
}

/// The G2 points the three proofs of knowledge of `pk` are bound to.
fn pok_bases<G1: Group, G2: Group>(
    pk: &PublicKey<G1, G2>,
    digest: &TranscriptHash,
) -> (G2, G2, G2) {
    (
        hash_to_g2(PERSONALIZATION_TAU, digest, &pk.tau_g1.0, &pk.tau_g1.1),
        hash_to_g2(PERSONALIZATION_ALPHA, digest, &pk.alpha_g1.0, &pk.alpha_g1.1),
        hash_to_g2(PERSONALIZATION_BETA, digest, &pk.beta_g1.0, &pk.beta_g1.1),
    )
}

/// Check the proofs of knowledge of `pk` and that it moves the accumulated
/// `[τ]₁, [α]₁, [β]₁` from `prev` to its own `*_after_g1` values.
fn verify_public_key<P: Pairing>(
    pk: &PotPublicKey<P>,
    prev: (&P::G1, &P::G1, &P::G1),
    digest: &TranscriptHash,
) -> bool {
    let (r_tau, r_alpha, r_beta) = pok_bases(pk, digest);
    same_ratio::<P>((&pk.tau_g1.0, &pk.tau_g1.1), (&r_tau, &pk.tau_g2))
        && same_ratio::<P>((&pk.alpha_g1.0, &pk.alpha_g1.1), (&r_alpha, &pk.alpha_g2))
        && same_ratio::<P>((&pk.beta_g1.0, &pk.beta_g1.1), (&r_beta, &pk.beta_g2))
        && same_ratio::<P>((prev.0, &pk.tau_after_g1), (&r_tau, &pk.tau_g2))
        && same_ratio::<P>((prev.1, &pk.alpha_after_g1), (&r_alpha, &pk.alpha_g2))
        && same_ratio::<P>((prev.2, &pk.beta_after_g1), (&r_beta, &pk.beta_g2))
}

/// Check a single contribution given the accumulator before and after it and
/// the transcript digest it was built on.
pub fn verify_transform<P: Pairing, R: CryptoRng + RngCore>(
    prng: &mut R,
    before: &PowersOfTau<P>,
    after: &PowersOfTau<P>,
    pk: &PotPublicKey<P>,
    digest: &TranscriptHash,
) -> bool {
    if !before.has_consistent_shape()
        || !after.has_consistent_shape()
        || before.size() != after.size()
    {
        return false;
    }
    if pk.tau_after_g1 != after.tau_powers_g1[1]
        || pk.alpha_after_g1 != after.alpha_tau_powers_g1[0]
        || pk.beta_after_g1 != after.beta_tau_powers_g1[0]
    {
        return false;
    }
    let prev = (
        &before.tau_powers_g1[1],
        &before.alpha_tau_powers_g1[0],
        &before.beta_tau_powers_g1[0],
    );
    if !verify_public_key::<P>(pk, prev, digest) {
        return false;
    }
    same_ratio::<P>(
        (&before.beta_tau_powers_g1[0], &after.beta_tau_powers_g1[0]),
        (&before.beta_g2, &after.beta_g2),
    ) && after.is_well_formed::<P, R>(prng)
}

/// Replay a whole ceremony from its public records and final accumulator,
/// returning the final transcript digest.
///
/// Fails with `InvalidContribution(i)` naming the first record that does not
/// verify, or the last record if the final accumulator does not match it.
pub fn verify_transcript<P: Pairing, R: CryptoRng + RngCore>(
    prng: &mut R,
    public_keys: &[PotPublicKey<P>],
    final_accumulator: &PowersOfTau<P>,
) -> Result<TranscriptHash> {
    let timer = start_timer!(|| format!("Verify transcript of {} contributions", public_keys.len()));
    let last = public_keys.len().saturating_sub(1);
    if !final_accumulator.has_consistent_shape() {
        return Err(SnarkError::InvalidContribution(last));
    }

    let base = P::G1::get_base();
    let mut digest = TranscriptHash::genesis(final_accumulator.size());
    let mut prev = (base, base, base);
    for (i, pk) in public_keys.iter().enumerate() {
        if !verify_public_key::<P>(pk, (&prev.0, &prev.1, &prev.2), &digest) {
            return Err(SnarkError::InvalidContribution(i));
        }
        digest = digest.chain(pk)?;
        prev = (pk.tau_after_g1, pk.alpha_after_g1, pk.beta_after_g1);
    }

    if prev.0 != final_accumulator.tau_powers_g1[1]
        || prev.1 != final_accumulator.alpha_tau_powers_g1[0]
        || prev.2 != final_accumulator.beta_tau_powers_g1[0]
        || !final_accumulator.is_well_formed::<P, R>(prng)
    {
        return Err(SnarkError::InvalidContribution(last));
    }
    end_timer!(timer);
    Ok(digest)
}
