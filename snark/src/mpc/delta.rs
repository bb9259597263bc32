use super::{
    mul_all,
    transcript::{hash_to_g2, merge_pairs, same_ratio, TranscriptHash, PERSONALIZATION_DELTA},
};
use crate::{
    errors::{Result, SnarkError},
    groth16::Keypair,
    secret::Secret,
};
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;

/// The public record of one delta contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaPublicKey<G1, G2> {
    /// `[δ]₁` after the contribution.
    pub delta_after: G1,
    /// A random G1 point.
    pub s: G1,
    /// `s·d`.
    pub s_delta: G1,
    /// `r·d`, with `r` hashed from `s`, `s_delta` and `transcript`.
    pub r_delta: G2,
    /// The transcript digest the contribution was built on.
    pub transcript: TranscriptHash,
}

/// The delta round of a circuit-specific setup.
///
/// Each contribution multiplies `δ` by a secret `d` and divides the `H` and
/// `L` queries by it, so the keypair keeps proving and verifying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpcParams<F, G1, G2> {
    /// The current keypair.
    pub keypair: Keypair<F, G1, G2>,
    /// The hash of the keypair the round started from.
    pub cs_hash: TranscriptHash,
    /// Every contribution so far, in order.
    pub contributions: Vec<DeltaPublicKey<G1, G2>>,
}

/// The delta round over a particular pairing.
pub type Groth16MpcParams<P> =
    MpcParams<<P as Pairing>::ScalarField, <P as Pairing>::G1, <P as Pairing>::G2>;

impl<F, G1, G2> MpcParams<F, G1, G2>
where
    F: Domain,
    G1: Group<ScalarType = F>,
    G2: Group<ScalarType = F>,
{
    /// Start a round from a keypair, usually one from `init_mpc_keypair`.
    pub fn new(keypair: Keypair<F, G1, G2>) -> Result<Self> {
        let cs_hash = TranscriptHash::of(&keypair)?;
        Ok(Self {
            keypair,
            cs_hash,
            contributions: vec![],
        })
    }

    /// The digest the next contribution is bound to: `cs_hash` chained with
    /// every contribution so far.
    pub fn transcript(&self) -> Result<TranscriptHash> {
        let mut digest = self.cs_hash;
        for c in self.contributions.iter() {
            digest = digest.chain(c)?;
        }
        Ok(digest)
    }

    /// Multiply `δ` by a fresh secret and return the new transcript digest.
    pub fn contribute<R: CryptoRng + RngCore>(&mut self, prng: &mut R) -> Result<TranscriptHash> {
        let timer = start_timer!(|| "Delta contribution");
        let transcript = self.transcript()?;

        let d = Secret::<F>::random(prng);
        let d_inv = Secret::new(d.expose().inv()?);

        let s = G1::get_base().mul(&F::random_nonzero(prng));
        let s_delta = s.mul(d.expose());
        let r: G2 = hash_to_g2(PERSONALIZATION_DELTA, &transcript, &s, &s_delta);
        let r_delta = r.mul(d.expose());

        let pk = &mut self.keypair.pk;
        pk.delta_g1 = pk.delta_g1.mul(d.expose());
        pk.delta_g2 = pk.delta_g2.mul(d.expose());
        self.keypair.vk.delta_g2 = pk.delta_g2;

        let queries_timer = start_timer!(|| "Rescale H and L queries");
        mul_all(&mut pk.h_query, d_inv.expose());
        mul_all(&mut pk.l_query, d_inv.expose());
        end_timer!(queries_timer);

        let record = DeltaPublicKey {
            delta_after: pk.delta_g1,
            s,
            s_delta,
            r_delta,
            transcript,
        };
        let next = transcript.chain(&record)?;
        self.contributions.push(record);

        end_timer!(timer);
        Ok(next)
    }

    /// Check that `after` descends from `initial` through its recorded
    /// contributions and return the digest following each of them.
    ///
    /// Everything except `δ` and the `H` and `L` queries must be unchanged.
    pub fn verify_contributions<P, R>(
        prng: &mut R,
        initial: &Self,
        after: &Self,
    ) -> Result<Vec<TranscriptHash>>
    where
        P: Pairing<ScalarField = F, G1 = G1, G2 = G2>,
        R: CryptoRng + RngCore,
    {
        let timer = start_timer!(|| "Verify delta contributions");
        let (pk0, pk1) = (&initial.keypair.pk, &after.keypair.pk);
        let (vk0, vk1) = (&initial.keypair.vk, &after.keypair.vk);

        if !initial.contributions.is_empty()
            || initial.cs_hash != TranscriptHash::of(&initial.keypair)?
            || after.cs_hash != initial.cs_hash
            || pk0.alpha_g1 != pk1.alpha_g1
            || pk0.beta_g1 != pk1.beta_g1
            || pk0.beta_g2 != pk1.beta_g2
            || pk0.a_query != pk1.a_query
            || pk0.b_query_g1 != pk1.b_query_g1
            || pk0.b_query_g2 != pk1.b_query_g2
            || pk0.h_query.len() != pk1.h_query.len()
            || pk0.l_query.len() != pk1.l_query.len()
            || pk0.constraint_system != pk1.constraint_system
            || vk0.alpha_g1 != vk1.alpha_g1
            || vk0.beta_g2 != vk1.beta_g2
            || vk0.gamma_g2 != vk1.gamma_g2
            || vk0.gamma_abc_g1 != vk1.gamma_abc_g1
        {
            return Err(SnarkError::KeyShapeMismatch);
        }

        let mut digest = initial.cs_hash;
        let mut current = pk0.delta_g1;
        let mut digests = Vec::with_capacity(after.contributions.len());
        for (i, c) in after.contributions.iter().enumerate() {
            if c.transcript != digest {
                return Err(SnarkError::InvalidContribution(i));
            }
            let r: G2 = hash_to_g2(PERSONALIZATION_DELTA, &digest, &c.s, &c.s_delta);
            if !same_ratio::<P>((&c.s, &c.s_delta), (&r, &c.r_delta))
                || !same_ratio::<P>((&current, &c.delta_after), (&r, &c.r_delta))
            {
                return Err(SnarkError::InvalidContribution(i));
            }
            digest = digest.chain(c)?;
            digests.push(digest);
            current = c.delta_after;
        }

        let last = after.contributions.len().saturating_sub(1);
        if pk1.delta_g1 != current
            || vk1.delta_g2 != pk1.delta_g2
            || !same_ratio::<P>(
                (&G1::get_base(), &pk1.delta_g1),
                (&G2::get_base(), &pk1.delta_g2),
            )
        {
            return Err(SnarkError::InvalidContribution(last));
        }

        // H and L are divided by the overall change of δ
        let (h1, h0) = merge_pairs(prng, &pk1.h_query, &pk0.h_query);
        let (l1, l0) = merge_pairs(prng, &pk1.l_query, &pk0.l_query);
        let h_ok = pk0.h_query.is_empty()
            || same_ratio::<P>((&h1, &h0), (&pk0.delta_g2, &pk1.delta_g2));
        let l_ok = pk0.l_query.is_empty()
            || same_ratio::<P>((&l1, &l0), (&pk0.delta_g2, &pk1.delta_g2));
        if !h_ok || !l_ok {
            return Err(SnarkError::InvalidContribution(last));
        }

        end_timer!(timer);
        Ok(digests)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        groth16::{prover, verifier, KeygenConfig},
        mpc::{init_mpc_keypair, PowersOfTau},
        qap::evaluation_domain_for,
        r1cs::generate_r1cs_example_with_binary_input,
    };
    use ark_poly::EvaluationDomain;
    use kiln_algebra::bn254::{BN254PairingEngine, BN254Scalar, BN254G1, BN254G2};

    type P = BN254PairingEngine;
    type Record = DeltaPublicKey<BN254G1, BN254G2>;

    fn initial_params() -> (Groth16MpcParams<P>, Vec<BN254Scalar>, Vec<BN254Scalar>) {
        let mut prng = test_rng();
        let ex = generate_r1cs_example_with_binary_input::<BN254Scalar, _>(12, 3, &mut prng)
            .unwrap();
        let mut acc = PowersOfTau::<P>::new(16).unwrap();
        acc.contribute(&mut prng, &TranscriptHash::genesis(16))
            .unwrap();
        let domain = evaluation_domain_for(&ex.constraint_system).unwrap();
        let result = acc.to_result(domain.size()).unwrap();
        let keypair =
            init_mpc_keypair::<P>(&ex.constraint_system, &result, &KeygenConfig::default())
                .unwrap();
        (
            MpcParams::new(keypair).unwrap(),
            ex.primary_input,
            ex.auxiliary_input,
        )
    }

    fn check<R: CryptoRng + RngCore>(
        prng: &mut R,
        initial: &Groth16MpcParams<P>,
        after: &Groth16MpcParams<P>,
    ) -> Result<Vec<TranscriptHash>> {
        Groth16MpcParams::<P>::verify_contributions::<P, R>(prng, initial, after)
    }

    #[test]
    fn contributions_keep_keys_working() {
        let mut prng = test_rng();
        let (initial, primary, aux) = initial_params();
        let mut params = initial.clone();
        let d1 = params.contribute(&mut prng).unwrap();
        let d2 = params.contribute(&mut prng).unwrap();
        assert_ne!(params.keypair.pk.delta_g1, initial.keypair.pk.delta_g1);

        let digests = check(&mut prng, &initial, &params).unwrap();
        assert_eq!(digests, vec![d1, d2]);
        assert_eq!(params.transcript().unwrap(), d2);

        let keypair = &params.keypair;
        let proof = prover(&mut prng, &keypair.pk, &primary, &aux).unwrap();
        assert!(verifier::<P>(&keypair.vk, &primary, &proof));
    }

    #[test]
    fn tampering_is_detected() {
        let mut prng = test_rng();
        let (initial, _, _) = initial_params();
        let mut params = initial.clone();
        params.contribute(&mut prng).unwrap();
        params.contribute(&mut prng).unwrap();

        let mut bad = params.clone();
        bad.contributions[0].r_delta = bad.contributions[0].r_delta.double();
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(0)));

        let mut bad = params.clone();
        bad.contributions[1].transcript = bad.cs_hash;
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));

        let mut bad = params.clone();
        bad.keypair.pk.h_query[0] = bad.keypair.pk.h_query[0].double();
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));

        let mut bad = params.clone();
        bad.keypair.vk.delta_g2 = bad.keypair.vk.delta_g2.double();
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));

        let mut bad = params.clone();
        bad.keypair.pk.a_query[1] = bad.keypair.pk.a_query[1].double();
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::KeyShapeMismatch));

        assert!(check(&mut prng, &initial, &params).is_ok());
    }

    /// One edit per element of a delta record.
    fn record_edits() -> [fn(&mut Record); 5] {
        [
            |c| c.delta_after = c.delta_after.double(),
            |c| c.s = c.s.double(),
            |c| c.s_delta = c.s_delta.double(),
            |c| c.r_delta = c.r_delta.double(),
            |c| c.transcript = c.transcript.chain(&c.s).unwrap(),
        ]
    }

    #[test]
    fn every_record_element_is_bound() {
        let mut prng = test_rng();
        let (initial, _, _) = initial_params();
        let mut params = initial.clone();
        for _ in 0..3 {
            params.contribute(&mut prng).unwrap();
        }

        for i in 0..params.contributions.len() {
            for (field, edit) in record_edits().iter().enumerate() {
                let mut bad = params.clone();
                edit(&mut bad.contributions[i]);
                assert_eq!(
                    check(&mut prng, &initial, &bad),
                    Err(SnarkError::InvalidContribution(i)),
                    "element {} of contribution {}",
                    field,
                    i
                );
            }
        }
    }

    #[test]
    fn every_rescaled_query_element_is_bound() {
        let mut prng = test_rng();
        let (initial, _, _) = initial_params();
        let mut params = initial.clone();
        params.contribute(&mut prng).unwrap();
        params.contribute(&mut prng).unwrap();
        assert!(!params.keypair.pk.l_query.is_empty());

        for k in 0..params.keypair.pk.l_query.len() {
            let mut bad = params.clone();
            bad.keypair.pk.l_query[k] = bad.keypair.pk.l_query[k].double();
            assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));
        }
        for k in 0..params.keypair.pk.h_query.len() {
            let mut bad = params.clone();
            bad.keypair.pk.h_query[k] = bad.keypair.pk.h_query[k].double();
            assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));
        }

        let mut bad = params.clone();
        bad.keypair.pk.delta_g1 = bad.keypair.pk.delta_g1.double();
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));

        let mut bad = params.clone();
        bad.keypair.pk.delta_g2 = bad.keypair.pk.delta_g2.double();
        bad.keypair.vk.delta_g2 = bad.keypair.pk.delta_g2;
        assert_eq!(check(&mut prng, &initial, &bad), Err(SnarkError::InvalidContribution(1)));
    }
}
