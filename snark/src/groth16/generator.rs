use super::keys::{Groth16Keypair, Keypair, ProvingKey, VerifyingKey};
use crate::{
    errors::Result, qap::instance_map_with_evaluation, r1cs::ConstraintSystem, secret::Secret,
};
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;
use zeroize::Zeroize;

/// Options of the key generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeygenConfig {
    /// Swap the A and B sides of the constraints when that makes the
    /// B query, which lives in G2, smaller.
    pub swap_ab_if_beneficial: bool,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            swap_ab_if_beneficial: true,
        }
    }
}

/// The toxic waste of a Groth16 setup.
#[derive(Debug)]
pub struct Trapdoor<F: Scalar> {
    /// The QAP evaluation point.
    pub tau: Secret<F>,
    /// `α`.
    pub alpha: Secret<F>,
    /// `β`.
    pub beta: Secret<F>,
    /// `γ`.
    pub gamma: Secret<F>,
    /// `δ`.
    pub delta: Secret<F>,
}

impl<F: Scalar> Trapdoor<F> {
    /// Sample a trapdoor with every value non-zero.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self {
            tau: Secret::random(prng),
            alpha: Secret::random(prng),
            beta: Secret::random(prng),
            gamma: Secret::random(prng),
            delta: Secret::random(prng),
        }
    }

    /// Build a trapdoor from known values.
    pub fn new(tau: F, alpha: F, beta: F, gamma: F, delta: F) -> Self {
        Self {
            tau: Secret::new(tau),
            alpha: Secret::new(alpha),
            beta: Secret::new(beta),
            gamma: Secret::new(gamma),
            delta: Secret::new(delta),
        }
    }
}

/// Generate a keypair for `cs` with a fresh trapdoor and the default options.
pub fn generator<P: Pairing, R: CryptoRng + RngCore>(
    prng: &mut R,
    cs: &ConstraintSystem<P::ScalarField>,
) -> Result<Groth16Keypair<P>> {
    generator_with_config::<P, R>(prng, cs, &KeygenConfig::default())
}

/// Generate a keypair for `cs` with a fresh trapdoor.
pub fn generator_with_config<P: Pairing, R: CryptoRng + RngCore>(
    prng: &mut R,
    cs: &ConstraintSystem<P::ScalarField>,
    config: &KeygenConfig,
) -> Result<Groth16Keypair<P>> {
    let trapdoor = Trapdoor::random(prng);
    generator_with_trapdoor::<P>(cs, &trapdoor, config)
}

/// Generate the keypair determined by `cs` and `trapdoor`.
///
/// A τ that falls in the evaluation domain makes `Z(τ) = 0`; such keys are
/// useless but still well-formed, and `Trapdoor::random` hits one with
/// negligible probability.
pub fn generator_with_trapdoor<P: Pairing>(
    cs: &ConstraintSystem<P::ScalarField>,
    trapdoor: &Trapdoor<P::ScalarField>,
    config: &KeygenConfig,
) -> Result<Groth16Keypair<P>> {
    let generator_timer = start_timer!(|| "Groth16 generator");

    let mut cs = cs.clone();
    if config.swap_ab_if_beneficial {
        cs.swap_ab_if_beneficial();
    }

    let alpha = trapdoor.alpha.expose();
    let beta = trapdoor.beta.expose();
    let gamma_inv = Secret::new(trapdoor.gamma.expose().inv()?);
    let delta_inv = Secret::new(trapdoor.delta.expose().inv()?);

    let qap = instance_map_with_evaluation(&cs, trapdoor.tau.expose())?;
    let num_inputs = cs.num_inputs();

    let exponents_timer = start_timer!(|| "Compute query exponents");
    let mut gamma_abc: Vec<P::ScalarField> = Vec::with_capacity(num_inputs + 1);
    let mut l: Vec<P::ScalarField> = Vec::with_capacity(cs.auxiliary_input_size);
    for (i, (a, b, c)) in izip!(qap.at.iter(), qap.bt.iter(), qap.ct.iter()).enumerate() {
        let abc = Secret::new(*beta * a + &(*alpha * b) + c);
        if i <= num_inputs {
            gamma_abc.push(*abc.expose() * gamma_inv.expose());
        } else {
            l.push(*abc.expose() * delta_inv.expose());
        }
    }

    let zt_over_delta = Secret::new(qap.zt * delta_inv.expose());
    let mut h: Vec<P::ScalarField> = qap.ht[..qap.degree() - 1]
        .iter()
        .map(|t| *t * zt_over_delta.expose())
        .collect();
    end_timer!(exponents_timer);

    let g1 = P::G1::get_base();
    let g2 = P::G2::get_base();

    let queries_timer = start_timer!(|| "Compute A, B, H and L queries");
    let a_query = g1.batch_mul(&qap.at);
    let b_query_g1 = g1.batch_mul(&qap.bt);
    let b_query_g2 = g2.batch_mul(&qap.bt);
    let h_query = g1.batch_mul(&h);
    let l_query = g1.batch_mul(&l);
    let gamma_abc_g1 = g1.batch_mul(&gamma_abc);
    end_timer!(queries_timer);

    h.zeroize();
    l.zeroize();
    gamma_abc.zeroize();
    drop(qap);

    let alpha_g1 = g1.mul(alpha);
    let beta_g2 = g2.mul(beta);
    let delta_g2 = g2.mul(trapdoor.delta.expose());

    let vk = VerifyingKey {
        alpha_g1,
        beta_g2,
        gamma_g2: g2.mul(trapdoor.gamma.expose()),
        delta_g2,
        gamma_abc_g1,
    };

    let pk = ProvingKey {
        alpha_g1,
        beta_g1: g1.mul(beta),
        beta_g2,
        delta_g1: g1.mul(trapdoor.delta.expose()),
        delta_g2,
        a_query,
        b_query_g1,
        b_query_g2,
        h_query,
        l_query,
        constraint_system: cs,
    };

    end_timer!(generator_timer);
    Ok(Keypair { pk, vk })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        qap::evaluation_domain_for,
        r1cs::{generate_r1cs_example_with_field_input, Constraint, LinearCombination},
        SnarkError,
    };
    use ark_poly::EvaluationDomain;
    use kiln_algebra::bn254::{BN254PairingEngine, BN254Scalar, BN254G1};

    type P = BN254PairingEngine;

    #[test]
    fn key_shapes_follow_the_system() {
        let mut prng = test_rng();
        let ex = generate_r1cs_example_with_field_input::<BN254Scalar, _>(30, 7, &mut prng)
            .unwrap();
        let cs = &ex.constraint_system;
        let keypair = generator::<P, _>(&mut prng, cs).unwrap();
        let domain = evaluation_domain_for(cs).unwrap();

        assert!(keypair.pk.has_consistent_shape(domain.size()));
        assert_eq!(keypair.pk.a_query.len(), cs.num_variables() + 1);
        assert_eq!(keypair.pk.l_query.len(), cs.auxiliary_input_size);
        assert_eq!(keypair.pk.h_query.len(), domain.size() - 1);
        assert_eq!(keypair.vk.gamma_abc_g1.len(), 8);
        assert_eq!(keypair.vk.num_inputs(), 7);
        assert_eq!(keypair.pk.alpha_g1, keypair.vk.alpha_g1);
    }

    #[test]
    fn trapdoor_determines_the_keys() {
        let mut prng = test_rng();
        let ex = generate_r1cs_example_with_field_input::<BN254Scalar, _>(10, 2, &mut prng)
            .unwrap();
        let values: Vec<BN254Scalar> = (0..5).map(|_| BN254Scalar::random(&mut prng)).collect();
        let make = || Trapdoor::new(values[0], values[1], values[2], values[3], values[4]);

        let config = KeygenConfig::default();
        let k1 = generator_with_trapdoor::<P>(&ex.constraint_system, &make(), &config).unwrap();
        let k2 = generator_with_trapdoor::<P>(&ex.constraint_system, &make(), &config).unwrap();
        assert_eq!(k1, k2);

        // the first h query element is Z(τ)/δ
        let domain = evaluation_domain_for(&ex.constraint_system).unwrap();
        let zt = values[0].pow(&[domain.size() as u64]) - &BN254Scalar::one();
        let expected = BN254G1::get_base().mul(&(zt * &values[4].inv().unwrap()));
        assert_eq!(k1.pk.h_query[0], expected);

        // input and witness queries carry (β·A + α·B + C)/γ and /δ
        let qap = instance_map_with_evaluation(&k1.pk.constraint_system, &values[0]).unwrap();
        let abc = |i: usize| values[2] * &qap.at[i] + &(values[1] * &qap.bt[i]) + &qap.ct[i];
        let g1 = BN254G1::get_base();
        let gamma_inv = values[3].inv().unwrap();
        let delta_inv = values[4].inv().unwrap();
        assert_eq!(k1.vk.gamma_abc_g1[1], g1.mul(&(abc(1) * &gamma_inv)));
        let first_aux = ex.constraint_system.num_inputs() + 1;
        assert_eq!(k1.pk.l_query[0], g1.mul(&(abc(first_aux) * &delta_inv)));
    }

    #[test]
    fn swap_is_recorded_in_the_proving_key() {
        let one = BN254Scalar::one();
        let mut cs = ConstraintSystem::new(1, 2);
        cs.add_constraint(Constraint::new(
            LinearCombination::from_terms(vec![(1, one)]),
            LinearCombination::from_terms(vec![(1, one), (2, one), (3, one)]),
            LinearCombination::from_terms(vec![(3, one)]),
        ));
        let mut prng = test_rng();

        let swapped = generator::<P, _>(&mut prng, &cs).unwrap();
        assert_ne!(swapped.pk.constraint_system, cs);
        assert_eq!(swapped.pk.constraint_system.constraints[0].a, cs.constraints[0].b);

        let config = KeygenConfig {
            swap_ab_if_beneficial: false,
        };
        let kept = generator_with_config::<P, _>(&mut prng, &cs, &config).unwrap();
        assert_eq!(kept.pk.constraint_system, cs);
    }

    #[test]
    fn malformed_system_is_rejected() {
        let one = BN254Scalar::one();
        let mut cs = ConstraintSystem::new(1, 1);
        cs.add_constraint(Constraint::new(
            LinearCombination::from_terms(vec![(5, one)]),
            LinearCombination::from_terms(vec![(0, one)]),
            LinearCombination::zero(),
        ));
        let mut prng = test_rng();
        assert_eq!(
            generator::<P, _>(&mut prng, &cs).err(),
            Some(SnarkError::MalformedConstraintSystem)
        );
    }

    #[test]
    fn config_from_json() {
        let config: KeygenConfig =
            serde_json::from_str(r#"{"swap_ab_if_beneficial":false}"#).unwrap();
        assert!(!config.swap_ab_if_beneficial);
        assert!(KeygenConfig::default().swap_ab_if_beneficial);
    }
}
