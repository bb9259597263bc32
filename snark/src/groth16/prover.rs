use super::{
    keys::{Proof, ProvingKey},
    multi_exp,
};
use crate::{
    errors::{Result, SnarkError},
    qap::{evaluation_domain_for, witness_map},
    secret::Secret,
};
use ark_poly::EvaluationDomain;
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;
use zeroize::Zeroize;

/// Prove that `primary_input` and `auxiliary_input` satisfy the constraint
/// system stored in `pk`.
///
/// ```text
/// A = α + Σ w_i·A_i(τ) + r·δ                       in G1
/// B = β + Σ w_i·B_i(τ) + s·δ                       in G2 (and G1 for C)
/// C = Σ h_i·H_i + Σ aux_i·L_i + s·A + r·B - r·s·δ  in G1
/// ```
pub fn prover<F, G1, G2, R>(
    prng: &mut R,
    pk: &ProvingKey<F, G1, G2>,
    primary_input: &[F],
    auxiliary_input: &[F],
) -> Result<Proof<G1, G2>>
where
    F: Domain,
    G1: Group<ScalarType = F>,
    G2: Group<ScalarType = F>,
    R: CryptoRng + RngCore,
{
    let prover_timer = start_timer!(|| "Groth16 prover");
    let cs = &pk.constraint_system;

    let domain = evaluation_domain_for(cs)?;
    if !pk.has_consistent_shape(domain.size()) {
        return Err(SnarkError::KeyShapeMismatch);
    }
    let mut full = cs.full_assignment(primary_input, auxiliary_input)?;
    if !cs.is_satisfied(primary_input, auxiliary_input) {
        return Err(SnarkError::InvalidWitness);
    }

    let zero = F::zero();
    let witness = witness_map(cs, primary_input, auxiliary_input, &zero, &zero, &zero)?;

    let r = Secret::<F>::random(prng);
    let s = Secret::<F>::random(prng);

    let a_timer = start_timer!(|| "Compute the evaluation of A");
    let a = pk.alpha_g1 + &multi_exp(&full, &pk.a_query) + &pk.delta_g1.mul(r.expose());
    end_timer!(a_timer);

    let b_timer = start_timer!(|| "Compute the evaluation of B");
    let b_g1 = pk.beta_g1 + &multi_exp(&full, &pk.b_query_g1) + &pk.delta_g1.mul(s.expose());
    let b_g2 = pk.beta_g2 + &multi_exp(&full, &pk.b_query_g2) + &pk.delta_g2.mul(s.expose());
    end_timer!(b_timer);

    let c_timer = start_timer!(|| "Compute the evaluation of C");
    let h = multi_exp(&witness.coefficients_for_h, &pk.h_query);
    let l = multi_exp(&full[cs.num_inputs() + 1..], &pk.l_query);
    let rs = Secret::new(*r.expose() * s.expose());
    let c = h + &l + &a.mul(s.expose()) + &b_g1.mul(r.expose()) - &pk.delta_g1.mul(rs.expose());
    end_timer!(c_timer);
    full.zeroize();

    end_timer!(prover_timer);
    Ok(Proof { a, b: b_g2, c })
}
