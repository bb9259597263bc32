use super::accumulator::PowersOfTauResultOf;
use crate::{
    errors::{Result, SnarkError},
    groth16::{Groth16Keypair, KeygenConfig, Keypair, ProvingKey, VerifyingKey},
    qap::evaluation_domain_for,
    r1cs::ConstraintSystem,
};
use ark_poly::EvaluationDomain;
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;

/// Specialize a ceremony result into Groth16 keys for `cs`, with `γ = δ = 1`.
///
/// The keys have the generator's shape and equal
/// `generator_with_trapdoor(cs, (τ, α, β, 1, 1))` for the accumulated
/// trapdoors. Running the delta round afterwards is what makes `δ` secret.
pub fn init_mpc_keypair<P: Pairing>(
    cs: &ConstraintSystem<P::ScalarField>,
    result: &PowersOfTauResultOf<P>,
    config: &KeygenConfig,
) -> Result<Groth16Keypair<P>> {
    let timer = start_timer!(|| "Specialize powers of tau");

    let mut cs = cs.clone();
    if config.swap_ab_if_beneficial {
        cs.swap_ab_if_beneficial();
    }
    if !cs.is_valid() {
        return Err(SnarkError::MalformedConstraintSystem);
    }

    let domain = evaluation_domain_for(&cs)?;
    let m = domain.size();
    if result.coeffs_g1.len() != m
        || result.coeffs_g2.len() != m
        || result.alpha_coeffs_g1.len() != m
        || result.beta_coeffs_g1.len() != m
        || result.h.len() + 1 != m
    {
        return Err(SnarkError::KeyShapeMismatch);
    }

    let n = cs.num_variables() + 1;
    let num_constraints = cs.num_constraints();
    let num_inputs = cs.num_inputs();

    let one = P::ScalarField::one();
    let mut a_terms: Vec<Vec<(usize, &P::ScalarField)>> = vec![vec![]; n];
    let mut b_terms: Vec<Vec<(usize, &P::ScalarField)>> = vec![vec![]; n];
    let mut c_terms: Vec<Vec<(usize, &P::ScalarField)>> = vec![vec![]; n];
    for (j, constraint) in cs.constraints.iter().enumerate() {
        for (index, coeff) in constraint.a.terms() {
            a_terms[*index].push((j, coeff));
        }
        for (index, coeff) in constraint.b.terms() {
            b_terms[*index].push((j, coeff));
        }
        for (index, coeff) in constraint.c.terms() {
            c_terms[*index].push((j, coeff));
        }
    }
    // input consistency: variable i also sits at point `num_constraints + i` on the A side
    for (i, terms) in a_terms.iter_mut().take(num_inputs + 1).enumerate() {
        terms.push((num_constraints + i, &one));
    }

    let eval_timer = start_timer!(|| "Evaluate the QAP in the exponent");
    let mut a_query = Vec::with_capacity(n);
    let mut b_query_g1 = Vec::with_capacity(n);
    let mut b_query_g2 = Vec::with_capacity(n);
    let mut abc = Vec::with_capacity(n);
    for (a, b, c) in izip!(a_terms.iter(), b_terms.iter(), c_terms.iter()) {
        let (a, b, c) = (a.as_slice(), b.as_slice(), c.as_slice());
        a_query.push(evaluate_in_exponent(&[(a, result.coeffs_g1.as_slice())]));
        b_query_g1.push(evaluate_in_exponent(&[(b, result.coeffs_g1.as_slice())]));
        b_query_g2.push(evaluate_in_exponent(&[(b, result.coeffs_g2.as_slice())]));
        abc.push(evaluate_in_exponent(&[
            (a, result.beta_coeffs_g1.as_slice()),
            (b, result.alpha_coeffs_g1.as_slice()),
            (c, result.coeffs_g1.as_slice()),
        ]));
    }
    end_timer!(eval_timer);

    let l_query = abc.split_off(num_inputs + 1);
    let g1 = P::G1::get_base();
    let g2 = P::G2::get_base();

    let vk = VerifyingKey {
        alpha_g1: result.alpha_g1,
        beta_g2: result.beta_g2,
        gamma_g2: g2,
        delta_g2: g2,
        gamma_abc_g1: abc,
    };
    let pk = ProvingKey {
        alpha_g1: result.alpha_g1,
        beta_g1: result.beta_g1,
        beta_g2: result.beta_g2,
        delta_g1: g1,
        delta_g2: g2,
        a_query,
        b_query_g1,
        b_query_g2,
        h_query: result.h.clone(),
        l_query,
        constraint_system: cs,
    };

    end_timer!(timer);
    Ok(Keypair { pk, vk })
}

/// Compute `Σ coeff · bases[j]` over every `(j, coeff)` of every side with
/// a single multi-exponentiation.
fn evaluate_in_exponent<'a, G: Group>(
    sides: &[(&'a [(usize, &'a G::ScalarType)], &'a [G])],
) -> G {
    let mut scalars: Vec<&G::ScalarType> = vec![];
    let mut points: Vec<&G> = vec![];
    for &(terms, bases) in sides {
        for &(j, coeff) in terms {
            scalars.push(coeff);
            points.push(&bases[j]);
        }
    }
    G::multi_exp(&scalars, &points)
}
