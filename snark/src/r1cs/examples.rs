use super::{Constraint, ConstraintSystem, LinearCombination};
use crate::errors::{Result, SnarkError};
use kiln_algebra::prelude::*;

/// A constraint system bundled with a satisfying assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1csExample<F> {
    /// The constraint system.
    pub constraint_system: ConstraintSystem<F>,
    /// The public inputs.
    pub primary_input: Vec<F>,
    /// The private witness.
    pub auxiliary_input: Vec<F>,
}

impl<F: Scalar> R1csExample<F> {
    fn split(constraint_system: ConstraintSystem<F>, mut full: Vec<F>) -> Self {
        let auxiliary_input = full.split_off(constraint_system.primary_input_size);
        Self {
            constraint_system,
            primary_input: full,
            auxiliary_input,
        }
    }
}

/// Generate a satisfied example with `num_constraints` constraints and
/// `num_inputs` random field elements as public inputs.
///
/// Starting from two random values, each constraint alternately adds or
/// multiplies the last two variables. A final constraint squares the sum of
/// all previous variables. Requires `num_constraints >= 1` and
/// `num_inputs <= num_constraints + 2`.
pub fn generate_r1cs_example_with_field_input<F: Scalar, R: CryptoRng + RngCore>(
    num_constraints: usize,
    num_inputs: usize,
    prng: &mut R,
) -> Result<R1csExample<F>> {
    if num_constraints == 0 || num_inputs > num_constraints + 2 {
        return Err(SnarkError::MalformedConstraintSystem);
    }

    let mut cs = ConstraintSystem::new(num_inputs, 2 + num_constraints - num_inputs);
    let mut assignment = Vec::with_capacity(cs.num_variables());

    let mut a = F::random(prng);
    let mut b = F::random(prng);
    assignment.push(a);
    assignment.push(b);

    for i in 0..num_constraints - 1 {
        let mut lc_a = LinearCombination::zero();
        let mut lc_b = LinearCombination::zero();
        let mut lc_c = LinearCombination::zero();
        let next = if i % 2 == 1 {
            lc_a.add_term(i + 1, F::one());
            lc_b.add_term(i + 2, F::one());
            a * &b
        } else {
            lc_a.add_term(i + 1, F::one());
            lc_a.add_term(i + 2, F::one());
            lc_b.add_term(0, F::one());
            a + &b
        };
        lc_c.add_term(i + 3, F::one());
        cs.add_constraint(Constraint::new(lc_a, lc_b, lc_c));
        assignment.push(next);
        a = b;
        b = next;
    }

    let mut lc_a = LinearCombination::zero();
    let mut lc_b = LinearCombination::zero();
    let mut lc_c = LinearCombination::zero();
    let mut sum = F::zero();
    for (i, value) in assignment.iter().enumerate() {
        lc_a.add_term(i + 1, F::one());
        lc_b.add_term(i + 1, F::one());
        sum += value;
    }
    lc_c.add_term(cs.num_variables(), F::one());
    cs.add_constraint(Constraint::new(lc_a, lc_b, lc_c));
    assignment.push(sum.square());

    Ok(R1csExample::split(cs, assignment))
}

/// Generate a satisfied example with `num_constraints` constraints and
/// `num_inputs` random bits as public inputs.
///
/// Every constraint XORs two earlier bits into a fresh auxiliary variable,
/// written as `2·u·v = u + v − res`. Requires `num_inputs >= 1`.
pub fn generate_r1cs_example_with_binary_input<F: Scalar, R: CryptoRng + RngCore>(
    num_constraints: usize,
    num_inputs: usize,
    prng: &mut R,
) -> Result<R1csExample<F>> {
    if num_inputs == 0 {
        return Err(SnarkError::MalformedConstraintSystem);
    }

    let mut cs = ConstraintSystem::new(num_inputs, num_constraints);
    let mut assignment: Vec<F> = (0..num_inputs)
        .map(|_| F::from(prng.next_u32() % 2))
        .collect();
    assignment.reserve(num_constraints);

    let two = F::from(2u32);
    let mut pick = |bound: usize| (prng.next_u64() % bound as u64) as usize;

    for i in 0..num_constraints {
        let res = num_inputs + i;
        let u = pick(res);
        let v = pick(res);

        let lc_a = LinearCombination::from_terms(vec![(u + 1, two)]);
        let lc_b = LinearCombination::from_terms(vec![(v + 1, F::one())]);
        let mut lc_c = if u == v {
            LinearCombination::from_terms(vec![(u + 1, two)])
        } else {
            LinearCombination::from_terms(vec![(u + 1, F::one()), (v + 1, F::one())])
        };
        lc_c.add_term(res + 1, F::one().neg());
        cs.add_constraint(Constraint::new(lc_a, lc_b, lc_c));

        let (x, y) = (assignment[u], assignment[v]);
        let xy = x * &y;
        assignment.push(x + &y - &xy - &xy);
    }

    Ok(R1csExample::split(cs, assignment))
}
