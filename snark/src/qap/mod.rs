//! Reduction from rank-1 constraint systems to quadratic arithmetic programs.
//!
//! Constraint `j` is placed at the domain point `ω^j`. Variable `i` of the
//! primary input (with `i = 0` standing for the constant one) additionally
//! gets coefficient 1 on the A side at `ω^(num_constraints + i)`, which makes
//! the A polynomials of the public variables linearly independent.

use crate::{
    errors::{Result, SnarkError},
    polynomial::{
        coset_fft_in_place, coset_ifft_in_place, evaluate_vanishing, evaluation_domain,
        ifft_in_place, lagrange_coefficients, vanishing_on_coset, FftDomain, FpPolynomial,
    },
    r1cs::ConstraintSystem,
};
use ark_poly::EvaluationDomain;
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;
use zeroize::Zeroize;

/// Return the smallest evaluation domain able to hold every constraint and
/// every input-consistency point of `cs`.
pub fn evaluation_domain_for<F: Domain>(cs: &ConstraintSystem<F>) -> Result<FftDomain<F>> {
    evaluation_domain::<F>(cs.num_constraints() + cs.num_inputs() + 1)
}

/// Scatter the coefficients of every constraint into per-variable evaluation
/// vectors over the domain.
fn lagrange_basis<F: Domain>(
    cs: &ConstraintSystem<F>,
    size: usize,
) -> Result<(Vec<Vec<F>>, Vec<Vec<F>>, Vec<Vec<F>>)> {
    if !cs.is_valid() {
        return Err(SnarkError::MalformedConstraintSystem);
    }
    let n = cs.num_variables() + 1;
    let mut a = vec![vec![F::zero(); size]; n];
    let mut b = vec![vec![F::zero(); size]; n];
    let mut c = vec![vec![F::zero(); size]; n];

    for i in 0..=cs.num_inputs() {
        a[i][cs.num_constraints() + i] = F::one();
    }
    for (j, constraint) in cs.constraints.iter().enumerate() {
        for (index, coeff) in constraint.a.terms() {
            a[*index][j] += coeff;
        }
        for (index, coeff) in constraint.b.terms() {
            b[*index][j] += coeff;
        }
        for (index, coeff) in constraint.c.terms() {
            c[*index][j] += coeff;
        }
    }
    Ok((a, b, c))
}

/// The QAP of a constraint system in coefficient form.
#[derive(Clone, Debug)]
pub struct QapInstance<F: Domain> {
    /// The evaluation domain.
    pub domain: FftDomain<F>,
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The number of public inputs.
    pub num_inputs: usize,
    /// `A_0, ..., A_{num_variables}`.
    pub a_polys: Vec<FpPolynomial<F>>,
    /// `B_0, ..., B_{num_variables}`.
    pub b_polys: Vec<FpPolynomial<F>>,
    /// `C_0, ..., C_{num_variables}`.
    pub c_polys: Vec<FpPolynomial<F>>,
    /// The vanishing polynomial `X^D - 1`.
    pub z: FpPolynomial<F>,
}

impl<F: Domain> QapInstance<F> {
    /// Return the domain size `D`.
    pub fn degree(&self) -> usize {
        self.domain.size()
    }

    fn combine(polys: &[FpPolynomial<F>], full_assignment: &[F]) -> FpPolynomial<F> {
        let mut acc = FpPolynomial::zero();
        for (poly, w) in polys.iter().zip(full_assignment.iter()) {
            acc.add_assign(&poly.mul_scalar(w));
        }
        acc
    }

    /// Divide `A·B - C` by the vanishing polynomial, where `A`, `B` and `C`
    /// are the combinations weighted by `full_assignment` (leading one included).
    ///
    /// The remainder is zero exactly when the assignment satisfies the system.
    pub fn divide_by_vanishing(
        &self,
        full_assignment: &[F],
    ) -> Result<(FpPolynomial<F>, FpPolynomial<F>)> {
        if full_assignment.len() != self.num_variables + 1 {
            return Err(SnarkError::AuxiliaryInputSizeMismatch(
                self.num_variables + 1,
                full_assignment.len(),
            ));
        }
        let a = Self::combine(&self.a_polys, full_assignment);
        let b = Self::combine(&self.b_polys, full_assignment);
        let c = Self::combine(&self.c_polys, full_assignment);
        let mut p = a.mul(&b);
        p.sub_assign(&c);
        p.div_rem(&self.z)
    }
}

/// Interpolate the QAP polynomials of `cs`.
pub fn instance_map<F: Domain>(cs: &ConstraintSystem<F>) -> Result<QapInstance<F>> {
    let timer = start_timer!(|| "QAP instance map");
    let domain = evaluation_domain_for(cs)?;
    let size = domain.size();
    let (a, b, c) = lagrange_basis(cs, size)?;

    let interpolate = |evals: Vec<Vec<F>>| -> Vec<FpPolynomial<F>> {
        evals
            .iter()
            .map(|e| FpPolynomial::ifft_with_domain(&domain, e))
            .collect()
    };
    let instance = QapInstance {
        a_polys: interpolate(a),
        b_polys: interpolate(b),
        c_polys: interpolate(c),
        z: FpPolynomial::vanishing(size),
        num_variables: cs.num_variables(),
        num_inputs: cs.num_inputs(),
        domain,
    };
    end_timer!(timer);
    Ok(instance)
}

/// The QAP of a constraint system evaluated at a single point `t`.
///
/// Every scalar here is derived from the secret `t` and is wiped on drop.
pub struct QapInstanceEvaluation<F: Domain> {
    /// The evaluation domain.
    pub domain: FftDomain<F>,
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The number of public inputs.
    pub num_inputs: usize,
    /// The evaluation point.
    pub t: F,
    /// `A_i(t)` for every variable.
    pub at: Vec<F>,
    /// `B_i(t)` for every variable.
    pub bt: Vec<F>,
    /// `C_i(t)` for every variable.
    pub ct: Vec<F>,
    /// `t^i` for `i` in `0..=D`.
    pub ht: Vec<F>,
    /// `Z(t)`.
    pub zt: F,
}

impl<F: Domain> QapInstanceEvaluation<F> {
    /// Return the domain size `D`.
    pub fn degree(&self) -> usize {
        self.domain.size()
    }

    /// Check the blinded divisibility identity
    /// `(A(t) + d1·Z(t))·(B(t) + d2·Z(t)) - (C(t) + d3·Z(t)) = H(t)·Z(t)`.
    pub fn is_satisfied(&self, witness: &QapWitness<F>) -> bool {
        if witness.num_variables != self.num_variables
            || witness.num_inputs != self.num_inputs
            || witness.degree != self.degree()
            || witness.coefficients_for_abcs.len() != self.num_variables
            || witness.coefficients_for_h.len() != self.ht.len()
        {
            return false;
        }

        let mut ans_a = self.at[0] + &(witness.d1 * &self.zt);
        let mut ans_b = self.bt[0] + &(witness.d2 * &self.zt);
        let mut ans_c = self.ct[0] + &(witness.d3 * &self.zt);
        for (i, w) in witness.coefficients_for_abcs.iter().enumerate() {
            ans_a += &(self.at[i + 1] * w);
            ans_b += &(self.bt[i + 1] * w);
            ans_c += &(self.ct[i + 1] * w);
        }
        let ans_h: F = self
            .ht
            .iter()
            .zip_eq(witness.coefficients_for_h.iter())
            .map(|(t, h)| *t * h)
            .sum();

        ans_a * &ans_b - &ans_c == ans_h * &self.zt
    }
}

impl<F: Domain> Drop for QapInstanceEvaluation<F> {
    fn drop(&mut self) {
        self.t.zeroize();
        self.at.zeroize();
        self.bt.zeroize();
        self.ct.zeroize();
        self.ht.zeroize();
        self.zt.zeroize();
    }
}

/// Evaluate the QAP polynomials of `cs` at `t` without interpolating them.
pub fn instance_map_with_evaluation<F: Domain>(
    cs: &ConstraintSystem<F>,
    t: &F,
) -> Result<QapInstanceEvaluation<F>> {
    let timer = start_timer!(|| "QAP instance map with evaluation");
    if !cs.is_valid() {
        return Err(SnarkError::MalformedConstraintSystem);
    }
    let domain = evaluation_domain_for(cs)?;
    let size = domain.size();
    let num_constraints = cs.num_constraints();

    let mut u = lagrange_coefficients(&domain, t);
    let zt = evaluate_vanishing(&domain, t);

    let n = cs.num_variables() + 1;
    let mut at = vec![F::zero(); n];
    let mut bt = vec![F::zero(); n];
    let mut ct = vec![F::zero(); n];

    for i in 0..=cs.num_inputs() {
        at[i] = u[num_constraints + i];
    }
    for (j, constraint) in cs.constraints.iter().enumerate() {
        for (index, coeff) in constraint.a.terms() {
            at[*index] += &(u[j] * coeff);
        }
        for (index, coeff) in constraint.b.terms() {
            bt[*index] += &(u[j] * coeff);
        }
        for (index, coeff) in constraint.c.terms() {
            ct[*index] += &(u[j] * coeff);
        }
    }
    u.zeroize();

    let mut ht = Vec::with_capacity(size + 1);
    let mut power = F::one();
    for _ in 0..=size {
        ht.push(power);
        power *= t;
    }
    power.zeroize();

    end_timer!(timer);
    Ok(QapInstanceEvaluation {
        domain,
        num_variables: cs.num_variables(),
        num_inputs: cs.num_inputs(),
        t: *t,
        at,
        bt,
        ct,
        ht,
        zt,
    })
}

/// A QAP witness: the assignment together with the coefficients of `H`.
pub struct QapWitness<F: Domain> {
    /// The number of variables, not counting the constant one.
    pub num_variables: usize,
    /// The number of public inputs.
    pub num_inputs: usize,
    /// The domain size `D`.
    pub degree: usize,
    /// Blinding of the A side.
    pub d1: F,
    /// Blinding of the B side.
    pub d2: F,
    /// Blinding of the C side.
    pub d3: F,
    /// `primary ‖ auxiliary`.
    pub coefficients_for_abcs: Vec<F>,
    /// `D + 1` coefficients of `H`.
    pub coefficients_for_h: Vec<F>,
}

impl<F: Domain> Drop for QapWitness<F> {
    fn drop(&mut self) {
        self.d1.zeroize();
        self.d2.zeroize();
        self.d3.zeroize();
        self.coefficients_for_abcs.zeroize();
        self.coefficients_for_h.zeroize();
    }
}

/// Compute the QAP witness of a satisfying assignment.
///
/// `coefficients_for_h` holds `(A·B - C)/Z + d2·A + d1·B + d1·d2·Z - d3`,
/// where `A`, `B` and `C` are the combinations weighted by the assignment.
/// The quotient is computed over the coset `g·H` where `Z` does not vanish.
pub fn witness_map<F: Domain>(
    cs: &ConstraintSystem<F>,
    primary_input: &[F],
    auxiliary_input: &[F],
    d1: &F,
    d2: &F,
    d3: &F,
) -> Result<QapWitness<F>> {
    let timer = start_timer!(|| "QAP witness map");
    if !cs.is_valid() {
        return Err(SnarkError::MalformedConstraintSystem);
    }
    let domain = evaluation_domain_for(cs)?;
    let size = domain.size();
    let num_constraints = cs.num_constraints();
    let mut full = cs.full_assignment(primary_input, auxiliary_input)?;

    let mut eval_a = vec![F::zero(); size];
    let mut eval_b = vec![F::zero(); size];
    let mut eval_c = vec![F::zero(); size];
    let lc_timer = start_timer!(|| "Evaluate linear combinations");
    for (j, constraint) in cs.constraints.iter().enumerate() {
        eval_a[j] = constraint
            .a
            .evaluate(&full)
            .ok_or(SnarkError::MalformedConstraintSystem)?;
        eval_b[j] = constraint
            .b
            .evaluate(&full)
            .ok_or(SnarkError::MalformedConstraintSystem)?;
        eval_c[j] = constraint
            .c
            .evaluate(&full)
            .ok_or(SnarkError::MalformedConstraintSystem)?;
    }
    for i in 0..=cs.num_inputs() {
        eval_a[num_constraints + i] = full[i];
    }
    end_timer!(lc_timer);

    let ifft_timer = start_timer!(|| "IFFT of A and B");
    let mut coeffs_a = eval_a;
    let mut coeffs_b = eval_b;
    ifft_in_place(&domain, &mut coeffs_a);
    ifft_in_place(&domain, &mut coeffs_b);
    end_timer!(ifft_timer);

    let mut coefficients_for_h = vec![F::zero(); size + 1];
    for (h, (a, b)) in coefficients_for_h
        .iter_mut()
        .zip(coeffs_a.iter().zip(coeffs_b.iter()))
    {
        *h = *d2 * a + &(*d1 * b);
    }
    let d1d2 = *d1 * d2;
    coefficients_for_h[0] -= d3;
    coefficients_for_h[0] -= &d1d2;
    coefficients_for_h[size] += &d1d2;

    let coset_timer = start_timer!(|| "Quotient over the coset");
    let mut h_tmp = coeffs_a;
    coset_fft_in_place(&domain, &mut h_tmp);
    coset_fft_in_place(&domain, &mut coeffs_b);
    for (h, b) in h_tmp.iter_mut().zip(coeffs_b.iter()) {
        *h *= b;
    }
    coeffs_b.zeroize();

    let mut coeffs_c = eval_c;
    ifft_in_place(&domain, &mut coeffs_c);
    coset_fft_in_place(&domain, &mut coeffs_c);
    for (h, c) in h_tmp.iter_mut().zip(coeffs_c.iter()) {
        *h -= c;
    }
    coeffs_c.zeroize();

    let z_inv = vanishing_on_coset::<F>(&domain).inv()?;
    for h in h_tmp.iter_mut() {
        *h *= &z_inv;
    }
    coset_ifft_in_place(&domain, &mut h_tmp)?;
    end_timer!(coset_timer);

    for (h, q) in coefficients_for_h.iter_mut().zip(h_tmp.iter()) {
        *h += q;
    }
    h_tmp.zeroize();

    let coefficients_for_abcs = full.split_off(1);
    full.zeroize();

    end_timer!(timer);
    Ok(QapWitness {
        num_variables: cs.num_variables(),
        num_inputs: cs.num_inputs(),
        degree: size,
        d1: *d1,
        d2: *d2,
        d3: *d3,
        coefficients_for_abcs,
        coefficients_for_h,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::r1cs::{
        generate_r1cs_example_with_binary_input, generate_r1cs_example_with_field_input,
    };
    use kiln_algebra::{bls12_381::BLSScalar, bn254::BN254Scalar};

    #[test]
    fn domain_covers_constraints_and_inputs() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_field_input::<BN254Scalar, _>(10, 5, &mut prng).unwrap();
        let domain = evaluation_domain_for(&ex.constraint_system).unwrap();
        assert_eq!(domain.size(), 16);

        let ex =
            generate_r1cs_example_with_field_input::<BN254Scalar, _>(10, 6, &mut prng).unwrap();
        let domain = evaluation_domain_for(&ex.constraint_system).unwrap();
        assert_eq!(domain.size(), 32);
    }

    #[test]
    fn witness_map_matches_exact_division() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_field_input::<BN254Scalar, _>(20, 4, &mut prng).unwrap();
        let cs = &ex.constraint_system;
        let zero = BN254Scalar::zero();
        let witness =
            witness_map(cs, &ex.primary_input, &ex.auxiliary_input, &zero, &zero, &zero).unwrap();
        assert_eq!(witness.coefficients_for_h.len(), witness.degree + 1);

        let instance = instance_map(cs).unwrap();
        let full = cs
            .full_assignment(&ex.primary_input, &ex.auxiliary_input)
            .unwrap();
        let (quotient, remainder) = instance.divide_by_vanishing(&full).unwrap();
        assert!(remainder.is_zero());
        assert_eq!(
            FpPolynomial::from_coefs(witness.coefficients_for_h.clone()),
            quotient
        );
    }

    #[test]
    fn evaluation_agrees_with_interpolation() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_binary_input::<BLSScalar, _>(12, 3, &mut prng).unwrap();
        let cs = &ex.constraint_system;
        let instance = instance_map(cs).unwrap();
        let t = BLSScalar::random(&mut prng);
        let eval = instance_map_with_evaluation(cs, &t).unwrap();

        assert_eq!(eval.degree(), instance.degree());
        assert_eq!(eval.ht.len(), eval.degree() + 1);
        assert_eq!(eval.zt, instance.z.eval(&t));
        for i in 0..=cs.num_variables() {
            assert_eq!(eval.at[i], instance.a_polys[i].eval(&t));
            assert_eq!(eval.bt[i], instance.b_polys[i].eval(&t));
            assert_eq!(eval.ct[i], instance.c_polys[i].eval(&t));
        }
    }

    #[test]
    fn blinded_identity_holds_at_random_point() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_binary_input::<BN254Scalar, _>(50, 10, &mut prng).unwrap();
        let cs = &ex.constraint_system;
        let d1 = BN254Scalar::random(&mut prng);
        let d2 = BN254Scalar::random(&mut prng);
        let d3 = BN254Scalar::random(&mut prng);
        let witness =
            witness_map(cs, &ex.primary_input, &ex.auxiliary_input, &d1, &d2, &d3).unwrap();
        let eval = instance_map_with_evaluation(cs, &BN254Scalar::random(&mut prng)).unwrap();
        assert!(eval.is_satisfied(&witness));
    }

    #[test]
    fn unsatisfying_assignment_leaves_remainder() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_field_input::<BN254Scalar, _>(8, 2, &mut prng).unwrap();
        let cs = &ex.constraint_system;
        let mut aux = ex.auxiliary_input.clone();
        aux[0] += &BN254Scalar::one();
        assert!(!cs.is_satisfied(&ex.primary_input, &aux));

        let instance = instance_map(cs).unwrap();
        let full = cs.full_assignment(&ex.primary_input, &aux).unwrap();
        let (_, remainder) = instance.divide_by_vanishing(&full).unwrap();
        assert!(!remainder.is_zero());

        let zero = BN254Scalar::zero();
        let witness = witness_map(cs, &ex.primary_input, &aux, &zero, &zero, &zero).unwrap();
        let eval = instance_map_with_evaluation(cs, &BN254Scalar::random(&mut prng)).unwrap();
        assert!(!eval.is_satisfied(&witness));
    }

    #[test]
    fn wrong_input_length_is_rejected() {
        let mut prng = test_rng();
        let ex =
            generate_r1cs_example_with_field_input::<BN254Scalar, _>(8, 2, &mut prng).unwrap();
        let zero = BN254Scalar::zero();
        let res = witness_map(
            &ex.constraint_system,
            &ex.primary_input[..1],
            &ex.auxiliary_input,
            &zero,
            &zero,
            &zero,
        );
        assert_eq!(res.err(), Some(SnarkError::PrimaryInputSizeMismatch(2, 1)));
    }
}
