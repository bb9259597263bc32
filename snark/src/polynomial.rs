//! Dense polynomials and FFTs over radix-2 evaluation domains.

use crate::errors::{Result, SnarkError};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use kiln_algebra::prelude::*;

/// The evaluation domain used throughout the QAP reduction.
pub type FftDomain<F> = Radix2EvaluationDomain<<F as Domain>::Field>;

/// Return the smallest radix-2 domain holding at least `min_size` points.
pub fn evaluation_domain<F: Domain>(min_size: usize) -> Result<FftDomain<F>> {
    FftDomain::<F>::new(min_size).ok_or(SnarkError::DomainNotFound(min_size))
}

/// Return the `i`-th element `ω^i` of the domain.
pub fn domain_element<F: Domain>(domain: &FftDomain<F>, i: usize) -> F {
    F::from_field(domain.element(i))
}

/// Return `L_0(t), ..., L_{D-1}(t)` for the Lagrange basis of the domain.
pub fn lagrange_coefficients<F: Domain>(domain: &FftDomain<F>, t: &F) -> Vec<F> {
    domain
        .evaluate_all_lagrange_coefficients(t.get_field())
        .into_iter()
        .map(F::from_field)
        .collect()
}

/// Return `Z(t) = t^D - 1`.
pub fn evaluate_vanishing<F: Domain>(domain: &FftDomain<F>, t: &F) -> F {
    F::from_field(domain.evaluate_vanishing_polynomial(t.get_field()))
}

fn map_in_place<F: Domain>(values: &mut Vec<F>, f: impl FnOnce(&mut Vec<F::Field>)) {
    let mut raw: Vec<F::Field> = values.iter().map(|v| v.get_field()).collect();
    f(&mut raw);
    *values = raw.into_iter().map(F::from_field).collect();
}

/// Coefficients to evaluations, padding to the domain size.
pub fn fft_in_place<F: Domain>(domain: &FftDomain<F>, values: &mut Vec<F>) {
    map_in_place(values, |raw| domain.fft_in_place(raw));
}

/// Evaluations to coefficients, padding to the domain size.
pub fn ifft_in_place<F: Domain>(domain: &FftDomain<F>, values: &mut Vec<F>) {
    map_in_place(values, |raw| domain.ifft_in_place(raw));
}

fn distribute_powers<F: Scalar>(values: &mut [F], g: &F) {
    let mut power = F::one();
    for v in values.iter_mut() {
        *v *= &power;
        power *= g;
    }
}

/// Coefficients to evaluations over the coset `g·H`, where `g` is the
/// multiplicative generator of the field.
pub fn coset_fft_in_place<F: Domain>(domain: &FftDomain<F>, values: &mut Vec<F>) {
    distribute_powers(values, &F::multiplicative_generator());
    fft_in_place(domain, values);
}

/// Evaluations over the coset `g·H` to coefficients.
pub fn coset_ifft_in_place<F: Domain>(domain: &FftDomain<F>, values: &mut Vec<F>) -> Result<()> {
    ifft_in_place(domain, values);
    let g_inv = F::multiplicative_generator().inv()?;
    distribute_powers(values, &g_inv);
    Ok(())
}

/// Return `Z(g·ω^i) = g^D - 1`, constant over the whole coset.
pub fn vanishing_on_coset<F: Domain>(domain: &FftDomain<F>) -> F {
    evaluate_vanishing(domain, &F::multiplicative_generator())
}

/// Field polynomial in coefficient form, lowest degree first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the constant zero polynomial
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficients are trimmed.
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Return `X^n - 1`, the vanishing polynomial of a domain of size `n`.
    pub fn vanishing(n: usize) -> Self {
        let mut coefs = vec![F::zero(); n + 1];
        coefs[0] = F::one().neg();
        coefs[n] = F::one();
        Self::from_coefs(coefs)
    }

    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
        if self.coefs.is_empty() {
            self.coefs.push(F::zero());
        }
    }

    /// Return degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate a polynomial on a point.
    pub fn eval(&self, point: &F) -> F {
        self.coefs
            .iter()
            .rev()
            .fold(F::zero(), |acc, coef| acc * point + coef)
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        if self.coefs.len() < other.coefs.len() {
            self.coefs.resize(other.coefs.len(), F::zero());
        }
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            *self_coef += other_coef;
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        if self.coefs.len() < other.coefs.len() {
            self.coefs.resize(other.coefs.len(), F::zero());
        }
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            *self_coef -= other_coef;
        }
        self.trim_coefs();
    }

    /// Multiply every coefficient by a scalar.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        Self::from_coefs(self.coefs.iter().map(|c| *c * scalar).collect())
    }

    /// Schoolbook product of two polynomials.
    pub fn mul(&self, other: &Self) -> Self {
        let mut coefs = vec![F::zero(); self.coefs.len() + other.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coefs.iter().enumerate() {
                coefs[i + j] += &(*a * b);
            }
        }
        Self::from_coefs(coefs)
    }

    /// Divide self by `divisor`, returning the quotient and the remainder.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(SnarkError::Algebra(AlgebraError::GroupInversionError));
        }
        let k = self.coefs.len();
        let l = divisor.coefs.len();
        if l > k {
            return Ok((Self::zero(), self.clone()));
        }
        let lead_inv = divisor.coefs[l - 1].inv()?;
        let mut rem = self.coefs.clone();
        let mut quo = vec![F::zero(); k - l + 1];
        for i in (0..(k - l + 1)).rev() {
            let qi = lead_inv * &rem[i + l - 1];
            for (j, d) in divisor.coefs.iter().enumerate() {
                rem[i + j] -= &(qi * d);
            }
            quo[i] = qi;
        }
        rem.truncate(l - 1);
        Ok((Self::from_coefs(quo), Self::from_coefs(rem)))
    }
}

impl<F: Domain> FpPolynomial<F> {
    /// Interpolate the polynomial whose evaluations over the domain are `values`.
    pub fn ifft_with_domain(domain: &FftDomain<F>, values: &[F]) -> Self {
        let mut coefs = values.to_vec();
        ifft_in_place(domain, &mut coefs);
        Self::from_coefs(coefs)
    }

    /// Evaluate the polynomial over the domain.
    pub fn fft_with_domain(&self, domain: &FftDomain<F>) -> Vec<F> {
        let mut values = self.coefs.clone();
        fft_in_place(domain, &mut values);
        values
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use kiln_algebra::bn254::{BN254Scalar, BN254G1};

    #[test]
    fn fft_ifft_round_trip() {
        let mut prng = test_rng();
        let domain = evaluation_domain::<BN254Scalar>(13).unwrap();
        assert_eq!(domain.size(), 16);

        let poly = FpPolynomial::from_coefs(
            (0..13)
                .map(|_| BN254Scalar::random(&mut prng))
                .collect::<Vec<_>>(),
        );
        let evals = poly.fft_with_domain(&domain);
        for (i, e) in evals.iter().enumerate() {
            assert_eq!(*e, poly.eval(&domain_element(&domain, i)));
        }
        assert_eq!(FpPolynomial::ifft_with_domain(&domain, &evals), poly);
    }

    #[test]
    fn coset_round_trip() {
        let mut prng = test_rng();
        let domain = evaluation_domain::<BN254Scalar>(8).unwrap();
        let coefs: Vec<BN254Scalar> = (0..8).map(|_| BN254Scalar::random(&mut prng)).collect();
        let poly = FpPolynomial::from_coefs(coefs.clone());

        let mut values = coefs.clone();
        coset_fft_in_place(&domain, &mut values);
        let g = BN254Scalar::multiplicative_generator();
        for (i, v) in values.iter().enumerate() {
            assert_eq!(*v, poly.eval(&g.mul(&domain_element(&domain, i))));
        }

        coset_ifft_in_place(&domain, &mut values).unwrap();
        assert_eq!(values, coefs);

        let z = FpPolynomial::<BN254Scalar>::vanishing(8);
        assert_eq!(vanishing_on_coset::<BN254Scalar>(&domain), z.eval(&g));
    }

    #[test]
    fn lagrange_coefficients_interpolate() {
        let mut prng = test_rng();
        let domain = evaluation_domain::<BN254Scalar>(8).unwrap();
        let evals: Vec<BN254Scalar> = (0..8).map(|_| BN254Scalar::random(&mut prng)).collect();
        let poly = FpPolynomial::ifft_with_domain(&domain, &evals);

        let t = BN254Scalar::random(&mut prng);
        let lagrange = lagrange_coefficients(&domain, &t);
        let combined: BN254Scalar = lagrange.iter().zip(evals.iter()).map(|(l, e)| *l * e).sum();
        assert_eq!(combined, poly.eval(&t));
        assert_eq!(
            evaluate_vanishing(&domain, &t),
            FpPolynomial::vanishing(8).eval(&t)
        );
    }

    #[test]
    fn group_ifft_matches_scalar_ifft() {
        let mut prng = test_rng();
        let domain = evaluation_domain::<BN254Scalar>(16).unwrap();
        let scalars: Vec<BN254Scalar> = (0..16).map(|_| BN254Scalar::random(&mut prng)).collect();
        let base = BN254G1::get_base();

        let mut points: Vec<BN254G1> = scalars.iter().map(|s| base.mul(s)).collect();
        BN254G1::ifft_in_place(&mut points, &domain_element(&domain, 1)).unwrap();

        let mut expected = scalars.clone();
        ifft_in_place(&domain, &mut expected);
        let expected: Vec<BN254G1> = expected.iter().map(|s| base.mul(s)).collect();
        assert_eq!(points, expected);

        let mut odd = vec![base; 3];
        assert!(BN254G1::ifft_in_place(&mut odd, &domain_element(&domain, 1)).is_err());
    }

    #[test]
    fn division() {
        let one = BN254Scalar::one();
        let two = one.add(&one);
        // (X + 1)(X + 2) + 1
        let p = FpPolynomial::from_coefs(vec![two.add(&one), two.add(&one), one]);
        let d = FpPolynomial::from_coefs(vec![one, one]);
        let (q, r) = p.div_rem(&d).unwrap();
        assert_eq!(q, FpPolynomial::from_coefs(vec![two, one]));
        assert_eq!(r, FpPolynomial::from_coefs(vec![one]));

        let mut back = q.mul(&d);
        back.add_assign(&r);
        assert_eq!(back, p);
        assert!(p.div_rem(&FpPolynomial::zero()).is_err());
    }
}
