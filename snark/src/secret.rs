use ark_std::fmt;
use kiln_algebra::prelude::*;

/// A secret scalar that is wiped from memory when dropped.
///
/// Trapdoors, ceremony keys and prover blinding factors all live in this
/// wrapper; it cannot be cloned, serialized or printed.
pub struct Secret<S: Scalar>(S);

impl<S: Scalar> Secret<S> {
    /// Take ownership of a secret value.
    pub fn new(value: S) -> Self {
        Self(value)
    }

    /// Sample a uniformly random non-zero secret.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(S::random_nonzero(prng))
    }

    /// Borrow the secret value.
    pub fn expose(&self) -> &S {
        &self.0
    }
}

impl<S: Scalar> Drop for Secret<S> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<S: Scalar> fmt::Debug for Secret<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**)")
    }
}

#[cfg(test)]
mod test {
    use super::Secret;
    use kiln_algebra::{bn254::BN254Scalar, prelude::*};
    use zeroize::Zeroize;

    #[test]
    fn secret_is_not_printed() {
        let s = Secret::new(BN254Scalar::from(42u32));
        assert_eq!(format!("{:?}", s), "Secret(**)");
        assert_eq!(*s.expose(), BN254Scalar::from(42u32));
    }

    #[test]
    fn random_secret_is_nonzero() {
        let mut prng = test_rng();
        for _ in 0..16 {
            assert!(!Secret::<BN254Scalar>::random(&mut prng).expose().is_zero());
        }
    }

    #[test]
    fn zeroize_clears_scalar() {
        let mut s = BN254Scalar::from(7u32);
        s.zeroize();
        assert!(s.is_zero());
    }
}
