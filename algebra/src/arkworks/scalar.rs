use crate::prelude::*;
use crate::traits::Domain;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::CanonicalDeserialize;
use ark_std::fmt::{Debug, Display, Formatter};
use digest::{consts::U64, Digest};
use zeroize::Zeroize;

/// The wrapped struct for a prime-order arkworks field element
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct ArkScalar<F: PrimeField>(pub(crate) F);

impl<F: PrimeField> Debug for ArkScalar<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <F as Display>::fmt(&self.0, f)
    }
}

impl<F: PrimeField> ArkScalar<F> {
    /// Wrap an arkworks field element.
    pub const fn new(field: F) -> Self {
        Self(field)
    }

    /// Return the arkworks field element.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: PrimeField> One for ArkScalar<F> {
    #[inline]
    fn one() -> Self {
        Self(F::one())
    }
}

impl<F: PrimeField> Zero for ArkScalar<F> {
    #[inline]
    fn zero() -> Self {
        Self(F::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<F: PrimeField> Add for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F: PrimeField> Mul for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl<F: PrimeField> Sub for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<'a, F: PrimeField> Add<&'a ArkScalar<F>> for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl<'a, F: PrimeField> AddAssign<&'a ArkScalar<F>> for ArkScalar<F> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += &rhs.0;
    }
}

impl<'a, F: PrimeField> Sub<&'a ArkScalar<F>> for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        Self(self.0 - &rhs.0)
    }
}

impl<'a, F: PrimeField> SubAssign<&'a ArkScalar<F>> for ArkScalar<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= &rhs.0;
    }
}

impl<'a, F: PrimeField> Mul<&'a ArkScalar<F>> for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &Self) -> Self {
        Self(self.0 * &rhs.0)
    }
}

impl<'a, F: PrimeField> MulAssign<&'a ArkScalar<F>> for ArkScalar<F> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= &rhs.0;
    }
}

impl<F: PrimeField> Neg for ArkScalar<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl<F: PrimeField> Sum<ArkScalar<F>> for ArkScalar<F> {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a, F: PrimeField> Sum<&'a ArkScalar<F>> for ArkScalar<F> {
    #[inline]
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<F: PrimeField> From<u32> for ArkScalar<F> {
    #[inline]
    fn from(value: u32) -> Self {
        Self(F::from(value))
    }
}

impl<F: PrimeField> From<u64> for ArkScalar<F> {
    #[inline]
    fn from(value: u64) -> Self {
        Self(F::from(value))
    }
}

impl<F: PrimeField> Zeroize for ArkScalar<F> {
    #[inline]
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<F: PrimeField> Scalar for ArkScalar<F> {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(F::rand(rng))
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self(F::rand(&mut prng))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(F::GENERATOR)
    }

    #[inline]
    fn bytes_len() -> usize {
        <F::BigInt as BigInteger>::NUM_LIMBS * 8
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::bytes_len() {
            return Err(AlgebraError::DeserializationError);
        }
        F::deserialize_compressed(bytes)
            .map(Self)
            .map_err(|_| AlgebraError::DeserializationError)
    }

    #[inline]
    fn inv(&self) -> Result<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(AlgebraError::GroupInversionError)
    }

    #[inline]
    fn square(&self) -> Self {
        Self(self.0.square())
    }

    #[inline]
    fn pow(&self, exponent: &[u64]) -> Self {
        Self(self.0.pow(exponent))
    }
}

impl<F: PrimeField> Domain for ArkScalar<F> {
    type Field = F;

    #[inline]
    fn get_field(&self) -> F {
        self.0
    }

    #[inline]
    fn from_field(field: F) -> Self {
        Self(field)
    }
}
