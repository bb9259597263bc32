use crate::arkworks::ArkScalar;
use crate::prelude::*;
use crate::traits::serial_group_ifft;
use ark_ec::{AffineRepr, CurveGroup, Group as _, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Formatter};
use digest::{consts::U64, Digest};

/// The wrapped struct for an arkworks curve point in projective form
#[derive(Copy, Default, Clone, PartialEq, Eq, Hash)]
pub struct ArkGroup<G: CurveGroup>(pub(crate) G);

impl<G: CurveGroup> Debug for ArkGroup<G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G::Affine as Debug>::fmt(&self.0.into_affine(), f)
    }
}

impl<G: CurveGroup> ArkGroup<G> {
    /// Wrap an arkworks projective point.
    pub const fn new(point: G) -> Self {
        Self(point)
    }

    /// Return the arkworks projective point.
    pub fn into_inner(self) -> G {
        self.0
    }

    fn compressed_len() -> usize {
        G::Affine::zero().compressed_size()
    }
}

impl<G: CurveGroup> Group for ArkGroup<G> {
    type ScalarType = ArkScalar<G::ScalarField>;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.double())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(G::rand(prng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::compressed_len());
        // safe unwrap, writing into a vector cannot fail
        self.0.into_affine().serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::compressed_len() {
            return Err(AlgebraError::DeserializationError);
        }
        let affine = G::Affine::deserialize_compressed(bytes)
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(affine.into_group()))
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self(G::rand(&mut prng))
    }

    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        if scalars.is_empty() || points.is_empty() {
            return Self::get_identity();
        }
        let bigints: Vec<_> = scalars.iter().map(|s| s.0.into_bigint()).collect();
        let bases = G::normalize_batch(&points.iter().map(|p| p.0).collect::<Vec<G>>());
        Self(G::msm_bigint(&bases, &bigints))
    }

    fn ifft_in_place(values: &mut [Self], omega: &Self::ScalarType) -> Result<()> {
        let n = values.len();
        match Radix2EvaluationDomain::<G::ScalarField>::new(n) {
            Some(domain) if domain.size() == n && domain.group_gen == omega.0 => {
                let mut points: Vec<G> = values.iter().map(|p| p.0).collect();
                domain.ifft_in_place(&mut points);
                for (v, p) in values.iter_mut().zip(points) {
                    *v = Self(p);
                }
                Ok(())
            }
            _ => serial_group_ifft(values, omega),
        }
    }
}

impl<'a, G: CurveGroup> Add<&'a ArkGroup<G>> for ArkGroup<G> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl<'a, G: CurveGroup> Sub<&'a ArkGroup<G>> for ArkGroup<G> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        Self(self.0 - &rhs.0)
    }
}

impl<'a, G: CurveGroup> Mul<&'a ArkScalar<G::ScalarField>> for ArkGroup<G> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &ArkScalar<G::ScalarField>) -> Self {
        Self(self.0 * &rhs.0)
    }
}

impl<'a, G: CurveGroup> AddAssign<&'a ArkGroup<G>> for ArkGroup<G> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += &rhs.0;
    }
}

impl<'a, G: CurveGroup> SubAssign<&'a ArkGroup<G>> for ArkGroup<G> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= &rhs.0;
    }
}

impl<'a, G: CurveGroup> MulAssign<&'a ArkScalar<G::ScalarField>> for ArkGroup<G> {
    #[inline]
    fn mul_assign(&mut self, rhs: &ArkScalar<G::ScalarField>) {
        self.0 *= &rhs.0;
    }
}

impl<G: CurveGroup> Neg for ArkGroup<G> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
