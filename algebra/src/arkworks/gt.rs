use crate::arkworks::ArkScalar;
use crate::prelude::*;
use ark_ec::{pairing::Pairing as ArkPairing, pairing::PairingOutput, Group as _};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Formatter};
use digest::{consts::U64, Digest};

/// The wrapped struct for the pairing target group, written additively
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ArkGt<E: ArkPairing>(pub(crate) PairingOutput<E>);

impl<E: ArkPairing> Debug for ArkGt<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <PairingOutput<E> as Debug>::fmt(&self.0, f)
    }
}

impl<E: ArkPairing> Default for ArkGt<E> {
    fn default() -> Self {
        Self::get_identity()
    }
}

impl<E: ArkPairing> ArkGt<E> {
    fn compressed_len() -> usize {
        PairingOutput::<E>::zero().compressed_size()
    }
}

impl<E: ArkPairing> Group for ArkGt<E> {
    type ScalarType = ArkScalar<E::ScalarField>;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.double())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(PairingOutput::<E>::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(PairingOutput::<E>::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(PairingOutput::<E>::rand(prng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::compressed_len());
        // safe unwrap, writing into a vector cannot fail
        self.0.serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::compressed_len() {
            return Err(AlgebraError::DeserializationError);
        }
        PairingOutput::<E>::deserialize_compressed(bytes)
            .map(Self)
            .map_err(|_| AlgebraError::DeserializationError)
    }

    #[inline]
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut prng = derive_prng_from_hash::<D>(hash);
        Self(PairingOutput::<E>::rand(&mut prng))
    }
}

impl<'a, E: ArkPairing> Add<&'a ArkGt<E>> for ArkGt<E> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl<'a, E: ArkPairing> Sub<&'a ArkGt<E>> for ArkGt<E> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        Self(self.0 - &rhs.0)
    }
}

impl<'a, E: ArkPairing> Mul<&'a ArkScalar<E::ScalarField>> for ArkGt<E> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &ArkScalar<E::ScalarField>) -> Self {
        Self(self.0 * &rhs.0)
    }
}

impl<'a, E: ArkPairing> AddAssign<&'a ArkGt<E>> for ArkGt<E> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += &rhs.0;
    }
}

impl<'a, E: ArkPairing> SubAssign<&'a ArkGt<E>> for ArkGt<E> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= &rhs.0;
    }
}

impl<E: ArkPairing> Neg for ArkGt<E> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
