use crate::arkworks::{ArkGroup, ArkGt, ArkScalar};
use crate::prelude::*;
use crate::traits::Pairing;
use ark_ec::pairing::Pairing as ArkPairing;

/// The pairing engine over an arkworks pairing-friendly curve
pub struct ArkPairingEngine<E: ArkPairing>(PhantomData<E>);

impl<E: ArkPairing> Pairing for ArkPairingEngine<E> {
    type ScalarField = ArkScalar<E::ScalarField>;
    type G1 = ArkGroup<E::G1>;
    type G2 = ArkGroup<E::G2>;
    type Gt = ArkGt<E>;
    type G2Prepared = E::G2Prepared;

    #[inline]
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt {
        ArkGt(E::pairing(a.0, b.0))
    }

    #[inline]
    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt {
        ArkGt(E::multi_pairing(
            a.iter().map(|x| x.0),
            b.iter().map(|x| x.0),
        ))
    }

    #[inline]
    fn prepare_g2(b: &Self::G2) -> Self::G2Prepared {
        E::G2Prepared::from(b.0)
    }

    #[inline]
    fn product_of_prepared_pairings(a: &[Self::G1], b: &[Self::G2Prepared]) -> Self::Gt {
        ArkGt(E::multi_pairing(a.iter().map(|x| x.0), b.iter().cloned()))
    }
}
