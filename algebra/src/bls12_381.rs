use crate::arkworks::{ArkGroup, ArkGt, ArkPairingEngine, ArkScalar};

/// The number of bytes for a scalar value over BLS12-381.
pub const BLS12_381_SCALAR_LEN: usize = 32;

/// The scalar field of BLS12-381.
pub type BLSScalar = ArkScalar<ark_bls12_381::Fr>;

/// The first source group of BLS12-381.
pub type BLSG1 = ArkGroup<ark_bls12_381::G1Projective>;

/// The second source group of BLS12-381.
pub type BLSG2 = ArkGroup<ark_bls12_381::G2Projective>;

/// The target group of BLS12-381.
pub type BLSGt = ArkGt<ark_bls12_381::Bls12_381>;

/// The pairing engine for BLS12-381.
pub type BLSPairingEngine = ArkPairingEngine<ark_bls12_381::Bls12_381>;

#[cfg(test)]
mod bls12_381_groups_test {
    use crate::{
        bls12_381::{BLSGt, BLSPairingEngine, BLSScalar, BLSG1, BLSG2, BLS12_381_SCALAR_LEN},
        prelude::*,
        traits::group_tests::{
            test_bilinearity, test_group_ifft, test_group_serialization, test_multi_exp,
            test_prepared_pairings, test_scalar_operations, test_scalar_serialization,
        },
    };

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<BLSScalar>();
    }

    #[test]
    fn scalar_deser() {
        test_scalar_serialization::<BLSScalar>();
        assert_eq!(BLSScalar::bytes_len(), BLS12_381_SCALAR_LEN);
    }

    #[test]
    fn test_points_serialization() {
        test_group_serialization::<BLSG1>();
        test_group_serialization::<BLSG2>();
        test_group_serialization::<BLSGt>();
    }

    #[test]
    fn test_multiexp() {
        test_multi_exp::<BLSG1>();
        test_multi_exp::<BLSG2>();
    }

    #[test]
    fn group_ifft() {
        test_group_ifft::<BLSPairingEngine>();
    }

    #[test]
    fn bilinear_properties() {
        test_bilinearity::<BLSPairingEngine>();
    }

    #[test]
    fn prepared_pairings() {
        test_prepared_pairings::<BLSPairingEngine>();
    }

    #[test]
    fn compressed_lengths() {
        assert_eq!(BLSG1::get_base().to_compressed_bytes().len(), 48);
        assert_eq!(BLSG2::get_base().to_compressed_bytes().len(), 96);
    }
}
