use crate::arkworks::{ArkGroup, ArkGt, ArkPairingEngine, ArkScalar};

/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// The scalar field of BN254.
pub type BN254Scalar = ArkScalar<ark_bn254::Fr>;

/// The first source group of BN254.
pub type BN254G1 = ArkGroup<ark_bn254::G1Projective>;

/// The second source group of BN254.
pub type BN254G2 = ArkGroup<ark_bn254::G2Projective>;

/// The target group of BN254.
pub type BN254Gt = ArkGt<ark_bn254::Bn254>;

/// The pairing engine for BN254.
pub type BN254PairingEngine = ArkPairingEngine<ark_bn254::Bn254>;
