use crate::prelude::*;
use ark_ff::FftField;
use ark_std::fmt::Debug;
use digest::{generic_array::typenum::U64, Digest};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The trait for scalars
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + Clone
    + One
    + Zero
    + Sized
    + Add<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Zeroize
    + Sync
    + Send
{
    /// Return a random scalar
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Return a random scalar that is not zero
    fn random_nonzero<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        loop {
            let s = Self::random(rng);
            if !s.is_zero() {
                return s;
            }
        }
    }

    /// Sample a scalar based on a hash value
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default;

    /// Return the multiplicative generator of the field
    fn multiplicative_generator() -> Self;

    /// Return the len of the byte representation
    fn bytes_len() -> usize;

    /// Convert to bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Convert from bytes, rejecting non-canonical encodings
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Return the modular inverse of the scalar if it exists
    fn inv(&self) -> Result<Self>;

    /// Return the square of the field element
    fn square(&self) -> Self;

    /// exponent form: least significant limb first, with u64 limbs
    fn pow(&self, exponent: &[u64]) -> Self;
}

/// The trait for scalars that support FFTs.
pub trait Domain: Scalar {
    /// The field that is able to be used in FFTs.
    type Field: FftField;

    /// Return fft field.
    fn get_field(&self) -> Self::Field;

    /// Sample a domain based on a fft field.
    fn from_field(field: Self::Field) -> Self;
}

/// The trait for group elements
pub trait Group:
    Debug
    + Default
    + Copy
    + Sized
    + PartialEq
    + Eq
    + Clone
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Neg<Output = Self>
    + Serialize
    + for<'de> Deserialize<'de>
    + Sync
    + Send
{
    /// The scalar type
    type ScalarType: Scalar;

    /// Return the doubling of the group element
    fn double(&self) -> Self;

    /// Return the identity element (i.e., 0 * G)
    fn get_identity() -> Self;

    /// Return the base element (i.e., 1 * G)
    fn get_base() -> Self;

    /// Return true if this is the identity element
    fn is_identity(&self) -> bool {
        *self == Self::get_identity()
    }

    /// Return a random element
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Convert to bytes in the compressed representation
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Convert from bytes in the compressed representation, checking
    /// that the element is on the curve and in the right subgroup
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Sample a group element based on a hash value
    fn from_hash<D>(hash: D) -> Self
    where
        D: Digest<OutputSize = U64> + Default;

    /// Compute the multiscalar multiplication
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        scalars
            .iter()
            .zip(points.iter())
            .fold(Self::get_identity(), |acc, (s, p)| acc + &(**p * *s))
    }

    /// Multiply this element by every scalar in the list
    fn batch_mul(&self, scalars: &[Self::ScalarType]) -> Vec<Self> {
        #[cfg(feature = "parallel")]
        let iter = scalars.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = scalars.iter();

        iter.map(|s| *self * s).collect()
    }

    /// Inverse FFT over the radix-2 domain generated by `omega`, whose size
    /// must be `values.len()`: turns `[x^i]G` into `[L_i(x)]G`
    fn ifft_in_place(values: &mut [Self], omega: &Self::ScalarType) -> Result<()> {
        serial_group_ifft(values, omega)
    }
}

fn bitreverse(mut n: usize, l: u32) -> usize {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// Radix-2 inverse FFT over group elements, for any root of unity `omega`
/// of order `values.len()`.
pub(crate) fn serial_group_ifft<G: Group>(values: &mut [G], omega: &G::ScalarType) -> Result<()> {
    let n = values.len();
    let log_n = log2_exact(n).ok_or(AlgebraError::ParameterError)?;
    let omega_inv = omega.inv()?;

    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            values.swap(rk, k);
        }
    }

    let mut m = 1;
    for _ in 0..log_n {
        let w_m = omega_inv.pow(&[(n / (2 * m)) as u64]);
        let mut k = 0;
        while k < n {
            let mut w = G::ScalarType::one();
            for j in 0..m {
                let t = values[k + j + m] * &w;
                values[k + j + m] = values[k + j] - &t;
                values[k + j] = values[k + j] + &t;
                w *= &w_m;
            }
            k += 2 * m;
        }
        m *= 2;
    }

    let n_inv = G::ScalarType::from(n as u64).inv()?;
    #[cfg(feature = "parallel")]
    values.par_iter_mut().for_each(|v| *v = *v * &n_inv);
    #[cfg(not(feature = "parallel"))]
    values.iter_mut().for_each(|v| *v = *v * &n_inv);
    Ok(())
}

/// The trait for a pair of groups for pairing
pub trait Pairing {
    /// The scalar type
    type ScalarField: Domain;

    /// The first group
    type G1: Group<ScalarType = Self::ScalarField>;

    /// The second group
    type G2: Group<ScalarType = Self::ScalarField>;

    /// The target group
    type Gt: Group<ScalarType = Self::ScalarField>;

    /// A G2 element with its Miller loop coefficients precomputed
    type G2Prepared: Clone + Debug + Send + Sync;

    /// The pairing operation
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// The product of pairing operation
    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt;

    /// Precompute the Miller loop coefficients of a G2 element
    fn prepare_g2(b: &Self::G2) -> Self::G2Prepared;

    /// The product of pairings against prepared G2 elements, sharing
    /// a single final exponentiation
    fn product_of_prepared_pairings(a: &[Self::G1], b: &[Self::G2Prepared]) -> Self::Gt;
}

#[cfg(test)]
pub(crate) mod group_tests {
    use crate::prelude::*;
    use crate::traits::serial_group_ifft;
    use ark_ff::FftField;

    pub(crate) fn test_scalar_operations<S: Scalar>() {
        let a = S::from(40u32);
        let b = S::from(60u32);
        let c = a.add(&b);
        let d = S::from(100u32);
        assert_eq!(c, d);

        let mut x = S::from(0u32);
        x.add_assign(&a);
        x.add_assign(&b);
        assert_eq!(x, d);

        let a = S::from(10u32);
        let b = S::from(40u32);
        let c = a.mul(&b);
        let d = S::from(400u32);
        assert_eq!(c, d);

        let a = S::from(0xFFFFFFFFu32);
        let b = S::from(1u32);
        let c = a.add(&b);
        let d = S::from(0x100000000u64);
        assert_eq!(c, d);

        let a = S::from(40u32);
        let b = S::from(60u32);
        let c = b.sub(&a);
        assert_eq!(c, S::from(20u32));

        let a = S::from(40u32);
        let b = a.neg();
        assert_eq!(b.add(&a), S::zero());

        let a = S::from(40u32);
        let b = a.inv().unwrap();
        assert_eq!(b.mul(&a), S::one());
        assert!(S::zero().inv().is_err());

        let a = S::from(3u32);
        let c = a.pow(&[20]);
        assert_eq!(c, S::from(3486784401u64));
        assert_eq!(a.square(), S::from(9u32));

        let sum: S = [S::from(1u32), S::from(2u32), S::from(3u32)].iter().sum();
        assert_eq!(sum, S::from(6u32));
    }

    pub(crate) fn test_scalar_serialization<S: Scalar>() {
        let a = S::from(100u32);
        let bytes = a.to_bytes();
        assert_eq!(bytes.len(), S::bytes_len());
        let b = S::from_bytes(bytes.as_slice()).unwrap();
        assert_eq!(a, b);

        // the all-ones string is larger than any of our moduli
        let too_big = vec![0xFFu8; S::bytes_len()];
        assert!(S::from_bytes(&too_big).is_err());

        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(serde_json::from_str::<S>(&json).unwrap(), a);
        let bin = bincode::serialize(&a).unwrap();
        assert_eq!(bincode::deserialize::<S>(&bin).unwrap(), a);
    }

    pub(crate) fn test_group_serialization<G: Group>() {
        let mut prng = test_rng();
        let g = G::random(&mut prng);
        let bytes = g.to_compressed_bytes();
        assert_eq!(G::from_compressed_bytes(&bytes).unwrap(), g);
        assert!(G::from_compressed_bytes(&bytes[1..]).is_err());

        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(serde_json::from_str::<G>(&json).unwrap(), g);
        let bin = bincode::serialize(&g).unwrap();
        assert_eq!(bincode::deserialize::<G>(&bin).unwrap(), g);
    }

    pub(crate) fn test_multi_exp<G: Group>() {
        let g = G::multi_exp(&[], &[]);
        assert_eq!(g, G::get_identity());

        let g1 = G::get_base();
        let zero = G::ScalarType::from(0u32);
        let one = G::ScalarType::from(1u32);
        assert_eq!(G::multi_exp(&[&zero], &[&g1]), G::get_identity());
        assert_eq!(G::multi_exp(&[&one], &[&g1]), G::get_base());

        let g2 = g1.add(&g1);
        let g3 = g1.mul(&G::ScalarType::from(500u32));
        let thousand = G::ScalarType::from(1000u32);
        let two = G::ScalarType::from(2u32);
        let three = G::ScalarType::from(3u32);
        let g = G::multi_exp(&[&thousand, &two, &three], &[&g1, &g2, &g3]);
        let expected = G::get_base().mul(&G::ScalarType::from((1000 + 4 + 1500) as u32));
        assert_eq!(g, expected);

        let batch = g1.batch_mul(&[thousand, two]);
        assert_eq!(batch, vec![g1.mul(&thousand), g2]);
    }

    fn check_group_ifft<G: Group>(omega: &G::ScalarType, x: &G::ScalarType) {
        let base = G::get_base();
        let mut power = G::ScalarType::one();
        let mut points = vec![];
        for _ in 0..8 {
            points.push(base.mul(&power));
            power *= x;
        }
        let mut fast = points.clone();
        G::ifft_in_place(&mut fast, omega).unwrap();
        let mut serial = points;
        serial_group_ifft(&mut serial, omega).unwrap();
        assert_eq!(fast, serial);

        // the inverse transform of a constant is a delta at zero
        let mut constant = vec![base; 8];
        G::ifft_in_place(&mut constant, omega).unwrap();
        assert_eq!(constant[0], base);
        assert!(constant[1..].iter().all(|p| p.is_identity()));

        let mut odd = vec![base; 6];
        assert_eq!(
            G::ifft_in_place(&mut odd, omega),
            Err(AlgebraError::ParameterError)
        );
    }

    pub(crate) fn test_group_ifft<P: Pairing>() {
        let mut prng = test_rng();
        let x = P::ScalarField::random(&mut prng);
        let root = <<P::ScalarField as Domain>::Field as FftField>::get_root_of_unity(8).unwrap();
        let omega = P::ScalarField::from_field(root);
        check_group_ifft::<P::G1>(&omega, &x);
        check_group_ifft::<P::G2>(&omega, &x);
        check_group_ifft::<P::Gt>(&omega, &x);

        // another primitive root of the same order
        let omega_cubed = omega.pow(&[3]);
        check_group_ifft::<P::G1>(&omega_cubed, &x);
    }

    pub(crate) fn test_bilinearity<P: Pairing>() {
        let mut prng = test_rng();

        let identity = P::pairing(&P::G1::get_identity(), &P::G2::get_identity());
        assert_eq!(identity, P::Gt::get_identity());
        let base = P::pairing(&P::G1::get_base(), &P::G2::get_base());
        assert_eq!(base, P::Gt::get_base());

        let s1 = P::ScalarField::random(&mut prng);
        let s2 = P::ScalarField::random(&mut prng);
        let a = P::G1::get_base().mul(&s1);
        let b = P::G2::get_base().mul(&s2);

        let e = P::pairing(&a, &b);
        assert_eq!(e, base.mul(&s1).mul(&s2));
        assert_eq!(e, P::pairing(&P::G1::get_base(), &b).mul(&s1));
        assert_eq!(e, P::pairing(&a, &P::G2::get_base()).mul(&s2));
        assert_ne!(e, base);
    }

    pub(crate) fn test_prepared_pairings<P: Pairing>() {
        let mut prng = test_rng();
        let a = [P::G1::random(&mut prng), P::G1::random(&mut prng)];
        let b = [P::G2::random(&mut prng), P::G2::random(&mut prng)];

        let expected = P::pairing(&a[0], &b[0]).add(&P::pairing(&a[1], &b[1]));
        assert_eq!(P::product_of_pairings(&a, &b), expected);

        let prepared = [P::prepare_g2(&b[0]), P::prepare_g2(&b[1])];
        assert_eq!(P::product_of_prepared_pairings(&a, &prepared), expected);

        // e(a, b) * e(-a, b) is the identity
        let cancel = P::product_of_prepared_pairings(
            &[a[0], a[0].neg()],
            &[prepared[0].clone(), prepared[0].clone()],
        );
        assert_eq!(cancel, P::Gt::get_identity());
    }
}
