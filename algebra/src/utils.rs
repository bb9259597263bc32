use crate::prelude::*;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use digest::generic_array::typenum::U64;
use digest::Digest;
use rand_chacha::ChaCha20Rng;

const BASE64_PADDING_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(&URL_SAFE, BASE64_PADDING_CONFIG);

/// Convert the input into the base64 encoding
pub fn b64enc<T: ?Sized + AsRef<[u8]>>(input: &T) -> String {
    BASE64_ENGINE.encode(input)
}

/// Reconstruct from the base64 encoding
pub fn b64dec<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Vec<u8>> {
    BASE64_ENGINE
        .decode(input)
        .map_err(|_| AlgebraError::DeserializationError)
}

/// Derive a ChaCha20Rng PRNG from a digest from a hash function
pub fn derive_prng_from_hash<D>(hash: D) -> ChaCha20Rng
where
    D: Digest<OutputSize = U64> + Default,
{
    const SEED_SIZE: usize = 32;
    let mut seed: [u8; SEED_SIZE] = [0; SEED_SIZE];
    let result = hash.finalize();
    seed.copy_from_slice(&result[0..SEED_SIZE]);
    ChaCha20Rng::from_seed(seed)
}

/// Return the base-2 logarithm of `n`, which must be a power of two.
pub fn log2_exact(n: usize) -> Option<u32> {
    if n.is_power_of_two() {
        Some(n.trailing_zeros())
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use sha2::{Digest, Sha512};

    #[test]
    fn b64_round_trip() {
        let bytes = [0u8, 1, 2, 250, 251, 252];
        let encoded = super::b64enc(&bytes);
        assert_eq!(super::b64dec(&encoded).unwrap(), bytes.to_vec());
        assert!(super::b64dec("not base64!").is_err());
    }

    #[test]
    fn prng_from_hash_is_deterministic() {
        use rand_chacha::rand_core::RngCore;

        let mut a = super::derive_prng_from_hash(Sha512::new_with_prefix(b"kiln"));
        let mut b = super::derive_prng_from_hash(Sha512::new_with_prefix(b"kiln"));
        let mut c = super::derive_prng_from_hash(Sha512::new_with_prefix(b"nlik"));
        let x = a.next_u64();
        assert_eq!(x, b.next_u64());
        assert_ne!(x, c.next_u64());
    }

    #[test]
    fn log2_exact() {
        assert_eq!(super::log2_exact(1), Some(0));
        assert_eq!(super::log2_exact(1024), Some(10));
        assert_eq!(super::log2_exact(0), None);
        assert_eq!(super::log2_exact(12), None);
    }
}
