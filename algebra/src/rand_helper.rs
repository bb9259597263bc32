use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

fn seeded_test_rng() -> ChaChaRng {
    // arbitrary seed
    let seed = [
        7, 0, 0, 0, 41, 0, 0, 0, 133, 2, 0, 0, 96, 17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    ChaChaRng::from_seed(seed)
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    seeded_test_rng()
}

/// Should be used only for tests, not for any real world usage.
///
/// Set `DETERMINISTIC_TEST_RNG=1` to replay a failing run.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let is_deterministic =
        std::env::vars().any(|(key, val)| key == "DETERMINISTIC_TEST_RNG" && val == "1");
    if is_deterministic {
        seeded_test_rng()
    } else {
        ChaChaRng::from_entropy()
    }
}
