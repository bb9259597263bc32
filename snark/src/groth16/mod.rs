//! The Groth16 preprocessing zkSNARK for rank-1 constraint systems.
//!
//! Reference: Jens Groth, "On the Size of Pairing-based Non-interactive
//! Arguments", EUROCRYPT 2016.
//!
//! ```text
//! let keypair = generator::<BN254PairingEngine, _>(&mut prng, &cs)?;
//! let proof = prover(&mut prng, &keypair.pk, &primary, &auxiliary)?;
//! assert!(verifier::<BN254PairingEngine>(&keypair.vk, &primary, &proof));
//! ```

/// Module for the key generator.
pub mod generator;

/// Module for the key and proof types.
pub mod keys;

/// Module for the prover.
pub mod prover;

/// Module for the verifiers.
pub mod verifier;

pub use generator::*;
pub use keys::*;
pub use prover::*;
pub use verifier::*;

use kiln_algebra::prelude::*;

/// `Σ scalars[i]·points[i]` over the common prefix of both slices.
pub(crate) fn multi_exp<G: Group>(scalars: &[G::ScalarType], points: &[G]) -> G {
    let n = scalars.len().min(points.len());
    let scalars: Vec<&G::ScalarType> = scalars[..n].iter().collect();
    let points: Vec<&G> = points[..n].iter().collect();
    G::multi_exp(&scalars, &points)
}
