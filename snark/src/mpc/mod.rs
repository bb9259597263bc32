//! A multi-party setup for Groth16 keys.
//!
//! Phase one is a powers-of-tau ceremony: participants take turns
//! re-randomizing an [`Accumulator`] and publish a [`PublicKey`] proving
//! they knew their share. The result is independent of any circuit and is
//! specialized into a keypair by [`init_mpc_keypair`], with `γ = δ = 1`.
//! Phase two re-randomizes `δ` for a fixed circuit through [`MpcParams`].
//! The keys are sound as long as one participant of each phase destroyed
//! their share.

/// Module for the powers-of-tau accumulator.
pub mod accumulator;

/// Module for the ceremony coordinator.
pub mod ceremony;

/// Module for the ceremony configuration.
pub mod config;

/// Module for the circuit-specific delta round.
pub mod delta;

/// Module for specializing a ceremony result into Groth16 keys.
pub mod keypair;

/// Module for transcript hashing and ratio checks.
pub mod transcript;

pub use accumulator::*;
pub use ceremony::*;
pub use config::*;
pub use delta::*;
pub use keypair::*;
pub use transcript::*;

use kiln_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Multiply every point by the matching scalar.
pub(crate) fn mul_each<G: Group>(points: &mut [G], scalars: &[G::ScalarType]) {
    #[cfg(feature = "parallel")]
    points
        .par_iter_mut()
        .zip(scalars.par_iter())
        .for_each(|(p, s)| *p = *p * s);
    #[cfg(not(feature = "parallel"))]
    points
        .iter_mut()
        .zip(scalars.iter())
        .for_each(|(p, s)| *p = *p * s);
}

/// Multiply every point by the same scalar.
pub(crate) fn mul_all<G: Group>(points: &mut [G], scalar: &G::ScalarType) {
    #[cfg(feature = "parallel")]
    points.par_iter_mut().for_each(|p| *p = *p * scalar);
    #[cfg(not(feature = "parallel"))]
    points.iter_mut().for_each(|p| *p = *p * scalar);
}
