//! Groth16 preprocessing zkSNARKs over rank-1 constraint systems, together
//! with a powers-of-tau ceremony that produces the same keys without a
//! trusted dealer.
#![deny(warnings)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate itertools;

#[macro_use]
extern crate serde_derive;

/// Module for errors.
pub mod errors;

/// Module for the Groth16 generator, prover and verifier.
pub mod groth16;

/// Module for the multi-party setup ceremony.
pub mod mpc;

/// Module for polynomials and FFTs over evaluation domains.
pub mod polynomial;

/// Module for the reduction from R1CS to QAP.
pub mod qap;

/// Module for rank-1 constraint systems.
pub mod r1cs;

/// Module for secret scalars.
pub mod secret;

pub use errors::SnarkError;
