//! Kiln algebra: a small trait layer over the arkworks pairing-friendly curves.
//!
//! The proving system is written once against [`traits::Pairing`], and each
//! concrete curve is just a set of type aliases over the generic wrappers in
//! [`arkworks`].
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::suspicious_arithmetic_impl)]
#![allow(clippy::suspicious_op_assign_impl)]

#[macro_use]
extern crate serde_derive;

/// Generic wrappers over arkworks fields, groups and pairing engines.
pub mod arkworks;

/// Type aliases for the BLS12-381 curve.
pub mod bls12_381;

/// Type aliases for the BN254 curve.
pub mod bn254;

/// Errors of the algebra layer.
pub mod errors;

/// Everything a downstream crate usually needs.
pub mod prelude;

/// Serde support for algebraic elements.
pub mod serialization;

/// The capabilities consumed by the proving system.
pub mod traits;

/// Encoding and hashing helpers.
pub mod utils;

mod rand_helper;

pub use ark_std::{One, UniformRand, Zero};
