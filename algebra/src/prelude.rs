pub use crate::errors::AlgebraError;
pub use crate::rand_helper::test_rng;
pub use crate::serialization::*;
pub use crate::traits::{Domain, Group, Pairing, Scalar};
pub use crate::utils::*;
pub use crate::{serialize_deserialize, One, UniformRand, Zero};
pub use ark_std::borrow::Borrow;
pub use ark_std::fmt::Formatter;
pub use ark_std::iter::Sum;
pub use ark_std::marker::PhantomData;
pub use ark_std::ops::*;
pub use ark_std::rand::{CryptoRng, Rng, RngCore, SeedableRng};
pub use ark_std::{string::String, vec, vec::Vec};
pub use itertools::Itertools;

pub(crate) type Result<T> = core::result::Result<T, AlgebraError>;
