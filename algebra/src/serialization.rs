use crate::arkworks::{ArkGroup, ArkGt, ArkScalar};
use crate::errors::AlgebraError;
use crate::traits::{Group, Scalar};
use ark_ec::{pairing::Pairing as ArkPairing, CurveGroup};
use ark_ff::PrimeField;
use ark_std::{fmt, vec::Vec};
use serde::de::{SeqAccess, Visitor};

/// Byte-level encoding shared by every serde implementation in the workspace.
pub trait KilnFromToBytes: Sized {
    /// Convert into bytes.
    fn kiln_to_bytes(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn kiln_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError>;
}

/// Visitor accepting raw bytes, a byte sequence or a base64 string.
pub struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a byte array or a base64 string")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
        Ok(v)
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Vec<u8>, E> {
        crate::utils::b64dec(v).map_err(serde::de::Error::custom)
    }

    fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<Vec<u8>, V::Error> {
        let mut v = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            v.push(b);
        }
        Ok(v)
    }
}

/// Implement serde for a type with a [`KilnFromToBytes`] encoding.
///
/// Human-readable formats get base64, binary formats get the raw bytes.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        $crate::serialize_deserialize!(@impl [] [] $t);
    };
    ($t:ident < $g:ident : $bound:path >) => {
        $crate::serialize_deserialize!(@impl [$g: $bound] [$g] $t);
    };
    (@impl [$($gen:tt)*] [$($arg:tt)*] $t:ident) => {
        impl<$($gen)*> ::serde::Serialize for $t<$($arg)*> {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let bytes = $crate::serialization::KilnFromToBytes::kiln_to_bytes(self);
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::utils::b64enc(&bytes))
                } else {
                    serializer.serialize_bytes(&bytes)
                }
            }
        }

        impl<'de, $($gen)*> ::serde::Deserialize<'de> for $t<$($arg)*> {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::BytesVisitor)?
                };
                <Self as $crate::serialization::KilnFromToBytes>::kiln_from_bytes(&bytes)
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

impl<F: PrimeField> KilnFromToBytes for ArkScalar<F> {
    fn kiln_to_bytes(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn kiln_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_bytes(bytes)
    }
}

impl<G: CurveGroup> KilnFromToBytes for ArkGroup<G> {
    fn kiln_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    fn kiln_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

impl<E: ArkPairing> KilnFromToBytes for ArkGt<E> {
    fn kiln_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    fn kiln_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(ArkScalar<F: PrimeField>);
serialize_deserialize!(ArkGroup<G: CurveGroup>);
serialize_deserialize!(ArkGt<E: ArkPairing>);
