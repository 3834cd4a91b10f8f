//! Arbitrary-precision integer scalar.

use std::str::FromStr;

use super::{Scalar, ScalarError};

/// Non-fractional signed whole numeric values.
///
/// The value may exceed the size of a 32-bit integer, so it is encoded as a
/// base-10 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigInt(pub num_bigint::BigInt);

impl BigInt {
    /// Wrap a big integer.
    pub fn new(n: impl Into<num_bigint::BigInt>) -> Self {
        Self(n.into())
    }

    /// Unwrap the big integer.
    pub fn into_inner(self) -> num_bigint::BigInt {
        self.0
    }
}

impl From<num_bigint::BigInt> for BigInt {
    fn from(n: num_bigint::BigInt) -> Self {
        Self(n)
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        Self(n.into())
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        Self(n.into())
    }
}

impl Scalar for BigInt {
    const NAME: &'static str = "BigInt";

    fn encode(&self) -> String {
        self.0.to_str_radix(10)
    }

    fn decode(text: &str) -> Result<Self, ScalarError> {
        let invalid = || ScalarError::InvalidBigInt {
            text: text.to_string(),
        };

        // One optional sign, then digits only.
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        num_bigint::BigInt::from_str(text)
            .map(Self)
            .map_err(|_| invalid())
    }
}

scalar_text!(BigInt);
scalar_serde!(BigInt);
