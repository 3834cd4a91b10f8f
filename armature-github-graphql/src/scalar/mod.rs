//! GitHub GraphQL scalars.
//!
//! See <https://docs.github.com/en/graphql/reference/scalars>.
//!
//! Every scalar converts to and from its wire text through [`Scalar`], and
//! serializes as a JSON string using the same codec. Values can therefore be
//! used directly as request variables and as fields of response types.
//! `Boolean`, `Float`, `Int` and `String` map to Rust primitives and are not
//! defined here.

use thiserror::Error;

/// Implement `Display` and `FromStr` in terms of [`Scalar`].
macro_rules! scalar_text {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::scalar::Scalar::encode(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::scalar::ScalarError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::scalar::Scalar>::decode(s)
            }
        }
    };
}

/// Implement serde as a JSON string in terms of [`Scalar`].
macro_rules! scalar_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&$crate::scalar::Scalar::encode(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::scalar::Scalar>::decode(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

mod big_int;
mod date_time;
mod id;
mod string;

pub use big_int::BigInt;
pub use date_time::{DateTime, PreciseDateTime};
pub use id::Id;
pub use string::{Base64String, Date, GitObjectId, GitSshRemote, GitTimestamp, Html, Uri};

/// A GraphQL scalar with a textual wire representation.
pub trait Scalar: Sized {
    /// GraphQL type name, used when declaring variables.
    const NAME: &'static str;

    /// Encode to wire text.
    fn encode(&self) -> String;

    /// Decode from wire text.
    fn decode(text: &str) -> Result<Self, ScalarError>;
}

/// Scalar decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// The text is not a base-10 integer.
    #[error("could not parse {text:?} as a base-10 integer")]
    InvalidBigInt {
        /// The rejected text.
        text: String,
    },

    /// The text is not an ISO-8601 date-time.
    #[error("could not parse {text:?} as an ISO-8601 date-time: {source}")]
    InvalidDateTime {
        /// The rejected text.
        text: String,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },
}
