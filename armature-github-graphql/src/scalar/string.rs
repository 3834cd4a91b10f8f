//! Scalars whose wire text is the string itself.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::{Scalar, ScalarError};

macro_rules! string_scalar {
    ($(#[$meta:meta])* $name:ident => $graphql:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Borrow the string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap the string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Scalar for $name {
            const NAME: &'static str = $graphql;

            fn encode(&self) -> String {
                self.0.clone()
            }

            fn decode(text: &str) -> Result<Self, ScalarError> {
                Ok(Self(text.to_string()))
            }
        }

        scalar_text!($name);
        scalar_serde!($name);
    };
}

string_scalar! {
    /// A (potentially binary) string encoded using base64.
    ///
    /// The codec passes the text through as is; use [`Base64String::from_bytes`]
    /// and [`Base64String::to_bytes`] to convert from and to raw bytes.
    Base64String => "Base64String"
}

string_scalar! {
    /// An ISO-8601 encoded date string.
    Date => "Date"
}

string_scalar! {
    /// A Git object ID.
    GitObjectId => "GitObjectID"
}

string_scalar! {
    /// An ISO-8601 encoded date string. Unlike [`DateTime`](super::DateTime),
    /// the sender's offset is kept rather than converted to UTC.
    GitTimestamp => "GitTimestamp"
}

string_scalar! {
    /// A Git SSH remote string.
    GitSshRemote => "GitSSHRemote"
}

string_scalar! {
    /// A string containing HTML code.
    Html => "HTML"
}

string_scalar! {
    /// An RFC 3986, RFC 3987, and RFC 6570 (level 4) compliant URI string.
    Uri => "URI"
}

impl Base64String {
    /// Encode raw bytes with the standard base64 alphabet.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// Decode the string back into raw bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }
}
