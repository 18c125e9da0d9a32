use {
    crate::constants::*,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error code: HashingFailure
const ERR_CODE_HASHING_FAILURE: &str = "HashingFailure";

/// Error code: InvalidTimestamp
const ERR_CODE_INVALID_TIMESTAMP: &str = "InvalidTimestamp";

/// Error code: MissingRequiredHeader
const ERR_CODE_MISSING_REQUIRED_HEADER: &str = "MissingRequiredHeader";

/// Error returned when an attempt at signing a request fails.
///
/// Signing is deterministic, so none of these conditions can be resolved by retrying with
/// identical inputs. Error payloads carry field and header *names* only; secret material is
/// never included.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The underlying cryptographic primitive rejected the key material. This indicates a
    /// misconfigured environment, not a problem with the request.
    Hashing(/* message */ String),

    /// The scope timestamp cannot be represented as an 8-digit `YYYYMMDD` date stamp (e.g. the
    /// year falls outside 0000-9999).
    InvalidTimestamp(/* message */ String),

    /// The request is missing a header required for signing. The payload is the lower-cased
    /// header name.
    MissingHeader(/* header name */ String),
}

impl SignatureError {
    /// The AWS-style error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Hashing(_) => ERR_CODE_HASHING_FAILURE,
            Self::InvalidTimestamp(_) => ERR_CODE_INVALID_TIMESTAMP,
            Self::MissingHeader(_) => ERR_CODE_MISSING_REQUIRED_HEADER,
        }
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Hashing(msg) => f.write_str(msg),
            Self::InvalidTimestamp(msg) => f.write_str(msg),
            Self::MissingHeader(header) => write!(f, "Request is missing required header '{}'", header),
        }
    }
}

impl Error for SignatureError {}

/// Error returned by `KSecretKey::from_str` when the secret key cannot fit in the expected size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyLengthError {
    /// The key is too long.
    TooLong,
    /// The key is too short.
    TooShort,
}

impl Display for KeyLengthError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            KeyLengthError::TooLong => f.write_str(ERR_MSG_KEY_TOO_LONG),
            KeyLengthError::TooShort => f.write_str(ERR_MSG_KEY_TOO_SHORT),
        }
    }
}

impl Error for KeyLengthError {}
