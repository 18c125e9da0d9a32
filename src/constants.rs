//! Constants shared across the signing pipeline.
//!
//! The wire-format strings (algorithm identifier, header names, timestamp formats) are needed by
//! more than one module, and a misspelled value produces a signature the server rejects without
//! explanation, so they are defined once here.
//!
//! Tests asserting on error codes or messages should not use these constants; hard-coded strings
//! there mean a misspelling fails the test instead of propagating.
//!
//! Please keep this file organized alphabetically.

/// Algorithm for AWS SigV4
pub(crate) const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

/// String included at the end of the AWS SigV4 credential scope
pub(crate) const AWS4_REQUEST: &str = "aws4_request";

/// Error message: `"Key too long"`
pub(crate) const ERR_MSG_KEY_TOO_LONG: &str = "Key too long";

/// Error message: `"Key too short"`
pub(crate) const ERR_MSG_KEY_TOO_SHORT: &str = "Key too short";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "content-type";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "date";

/// Header for `host`
pub(crate) const HDR_HOST: &str = "host";

/// Header for delivering the request timestamp
pub(crate) const HDR_X_AMZ_DATE: &str = "x-amz-date";

/// Header naming the service operation being invoked
pub(crate) const HDR_X_AMZ_TARGET: &str = "x-amz-target";

/// Compact ISO8601 format used for the string to sign.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Short date format used in the credential scope.
pub(crate) const ISO8601_DATE_FORMAT: &str = "%Y%m%d";

/// Length of an ISO8601 date string in the UTC time zone.
pub(crate) const ISO8601_UTC_LENGTH: usize = 16;

/// The default length of an AWS secret key, including the "AWS4" prefix.
pub(crate) const KSECRETKEY_LENGTH: usize = 44;

/// SHA-256 of an empty string.
#[cfg(test)]
pub(crate) const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Length of a SHA-256 hex string.
pub(crate) const SHA256_HEX_LENGTH: usize = 64;

/// The access key to use for testing.
#[cfg(test)]
pub(crate) const TEST_ACCESS_KEY: &str = "AKIDEXAMPLE";

/// The region to use for testing.
#[cfg(test)]
pub(crate) const TEST_REGION: &str = "us-east-1";

/// The secret key to use for testing.
#[cfg(test)]
pub(crate) const TEST_SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

/// The service to use for testing.
#[cfg(test)]
pub(crate) const TEST_SERVICE: &str = "service";
