//! AWS API request signing routines.
//!
//! This implements the final stage of the AWS
//! [SigV4](https://docs.aws.amazon.com/general/latest/gr/sigv4-calculate-signature.html) signing
//! scheme: building the string to sign from a canonical request and a scope, signing it with a
//! derived key, and assembling the `Authorization` header value.

use {
    crate::{
        constants::*,
        crypto::{hmac_sha256, SHA256_OUTPUT_LEN},
        CanonicalRequest, Credential, KSigningKey, RequestDescriptor, SignatureError, SignedHeaderRequirements,
        SigningScope,
    },
    log::trace,
    std::fmt::{Display, Formatter, Result as FmtResult},
    subtle::ConstantTimeEq,
};

/// A computed request signature: 64 lowercase hex digits. Unlike the keys that produced it, a
/// signature is safe to transmit and log.
#[derive(Clone, Debug, Eq)]
pub struct Signature(String);

impl Signature {
    /// The signature as a lowercase-hex string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl PartialEq for Signature {
    /// Signatures compare in constant time.
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

/// The assembled output of a signing operation: the `Authorization` header value, the signature
/// it carries, and the headers the signature binds.
#[derive(Clone, Debug)]
pub struct Authorization {
    /// The complete `Authorization` header value.
    header_value: String,

    /// The request signature.
    signature: Signature,

    /// The lower-cased names of the headers bound by the signature, in ascending byte order.
    signed_headers: Vec<String>,
}

impl Authorization {
    /// Retrieve the complete `Authorization` header value.
    #[inline]
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// Retrieve the request signature.
    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Retrieve the lower-cased names of the headers bound by the signature.
    #[inline]
    pub fn signed_headers(&self) -> &[String] {
        &self.signed_headers
    }
}

/// Build the [string to sign](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-string-to-sign.html)
/// for a canonical request hash and scope: the algorithm identifier, the ISO-8601 basic
/// timestamp, the credential scope, and the lowercase-hex canonical request hash, joined with
/// newlines.
pub fn string_to_sign(
    canonical_request_sha256: &[u8; SHA256_OUTPUT_LEN],
    scope: &SigningScope,
) -> Result<Vec<u8>, SignatureError> {
    let credential_scope = scope.credential_scope()?;
    let mut result = Vec::with_capacity(
        AWS4_HMAC_SHA256.len() + 1 + ISO8601_UTC_LENGTH + 1 + credential_scope.len() + 1 + SHA256_HEX_LENGTH,
    );
    result.extend(AWS4_HMAC_SHA256.as_bytes());
    result.push(b'\n');
    result.extend(scope.amz_date()?.as_bytes());
    result.push(b'\n');
    result.extend(credential_scope.as_bytes());
    result.push(b'\n');
    result.extend(hex::encode(canonical_request_sha256).as_bytes());
    Ok(result)
}

/// Sign a string to sign with a derived signing key.
pub fn sign(string_to_sign: &[u8], signing_key: &KSigningKey) -> Result<Signature, SignatureError> {
    Ok(Signature(hex::encode(hmac_sha256(signing_key.as_ref(), string_to_sign)?)))
}

/// Assemble the `Authorization` header value. The field order and separators are fixed by the
/// scheme; a verifying server rejects any other arrangement.
pub fn build_authorization_header(
    credential: &Credential,
    scope: &SigningScope,
    signed_headers: &[String],
    signature: &Signature,
) -> Result<String, SignatureError> {
    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        AWS4_HMAC_SHA256,
        credential.access_key_id(),
        scope.credential_scope()?,
        signed_headers.join(";"),
        signature
    ))
}

/// Sign a request, producing the `Authorization` header value to attach to it.
///
/// This composes the full pipeline: canonicalize the descriptor, build the string to sign,
/// derive the scoped signing key, sign, and assemble the header. The operation is a pure
/// function of its inputs; transmitting the request and interpreting the HTTP response belong
/// to the caller.
///
/// The descriptor must satisfy [`SignedHeaderRequirements::default`]. Services with a different
/// required-header flavor go through [`sign_request_with_requirements`].
pub fn sign_request(
    descriptor: &RequestDescriptor,
    credential: &Credential,
    scope: &SigningScope,
) -> Result<Authorization, SignatureError> {
    sign_request_with_requirements(descriptor, credential, scope, &SignedHeaderRequirements::default())
}

/// Sign a request whose required-header set differs from the default flavor.
pub fn sign_request_with_requirements(
    descriptor: &RequestDescriptor,
    credential: &Credential,
    scope: &SigningScope,
    requirements: &SignedHeaderRequirements,
) -> Result<Authorization, SignatureError> {
    let canonical = CanonicalRequest::from_descriptor(descriptor, requirements)?;
    let string_to_sign = string_to_sign(&canonical.canonical_request_sha256(), scope)?;
    trace!("String to sign:\n{}", String::from_utf8_lossy(&string_to_sign));

    let signing_key = credential.secret_key().to_ksigning(scope)?;
    let signature = sign(&string_to_sign, &signing_key)?;
    let header_value = build_authorization_header(credential, scope, canonical.signed_headers(), &signature)?;

    Ok(Authorization {
        header_value,
        signature,
        signed_headers: canonical.signed_headers().to_vec(),
    })
}
