//! AWS API request signing.
//!
//! This implements the client side of the AWS
//! [SigV4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html) signing
//! scheme: a deterministic procedure that turns an HTTP request description plus a secret
//! credential into the `Authorization` header value that authenticates the request, with no
//! live handshake and no stored session.
//!
//! The pipeline is three independently testable pure functions composed by
//! [`sign_request`]:
//!
//! 1. [`CanonicalRequest::from_descriptor`] turns a [`RequestDescriptor`] into the byte-exact
//!    canonical request.
//! 2. [`KSecretKey::to_ksigning`] derives the scoped signing key for a [`SigningScope`] via the
//!    fixed four-stage HMAC-SHA256 chain.
//! 3. [`string_to_sign`], [`sign`], and [`build_authorization_header`] produce the final
//!    [`Signature`] and header value.
//!
//! Every operation is synchronous and side-effect free; the caller supplies the timestamp, so
//! signing is reproducible for testing against the published reference vectors. Transport,
//! retries, and credential acquisition are the caller's concern.

mod canonical;
mod constants;
mod crypto;
mod error;
mod scope;
mod sign;
mod signing_key;

pub use crate::{
    canonical::{
        CanonicalRequest, RequestDescriptor, RequestDescriptorBuilder, RequestDescriptorBuilderError,
        SignedHeaderRequirements,
    },
    error::{KeyLengthError, SignatureError},
    scope::{SigningScope, SigningScopeBuilder, SigningScopeBuilderError},
    sign::{
        build_authorization_header, sign, sign_request, sign_request_with_requirements, string_to_sign,
        Authorization, Signature,
    },
    signing_key::{Credential, CredentialBuilder, CredentialBuilderError, KSecretKey, KSigningKey},
};
