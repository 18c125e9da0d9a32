//! Canonicalization functionality for signature generation.
//!
//! This turns a structured request description into the byte-exact canonical request defined by
//! the AWS [SigV4](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)
//! signing scheme. Any deviation here (wrong newline, wrong casing, wrong ordering) produces a
//! signature the server rejects with nothing more than "unauthorized", so the canonical form is
//! fixed and covered by the published reference vectors in the test suite.

use {
    crate::{
        constants::*,
        crypto::{sha256, sha256_hex, SHA256_OUTPUT_LEN},
        SignatureError,
    },
    bytes::Bytes,
    derive_builder::Builder,
    http::{
        header::{HeaderMap, HeaderName, HeaderValue},
        method::Method,
    },
    log::trace,
    std::collections::BTreeMap,
};

/// A structured description of the HTTP request to sign.
///
/// The path and query string are signed verbatim: the caller guarantees they are already
/// percent-encoded per the scheme's normalization rules (unreserved characters unescaped, all
/// others escaped with uppercase hex). Header names are lower-cased and deduplicated by
/// [`HeaderMap`] itself.
///
/// RequestDescriptor structs are immutable. Use [`RequestDescriptorBuilder`] to programmatically
/// construct a descriptor.
#[derive(Builder, Clone, Debug)]
pub struct RequestDescriptor {
    /// The HTTP method for the request (e.g., "GET", "POST", etc.)
    #[builder(default)]
    method: Method,

    /// The percent-encoded URI path. An empty path canonicalizes to `/`.
    #[builder(setter(into), default = "String::from(\"/\")")]
    path: String,

    /// The encoded query string, empty when there are no query parameters.
    #[builder(setter(into), default)]
    query_string: String,

    /// Headers for the request. Every header present here is signed.
    #[builder(default)]
    headers: HeaderMap,

    /// The request body.
    #[builder(default)]
    body: Bytes,
}

impl RequestDescriptor {
    /// Create a [RequestDescriptorBuilder] to construct a [RequestDescriptor].
    #[inline]
    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }

    /// Retrieve the HTTP method for the request.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Retrieve the percent-encoded URI path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Retrieve the encoded query string.
    #[inline]
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Retrieve the headers for the request.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Retrieve the request body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl RequestDescriptorBuilder {
    /// Append a single header, creating the header map if necessary. Repeated names accumulate
    /// and are comma-joined in the canonical form.
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.get_or_insert_with(HeaderMap::new).append(name, value);
        self
    }
}

/// The headers a descriptor must carry before it can be canonicalized.
///
/// The scheme itself always demands a date header (`x-amz-date` or `date`); the rest of the
/// required set depends on the flavor of the target service. The default set is the
/// JSON-target flavor: `content-type`, `host`, and `x-amz-target`. Query-style services that
/// carry the operation in the query string can drop the target requirement with [`new`].
///
/// [`new`]: SignedHeaderRequirements::new
#[derive(Clone, Debug)]
pub struct SignedHeaderRequirements {
    /// Lower-cased names of headers that must always be present.
    always_present: Vec<String>,
}

impl SignedHeaderRequirements {
    /// Create requirements from a list of header names. Names are lower-cased.
    pub fn new(always_present: &[&str]) -> Self {
        Self {
            always_present: always_present.iter().map(|name| name.to_lowercase()).collect(),
        }
    }

    /// Retrieve the lower-cased names of headers that must always be present.
    #[inline]
    pub fn always_present(&self) -> &[String] {
        &self.always_present
    }
}

impl Default for SignedHeaderRequirements {
    fn default() -> Self {
        Self::new(&[HDR_CONTENT_TYPE, HDR_HOST, HDR_X_AMZ_TARGET])
    }
}

/// A canonicalized request for AWS SigV4.
///
/// This is a pure derivation from a [`RequestDescriptor`]: no clock access, no I/O, and the same
/// descriptor always produces the same canonical bytes regardless of the header map's iteration
/// order.
#[derive(Clone, Debug)]
pub struct CanonicalRequest {
    /// The HTTP method for the request (e.g., "GET", "POST", etc.)
    request_method: String,

    /// The canonical URI path. This is the descriptor's path, or `/` if the path was empty.
    canonical_path: String,

    /// The canonical query string, possibly empty.
    canonical_query_string: String,

    /// Headers to sign: lower-cased names in ascending byte order, values trimmed of leading and
    /// trailing whitespace, repeated values comma-joined in insertion order.
    headers: Vec<(String, String)>,

    /// The lower-cased header names in ascending byte order.
    signed_headers: Vec<String>,

    /// The lowercase-hex SHA-256 hash of the body.
    body_sha256: String,
}

impl CanonicalRequest {
    /// Create a CanonicalRequest from a [`RequestDescriptor`].
    ///
    /// Fails with [`SignatureError::MissingHeader`] before any canonical text is built if the
    /// descriptor lacks a date header (`x-amz-date` or `date`) or any header named in
    /// `requirements`. A missing header is never silently substituted with a default.
    pub fn from_descriptor(
        descriptor: &RequestDescriptor,
        requirements: &SignedHeaderRequirements,
    ) -> Result<Self, SignatureError> {
        let headers = normalize_headers(descriptor.headers());

        for required in requirements.always_present() {
            if !headers.iter().any(|(name, _)| name == required) {
                return Err(SignatureError::MissingHeader(required.to_string()));
            }
        }
        if !headers.iter().any(|(name, _)| name == HDR_X_AMZ_DATE || name == HDR_DATE) {
            return Err(SignatureError::MissingHeader(HDR_X_AMZ_DATE.to_string()));
        }

        let canonical_path = if descriptor.path().is_empty() {
            "/".to_string()
        } else {
            descriptor.path().to_string()
        };
        let signed_headers = headers.iter().map(|(name, _)| name.clone()).collect();
        let body_sha256 = sha256_hex(descriptor.body().as_ref());

        Ok(CanonicalRequest {
            request_method: descriptor.method().to_string(),
            canonical_path,
            canonical_query_string: descriptor.query_string().to_string(),
            headers,
            signed_headers,
            body_sha256,
        })
    }

    /// Retrieve the HTTP request method.
    #[inline]
    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    /// Retrieve the canonical URI path.
    #[inline]
    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// Retrieve the canonical query string.
    #[inline]
    pub fn canonical_query_string(&self) -> &str {
        &self.canonical_query_string
    }

    /// Retrieve the sorted, lower-cased names of the headers bound by the signature.
    #[inline]
    pub fn signed_headers(&self) -> &[String] {
        &self.signed_headers
    }

    /// Retrieve the lowercase-hex SHA-256 hash of the request body.
    #[inline]
    pub fn body_sha256(&self) -> &str {
        &self.body_sha256
    }

    /// Get the canonical request bytes to hash.
    pub fn canonical_request(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(1024);
        result.extend(self.request_method.as_bytes());
        result.push(b'\n');
        result.extend(self.canonical_path.as_bytes());
        result.push(b'\n');
        result.extend(self.canonical_query_string.as_bytes());
        result.push(b'\n');

        for (name, value) in &self.headers {
            result.extend(name.as_bytes());
            result.push(b':');
            result.extend(value.as_bytes());
            result.push(b'\n');
        }

        result.push(b'\n');
        result.extend(self.signed_headers.join(";").as_bytes());
        result.push(b'\n');
        result.extend(self.body_sha256.as_bytes());

        trace!("Canonical request:\n{}", String::from_utf8_lossy(&result));

        result
    }

    /// Get the SHA-256 hash of the canonical request.
    pub fn canonical_request_sha256(&self) -> [u8; SHA256_OUTPUT_LEN] {
        sha256(&self.canonical_request())
    }
}

/// Normalize the header map for signing: lower-cased names (guaranteed by [`HeaderName`]) in
/// ascending byte order, values trimmed, repeated values comma-joined in insertion order.
fn normalize_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut normalized: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
        normalized.entry(name.as_str().to_string()).or_default().push(value);
    }

    normalized.into_iter().map(|(name, values)| (name, values.join(","))).collect()
}

#[cfg(test)]
mod tests {
    use {
        crate::{CanonicalRequest, RequestDescriptor, SignedHeaderRequirements},
        http::header::{HeaderName, HeaderValue},
    };

    fn canonicalize(descriptor: &RequestDescriptor) -> Result<CanonicalRequest, crate::SignatureError> {
        CanonicalRequest::from_descriptor(descriptor, &SignedHeaderRequirements::default())
    }

    fn descriptor_with_headers(headers: &[(&'static str, &'static str)]) -> RequestDescriptor {
        let mut builder = RequestDescriptor::builder();
        for (name, value) in headers {
            builder.header(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        builder.build().expect("failed to build RequestDescriptor")
    }

    fn complete_headers() -> Vec<(&'static str, &'static str)> {
        vec![
            ("content-type", "application/x-amz-json-1.0"),
            ("host", "cognito-idp.us-east-1.amazonaws.com"),
            ("x-amz-date", "20150830T123600Z"),
            ("x-amz-target", "AWSCognitoIdentityProviderService.UpdateUserPool"),
        ]
    }

    #[test_log::test]
    fn test_empty_path_becomes_root() {
        let mut builder = RequestDescriptor::builder();
        builder.path("");
        for (name, value) in complete_headers() {
            builder.header(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        let descriptor = builder.build().expect("failed to build RequestDescriptor");
        let canonical = canonicalize(&descriptor).unwrap();
        assert_eq!(canonical.canonical_path(), "/");
    }

    #[test_log::test]
    fn test_headers_sorted_and_trimmed() {
        let descriptor = descriptor_with_headers(&[
            ("x-amz-target", "  Example.Operation  "),
            ("host", "example.amazonaws.com"),
            ("x-amz-date", "20150830T123600Z"),
            ("content-type", "application/x-amz-json-1.0"),
        ]);
        let canonical = canonicalize(&descriptor).unwrap();
        assert_eq!(canonical.signed_headers(), &["content-type", "host", "x-amz-date", "x-amz-target"]);

        let text = String::from_utf8(canonical.canonical_request()).unwrap();
        assert_eq!(
            text,
            "GET\n\
             /\n\
             \n\
             content-type:application/x-amz-json-1.0\n\
             host:example.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\
             x-amz-target:Example.Operation\n\
             \n\
             content-type;host;x-amz-date;x-amz-target\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test_log::test]
    fn test_repeated_header_values_joined() {
        let mut headers = complete_headers();
        headers.push(("x-amz-meta-tag", "alpha"));
        headers.push(("x-amz-meta-tag", "beta"));
        let canonical = canonicalize(&descriptor_with_headers(&headers)).unwrap();
        let text = String::from_utf8(canonical.canonical_request()).unwrap();
        assert!(text.contains("x-amz-meta-tag:alpha,beta\n"));
    }

    #[test_log::test]
    fn test_missing_headers_rejected() {
        for (skip, expected) in [
            ("content-type", "content-type"),
            ("host", "host"),
            ("x-amz-date", "x-amz-date"),
            ("x-amz-target", "x-amz-target"),
        ] {
            let headers: Vec<_> = complete_headers().into_iter().filter(|(name, _)| *name != skip).collect();
            let e = canonicalize(&descriptor_with_headers(&headers)).unwrap_err();
            assert_eq!(e.error_code(), "MissingRequiredHeader");
            assert_eq!(e.to_string(), format!("Request is missing required header '{}'", expected));
        }
    }

    #[test_log::test]
    fn test_date_header_satisfies_date_requirement() {
        let headers: Vec<_> = complete_headers()
            .into_iter()
            .map(|(name, value)| if name == "x-amz-date" { ("date", "Sun, 30 Aug 2015 12:36:00 GMT") } else { (name, value) })
            .collect();
        let canonical = canonicalize(&descriptor_with_headers(&headers)).unwrap();
        assert_eq!(canonical.signed_headers(), &["content-type", "date", "host", "x-amz-target"]);
    }
}
