use {
    crate::{
        constants::*,
        crypto::{hmac_sha256, SHA256_OUTPUT_LEN},
        KeyLengthError, SignatureError, SigningScope,
    },
    derive_builder::Builder,
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A raw AWS secret key (`kSecret`).
///
/// The key is held prefixed with `"AWS4"` so the first stage of the derivation chain never has
/// to reassemble it. `Debug` and `Display` never reveal the key material.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KSecretKey<const M: usize = KSECRETKEY_LENGTH> {
    /// The secret key, prefixed with "AWS4".
    prefixed_key: [u8; M],

    /// The length of the key.
    len: usize,
}

/// The scoped signing key (`kSigning`): the result of the four-stage HMAC-SHA256 derivation
/// chain over the date stamp, region, service, and the `"aws4_request"` terminator.
///
/// A signing key is only valid for the [`SigningScope`] it was derived from. It is derived fresh
/// per signing operation and never cached. `Debug` and `Display` never reveal the key material.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KSigningKey {
    /// The resulting raw signing key.
    key: [u8; SHA256_OUTPUT_LEN],
}

impl AsRef<[u8]> for KSecretKey {
    fn as_ref(&self) -> &[u8] {
        // Remove the "AWS4" prefix.
        &self.prefixed_key[4..self.len]
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KSigningKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl Debug for KSecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("KSecretKey")
    }
}

impl Debug for KSigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("KSigningKey")
    }
}

impl Display for KSecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("KSecretKey")
    }
}

impl Display for KSigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("KSigningKey")
    }
}

impl<const M: usize> FromStr for KSecretKey<M> {
    type Err = KeyLengthError;

    /// Create a new `KSecretKey` from a raw AWS secret key.
    fn from_str(raw: &str) -> Result<Self, KeyLengthError> {
        let len = raw.len();
        if len > M - 4 {
            return Err(KeyLengthError::TooLong);
        }
        if len + 4 < M {
            return Err(KeyLengthError::TooShort);
        }

        let mut prefixed_key = [0; M];

        prefixed_key[..4].copy_from_slice(b"AWS4");
        prefixed_key[4..].copy_from_slice(raw.as_bytes());
        Ok(Self {
            prefixed_key,
            len: len + 4,
        })
    }
}

impl KSecretKey {
    /// Derive the scoped signing key for `scope`.
    ///
    /// The chain is fixed: `HMAC("AWS4" + secret, date)` keyed over the region, then the
    /// service, then `"aws4_request"`. The intermediate keys are locals that drop when this
    /// function returns; only the final key leaves.
    pub fn to_ksigning(&self, scope: &SigningScope) -> Result<KSigningKey, SignatureError> {
        let date_stamp = scope.date_stamp()?;
        let k_date = hmac_sha256(&self.prefixed_key[..self.len], date_stamp.as_bytes())?;
        let k_region = hmac_sha256(&k_date, scope.region().as_bytes())?;
        let k_service = hmac_sha256(&k_region, scope.service().as_bytes())?;
        let key = hmac_sha256(&k_service, AWS4_REQUEST.as_bytes())?;
        Ok(KSigningKey {
            key,
        })
    }
}

/// An AWS credential: the access key id, the secret key, and an optional session token.
///
/// Only the access key id ever appears in the signed output. The session token is carried for
/// the caller to transmit as the `x-amz-security-token` header; it participates in the signature
/// only if the caller adds it to the request descriptor's headers.
///
/// Credential structs are immutable. Use [`CredentialBuilder`] to programmatically construct a
/// credential.
#[derive(Builder, Clone)]
pub struct Credential {
    /// The access key id. This is the only part of the credential exposed externally.
    #[builder(setter(into))]
    access_key_id: String,

    /// The secret key used to seed the signing key derivation chain.
    secret_key: KSecretKey,

    /// The optional session token for temporary credentials.
    #[builder(setter(into), default)]
    session_token: Option<String>,
}

impl Credential {
    /// Create a [CredentialBuilder] to construct a [Credential].
    #[inline]
    pub fn builder() -> CredentialBuilder {
        CredentialBuilder::default()
    }

    /// Retrieve the access key id.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Retrieve the secret key.
    #[inline]
    pub fn secret_key(&self) -> &KSecretKey {
        &self.secret_key
    }

    /// Retrieve the session token, if any.
    #[inline]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &self.secret_key)
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{constants::*, Credential, KSecretKey, KeyLengthError, SigningScope},
        chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc},
        std::str::FromStr,
    };

    fn test_scope(region: &str, service: &str) -> SigningScope {
        SigningScope::builder()
            .timestamp(DateTime::<Utc>::from_naive_utc_and_offset(
                NaiveDateTime::new(
                    NaiveDate::from_ymd_opt(2015, 8, 30).expect("failed to create NaiveDate 2015-08-30"),
                    NaiveTime::from_hms_opt(12, 36, 0).expect("failed to create NaiveTime 12:36:00"),
                ),
                Utc,
            ))
            .region(region)
            .service(service)
            .build()
            .expect("failed to build SigningScope")
    }

    #[test_log::test]
    fn test_ksigning_derivation_vector() {
        let secret = KSecretKey::from_str(TEST_SECRET_KEY).unwrap();

        // Signing key example from the AWS SigV4 documentation:
        // 20150830 / us-east-1 / iam.
        let ksigning = secret.to_ksigning(&test_scope(TEST_REGION, "iam")).unwrap();
        assert_eq!(hex::encode(ksigning.as_ref()), "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9");

        let ksigning = secret.to_ksigning(&test_scope(TEST_REGION, TEST_SERVICE)).unwrap();
        assert_eq!(hex::encode(ksigning.as_ref()), "938127b5336810ddb6a5d6af445fcac9e371f9ed418ed386b022aed82901be75");
    }

    #[test_log::test]
    fn test_scope_narrowing() {
        let secret = KSecretKey::from_str(TEST_SECRET_KEY).unwrap();
        let base = secret.to_ksigning(&test_scope(TEST_REGION, TEST_SERVICE)).unwrap();
        let other_region = secret.to_ksigning(&test_scope("us-west-2", TEST_SERVICE)).unwrap();
        let other_service = secret.to_ksigning(&test_scope(TEST_REGION, "iam")).unwrap();
        assert_ne!(base, other_region);
        assert_ne!(base, other_service);
        assert_ne!(other_region, other_service);
    }

    #[test_log::test]
    fn test_key_from_str_length() {
        assert_eq!(KSecretKey::from_str("123"), Err(KeyLengthError::TooShort));
        assert_eq!(
            KSecretKey::from_str("123456789012345678901234567890123456789012345"),
            Err(KeyLengthError::TooLong)
        );
        assert!(KSecretKey::<KSECRETKEY_LENGTH>::from_str("1234567890123456789012345678901234567890").is_ok());
    }

    #[test_log::test]
    fn test_as_ref_strips_prefix() {
        let secret = KSecretKey::from_str(TEST_SECRET_KEY).unwrap();
        assert_eq!(secret.as_ref(), TEST_SECRET_KEY.as_bytes());
    }

    #[test_log::test]
    fn test_no_secrets_in_debug_output() {
        let secret = KSecretKey::from_str(TEST_SECRET_KEY).unwrap();
        assert_eq!(format!("{:?}", secret), "KSecretKey");
        assert_eq!(format!("{}", secret), "KSecretKey");

        let ksigning = secret.to_ksigning(&test_scope(TEST_REGION, TEST_SERVICE)).unwrap();
        assert_eq!(format!("{:?}", ksigning), "KSigningKey");
        assert_eq!(format!("{}", ksigning), "KSigningKey");

        let credential = Credential::builder()
            .access_key_id(TEST_ACCESS_KEY)
            .secret_key(secret)
            .session_token(Some("AQoDYXdzEJr_example".to_string()))
            .build()
            .expect("failed to build Credential");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(!debug.contains("AQoDYXdzEJr_example"));
        assert_eq!(credential.session_token(), Some("AQoDYXdzEJr_example"));
    }
}
