use {
    crate::{constants::*, SignatureError},
    chrono::{DateTime, Datelike, Utc},
    derive_builder::Builder,
};

/// The (timestamp, region, service) triple that narrows the validity of a derived signing key.
///
/// A scope is constructed once per signing operation from the caller-supplied instant and the
/// target endpoint. A signing key derived for one scope is invalid for any other date, region,
/// or service, so scopes must not be reused across requests with different timestamps.
///
/// SigningScope structs are immutable. Use [`SigningScopeBuilder`] to programmatically construct
/// a scope.
#[derive(Builder, Clone, Debug)]
pub struct SigningScope {
    /// The timestamp of the request, with second precision, in UTC.
    timestamp: DateTime<Utc>,

    /// The region the request is signed for.
    #[builder(setter(into))]
    region: String,

    /// The service the request is signed for.
    #[builder(setter(into))]
    service: String,
}

impl SigningScope {
    /// Create a [SigningScopeBuilder] to construct a [SigningScope].
    #[inline]
    pub fn builder() -> SigningScopeBuilder {
        SigningScopeBuilder::default()
    }

    /// Retrieve the timestamp of the request.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Retrieve the region the request is signed for.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Retrieve the service the request is signed for.
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The scope timestamp formatted as an 8-digit `YYYYMMDD` calendar date in UTC. This is the
    /// date stamp used in the credential scope and as the first message of the key derivation
    /// chain.
    pub fn date_stamp(&self) -> Result<String, SignatureError> {
        self.check_representable()?;
        Ok(self.timestamp.format(ISO8601_DATE_FORMAT).to_string())
    }

    /// The scope timestamp formatted as an ISO-8601 'basic format' `YYYYMMDD'T'HHMMSS'Z'`
    /// timestamp in UTC. Callers should use this value for the request's `x-amz-date` header so
    /// the signed header and the string to sign agree.
    pub fn amz_date(&self) -> Result<String, SignatureError> {
        self.check_representable()?;
        Ok(self.timestamp.format(ISO8601_COMPACT_FORMAT).to_string())
    }

    /// The credential scope string, `date/region/service/aws4_request`.
    pub fn credential_scope(&self) -> Result<String, SignatureError> {
        Ok(format!("{}/{}/{}/{}", self.date_stamp()?, self.region, self.service, AWS4_REQUEST))
    }

    /// Chrono timestamps can fall outside the 4-digit year range that the `YYYYMMDD` and
    /// ISO-8601 basic formats require.
    fn check_representable(&self) -> Result<(), SignatureError> {
        let year = self.timestamp.year();
        if !(0..=9999).contains(&year) {
            return Err(SignatureError::InvalidTimestamp(format!(
                "Year {} cannot be formatted as YYYYMMDD",
                year
            )));
        }
        Ok(())
    }
}
