use {
    crate::SignatureError,
    hmac::{Hmac, Mac},
    sha2::{Digest, Sha256},
};

/// The length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Wrapper function to form a HMAC-SHA256 operation.
///
/// HMAC-SHA256 accepts keys of any length, so the only failure mode is the underlying
/// implementation rejecting the key material outright. That is surfaced as
/// [`SignatureError::Hashing`] rather than panicking since it indicates a misconfigured
/// cryptographic provider.
#[inline(always)]
pub(crate) fn hmac_sha256(key: &[u8], value: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN], SignatureError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SignatureError::Hashing(format!("HMAC-SHA256: {}", e)))?;
    mac.update(value);
    Ok(mac.finalize().into_bytes().into())
}

#[inline(always)]
pub(crate) fn sha256(value: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    Sha256::digest(value).into()
}

#[inline(always)]
pub(crate) fn sha256_hex(value: &[u8]) -> String {
    hex::encode(sha256(value))
}
