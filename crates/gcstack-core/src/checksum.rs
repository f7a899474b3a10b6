//! Checksum codec for uploaded payloads.
//!
//! The storage protocol surfaces three content-integrity encodings:
//!
//! - the MD5 content hash as base64 text of the raw digest,
//! - the entity tag as that hash wrapped in double quotes,
//! - the CRC32C value as decimal text in backend metadata and as a raw
//!   unsigned 32-bit value on the wire.
//!
//! All functions here are pure and deterministic.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use md5::{Digest, Md5};

/// Compute the base64-encoded MD5 digest of `data`.
///
/// # Examples
///
/// ```
/// use gcstack_core::checksum::encoded_md5_hash;
///
/// assert_eq!(encoded_md5_hash(b"hello"), "XUFAKrxLKna5cZ2REBfFkg==");
/// ```
#[must_use]
pub fn encoded_md5_hash(data: &[u8]) -> String {
    BASE64_STANDARD.encode(Md5::digest(data))
}

/// Wrap a content hash as a double-quoted entity tag.
///
/// An entity tag is always derived from the content hash this way; it is
/// never assigned independently.
///
/// # Examples
///
/// ```
/// use gcstack_core::checksum::etag_for;
///
/// assert_eq!(etag_for("XUFAKrxLKna5cZ2REBfFkg=="), "\"XUFAKrxLKna5cZ2REBfFkg==\"");
/// ```
#[must_use]
pub fn etag_for(hash: &str) -> String {
    format!("\"{hash}\"")
}

/// Encode a CRC32C value as its decimal text form.
#[must_use]
pub fn encode_crc32c(value: u32) -> String {
    value.to_string()
}

/// Error returned when a stored CRC32C value is not valid decimal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid crc32c value: {0:?}")]
pub struct ParseCrc32cError(pub String);

/// Parse the decimal text form of a CRC32C value back to its 32-bit form.
///
/// The round trip through [`encode_crc32c`] is lossless for every unsigned
/// 32-bit value. A value that does not parse is an error; it must never be
/// silently coerced to zero.
pub fn parse_crc32c(text: &str) -> Result<u32, ParseCrc32cError> {
    text.parse::<u32>()
        .map_err(|_| ParseCrc32cError(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_compute_md5_hash_of_hello() {
        assert_eq!(encoded_md5_hash(b"hello"), "XUFAKrxLKna5cZ2REBfFkg==");
    }

    #[test]
    fn test_should_compute_md5_hash_of_empty_input() {
        assert_eq!(encoded_md5_hash(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_should_be_deterministic_across_calls() {
        let payload = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(encoded_md5_hash(payload), encoded_md5_hash(payload));
    }

    #[test]
    fn test_should_quote_hash_as_etag() {
        let hash = encoded_md5_hash(b"hello");
        let etag = etag_for(&hash);
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(&etag[1..etag.len() - 1], hash);
    }

    #[test]
    fn test_should_round_trip_crc32c_boundaries() {
        for value in [0u32, 1, 907_060_870, u32::MAX - 1, u32::MAX] {
            let text = encode_crc32c(value);
            assert_eq!(parse_crc32c(&text), Ok(value));
        }
    }

    #[test]
    fn test_should_encode_crc32c_max_as_expected_text() {
        assert_eq!(encode_crc32c(u32::MAX), "4294967295");
        assert_eq!(encode_crc32c(0), "0");
    }

    #[test]
    fn test_should_reject_non_decimal_crc32c_text() {
        assert!(parse_crc32c("").is_err());
        assert!(parse_crc32c("abc").is_err());
        assert!(parse_crc32c("-1").is_err());
        // One past u32::MAX.
        assert!(parse_crc32c("4294967296").is_err());
    }
}
