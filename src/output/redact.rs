use crate::config::SecretKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a value with HMAC-SHA256 and returns lowercase hex
///
/// # Example
///
/// ```
/// use bracket_harvest::config::SecretKey;
/// use bracket_harvest::output::hmac_hex;
///
/// let key = SecretKey::new("key").unwrap();
/// let digest = hmac_hex(&key, "The quick brown fox jumps over the lazy dog");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn hmac_hex(key: &SecretKey, value: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key.expose_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(value.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
