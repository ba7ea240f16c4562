//! Opaque session token generation.
//!
//! Tokens are 256 bits from a cryptographically secure generator, encoded
//! as a fixed-length lowercase-hex string. Uniqueness is probabilistic by
//! construction; issuance never performs a read-before-write lookup.

use rand::RngCore;

/// Number of random bytes per token.
const TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token string.
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Generate a fresh session token.
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Whether `token` has the shape of an issued token (fixed length,
/// lowercase hex). Anything else can be rejected without a storage scan.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN
        && token
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
