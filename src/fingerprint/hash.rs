//! Non-cryptographic digest used to turn environment signals into a compact
//! identifier. It is an identification aid only: collisions and spoofing are
//! acceptable, and swapping in a cryptographic hash would change what the
//! identifier promises about uniqueness and privacy.

const HASH_SEED: u64 = 5381;
const HASH_MULTIPLIER: u64 = 31;

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Rolling multiplicative hash over the UTF-8 bytes of `input`
pub fn rolling_hash(input: &str) -> u64 {
    input.bytes().fold(HASH_SEED, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(u64::from(byte))
    })
}

/// Upper-case base36 rendering of `value`
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Digest of `input`: the rolling hash rendered in base36
pub fn digest(input: &str) -> String {
    to_base36(rolling_hash(input))
}
