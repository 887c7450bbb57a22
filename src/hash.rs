//! Key hashing for the table index.
//!
//! 64-bit FNV-1a. The table is rebuilt from source on every load, so the
//! algorithm is not part of any persisted format.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes `key` with 64-bit FNV-1a.
///
/// # Examples
///
/// ```rust
/// use koml::hash::fnv1a;
///
/// assert_eq!(fnv1a(""), 0xcbf29ce484222325);
/// assert_eq!(fnv1a("section:a"), fnv1a("section:a"));
/// assert_ne!(fnv1a("section:a"), fnv1a("section:b"));
/// ```
#[inline]
#[must_use]
pub fn fnv1a(key: &str) -> u64 {
    let mut h = FNV_OFFSET;
    for &b in key.as_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}
