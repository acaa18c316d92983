//! Compile-time configuration constants.
//!
//! Pulls the bucket-size ladder and the length bounds out as named constants
//! rather than leaving them as scattered literals.

/// Upper bound on a match length, inclusive.
pub const MAX_MATCH_UPPER_BOUND: u32 = 120;

/// Lower bound on a match length, inclusive.
pub const MIN_MATCH_LOWER_BOUND: u32 = 1;

/// Hash bucket count for match lengths below [`MEDIUM_LENGTH_THRESHOLD`].
pub const SMALL_LENGTH_HASH_BITS: u32 = 16;

/// Hash bucket count for match lengths in
/// `[MEDIUM_LENGTH_THRESHOLD, LARGE_LENGTH_THRESHOLD)`.
pub const MEDIUM_LENGTH_HASH_BITS: u32 = 14;

/// Hash bucket count for match lengths at or above [`LARGE_LENGTH_THRESHOLD`].
pub const LARGE_LENGTH_HASH_BITS: u32 = 12;

/// Match lengths below this use [`SMALL_LENGTH_HASH_BITS`] buckets.
pub const MEDIUM_LENGTH_THRESHOLD: u32 = 20;

/// Match lengths at or above this (and below `MEDIUM_LENGTH_THRESHOLD`... see
/// [`hash_bits_for_length`]) use [`LARGE_LENGTH_HASH_BITS`] buckets.
pub const LARGE_LENGTH_THRESHOLD: u32 = 50;

/// Number of hash buckets to allocate for a level-`L` table.
#[inline]
pub fn hash_bits_for_length(length: u32) -> u32 {
    if length < MEDIUM_LENGTH_THRESHOLD {
        SMALL_LENGTH_HASH_BITS
    } else if length < LARGE_LENGTH_THRESHOLD {
        MEDIUM_LENGTH_HASH_BITS
    } else {
        LARGE_LENGTH_HASH_BITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_bits_thresholds() {
        assert_eq!(hash_bits_for_length(1), SMALL_LENGTH_HASH_BITS);
        assert_eq!(hash_bits_for_length(19), SMALL_LENGTH_HASH_BITS);
        assert_eq!(hash_bits_for_length(20), MEDIUM_LENGTH_HASH_BITS);
        assert_eq!(hash_bits_for_length(49), MEDIUM_LENGTH_HASH_BITS);
        assert_eq!(hash_bits_for_length(50), LARGE_LENGTH_HASH_BITS);
        assert_eq!(hash_bits_for_length(120), LARGE_LENGTH_HASH_BITS);
    }
}
