//! Hashing of string table keys.

use xxhash_rust::xxh64::xxh64;

/// Compute the XXH64 (seed 0) hash of a key.
///
/// Keys stored in RST files are this hash truncated to the file's
/// [`crate::types::HashBits`].
pub fn hash64(bytes: &[u8]) -> u64 {
    xxh64(bytes, 0)
}
