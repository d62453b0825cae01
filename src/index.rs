//! Mapping keys to bucket slots.

use core::hash::{BuildHasher, Hash, Hasher};

/// Hashes `key` with a fresh hasher from `hash_builder`, reinterpreting the finished digest as a
/// signed integer.
pub fn hash_of<S: BuildHasher, Q: Hash + ?Sized>(hash_builder: &S, key: &Q) -> i64 {
    let mut state = hash_builder.build_hasher();
    key.hash(&mut state);
    state.finish() as i64
}

/// The slot for a raw hash in a table of `capacity` buckets: `|raw| mod capacity`.
///
/// `|i64::MIN|` is taken as 2<sup>63</sup>, so the most negative hash lands in slot 0 of every
/// power-of-two table.
///
/// ```
/// # use chainmap::index::index_for;
/// assert_eq!(index_for(-17, 16), 1);
/// assert_eq!(index_for(i64::MIN, 16), 0);
/// ```
pub fn index_for(raw: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);

    (raw.unsigned_abs() % capacity as u64) as usize
}

/// Key equality as seen from the entry already in the table: the same reference, or
/// `stored == candidate`.
pub fn keys_match<Q: Eq + ?Sized>(stored: &Q, candidate: &Q) -> bool {
    core::ptr::eq(stored, candidate) || stored == candidate
}
