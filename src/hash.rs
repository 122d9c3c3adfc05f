//! djb2 string hashing.

/// Initial djb2 state.
pub const DJB2_SEED: u64 = 5381;

/// Hash `bytes` with djb2: `h = h * 33 + b` for every byte, wrapping.
///
/// Deterministic and not collision resistant; the table relies on chaining
/// for correctness, not on hash quality.
#[inline]
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |h, &b| {
        (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
    })
}

/// Slot index of `hash` in a slot array of `capacity` heads.
#[inline]
pub(crate) fn slot_of(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}
