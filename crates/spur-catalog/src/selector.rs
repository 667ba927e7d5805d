//! Deterministic daily selection
//!
//! Picks one candidate from a non-empty slice using a seed derived from the
//! calendar date and the user's identity, so a user sees the same message all
//! day and a different one tomorrow.

use chrono::{Datelike, NaiveDate};

/// Stable 64-bit hash of an identity string
///
/// First eight bytes (little-endian) of the BLAKE3 digest. Depends only on the
/// string contents, so it is reproducible across processes and platforms.
#[must_use]
pub fn stable_hash(identity: &str) -> u64 {
    let digest = blake3::hash(identity.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// Selection seed: day of year plus the identity hash (wrapping)
#[inline]
#[must_use]
pub fn seed_for(date: NaiveDate, identity: &str) -> u64 {
    u64::from(date.ordinal()).wrapping_add(stable_hash(identity))
}

/// Select one candidate for `(date, identity)`
///
/// # Panics
///
/// Panics if `candidates` is empty. Callers must check for a match first.
#[must_use]
pub fn select<'a, T>(candidates: &'a [T], date: NaiveDate, identity: &str) -> &'a T {
    assert!(
        !candidates.is_empty(),
        "select called with an empty candidate list"
    );
    let len = candidates.len() as u64;
    // Remainder is < len, which came from a usize.
    #[allow(clippy::cast_possible_truncation)]
    let index = (seed_for(date, identity) % len) as usize;
    &candidates[index]
}
