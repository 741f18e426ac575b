//! Deterministic hashing for noise evaluation.
//!
//! There is no stateful generator anywhere in the engine: every sample
//! is a pure function of (seed, position), so queries can be made in
//! any order, repeated, or skipped without changing any other sample.

/// One splitmix64 finalizer round. Decorrelates related inputs well
/// enough for lattice hashing while staying a handful of instructions.
#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Derive an independent sub-seed by salting the base seed.
#[inline]
pub(crate) fn salted_seed(seed: u64, salt: u64) -> u64 {
    splitmix64(seed ^ salt)
}

/// Hash one lattice cell under a seed into 64 bits.
#[inline]
pub(crate) fn hash_lattice(cell: i64, seed: u64) -> u64 {
    splitmix64(seed ^ (cell as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Map hash bits to a uniform float in `[0, 1)`. Uses the top 24 bits
/// so the result is exact in f32.
#[inline]
pub(crate) fn unit_f32(bits: u64) -> f32 {
    ((bits >> 40) as f32) / 16_777_216.0
}
