//! Seeded fractal value noise over the timeline.
//!
//! Every query is a pure function of (time, parameters): no caches, no
//! iteration state, no call-order effects. The preview renderer and
//! the placement planner both sample this field, which is what makes
//! the curve on screen and the generated placements agree.

use dz_doc::NoiseParams;

use crate::rng::{hash_lattice, salted_seed, unit_f32};

const SALT_DENSITY: u64 = 0xF1E1_D000_0000_0001;
const SALT_DECISION: u64 = 0xD3C1_DE00_0000_0002;
const SALT_JITTER: u64 = 0x0FF5_E700_0000_0003;

/// Independent sample streams derived from one seed.
///
/// Each stream salts the base seed differently, so the streams are
/// uncorrelated with each other while a single seed still reproduces
/// the whole output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    /// The density curve a preview draws.
    Density,
    /// Accept/reject draws for the probability algorithm.
    Decision,
    /// Sub-step timing offsets for accepted placements.
    Jitter,
}

impl Stream {
    const fn salt(self) -> u64 {
        match self {
            Stream::Density => SALT_DENSITY,
            Stream::Decision => SALT_DECISION,
            Stream::Jitter => SALT_JITTER,
        }
    }
}

/// Quintic fade with zero first and second derivatives at the cell
/// edges, so octave sums stay artifact-free across lattice lines.
#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Single-layer value noise: uniform hash values on integer lattice
/// cells, smoothly interpolated between them. Output in `[0, 1)`.
///
/// Coordinates past the representable cell range saturate to the edge
/// cells, and a non-finite coordinate samples as 0; the octave product
/// can overflow even when the time itself is finite.
#[inline]
fn layer_value(x: f64, seed: u64) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }
    let floor = libm::floor(x);
    let cell = floor as i64;
    let frac = (x - floor) as f32;
    let a = unit_f32(hash_lattice(cell, seed));
    let b = unit_f32(hash_lattice(cell.wrapping_add(1), seed));
    lerp(a, b, smootherstep(frac))
}

/// Fractal noise sample from one of the derived streams.
///
/// Octaves stack at `frequency * lacunarity^k` with amplitude
/// `persistence^k`, and the sum is normalized by the total amplitude
/// so the result stays in `[0, 1]` at any octave count. Non-finite
/// times sample as 0.
pub fn stream_value(stream: Stream, time: f64, params: &NoiseParams) -> f32 {
    if !time.is_finite() {
        return 0.0;
    }
    let p = params.sanitized();
    let stream_seed = salted_seed(p.seed, stream.salt());

    let mut sum = 0.0_f32;
    let mut norm = 0.0_f32;
    let mut amp = 1.0_f32;
    let mut freq = p.frequency as f64;
    for layer in 0..p.octaves {
        let layer_seed = salted_seed(stream_seed, layer as u64);
        sum += layer_value(time * freq, layer_seed) * amp;
        norm += amp;
        amp *= p.persistence;
        freq *= p.lacunarity as f64;
    }
    if norm > 0.0 {
        sum / norm
    } else {
        0.0
    }
}

/// Density curve sample at `time`, in `[0, 1]`.
///
/// Deterministic: the same (time, parameters) pair always produces the
/// same value, across calls and across runs.
pub fn value_at(time: f64, params: &NoiseParams) -> f32 {
    stream_value(Stream::Density, time, params)
}

/// Evenly spaced density samples across `[start, end]`, both endpoints
/// included, equal point-wise to calling [`value_at`] at each time.
///
/// With one sample only `start` is emitted; with zero the iterator is
/// empty. Iteration allocates nothing; clone the iterator to sample
/// the same span again.
pub fn curve(start: f64, end: f64, samples: usize, params: &NoiseParams) -> Curve {
    let step = if samples > 1 {
        (end - start) / (samples - 1) as f64
    } else {
        0.0
    };
    Curve {
        params: *params,
        start,
        step,
        index: 0,
        samples,
    }
}

/// Iterator over `(time, value)` pairs, see [`curve`].
#[derive(Clone, Debug)]
pub struct Curve {
    params: NoiseParams,
    start: f64,
    step: f64,
    index: usize,
    samples: usize,
}

impl Iterator for Curve {
    type Item = (f64, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.samples {
            return None;
        }
        let time = self.start + self.step * self.index as f64;
        self.index += 1;
        Some((time, value_at(time, &self.params)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Curve {}
