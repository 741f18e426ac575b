//! Converts a density curve into concrete placement times.
//!
//! Two algorithms share the same per-candidate probability and differ
//! in how they turn it into discrete emissions. Both are deterministic
//! and iteration-bounded, and both read the same noise field the
//! preview draws, so what the user sees is what gets planned.

use alloc::vec::Vec;

use dz_doc::{Algorithm, NoiseParams, Placement};

use crate::noise::{stream_value, Stream};

/// Hard ceiling on sampling iterations for one [`plan`] call.
///
/// The working budget scales with `duration * rate`, so ordinary
/// sessions never come near this. The ceiling exists to bound one
/// pass's latency when a host hands over a pathological frequency or
/// span.
pub const MAX_PLAN_STEPS: usize = 1 << 22;

/// Probability algorithm emissions keep within this fraction of a grid
/// step around their slot, so consecutive placements cannot reorder.
const JITTER_SPAN: f64 = 0.5;

/// Per-step decay of banked accumulator credit while the curve sits
/// below the threshold gate.
const ACCUMULATOR_DECAY: f32 = 0.9;

/// Steps per grid interval in the accumulation algorithm. Finer than
/// the probability grid so emissions settle between candidates.
const ACCUMULATION_OVERSAMPLE: f64 = 10.0;

/// Plan placements for `[start, end)` under `params`.
///
/// The result is sorted by time, every placement lies inside the span,
/// and identical inputs produce identical output. An empty or reversed
/// span plans nothing.
pub fn plan(start: f64, end: f64, params: &NoiseParams) -> Vec<Placement> {
    let p = params.sanitized();
    if !start.is_finite() || !end.is_finite() || end <= start {
        return Vec::new();
    }
    match p.algorithm {
        Algorithm::Probability => plan_probability(start, end, &p),
        Algorithm::Accumulation => plan_accumulation(start, end, &p),
    }
}

/// Event probability at `t`: base density shifted by noise, where full
/// amplitude swings the curve by plus or minus its whole percent range.
fn probability_at(t: f64, p: &NoiseParams) -> f32 {
    let noise = stream_value(Stream::Density, t, p);
    let base = p.density / 100.0;
    let swing = p.amplitude / 100.0;
    (base + swing * (2.0 * noise - 1.0)).clamp(0.0, 1.0)
}

/// Iterations allowed for a span at the given sampling rate.
fn step_budget(duration: f64, rate: f64) -> usize {
    let wanted = (duration * rate) + 1.0;
    if wanted.is_finite() && wanted < MAX_PLAN_STEPS as f64 {
        wanted as usize + 1
    } else {
        MAX_PLAN_STEPS
    }
}

/// Independent draw per grid slot.
///
/// Each candidate sits on the grid `start + k / frequency`, survives
/// the threshold gate, passes an accept/reject draw against its own
/// probability, and lands jittered by up to a quarter step either way.
/// The jitter window is half the slot, so output order never needs a
/// sort.
fn plan_probability(start: f64, end: f64, p: &NoiseParams) -> Vec<Placement> {
    let step = 1.0 / p.frequency as f64;
    let gate = p.threshold / 100.0;
    let mut out = Vec::new();
    for k in 0..step_budget(end - start, p.frequency as f64) {
        let t = start + step * k as f64;
        if t >= end {
            break;
        }
        let prob = probability_at(t, p);
        if prob < gate {
            continue;
        }
        if stream_value(Stream::Decision, t, p) > prob {
            continue;
        }
        let jitter = (stream_value(Stream::Jitter, t, p) as f64 - 0.5) * JITTER_SPAN * step;
        let time = t + jitter;
        if time >= start && time < end {
            out.push(Placement::at(time));
        }
    }
    out
}

/// Leaky integrator over a finer grid.
///
/// Above the threshold the probability banks into an accumulator at a
/// rate that preserves the expected event count; crossing 1 emits at
/// the current step and keeps the remainder, which spaces events more
/// evenly than independent draws. Below the threshold the bank decays
/// instead of freezing, so a long quiet stretch cannot pay out a burst
/// the moment the curve returns.
fn plan_accumulation(start: f64, end: f64, p: &NoiseParams) -> Vec<Placement> {
    let rate = ACCUMULATION_OVERSAMPLE * p.frequency as f64;
    let step = 1.0 / rate;
    let gate = p.threshold / 100.0;
    let mut acc = 0.0_f32;
    let mut out = Vec::new();
    for k in 0..step_budget(end - start, rate) {
        let t = start + step * k as f64;
        if t >= end {
            break;
        }
        let prob = probability_at(t, p);
        if prob >= gate {
            // Per-step credit is at most 1/ACCUMULATION_OVERSAMPLE, so
            // the bank can cross 1 only once per step.
            acc += prob * p.frequency * step as f32;
            if acc >= 1.0 {
                out.push(Placement::at(t));
                acc -= 1.0;
            }
        } else {
            acc *= ACCUMULATOR_DECAY;
        }
    }
    out
}
