//! Generation parameters carried by groups and containers.
//!
//! A parameter set fully determines a node's density curve and its
//! placement plan. Values arrive from front-end widgets and host
//! automation, so nothing here is trusted: the engine always goes
//! through [`NoiseParams::sanitized`] before sampling.

/// Upper bound on fractal layers per noise query.
///
/// Beyond this the contribution of further octaves is below f32
/// precision at default persistence, so extra layers only cost time.
pub const MAX_OCTAVES: u8 = 16;

/// Smallest accepted candidate rate in events per second.
pub const MIN_FREQUENCY: f32 = 1.0e-3;

/// How a density curve is turned into discrete placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Independent accept/reject draw at every grid step.
    #[default]
    Probability,
    /// Leaky integrator that banks fractional probability and emits on
    /// overflow. Spacing is steadier than [`Algorithm::Probability`]
    /// at the same settings.
    Accumulation,
}

/// Noise and placement settings for one generation unit.
///
/// All fields are plain data and may hold out-of-range values while a
/// widget is mid-edit; [`NoiseParams::sanitized`] produces the copy
/// the engine actually samples with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Base seed. Every derived sample stream salts this value, so one
    /// seed reproduces the whole output.
    pub seed: u64,
    /// Candidate rate in events per second. Must be positive.
    pub frequency: f32,
    /// Depth of noise modulation around the base density, in percent.
    pub amplitude: f32,
    /// Fractal layers per noise query, clamped to `1..=MAX_OCTAVES`.
    pub octaves: u8,
    /// Per-octave amplitude falloff in `(0, 1]`.
    pub persistence: f32,
    /// Per-octave frequency multiplier, greater than 1.
    pub lacunarity: f32,
    /// Base event probability in percent of the candidate rate.
    pub density: f32,
    /// Gate in percent: candidates below this probability are dropped.
    pub threshold: f32,
    /// Placement algorithm for this unit.
    pub algorithm: Algorithm,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            amplitude: 50.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            density: 50.0,
            threshold: 0.0,
            algorithm: Algorithm::Probability,
        }
    }
}

impl NoiseParams {
    /// Copy of `self` with every field forced into its legal range.
    ///
    /// Non-finite floats fall back to the field's default; finite
    /// values are clamped. Idempotent, so layered callers may sanitize
    /// again without drift.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            seed: self.seed,
            frequency: clamp_or(self.frequency, MIN_FREQUENCY, f32::MAX, d.frequency),
            amplitude: clamp_or(self.amplitude, 0.0, f32::MAX, d.amplitude),
            octaves: self.octaves.clamp(1, MAX_OCTAVES),
            persistence: clamp_or(self.persistence, 1.0e-3, 1.0, d.persistence),
            lacunarity: clamp_or(self.lacunarity, 1.0 + 1.0e-3, f32::MAX, d.lacunarity),
            density: clamp_or(self.density, 0.0, 100.0, d.density),
            threshold: clamp_or(self.threshold, 0.0, 100.0, d.threshold),
            algorithm: self.algorithm,
        }
    }
}

/// Clamp `value` into `[lo, hi]`, or substitute `fallback` when it is
/// NaN or infinite.
fn clamp_or(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        let p = NoiseParams::default();
        assert_eq!(p, p.sanitized());
    }

    #[test]
    fn sanitize_clamps_ranges() {
        let p = NoiseParams {
            frequency: -4.0,
            amplitude: -10.0,
            octaves: 0,
            persistence: 3.0,
            lacunarity: 0.5,
            density: 250.0,
            threshold: -1.0,
            ..NoiseParams::default()
        };
        let s = p.sanitized();
        assert_eq!(s.frequency, MIN_FREQUENCY);
        assert_eq!(s.amplitude, 0.0);
        assert_eq!(s.octaves, 1);
        assert_eq!(s.persistence, 1.0);
        assert!(s.lacunarity > 1.0);
        assert_eq!(s.density, 100.0);
        assert_eq!(s.threshold, 0.0);
    }

    #[test]
    fn sanitize_replaces_non_finite_with_defaults() {
        let p = NoiseParams {
            frequency: f32::NAN,
            amplitude: f32::INFINITY,
            persistence: f32::NEG_INFINITY,
            ..NoiseParams::default()
        };
        let s = p.sanitized();
        let d = NoiseParams::default();
        assert_eq!(s.frequency, d.frequency);
        assert_eq!(s.amplitude, d.amplitude);
        assert_eq!(s.persistence, d.persistence);
    }

    #[test]
    fn sanitize_caps_octaves() {
        let p = NoiseParams {
            octaves: 200,
            ..NoiseParams::default()
        };
        assert_eq!(p.sanitized().octaves, MAX_OCTAVES);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let p = NoiseParams {
            frequency: f32::NAN,
            octaves: 99,
            density: 1.0e9,
            ..NoiseParams::default()
        };
        let once = p.sanitized();
        assert_eq!(once, once.sanitized());
    }
}
