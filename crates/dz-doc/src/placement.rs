//! Placement values emitted by the engine.

/// One planned sound placement on the timeline.
///
/// Carries no identity beyond its time. A generation pass yields a
/// non-decreasing sequence of these and the consumer takes the whole
/// sequence, replacing whatever it held before.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Placement {
    /// Seconds from project start.
    pub time: f64,
}

impl Placement {
    pub const fn at(time: f64) -> Self {
        Self { time }
    }
}
