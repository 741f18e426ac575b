//! Multi-selection parameter summaries.
//!
//! When several nodes are selected at once, a widget shows one value
//! only if every node agrees. [`Shared`] carries the "differs" case as
//! a real variant rather than a sentinel outside the legal range.

/// A value read across several nodes at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shared<T> {
    /// Every inspected node holds this value.
    Uniform(T),
    /// At least two nodes disagree.
    Mixed,
}

impl<T: PartialEq> Shared<T> {
    /// Fold one more observation into the summary.
    #[must_use]
    pub fn fold(self, value: T) -> Self {
        match self {
            Shared::Uniform(v) if v == value => Shared::Uniform(v),
            _ => Shared::Mixed,
        }
    }
}

impl<T> Shared<T> {
    /// The agreed value, if there is one.
    pub fn uniform(self) -> Option<T> {
        match self {
            Shared::Uniform(v) => Some(v),
            Shared::Mixed => None,
        }
    }
}

/// Summarize one field over a selection. `None` for an empty
/// selection, which widgets render as disabled rather than mixed.
pub fn summarize<T, I>(values: I) -> Option<Shared<T>>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut values = values.into_iter();
    let first = values.next()?;
    Some(values.fold(Shared::Uniform(first), Shared::fold))
}
