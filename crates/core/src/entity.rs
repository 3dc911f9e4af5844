//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Composite-keyed records (e.g. a registration keyed by event and learner)
/// use a tuple as their identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
