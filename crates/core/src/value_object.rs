//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A locale tag or a localized title/description pair are
//! value objects, an event is an entity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one with the new values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct LocalizedText {
///     title: String,
///     description: String,
/// }
///
/// impl ValueObject for LocalizedText {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
