//! Keyed event/registration storage boundary.
//!
//! The catalog depends on storage only through [`EventStore`]; any backend that
//! offers keyed reads, version-checked writes and an atomic insert-if-absent
//! for registrations can sit behind it.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEventStore;
pub use r#trait::{EventFilter, EventStore, StoreError};
