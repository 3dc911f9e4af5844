//! Events catalog domain module.
//!
//! Business rules for catalog events and learner registrations, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Callers
//! pass timestamps in explicitly.

pub mod content;
pub mod event;
pub mod locale;
pub mod registration;

pub use content::{LocalizedContent, LocalizedText};
pub use event::{CreateEvent, DeleteEvent, Event, EventState, EventView, UpdateEvent};
pub use locale::{FallbackLocaleResolver, Locale, LocaleResolver};
pub use registration::{Registration, RegistrationOutcome};
