use std::sync::Arc;

use thiserror::Error;

use campus_catalog::{Event, EventState, Registration};
use campus_core::{EventId, ExpectedVersion, UserId};

/// Store operation error.
///
/// These are **infrastructure errors** as opposed to domain errors (validation,
/// ownership, not found).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid write: {0}")]
    InvalidWrite(String),
}

/// Selection criteria for [`EventStore::list_events`].
///
/// `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub owner: Option<UserId>,
    pub state: Option<EventState>,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active() -> Self {
        Self {
            owner: None,
            state: Some(EventState::Active),
        }
    }

    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.owner.as_ref().is_none_or(|o| event.owner() == o)
            && self.state.is_none_or(|s| event.state() == s)
    }
}

/// Keyed storage for events and registrations.
///
/// ## Write semantics
///
/// - `put_event` is a version-checked upsert: the currently stored version
///   (`0` when absent) must satisfy `expected`, otherwise
///   [`StoreError::Concurrency`]. This gives read-modify-write atomicity per
///   event id without holding locks across the caller's logic.
/// - `insert_registration_if_absent` is a single atomic conditional write on
///   `(event_id, learner)`. Two concurrent calls for the same key must see
///   exactly one `true`.
///
/// ## Read semantics
///
/// Reads return the latest committed value. `list_events` returns events
/// ordered by `(created_at, id)`; `list_registrations` by `registered_at`.
pub trait EventStore: Send + Sync {
    fn put_event(&self, event: Event, expected: ExpectedVersion) -> Result<Event, StoreError>;

    fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError>;

    fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;

    /// Returns `true` if the registration was stored, `false` if one already existed.
    fn insert_registration_if_absent(&self, registration: Registration) -> Result<bool, StoreError>;

    fn get_registration(&self, event_id: EventId, learner: &UserId) -> Result<Option<Registration>, StoreError>;

    fn list_registrations(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError>;
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn put_event(&self, event: Event, expected: ExpectedVersion) -> Result<Event, StoreError> {
        (**self).put_event(event, expected)
    }

    fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        (**self).get_event(id)
    }

    fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        (**self).list_events(filter)
    }

    fn insert_registration_if_absent(&self, registration: Registration) -> Result<bool, StoreError> {
        (**self).insert_registration_if_absent(registration)
    }

    fn get_registration(&self, event_id: EventId, learner: &UserId) -> Result<Option<Registration>, StoreError> {
        (**self).get_registration(event_id, learner)
    }

    fn list_registrations(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        (**self).list_registrations(event_id)
    }
}
