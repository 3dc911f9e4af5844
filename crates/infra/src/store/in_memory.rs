use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use campus_catalog::{Event, Registration};
use campus_core::{AggregateRoot, EventId, ExpectedVersion, UserId};

use super::r#trait::{EventFilter, EventStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegistrationKey {
    event_id: EventId,
    learner: UserId,
}

/// In-memory event/registration store.
///
/// Intended for tests/dev. Not optimized for performance: listing scans.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
    registrations: RwLock<HashMap<RegistrationKey, Registration>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl EventStore for InMemoryEventStore {
    fn put_event(&self, event: Event, expected: ExpectedVersion) -> Result<Event, StoreError> {
        let mut events = self.events.write().map_err(poisoned)?;

        let current = events.get(event.id()).map(|e| e.version()).unwrap_or(0);
        if !expected.matches(current) {
            return Err(StoreError::Concurrency(format!(
                "event {}: expected {expected:?}, found {current}",
                event.id()
            )));
        }
        if event.version() <= current {
            return Err(StoreError::InvalidWrite(format!(
                "event {}: version {} does not advance stored version {current}",
                event.id(),
                event.version()
            )));
        }

        events.insert(*event.id(), event.clone());
        Ok(event)
    }

    fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let events = self.events.read().map_err(poisoned)?;
        Ok(events.get(&id).cloned())
    }

    fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().map_err(poisoned)?;

        let mut matched: Vec<Event> = events.values().filter(|e| filter.matches(e)).cloned().collect();
        matched.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(matched)
    }

    fn insert_registration_if_absent(&self, registration: Registration) -> Result<bool, StoreError> {
        let key = RegistrationKey {
            event_id: registration.event_id,
            learner: registration.learner.clone(),
        };

        // Check and insert under one write guard.
        let mut registrations = self.registrations.write().map_err(poisoned)?;
        match registrations.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(registration);
                Ok(true)
            }
        }
    }

    fn get_registration(&self, event_id: EventId, learner: &UserId) -> Result<Option<Registration>, StoreError> {
        let key = RegistrationKey {
            event_id,
            learner: learner.clone(),
        };
        let registrations = self.registrations.read().map_err(poisoned)?;
        Ok(registrations.get(&key).cloned())
    }

    fn list_registrations(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        let registrations = self.registrations.read().map_err(poisoned)?;

        let mut matched: Vec<Registration> = registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.learner.cmp(&b.learner))
        });
        Ok(matched)
    }
}
