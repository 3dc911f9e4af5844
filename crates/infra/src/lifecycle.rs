//! Event lifecycle service: create, update, delete, read, list.
//!
//! Orchestrates the pure [`Event`] aggregate against an [`EventStore`]:
//!
//! ```text
//! load (get_event) -> existence/state check -> ownership check
//!   -> aggregate decision (update/delete) -> put_event(Exact(loaded version))
//! ```
//!
//! Writes are version-checked, so two racing mutations of one event cannot
//! both commit. When a write loses, the event is re-read once: if the winner
//! deleted it, the loser sees the same outcome as a late caller (`NotFound`
//! for update, `Ok(false)` for delete); otherwise it gets
//! [`CatalogError::Conflict`]. Nothing here retries the mutation.

use chrono::{DateTime, Utc};
use tracing::instrument;

use campus_auth::OwnershipGuard;
use campus_catalog::{
    CreateEvent, DeleteEvent, Event, EventView, FallbackLocaleResolver, Locale, LocaleResolver,
    LocalizedContent, UpdateEvent,
};
use campus_core::{AggregateRoot, EventId, ExpectedVersion, UserId};

use crate::config::{CatalogConfig, ListScope};
use crate::error::{CatalogError, CatalogResult};
use crate::store::{EventFilter, EventStore, StoreError};

#[derive(Debug)]
pub struct EventLifecycle<S, R = FallbackLocaleResolver> {
    store: S,
    resolver: R,
    guard: OwnershipGuard,
    config: CatalogConfig,
}

impl<S> EventLifecycle<S, FallbackLocaleResolver> {
    pub fn new(store: S, config: CatalogConfig) -> Self {
        Self::with_resolver(store, FallbackLocaleResolver, config)
    }
}

impl<S, R> EventLifecycle<S, R> {
    pub fn with_resolver(store: S, resolver: R, config: CatalogConfig) -> Self {
        Self {
            store,
            resolver,
            guard: OwnershipGuard::new(),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl<S, R> EventLifecycle<S, R>
where
    S: EventStore,
    R: LocaleResolver,
{
    /// Create a new active event owned by `owner`.
    #[instrument(skip_all, fields(owner = %owner), err)]
    pub fn create(
        &self,
        owner: &UserId,
        content: LocalizedContent,
        starts_at: Option<DateTime<Utc>>,
    ) -> CatalogResult<Event> {
        let event = Event::create(
            CreateEvent {
                event_id: EventId::new(),
                owner: owner.clone(),
                content,
                starts_at,
                occurred_at: Utc::now(),
            },
            &self.config.default_locale,
        )?;

        let stored = self.store.put_event(event, ExpectedVersion::Exact(0))?;
        tracing::info!(event_id = %stored.id(), "event created");
        Ok(stored)
    }

    /// Merge locale entries into an event (and optionally reschedule it).
    #[instrument(skip_all, fields(event_id = %id, acting = %acting), err)]
    pub fn update(
        &self,
        id: EventId,
        acting: &UserId,
        content: LocalizedContent,
        starts_at: Option<DateTime<Utc>>,
    ) -> CatalogResult<Event> {
        let mut event = self.load_active(id)?;
        self.ensure_owner(acting, &event)?;

        let loaded_version = event.version();
        event.update(UpdateEvent {
            content,
            starts_at,
            occurred_at: Utc::now(),
        })?;

        let stored = self.commit(event, loaded_version)?;
        tracing::info!(version = stored.version(), "event updated");
        Ok(stored)
    }

    /// Soft-delete an event.
    ///
    /// Returns `Ok(false)` when the event is missing or already deleted; that
    /// check runs before the ownership check.
    #[instrument(skip_all, fields(event_id = %id, acting = %acting), err)]
    pub fn delete(&self, id: EventId, acting: &UserId) -> CatalogResult<bool> {
        let Some(mut event) = self.store.get_event(id)? else {
            return Ok(false);
        };
        if !event.is_active() {
            tracing::debug!("event already deleted");
            return Ok(false);
        }
        self.ensure_owner(acting, &event)?;

        let loaded_version = event.version();
        if !event.delete(DeleteEvent {
            occurred_at: Utc::now(),
        }) {
            return Ok(false);
        }

        match self.commit(event, loaded_version) {
            Ok(_) => {
                tracing::info!("event deleted");
                Ok(true)
            }
            Err(CatalogError::NotFound) => {
                tracing::debug!("event deleted concurrently");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Read one event, narrowed to `locale` (or the default locale).
    ///
    /// Deleted events are only visible to their owner.
    pub fn read(&self, id: EventId, acting: &UserId, locale: Option<&Locale>) -> CatalogResult<Option<EventView>> {
        let Some(event) = self.store.get_event(id)? else {
            return Ok(None);
        };
        if !event.is_active() && !self.guard.authorize(acting, event.owner()) {
            return Ok(None);
        }
        self.localize(&event, locale).map(Some)
    }

    /// Active events visible to `acting`, ordered by creation time.
    ///
    /// An event with no content for the configured default locale (possible
    /// after `CATALOG_DEFAULT_LOCALE` changes) is skipped with a warning
    /// rather than failing the whole listing.
    pub fn list(&self, acting: &UserId, locale: Option<&Locale>) -> CatalogResult<Vec<EventView>> {
        let filter = match self.config.list_scope {
            ListScope::Owned => EventFilter::active().owned_by(acting.clone()),
            ListScope::AllActive => EventFilter::active(),
        };

        let mut views = Vec::new();
        for event in self.store.list_events(&filter)? {
            match self.localize(&event, locale) {
                Ok(view) => views.push(view),
                Err(CatalogError::InvariantViolation(reason)) => {
                    tracing::warn!(event_id = %event.id(), %reason, "event skipped in listing");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(views)
    }

    pub fn localize(&self, event: &Event, locale: Option<&Locale>) -> CatalogResult<EventView> {
        Ok(event.localize(&self.resolver, locale, &self.config.default_locale)?)
    }

    fn load_active(&self, id: EventId) -> CatalogResult<Event> {
        match self.store.get_event(id)? {
            Some(event) if event.is_active() => Ok(event),
            _ => Err(CatalogError::NotFound),
        }
    }

    fn ensure_owner(&self, acting: &UserId, event: &Event) -> CatalogResult<()> {
        self.guard.ensure_owner(acting, event.owner()).map_err(|err| {
            let decision = self.guard.explain(acting, event.owner());
            tracing::warn!(
                event_id = %event.id(),
                owner = %decision.owner,
                granted = decision.granted,
                reason = %decision.reason,
                "ownership check failed"
            );
            CatalogError::from(err)
        })
    }

    /// Write with `Exact(loaded_version)`.
    ///
    /// On a lost race the event is re-read: `NotFound` if it is now missing or
    /// deleted, `Conflict` if it is still active.
    fn commit(&self, event: Event, loaded_version: u64) -> CatalogResult<Event> {
        let id = *event.id();
        match self.store.put_event(event, ExpectedVersion::Exact(loaded_version)) {
            Ok(stored) => Ok(stored),
            Err(StoreError::Concurrency(msg)) => match self.store.get_event(id)? {
                Some(current) if current.is_active() => {
                    tracing::warn!(error = %msg, "event write lost a race");
                    Err(CatalogError::Conflict(msg))
                }
                _ => {
                    tracing::debug!("event deleted by a concurrent writer");
                    Err(CatalogError::NotFound)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "event write rejected");
                Err(CatalogError::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use campus_catalog::{EventState, LocalizedText, Registration};
    use chrono::Duration;

    use super::*;
    use crate::store::InMemoryEventStore;

    /// Store that lets the owner delete `target` right before the next
    /// versioned write lands, as if another request won the race.
    struct DeleteBeforeNextWrite {
        inner: Arc<InMemoryEventStore>,
        target: Mutex<Option<EventId>>,
    }

    impl DeleteBeforeNextWrite {
        fn new(inner: Arc<InMemoryEventStore>, target: EventId) -> Self {
            Self {
                inner,
                target: Mutex::new(Some(target)),
            }
        }
    }

    impl EventStore for DeleteBeforeNextWrite {
        fn put_event(&self, event: Event, expected: ExpectedVersion) -> Result<Event, StoreError> {
            let racing = if matches!(expected, ExpectedVersion::Exact(v) if v > 0) {
                self.target.lock().unwrap().take()
            } else {
                None
            };
            if let Some(id) = racing {
                let mut winner = self.inner.get_event(id)?.unwrap();
                let version = winner.version();
                winner.delete(DeleteEvent { occurred_at: Utc::now() });
                self.inner.put_event(winner, ExpectedVersion::Exact(version))?;
            }
            self.inner.put_event(event, expected)
        }

        fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
            self.inner.get_event(id)
        }

        fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
            self.inner.list_events(filter)
        }

        fn insert_registration_if_absent(&self, registration: Registration) -> Result<bool, StoreError> {
            self.inner.insert_registration_if_absent(registration)
        }

        fn get_registration(&self, event_id: EventId, learner: &UserId) -> Result<Option<Registration>, StoreError> {
            self.inner.get_registration(event_id, learner)
        }

        fn list_registrations(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
            self.inner.list_registrations(event_id)
        }
    }

    fn racing_setup() -> (EventLifecycle<DeleteBeforeNextWrite>, Arc<InMemoryEventStore>, EventId) {
        let inner = Arc::new(InMemoryEventStore::new());
        let event = EventLifecycle::new(inner.clone(), CatalogConfig::default())
            .create(&user("u1"), workshop(), None)
            .unwrap();
        let id = *event.id();
        let lifecycle = EventLifecycle::new(DeleteBeforeNextWrite::new(inner.clone(), id), CatalogConfig::default());
        (lifecycle, inner, id)
    }

    fn user(name: &str) -> UserId {
        UserId::parse(name).unwrap()
    }

    fn loc(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn workshop() -> LocalizedContent {
        LocalizedContent::new().with(loc("en"), LocalizedText::new("Workshop", "Hands-on"))
    }

    fn setup() -> (EventLifecycle<Arc<InMemoryEventStore>>, Arc<InMemoryEventStore>) {
        let store = Arc::new(InMemoryEventStore::new());
        (EventLifecycle::new(store.clone(), CatalogConfig::default()), store)
    }

    #[test]
    fn create_persists_active_event() {
        let (lifecycle, store) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();

        let stored = store.get_event(*event.id()).unwrap().unwrap();
        assert_eq!(stored, event);
        assert_eq!(stored.state(), EventState::Active);
        assert_eq!(stored.created_at(), stored.modified_at());
    }

    #[test]
    fn create_without_default_locale_is_validation_error() {
        let (lifecycle, _) = setup();
        let content = LocalizedContent::new().with(loc("ta"), LocalizedText::new("பட்டறை", ""));
        let err = lifecycle.create(&user("u1"), content, None).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn create_then_read_returns_stored_content() {
        let (lifecycle, _) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();

        let view = lifecycle.read(*event.id(), &user("u1"), Some(&loc("en"))).unwrap().unwrap();
        assert_eq!(view.title, "Workshop");
        assert_eq!(view.description, "Hands-on");
        assert_eq!(view.locale, loc("en"));
    }

    #[test]
    fn update_merges_locales_and_advances_modified_at() {
        let (lifecycle, _) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        let starts = Utc::now() + Duration::days(3);

        let updated = lifecycle
            .update(
                *event.id(),
                &user("u1"),
                LocalizedContent::new().with(loc("ta"), LocalizedText::new("பட்டறை", "")),
                Some(starts),
            )
            .unwrap();

        assert_eq!(updated.content().len(), 2);
        assert!(updated.modified_at() > event.modified_at());
        assert_eq!(updated.created_at(), event.created_at());
        assert_eq!(updated.starts_at(), Some(starts));

        let ta = lifecycle.read(*event.id(), &user("u9"), Some(&loc("ta-in"))).unwrap().unwrap();
        assert_eq!(ta.title, "பட்டறை");
    }

    #[test]
    fn update_by_non_owner_is_forbidden_and_leaves_event_untouched() {
        let (lifecycle, store) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();

        let err = lifecycle
            .update(*event.id(), &user("u2"), workshop(), None)
            .unwrap_err();
        assert_eq!(err, CatalogError::Forbidden);
        assert_eq!(store.get_event(*event.id()).unwrap().unwrap(), event);
    }

    #[test]
    fn update_missing_or_deleted_is_not_found() {
        let (lifecycle, _) = setup();
        assert_eq!(
            lifecycle.update(EventId::new(), &user("u1"), workshop(), None).unwrap_err(),
            CatalogError::NotFound
        );

        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        assert!(lifecycle.delete(*event.id(), &user("u1")).unwrap());
        assert_eq!(
            lifecycle.update(*event.id(), &user("u1"), workshop(), None).unwrap_err(),
            CatalogError::NotFound
        );
    }

    #[test]
    fn delete_rules() {
        let (lifecycle, store) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();

        assert!(!lifecycle.delete(EventId::new(), &user("u1")).unwrap());
        assert_eq!(lifecycle.delete(*event.id(), &user("u2")).unwrap_err(), CatalogError::Forbidden);
        assert!(lifecycle.delete(*event.id(), &user("u1")).unwrap());
        assert!(!lifecycle.delete(*event.id(), &user("u1")).unwrap());
        // Already deleted: no ownership signal leaks to other users.
        assert!(!lifecycle.delete(*event.id(), &user("u2")).unwrap());

        let stored = store.get_event(*event.id()).unwrap().unwrap();
        assert_eq!(stored.state(), EventState::Deleted);
    }

    #[test]
    fn deleted_event_is_readable_by_owner_only() {
        let (lifecycle, _) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        lifecycle.delete(*event.id(), &user("u1")).unwrap();

        let own = lifecycle.read(*event.id(), &user("u1"), None).unwrap().unwrap();
        assert_eq!(own.state, EventState::Deleted);
        assert!(lifecycle.read(*event.id(), &user("u2"), None).unwrap().is_none());
        assert!(lifecycle.read(EventId::new(), &user("u1"), None).unwrap().is_none());
    }

    #[test]
    fn list_is_owner_scoped_by_default() {
        let (lifecycle, _) = setup();
        let first = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        let second = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        lifecycle.create(&user("u2"), workshop(), None).unwrap();

        let listed: Vec<EventId> = lifecycle
            .list(&user("u1"), None)
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(listed, vec![*first.id(), *second.id()]);
    }

    #[test]
    fn list_all_active_scope_shows_everyone() {
        let store = Arc::new(InMemoryEventStore::new());
        let lifecycle = EventLifecycle::new(
            store,
            CatalogConfig {
                list_scope: ListScope::AllActive,
                ..CatalogConfig::default()
            },
        );
        lifecycle.create(&user("u1"), workshop(), None).unwrap();
        let gone = lifecycle.create(&user("u2"), workshop(), None).unwrap();
        lifecycle.delete(*gone.id(), &user("u2")).unwrap();

        assert_eq!(lifecycle.list(&user("u3"), None).unwrap().len(), 1);
    }

    #[test]
    fn list_after_deleting_only_event_is_empty() {
        let (lifecycle, _) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();
        lifecycle.delete(*event.id(), &user("u1")).unwrap();
        assert!(lifecycle.list(&user("u1"), None).unwrap().is_empty());
    }

    #[test]
    fn stale_write_surfaces_as_conflict() {
        let (lifecycle, store) = setup();
        let event = lifecycle.create(&user("u1"), workshop(), None).unwrap();

        // Simulate a concurrent writer committing between our load and our put.
        let mut racer = event.clone();
        racer
            .update(UpdateEvent {
                content: workshop(),
                starts_at: None,
                occurred_at: Utc::now(),
            })
            .unwrap();
        store.put_event(racer, ExpectedVersion::Exact(1)).unwrap();

        let mut stale = event.clone();
        stale.delete(DeleteEvent { occurred_at: Utc::now() });
        let err = lifecycle.commit(stale, 1).unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[test]
    fn delete_losing_to_concurrent_delete_reports_false() {
        let (lifecycle, inner, id) = racing_setup();

        assert!(!lifecycle.delete(id, &user("u1")).unwrap());
        let stored = inner.get_event(id).unwrap().unwrap();
        assert_eq!(stored.state(), EventState::Deleted);
        assert_eq!(stored.version(), 2);
    }

    #[test]
    fn update_losing_to_concurrent_delete_is_not_found() {
        let (lifecycle, inner, id) = racing_setup();

        let err = lifecycle.update(id, &user("u1"), workshop(), None).unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
        assert_eq!(inner.get_event(id).unwrap().unwrap().state(), EventState::Deleted);
    }

    #[test]
    fn list_skips_events_without_default_locale_content() {
        let store = Arc::new(InMemoryEventStore::new());
        let english = EventLifecycle::new(store.clone(), CatalogConfig::default());
        let legacy = english.create(&user("u1"), workshop(), None).unwrap();

        let tamil = EventLifecycle::new(
            store,
            CatalogConfig {
                default_locale: loc("ta"),
                ..CatalogConfig::default()
            },
        );
        let current = tamil
            .create(
                &user("u1"),
                LocalizedContent::new().with(loc("ta"), LocalizedText::new("பட்டறை", "")),
                None,
            )
            .unwrap();

        let listed: Vec<EventId> = tamil.list(&user("u1"), None).unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(listed, vec![*current.id()]);

        // Still listed when the caller asks for a locale it has.
        let listed: Vec<EventId> = tamil
            .list(&user("u1"), Some(&loc("en")))
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(listed, vec![*legacy.id(), *current.id()]);
    }
}
