//! The six catalog operations as consumed by a transport layer.
//!
//! Result shapes:
//!
//! - `register` -> `true` when a registration was created, `false` when the
//!   learner was already registered
//! - `read` / `update` -> `None` when the event is not there
//! - `delete` -> `false` when the event is missing or already deleted
//!
//! `Forbidden` is always returned as an error, never as absence; a transport
//! may choose to mask it outward, but it gets to see it.

use chrono::{DateTime, Utc};

use campus_catalog::{EventView, FallbackLocaleResolver, LocaleResolver, LocalizedContent, Registration};
use campus_core::EventId;
use campus_infra::{
    CatalogConfig, CatalogError, CatalogResult, EventLifecycle, EventStore, RegistrationManager,
};

use crate::context::RequestContext;

#[derive(Debug)]
pub struct EventFacade<S, R = FallbackLocaleResolver> {
    lifecycle: EventLifecycle<S, R>,
    registrations: RegistrationManager<S>,
}

impl<S> EventFacade<S, FallbackLocaleResolver>
where
    S: Clone,
{
    pub fn new(store: S, config: CatalogConfig) -> Self {
        Self::with_resolver(store, FallbackLocaleResolver, config)
    }
}

impl<S, R> EventFacade<S, R>
where
    S: Clone,
{
    pub fn with_resolver(store: S, resolver: R, config: CatalogConfig) -> Self {
        Self {
            lifecycle: EventLifecycle::with_resolver(store.clone(), resolver, config),
            registrations: RegistrationManager::new(store),
        }
    }
}

impl<S, R> EventFacade<S, R> {
    pub fn config(&self) -> &CatalogConfig {
        self.lifecycle.config()
    }
}

impl<S, R> EventFacade<S, R>
where
    S: EventStore,
    R: LocaleResolver,
{
    pub fn create(
        &self,
        ctx: &RequestContext,
        content: LocalizedContent,
        starts_at: Option<DateTime<Utc>>,
    ) -> CatalogResult<EventView> {
        let event = self.lifecycle.create(ctx.acting(), content, starts_at)?;
        self.lifecycle.localize(&event, ctx.locale())
    }

    pub fn register(&self, ctx: &RequestContext, event_id: EventId) -> CatalogResult<bool> {
        let outcome = self.registrations.register(event_id, ctx.acting())?;
        Ok(outcome.is_created())
    }

    pub fn read(&self, ctx: &RequestContext, event_id: EventId) -> CatalogResult<Option<EventView>> {
        self.lifecycle.read(event_id, ctx.acting(), ctx.locale())
    }

    pub fn update(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        content: LocalizedContent,
        starts_at: Option<DateTime<Utc>>,
    ) -> CatalogResult<Option<EventView>> {
        match self.lifecycle.update(event_id, ctx.acting(), content, starts_at) {
            Ok(event) => self.lifecycle.localize(&event, ctx.locale()).map(Some),
            Err(CatalogError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn delete(&self, ctx: &RequestContext, event_id: EventId) -> CatalogResult<bool> {
        self.lifecycle.delete(event_id, ctx.acting())
    }

    pub fn list(&self, ctx: &RequestContext) -> CatalogResult<Vec<EventView>> {
        self.lifecycle.list(ctx.acting(), ctx.locale())
    }

    /// Registrations of an event, for its owner (also after deletion).
    pub fn registrations(&self, ctx: &RequestContext, event_id: EventId) -> CatalogResult<Vec<Registration>> {
        self.registrations.registrations(event_id, ctx.acting())
    }
}
