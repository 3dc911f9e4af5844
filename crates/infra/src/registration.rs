//! Learner registration service.

use chrono::Utc;
use tracing::instrument;

use campus_auth::OwnershipGuard;
use campus_catalog::{Registration, RegistrationOutcome};
use campus_core::{EventId, UserId};

use crate::error::{CatalogError, CatalogResult};
use crate::store::EventStore;

#[derive(Debug)]
pub struct RegistrationManager<S> {
    store: S,
    guard: OwnershipGuard,
}

impl<S> RegistrationManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            guard: OwnershipGuard::new(),
        }
    }
}

impl<S> RegistrationManager<S>
where
    S: EventStore,
{
    /// Register `learner` for an active event.
    ///
    /// Idempotent: a repeat registration is `AlreadyRegistered`, not an error.
    /// The uniqueness decision is made by the store's atomic
    /// `insert_registration_if_absent`, never by a read here.
    #[instrument(skip_all, fields(event_id = %event_id, learner = %learner), err)]
    pub fn register(&self, event_id: EventId, learner: &UserId) -> CatalogResult<RegistrationOutcome> {
        let event = self.store.get_event(event_id)?.ok_or(CatalogError::NotFound)?;
        event.ensure_accepts_registrations()?;

        let inserted = self
            .store
            .insert_registration_if_absent(Registration::new(event_id, learner.clone(), Utc::now()))?;

        let outcome = RegistrationOutcome::from_inserted(inserted);
        match outcome {
            RegistrationOutcome::Created => tracing::info!("learner registered"),
            RegistrationOutcome::AlreadyRegistered => tracing::debug!("learner already registered"),
        }
        Ok(outcome)
    }

    pub fn is_registered(&self, event_id: EventId, learner: &UserId) -> CatalogResult<bool> {
        Ok(self.store.get_registration(event_id, learner)?.is_some())
    }

    /// Audit listing of an event's registrations, for its owner.
    ///
    /// Works for deleted events too; registrations outlive their event.
    pub fn registrations(&self, event_id: EventId, acting: &UserId) -> CatalogResult<Vec<Registration>> {
        let event = self.store.get_event(event_id)?.ok_or(CatalogError::NotFound)?;
        self.guard.ensure_owner(acting, event.owner()).map_err(|err| {
            let decision = self.guard.explain(acting, event.owner());
            tracing::warn!(
                event_id = %event_id,
                owner = %decision.owner,
                granted = decision.granted,
                reason = %decision.reason,
                "registration audit denied"
            );
            CatalogError::from(err)
        })?;
        Ok(self.store.list_registrations(event_id)?)
    }
}
