//! Process wiring: observability, configuration and services.

use std::sync::Arc;

use campus_infra::{CatalogConfig, InMemoryEventStore};

use crate::facade::EventFacade;

/// Wire a facade over the in-memory store (dev/test), configured from the
/// environment.
///
/// Initializes tracing first; safe to call more than once.
pub fn build_in_memory_facade() -> EventFacade<Arc<InMemoryEventStore>> {
    campus_observability::init();

    let config = CatalogConfig::from_env();
    tracing::info!(
        default_locale = %config.default_locale,
        list_scope = ?config.list_scope,
        "events catalog configured (in-memory store)"
    );

    EventFacade::new(Arc::new(InMemoryEventStore::new()), config)
}
