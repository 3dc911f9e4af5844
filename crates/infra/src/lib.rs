//! Infrastructure + application services for the events catalog.
//!
//! Storage boundary, configuration, and the services that orchestrate the
//! pure catalog domain against a store.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod registration;
pub mod store;


pub use config::{CatalogConfig, ListScope};
pub use error::{CatalogError, CatalogResult};
pub use lifecycle::EventLifecycle;
pub use registration::RegistrationManager;
pub use store::{EventFilter, EventStore, InMemoryEventStore, StoreError};
