//! Transport-facing surface of the events catalog.
//!
//! Exposes the six catalog operations through [`EventFacade`], the request
//! context a transport builds per call, and stable error codes it can map to
//! protocol status codes. No HTTP lives here.

pub mod bootstrap;
pub mod context;
pub mod errors;
pub mod facade;

pub use bootstrap::build_in_memory_facade;
pub use context::RequestContext;
pub use errors::{error_body, error_code, status_hint, ErrorBody};
pub use facade::EventFacade;
