//! `campus-auth` — ownership authorization boundary.
//!
//! Pure policy checks; decoupled from HTTP, identity providers and storage.
//! Authentication happens upstream: callers hand us an already-resolved
//! [`campus_core::UserId`].

pub mod authorize;

pub use authorize::{authorize, AuthzError, OwnershipDecision, OwnershipGuard};
