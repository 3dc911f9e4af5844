use serde::Serialize;
use thiserror::Error;

use campus_core::{DomainError, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: '{acting}' does not own this resource")]
    NotOwner { acting: UserId },
}

impl From<AuthzError> for DomainError {
    fn from(_: AuthzError) -> Self {
        DomainError::Forbidden
    }
}

/// Authorize a mutation by `acting` on a resource owned by `owner`.
///
/// - No IO
/// - No panics
/// - No business logic (pure identity comparison)
pub fn authorize(acting: &UserId, owner: &UserId) -> bool {
    acting == owner
}

/// Single entry point for ownership checks on every mutating path.
///
/// Stateless today; kept as a type so services take it as a collaborator and
/// every create/update/delete/audit path goes through the same decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    pub fn new() -> Self {
        Self
    }

    pub fn authorize(&self, acting: &UserId, owner: &UserId) -> bool {
        authorize(acting, owner)
    }

    /// Like [`OwnershipGuard::authorize`], but as a `Result` so call sites can use `?`.
    pub fn ensure_owner(&self, acting: &UserId, owner: &UserId) -> Result<(), AuthzError> {
        if self.authorize(acting, owner) {
            Ok(())
        } else {
            Err(AuthzError::NotOwner {
                acting: acting.clone(),
            })
        }
    }

    /// Auditable record of an ownership decision.
    pub fn explain(&self, acting: &UserId, owner: &UserId) -> OwnershipDecision {
        let granted = self.authorize(acting, owner);
        let reason = if granted {
            format!("'{acting}' owns the resource")
        } else {
            format!("'{acting}' is not the owner ('{owner}')")
        };
        OwnershipDecision {
            acting: acting.clone(),
            owner: owner.clone(),
            granted,
            reason,
        }
    }
}

/// Detailed explanation of an ownership decision (for audit trails).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipDecision {
    pub acting: UserId,
    pub owner: UserId,
    pub granted: bool,
    pub reason: String,
}
