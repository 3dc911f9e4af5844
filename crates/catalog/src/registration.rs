//! Learner registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{Entity, EventId, UserId};

/// A learner's registration for an event, keyed by `(event_id, learner)`.
///
/// Never updated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub event_id: EventId,
    pub learner: UserId,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(event_id: EventId, learner: UserId, registered_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            learner,
            registered_at,
        }
    }
}

impl Entity for Registration {
    type Id = (EventId, UserId);

    fn id(&self) -> Self::Id {
        (self.event_id, self.learner.clone())
    }
}

/// Result of a registration attempt. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Created,
    AlreadyRegistered,
}

impl RegistrationOutcome {
    pub fn from_inserted(inserted: bool) -> Self {
        if inserted {
            Self::Created
        } else {
            Self::AlreadyRegistered
        }
    }

    pub fn is_created(self) -> bool {
        self == Self::Created
    }
}
