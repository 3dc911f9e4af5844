use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{AggregateRoot, DomainError, DomainResult, EventId, UserId};

use crate::content::LocalizedContent;
use crate::locale::{Locale, LocaleResolver};

/// Event lifecycle state.
///
/// Deletion is a soft marker so registrations stay auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventState {
    Active,
    Deleted,
}

/// Aggregate root: a catalog event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    owner: UserId,
    content: LocalizedContent,
    starts_at: Option<DateTime<Utc>>,
    state: EventState,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    version: u64,
}

/// Command: create an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEvent {
    pub event_id: EventId,
    pub owner: UserId,
    pub content: LocalizedContent,
    pub starts_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: update an event's content and/or schedule.
///
/// Ownership is checked by the caller before this reaches the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub content: LocalizedContent,
    pub starts_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: soft-delete an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    /// Validate and build a fresh, active event (`version == 1`).
    pub fn create(cmd: CreateEvent, default_locale: &Locale) -> DomainResult<Self> {
        cmd.content.validate(default_locale)?;

        Ok(Self {
            id: cmd.event_id,
            owner: cmd.owner,
            content: cmd.content,
            starts_at: cmd.starts_at,
            state: EventState::Active,
            created_at: cmd.occurred_at,
            modified_at: cmd.occurred_at,
            version: 1,
        })
    }

    pub fn id_typed(&self) -> EventId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn content(&self) -> &LocalizedContent {
        &self.content
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    pub fn state(&self) -> EventState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn is_active(&self) -> bool {
        self.state == EventState::Active
    }

    /// Registrations are only accepted while the event is active.
    pub fn ensure_accepts_registrations(&self) -> DomainResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::not_found())
        }
    }

    /// Merge locale entries and/or reschedule.
    pub fn update(&mut self, cmd: UpdateEvent) -> DomainResult<()> {
        if !self.is_active() {
            return Err(DomainError::not_found());
        }
        if cmd.content.is_empty() && cmd.starts_at.is_none() {
            return Err(DomainError::validation("update carries no changes"));
        }
        cmd.content.validate_entries()?;

        self.content.merge(cmd.content);
        if cmd.starts_at.is_some() {
            self.starts_at = cmd.starts_at;
        }
        self.touch(cmd.occurred_at);
        Ok(())
    }

    /// Mark the event deleted. Returns `false` if it already was.
    pub fn delete(&mut self, cmd: DeleteEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = EventState::Deleted;
        self.touch(cmd.occurred_at);
        true
    }

    /// Narrow the event to a single locale for presentation.
    ///
    /// Fails with an invariant violation if the event has no entry for the
    /// default locale, which `create` rules out.
    pub fn localize<R>(&self, resolver: &R, requested: Option<&Locale>, default: &Locale) -> DomainResult<EventView>
    where
        R: LocaleResolver + ?Sized,
    {
        let (locale, text) = resolver
            .resolve(&self.content, requested, default)
            .ok_or_else(|| {
                DomainError::invariant(format!("event {} has no '{default}' content", self.id))
            })?;

        Ok(EventView {
            id: self.id,
            owner: self.owner.clone(),
            locale: locale.clone(),
            title: text.title().to_string(),
            description: text.description().to_string(),
            starts_at: self.starts_at,
            state: self.state,
            created_at: self.created_at,
            modified_at: self.modified_at,
        })
    }

    // modified_at must strictly advance, even if the caller's clock did not.
    fn touch(&mut self, at: DateTime<Utc>) {
        self.modified_at = if at > self.modified_at {
            at
        } else {
            self.modified_at + Duration::microseconds(1)
        };
        self.version += 1;
    }
}

impl AggregateRoot for Event {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// An event narrowed to one locale, as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub id: EventId,
    pub owner: UserId,
    /// Locale the title/description were actually taken from.
    pub locale: Locale,
    pub title: String,
    pub description: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub state: EventState,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
