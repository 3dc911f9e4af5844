//! Localized event content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use campus_core::{DomainError, DomainResult, ValueObject};

use crate::locale::Locale;

/// Title and description of an event in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    title: String,
    description: String,
}

impl ValueObject for LocalizedText {}

impl LocalizedText {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Locale -> text mapping carried by every event.
///
/// Ordered by locale tag so listings and serialized forms are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedContent(BTreeMap<Locale, LocalizedText>);

impl ValueObject for LocalizedContent {}

impl LocalizedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, locale: Locale, text: LocalizedText) -> Self {
        self.0.insert(locale, text);
        self
    }

    pub fn insert(&mut self, locale: Locale, text: LocalizedText) -> Option<LocalizedText> {
        self.0.insert(locale, text)
    }

    pub fn get(&self, locale: &Locale) -> Option<&LocalizedText> {
        self.0.get(locale)
    }

    pub fn get_key_value(&self, locale: &Locale) -> Option<(&Locale, &LocalizedText)> {
        self.0.get_key_value(locale)
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.0.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &LocalizedText)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` onto `self`: new locales are added, existing locales are
    /// replaced wholesale (no per-field merge within a locale).
    pub fn merge(&mut self, other: LocalizedContent) {
        self.0.extend(other.0);
    }

    /// Every supplied entry must carry a title.
    pub fn validate_entries(&self) -> DomainResult<()> {
        if let Some((locale, _)) = self.0.iter().find(|(_, text)| text.is_blank()) {
            return Err(DomainError::validation(format!(
                "title for locale '{locale}' cannot be empty"
            )));
        }
        Ok(())
    }

    /// Full validation for content that must stand on its own (create).
    pub fn validate(&self, default_locale: &Locale) -> DomainResult<()> {
        match self.0.get(default_locale) {
            None => {
                return Err(DomainError::validation(format!(
                    "content for default locale '{default_locale}' is required"
                )));
            }
            Some(text) if text.is_blank() => {
                return Err(DomainError::validation(format!(
                    "title for default locale '{default_locale}' cannot be empty"
                )));
            }
            Some(_) => {}
        }
        self.validate_entries()
    }
}

impl FromIterator<(Locale, LocalizedText)> for LocalizedContent {
    fn from_iter<T: IntoIterator<Item = (Locale, LocalizedText)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
