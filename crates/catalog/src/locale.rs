//! Locale tags and locale resolution.

use core::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use campus_core::{DomainError, DomainResult, ValueObject};

use crate::content::{LocalizedContent, LocalizedText};

/// Normalised locale tag (`en`, `en-us`, `ta-in`, `zh-hant-tw`).
///
/// Accepts `-` or `_` separators and any ASCII case; stored lowercase with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl ValueObject for Locale {}

impl Locale {
    pub fn parse(raw: impl AsRef<str>) -> DomainResult<Self> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(DomainError::validation("locale cannot be empty"));
        }

        let subtags: Vec<String> = raw
            .split(['-', '_'])
            .map(|s| s.to_ascii_lowercase())
            .collect();

        let primary = &subtags[0];
        if !(2..=8).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "invalid locale '{raw}': primary language subtag must be 2-8 letters"
            )));
        }

        for sub in &subtags[1..] {
            if !(1..=8).contains(&sub.len()) || !sub.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(DomainError::validation(format!(
                    "invalid locale '{raw}': bad subtag '{sub}'"
                )));
            }
        }

        Ok(Self(subtags.join("-")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`en-us` -> `en`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Language-only form of this tag, if it carries region/script subtags.
    pub fn parent(&self) -> Option<Locale> {
        if self.0.contains('-') {
            Some(Locale(self.language().to_string()))
        } else {
            None
        }
    }
}

/// English (`en`), the catalog's out-of-the-box default locale.
impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

/// Picks which localized entry of an event to show for a requested locale.
///
/// Implementations may consult translation resources; the catalog only needs
/// the chosen entry back.
pub trait LocaleResolver: Send + Sync {
    /// Returns the chosen locale and its text, or `None` when neither the
    /// requested locale nor `default` has an entry.
    fn resolve<'a>(
        &self,
        content: &'a LocalizedContent,
        requested: Option<&Locale>,
        default: &Locale,
    ) -> Option<(&'a Locale, &'a LocalizedText)>;
}

impl<R> LocaleResolver for Arc<R>
where
    R: LocaleResolver + ?Sized,
{
    fn resolve<'a>(
        &self,
        content: &'a LocalizedContent,
        requested: Option<&Locale>,
        default: &Locale,
    ) -> Option<(&'a Locale, &'a LocalizedText)> {
        (**self).resolve(content, requested, default)
    }
}

/// Exact tag, then primary language subtag, then the default locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackLocaleResolver;

impl LocaleResolver for FallbackLocaleResolver {
    fn resolve<'a>(
        &self,
        content: &'a LocalizedContent,
        requested: Option<&Locale>,
        default: &Locale,
    ) -> Option<(&'a Locale, &'a LocalizedText)> {
        if let Some(requested) = requested {
            if let Some(hit) = content.get_key_value(requested) {
                return Some(hit);
            }
            if let Some(parent) = requested.parent() {
                if let Some(hit) = content.get_key_value(&parent) {
                    return Some(hit);
                }
            }
        }
        content.get_key_value(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Locale {
        Locale::parse(s).unwrap()
    }

    fn content() -> LocalizedContent {
        LocalizedContent::new()
            .with(loc("en"), LocalizedText::new("Workshop", "Hands-on"))
            .with(loc("ta"), LocalizedText::new("பட்டறை", ""))
            .with(loc("fr-ca"), LocalizedText::new("Atelier", ""))
    }

    #[test]
    fn parse_normalises_case_and_separator() {
        assert_eq!(loc("en_US").as_str(), "en-us");
        assert_eq!(loc(" FR-ca ").as_str(), "fr-ca");
        assert_eq!(loc("en-us").language(), "en");
        assert_eq!(loc("en-us").parent(), Some(loc("en")));
        assert_eq!(loc("en").parent(), None);
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        for bad in ["", "e", "123", "en--us", "en-toolongsubtag", "en us"] {
            assert!(
                matches!(Locale::parse(bad), Err(DomainError::Validation(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn resolves_exact_match_first() {
        let c = content();
        let (l, t) = FallbackLocaleResolver.resolve(&c, Some(&loc("fr-ca")), &loc("en")).unwrap();
        assert_eq!(l, &loc("fr-ca"));
        assert_eq!(t.title(), "Atelier");
    }

    #[test]
    fn falls_back_to_language_then_default() {
        let c = content();
        let (l, _) = FallbackLocaleResolver.resolve(&c, Some(&loc("ta-in")), &loc("en")).unwrap();
        assert_eq!(l, &loc("ta"));

        let (l, t) = FallbackLocaleResolver.resolve(&c, Some(&loc("de")), &loc("en")).unwrap();
        assert_eq!(l, &loc("en"));
        assert_eq!(t.title(), "Workshop");
    }

    #[test]
    fn missing_request_uses_default() {
        let c = content();
        let (l, _) = FallbackLocaleResolver.resolve(&c, None, &loc("en")).unwrap();
        assert_eq!(l, &loc("en"));
    }

    #[test]
    fn no_default_entry_resolves_to_none() {
        let c = LocalizedContent::new().with(loc("ta"), LocalizedText::new("x", ""));
        assert!(FallbackLocaleResolver.resolve(&c, Some(&loc("de")), &loc("en")).is_none());
    }
}
