//! Catalog configuration.

use serde::{Deserialize, Serialize};

use campus_catalog::Locale;

pub const DEFAULT_LOCALE_VAR: &str = "CATALOG_DEFAULT_LOCALE";
pub const LIST_SCOPE_VAR: &str = "CATALOG_LIST_SCOPE";

/// Which events `list` shows to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListScope {
    /// Only active events the user owns.
    #[default]
    Owned,
    /// Every active event in the catalog.
    AllActive,
}

impl ListScope {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "owned" => Some(Self::Owned),
            "all" | "all_active" => Some(Self::AllActive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Locale every event must carry content for; also the fallback for reads.
    pub default_locale: Locale,
    pub list_scope: ListScope,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            list_scope: ListScope::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from process environment, falling back to defaults (with a warning)
    /// for unset or malformed values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEFAULT_LOCALE_VAR) {
            match Locale::parse(&raw) {
                Ok(locale) => config.default_locale = locale,
                Err(err) => tracing::warn!(
                    value = %raw,
                    error = %err,
                    "{DEFAULT_LOCALE_VAR} is invalid; using '{}'",
                    config.default_locale
                ),
            }
        }

        if let Some(raw) = lookup(LIST_SCOPE_VAR) {
            match ListScope::parse(&raw) {
                Some(scope) => config.list_scope = scope,
                None => tracing::warn!(
                    value = %raw,
                    "{LIST_SCOPE_VAR} must be 'owned' or 'all'; using {:?}",
                    config.list_scope
                ),
            }
        }

        config
    }
}
