use campus_catalog::Locale;
use campus_core::UserId;
use campus_infra::{CatalogError, CatalogResult};

/// Per-request context: who is acting, and in which locale they want content.
///
/// Built by the transport from an already-authenticated principal; this crate
/// never authenticates anyone itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    acting: UserId,
    locale: Option<Locale>,
}

impl RequestContext {
    pub fn new(acting: UserId, locale: Option<Locale>) -> Self {
        Self { acting, locale }
    }

    /// Build from a principal name and an optional `Accept-Language`-style value.
    ///
    /// A blank principal is rejected. An absent or unusable language value
    /// means "use the catalog default".
    pub fn from_request(principal: &str, accept_language: Option<&str>) -> CatalogResult<Self> {
        let acting = UserId::parse(principal).map_err(CatalogError::from)?;
        Ok(Self {
            acting,
            locale: accept_language.and_then(preferred_locale),
        })
    }

    pub fn acting(&self) -> &UserId {
        &self.acting
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }
}

/// First usable tag of an `Accept-Language` value (`"ta-IN,ta;q=0.9,en;q=0.8"`).
///
/// Entries are taken in listed order; quality weights are ignored and `*` is
/// skipped.
pub fn preferred_locale(header: &str) -> Option<Locale> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .find_map(|tag| Locale::parse(tag).ok())
}
