//! Client-accessible cookie storage.
//!
//! [`CookieSlot`] is the narrow view the session layer has of the browser's
//! cookie jar: read the `name=value; ...` list, apply one `Set-Cookie`
//! assignment. Implementations:
//! - [`MemoryCookieJar`]: in-process jar honoring expiry (tests, native tools)
//! - [`ResponseCookies`]: request-scoped jar for the server shell; writes are
//!   replayed to the browser as `Set-Cookie` headers
//! - `DocumentCookie` (wasm32 only): `document.cookie`

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("cookie storage unavailable: {0}")]
    Unavailable(String),

    #[error("cookie storage lock poisoned")]
    Poisoned,
}

/// Raw cookie storage as seen from client code.
pub trait CookieSlot: Send + Sync {
    /// Current `name=value; name2=value2` list (expired entries excluded).
    fn read(&self) -> Result<String, CookieError>;

    /// Apply a single cookie assignment (insert, overwrite or expire).
    fn write(&self, cookie: &SetCookie) -> Result<(), CookieError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// One cookie assignment, rendered in `Set-Cookie` syntax by `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub max_age: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
    pub same_site: Option<SameSite>,
    pub secure: bool,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            max_age: None,
            expires: None,
            same_site: None,
            secure: false,
        }
    }

    /// Assignment that clears `name` by expiring it in the past.
    pub fn expired(name: impl Into<String>) -> Self {
        Self::new(name, "")
            .path("/")
            .expires(DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1))
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn expires(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Absolute expiry relative to `now`. `Max-Age` wins over `Expires`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.max_age {
            Some(secs) => Some(now + Duration::seconds(secs)),
            None => self.expires,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at(now).is_some_and(|at| at <= now)
    }
}

impl core::fmt::Display for SetCookie {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(secs) = self.max_age {
            write!(f, "; Max-Age={secs}")?;
        }
        if let Some(at) = self.expires {
            write!(f, "; Expires={}", at.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={}", same_site.as_str())?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        Ok(())
    }
}

/// First non-empty value keyed `name` in a `Cookie`-style list.
pub fn find_cookie<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory cookie jar with expiry.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    entries: Mutex<Vec<StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar from an inbound `Cookie` header (session cookies, no expiry).
    pub fn from_header(raw: &str) -> Self {
        let entries = raw
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| StoredCookie {
                name: name.to_string(),
                value: value.to_string(),
                expires_at: None,
            })
            .collect();

        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl CookieSlot for MemoryCookieJar {
    fn read(&self) -> Result<String, CookieError> {
        let mut entries = self.entries.lock().map_err(|_| CookieError::Poisoned)?;
        let now = Utc::now();

        entries.retain(|c| c.expires_at.is_none_or(|at| at > now));

        Ok(entries
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write(&self, cookie: &SetCookie) -> Result<(), CookieError> {
        let mut entries = self.entries.lock().map_err(|_| CookieError::Poisoned)?;
        let now = Utc::now();

        entries.retain(|c| c.name != cookie.name);
        if !cookie.is_expired_at(now) {
            entries.push(StoredCookie {
                name: cookie.name.clone(),
                value: cookie.value.clone(),
                expires_at: cookie.expires_at(now),
            });
        }
        Ok(())
    }
}

/// Request-scoped cookie view for server-hosted client flows.
///
/// Reads see the inbound `Cookie` header plus any writes made during the
/// request; every write is also queued so the shell can emit it as a
/// `Set-Cookie` response header.
#[derive(Debug, Default)]
pub struct ResponseCookies {
    jar: MemoryCookieJar,
    pending: Mutex<Vec<SetCookie>>,
}

impl ResponseCookies {
    pub fn from_request_header(raw: Option<&str>) -> Self {
        Self {
            jar: raw.map(MemoryCookieJar::from_header).unwrap_or_default(),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Drain queued writes as `Set-Cookie` header values, oldest first.
    pub fn take_set_cookies(&self) -> Vec<String> {
        match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).map(|c| c.to_string()).collect(),
            Err(_) => {
                tracing::error!("response cookie queue poisoned; dropping Set-Cookie headers");
                Vec::new()
            }
        }
    }
}

impl CookieSlot for ResponseCookies {
    fn read(&self) -> Result<String, CookieError> {
        self.jar.read()
    }

    fn write(&self, cookie: &SetCookie) -> Result<(), CookieError> {
        self.jar.write(cookie)?;
        self.pending
            .lock()
            .map_err(|_| CookieError::Poisoned)?
            .push(cookie.clone());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use document::DocumentCookie;

#[cfg(target_arch = "wasm32")]
mod document {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    use super::{CookieError, CookieSlot, SetCookie};

    /// `document.cookie` of the current browsing context.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct DocumentCookie;

    impl DocumentCookie {
        fn document() -> Result<HtmlDocument, CookieError> {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
                .ok_or_else(|| CookieError::Unavailable("no HTML document".to_string()))
        }
    }

    impl CookieSlot for DocumentCookie {
        fn read(&self) -> Result<String, CookieError> {
            Self::document()?
                .cookie()
                .map_err(|e| CookieError::Unavailable(format!("{e:?}")))
        }

        fn write(&self, cookie: &SetCookie) -> Result<(), CookieError> {
            Self::document()?
                .set_cookie(&cookie.to_string())
                .map_err(|e| CookieError::Unavailable(format!("{e:?}")))
        }
    }
}
