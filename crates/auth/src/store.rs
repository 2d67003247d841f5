//! Persistence of the session credential in the client's cookie slot.
//!
//! Every operation is total: "not logged in" is an ordinary state, so
//! absence and invalidity come back as `None`/`false`, never as errors.

use std::sync::Arc;

use crate::cookie::{CookieSlot, SameSite, SetCookie, find_cookie};
use crate::credential::is_valid;

/// Cookie holding the bearer credential.
pub const TOKEN_COOKIE: &str = "token";

/// Credential lifetime in the slot (7 days).
pub const TOKEN_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Sole writer of the persisted credential.
///
/// A store built with [`TokenStore::detached`] models an environment without
/// client storage (server rendering): reads return `None`, writes are refused.
#[derive(Clone)]
pub struct TokenStore {
    slot: Option<Arc<dyn CookieSlot>>,
    secure: bool,
}

impl TokenStore {
    /// Store backed by a browser-capable cookie slot.
    pub fn browser(slot: Arc<dyn CookieSlot>) -> Self {
        Self {
            slot: Some(slot),
            secure: true,
        }
    }

    /// Store with no reachable client storage.
    pub fn detached() -> Self {
        Self {
            slot: None,
            secure: true,
        }
    }

    /// Toggle the `Secure` attribute (plain-HTTP development only).
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Persist `token`. Returns `false` without writing if the token is
    /// malformed or there is no client storage.
    pub fn set(&self, token: &str) -> bool {
        if !is_valid(token) {
            tracing::debug!("refusing to store malformed credential");
            return false;
        }
        let Some(slot) = &self.slot else {
            return false;
        };

        let cookie = SetCookie::new(TOKEN_COOKIE, token)
            .path("/")
            .max_age(TOKEN_MAX_AGE_SECS)
            .same_site(SameSite::Strict)
            .secure(self.secure);

        if let Err(err) = slot.write(&cookie) {
            tracing::error!(error = %err, "error saving token");
            return false;
        }

        self.get().as_deref() == Some(token)
    }

    pub fn get(&self) -> Option<String> {
        let slot = self.slot.as_ref()?;
        match slot.read() {
            Ok(raw) => find_cookie(&raw, TOKEN_COOKIE).map(str::to_string),
            Err(err) => {
                tracing::error!(error = %err, "error getting token");
                None
            }
        }
    }

    pub fn remove(&self) {
        let Some(slot) = &self.slot else {
            return;
        };
        if let Err(err) = slot.write(&SetCookie::expired(TOKEN_COOKIE)) {
            tracing::error!(error = %err, "error removing token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        is_valid(self.get().as_deref().unwrap_or(""))
    }
}

impl core::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenStore")
            .field("browser", &self.slot.is_some())
            .field("secure", &self.secure)
            .finish()
    }
}
