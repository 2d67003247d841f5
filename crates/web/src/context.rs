use std::sync::Arc;

use netgn_auth::{CookieSlot, ResponseCookies, SameSite, SetCookie, TokenStore, find_cookie};
use netgn_session::{Notice, NoticeLevel};
use uuid::Uuid;

/// One-shot cookie carrying a notice across a redirect.
pub const FLASH_COOKIE: &str = "flash";
pub const FLASH_MAX_AGE_SECS: i64 = 60;

/// Correlation id for one inbound request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Accept a caller-supplied id if it is a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-side storage as seen by this request.
///
/// The token store reads the inbound cookies; its writes are replayed on the
/// response as `Set-Cookie` headers.
#[derive(Clone)]
pub struct SessionContext {
    cookies: Arc<ResponseCookies>,
    store: TokenStore,
    cookie_secure: bool,
}

impl SessionContext {
    pub fn new(cookie_header: Option<&str>, cookie_secure: bool) -> Self {
        let cookies = Arc::new(ResponseCookies::from_request_header(cookie_header));
        let store = TokenStore::browser(cookies.clone()).with_secure(cookie_secure);
        Self {
            cookies,
            store,
            cookie_secure,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Queue `notice` for the next page this browser renders.
    pub fn set_flash(&self, notice: &Notice) {
        let cookie = SetCookie::new(FLASH_COOKIE, encode_flash(notice))
            .path("/")
            .max_age(FLASH_MAX_AGE_SECS)
            .same_site(SameSite::Strict)
            .secure(self.cookie_secure);
        if let Err(e) = self.cookies.write(&cookie) {
            tracing::error!(error = %e, "flash notice dropped");
        }
    }

    /// The pending notice, if any; reading it clears the cookie.
    pub fn take_flash(&self) -> Option<Notice> {
        let raw = self.cookies.read().ok()?;
        let value = find_cookie(&raw, FLASH_COOKIE)?.to_string();
        if let Err(e) = self.cookies.write(&SetCookie::expired(FLASH_COOKIE)) {
            tracing::error!(error = %e, "flash cookie not cleared");
        }
        decode_flash(&value)
    }

    pub fn take_set_cookies(&self) -> Vec<String> {
        self.cookies.take_set_cookies()
    }
}

fn encode_flash(notice: &Notice) -> String {
    format!("{}:{}", notice.level.as_str(), urlencoding::encode(&notice.message))
}

fn decode_flash(raw: &str) -> Option<Notice> {
    let (level, message) = raw.split_once(':')?;
    let level = NoticeLevel::parse(level)?;
    let message = urlencoding::decode(message).ok()?;
    let message = message.trim();
    (!message.is_empty()).then(|| Notice {
        level,
        message: message.to_string(),
    })
}
