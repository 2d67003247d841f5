//! Per-call authorization header selection.

use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, HeaderMap, HeaderValue};

use netgn_auth::{Credential, TokenStore};

/// Where the calling code is executing.
///
/// Passed explicitly; nothing in this crate sniffs for a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side render. Client storage is unreachable, so the token (if
    /// any) must be handed over from the inbound request.
    ServerRender { token: Option<Credential> },

    /// Code running against the user's own cookie slot.
    Browser,
}

impl ExecutionContext {
    pub fn server(token: Option<Credential>) -> Self {
        Self::ServerRender { token }
    }

    pub fn browser() -> Self {
        Self::Browser
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::ServerRender { .. })
    }
}

/// Builds outbound request headers for an [`ExecutionContext`].
#[derive(Debug, Clone)]
pub struct RequestContextBuilder {
    store: TokenStore,
}

impl RequestContextBuilder {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// `Authorization` value for this call, if one applies.
    ///
    /// Server renders never consult the token store, even when one is
    /// configured; browser calls never use a server-supplied token.
    pub fn authorization(&self, context: &ExecutionContext) -> Option<String> {
        match context {
            ExecutionContext::ServerRender { token: Some(token) } => Some(token.bearer()),
            ExecutionContext::ServerRender { token: None } => None,
            ExecutionContext::Browser => self.store.get().map(|token| format!("Bearer {token}")),
        }
    }

    /// Full header set: authorization (if any) plus a forced re-fetch.
    pub fn headers(&self, context: &ExecutionContext) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        if let Some(auth) = self.authorization(context) {
            match HeaderValue::from_str(&auth) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("stored token is not a valid header value; sending anonymous request");
                }
            }
        }

        headers
    }
}
