//! OAuth landing: exchange the one-time token for a session credential.
//!
//! The landing page's effect can fire more than once for the same mount
//! (double invocation, remount). The coordinator owns a single-assignment
//! state cell so the exchange-and-redirect runs at most once; a failed
//! attempt is final and the user starts a new login.

use std::sync::atomic::{AtomicU8, Ordering};

use netgn_auth::TokenStore;
use netgn_client::{AuthApi, GoogleAuthInput};

use crate::navigation::{AUTHENTICATED_LANDING_ROUTE, FlowOutcome, Notice, SIGN_IN_ROUTE};

pub const CALLBACK_SUCCESS_MESSAGE: &str = "Successfully logged in";
pub const MISSING_TOKEN_MESSAGE: &str = "No authentication token received";
pub const CALLBACK_FAILED_MESSAGE: &str = "Failed to complete authentication";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackState {
    Idle = 0,
    Processing = 1,
    Done = 2,
}

impl CallbackState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => CallbackState::Idle,
            1 => CallbackState::Processing,
            _ => CallbackState::Done,
        }
    }
}

/// One coordinator per page load (or per request, server-hosted).
pub struct OAuthCallbackCoordinator<A> {
    api: A,
    store: TokenStore,
    state: AtomicU8,
}

impl<A: AuthApi> OAuthCallbackCoordinator<A> {
    pub fn new(api: A, store: TokenStore) -> Self {
        Self {
            api,
            store,
            state: AtomicU8::new(CallbackState::Idle as u8),
        }
    }

    pub fn state(&self) -> CallbackState {
        CallbackState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Run the exchange for the landing URL's `token` parameter.
    ///
    /// Returns `None` when an earlier invocation already claimed this page
    /// load; the caller must then do nothing.
    pub async fn complete(&self, one_time_token: Option<&str>) -> Option<FlowOutcome> {
        if self
            .state
            .compare_exchange(
                CallbackState::Idle as u8,
                CallbackState::Processing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            tracing::debug!("oauth callback already claimed for this page load");
            return None;
        }

        let outcome = self.exchange(one_time_token).await;
        self.state.store(CallbackState::Done as u8, Ordering::Release);
        Some(outcome)
    }

    async fn exchange(&self, one_time_token: Option<&str>) -> FlowOutcome {
        let Some(token) = one_time_token.filter(|t| !t.is_empty()) else {
            tracing::warn!("oauth landing reached without a token");
            return failure(MISSING_TOKEN_MESSAGE);
        };

        let input = GoogleAuthInput {
            token: token.to_string(),
        };

        match self.api.google_auth(&input).await {
            Ok(resp) => match resp.issued_token() {
                Some(access) if self.store.set(access) => {
                    tracing::info!("oauth login completed");
                    FlowOutcome::redirect(
                        AUTHENTICATED_LANDING_ROUTE,
                        Some(Notice::success(CALLBACK_SUCCESS_MESSAGE)),
                    )
                }
                Some(_) => {
                    tracing::warn!("issued credential rejected by token store");
                    failure(CALLBACK_FAILED_MESSAGE)
                }
                None => {
                    tracing::warn!(message = ?resp.message(), "google auth exchange rejected");
                    failure(CALLBACK_FAILED_MESSAGE)
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "google login error");
                failure(err.user_message().unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()))
            }
        }
    }
}

fn failure(message: impl Into<String>) -> FlowOutcome {
    FlowOutcome::redirect(SIGN_IN_ROUTE, Some(Notice::error(message)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use netgn_auth::{CookieSlot, MemoryCookieJar};
    use netgn_client::ApiError;

    use super::*;
    use crate::fake::FakeApi;

    fn browser() -> (TokenStore, Arc<MemoryCookieJar>) {
        let jar = Arc::new(MemoryCookieJar::new());
        (TokenStore::browser(jar.clone()), jar)
    }

    #[tokio::test]
    async fn successful_exchange_stores_credential_and_lands() {
        let (store, _) = browser();
        let api = FakeApi::issuing("a.b.c");
        let coordinator = OAuthCallbackCoordinator::new(api.clone(), store.clone());

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();

        assert_eq!(outcome.redirect.as_deref(), Some(AUTHENTICATED_LANDING_ROUTE));
        assert_eq!(outcome.notice, Some(Notice::success(CALLBACK_SUCCESS_MESSAGE)));
        assert_eq!(store.get().as_deref(), Some("a.b.c"));
        assert_eq!(coordinator.state(), CallbackState::Done);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn rejected_exchange_writes_nothing() {
        let (store, jar) = browser();
        let coordinator = OAuthCallbackCoordinator::new(FakeApi::rejecting(None), store.clone());

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();

        assert_eq!(outcome.redirect.as_deref(), Some(SIGN_IN_ROUTE));
        let notice = outcome.notice.unwrap();
        assert!(notice.is_error());
        assert!(!notice.message.is_empty());
        assert_eq!(jar.read().unwrap(), "");
    }

    #[tokio::test]
    async fn missing_token_skips_exchange() {
        let (store, _) = browser();
        let api = FakeApi::issuing("a.b.c");
        let coordinator = OAuthCallbackCoordinator::new(api.clone(), store);

        let outcome = coordinator.complete(None).await.unwrap();

        assert_eq!(outcome.redirect.as_deref(), Some(SIGN_IN_ROUTE));
        assert_eq!(outcome.notice, Some(Notice::error(MISSING_TOKEN_MESSAGE)));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn empty_token_counts_as_missing() {
        let (store, _) = browser();
        let api = FakeApi::issuing("a.b.c");
        let coordinator = OAuthCallbackCoordinator::new(api.clone(), store);

        coordinator.complete(Some("")).await.unwrap();
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn double_invocation_exchanges_once() {
        let (store, _) = browser();
        let api = FakeApi::issuing("a.b.c");
        let coordinator = OAuthCallbackCoordinator::new(api.clone(), store);

        let (first, second) = tokio::join!(
            coordinator.complete(Some("one-time")),
            coordinator.complete(Some("one-time")),
        );

        assert_eq!(api.calls(), 1);
        assert!(first.is_some() ^ second.is_some());
    }

    #[tokio::test]
    async fn done_is_terminal() {
        let (store, _) = browser();
        let api = FakeApi::rejecting(Some("bad token"));
        let coordinator = OAuthCallbackCoordinator::new(api.clone(), store);

        assert!(coordinator.complete(Some("one-time")).await.is_some());
        assert!(coordinator.complete(Some("one-time")).await.is_none());
        assert_eq!(api.calls(), 1);
        assert_eq!(coordinator.state(), CallbackState::Done);
    }

    #[tokio::test]
    async fn malformed_issued_token_is_a_failure() {
        let (store, jar) = browser();
        let coordinator = OAuthCallbackCoordinator::new(FakeApi::issuing("opaque"), store);

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();

        assert_eq!(outcome.redirect.as_deref(), Some(SIGN_IN_ROUTE));
        assert_eq!(outcome.notice, Some(Notice::error(CALLBACK_FAILED_MESSAGE)));
        assert_eq!(jar.read().unwrap(), "");
    }

    #[tokio::test]
    async fn backend_error_surfaces_its_message() {
        let (store, _) = browser();
        let api = FakeApi::failing(ApiError::GraphQl("Token expired".into()));
        let coordinator = OAuthCallbackCoordinator::new(api, store);

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();
        assert_eq!(outcome.notice, Some(Notice::error("Token expired")));
    }

    #[tokio::test]
    async fn blank_error_falls_back_to_generic_message() {
        let (store, _) = browser();
        let api = FakeApi::failing(ApiError::GraphQl(String::new()));
        let coordinator = OAuthCallbackCoordinator::new(api, store);

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();
        assert_eq!(outcome.notice, Some(Notice::error(LOGIN_FAILED_MESSAGE)));
    }

    #[tokio::test]
    async fn network_error_detail_stays_out_of_the_notice() {
        let (store, _) = browser();
        let api = FakeApi::failing(ApiError::Network(
            "error sending request for url (http://127.0.0.1:9/internal-graphql)".into(),
        ));
        let coordinator = OAuthCallbackCoordinator::new(api, store);

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();
        assert_eq!(outcome.redirect.as_deref(), Some(SIGN_IN_ROUTE));
        assert_eq!(outcome.notice, Some(Notice::error(LOGIN_FAILED_MESSAGE)));
    }

    #[tokio::test]
    async fn gateway_error_body_stays_out_of_the_notice() {
        let (store, _) = browser();
        let api = FakeApi::failing(ApiError::Status(502, "<html>Bad Gateway</html>".into()));
        let coordinator = OAuthCallbackCoordinator::new(api, store);

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();
        assert_eq!(outcome.notice, Some(Notice::error(LOGIN_FAILED_MESSAGE)));
    }

    #[tokio::test]
    async fn detached_store_cannot_complete_login() {
        let coordinator = OAuthCallbackCoordinator::new(FakeApi::issuing("a.b.c"), TokenStore::detached());

        let outcome = coordinator.complete(Some("one-time")).await.unwrap();
        assert_eq!(outcome.redirect.as_deref(), Some(SIGN_IN_ROUTE));
    }
}
