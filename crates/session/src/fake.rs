//! Scripted `AuthApi` for flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use netgn_auth::{AgencyRef, AuthenticatedUser, Role};
use netgn_client::{
    AccessToken, ApiConnector, ApiError, AuthApi, AuthResponse, ExecutionContext, GoogleAuthInput,
    LoginInput, LogoutResponse, SignupInput,
};

#[derive(Clone)]
pub struct FakeApi {
    auth_reply: Result<AuthResponse, ApiError>,
    logout_reply: Result<LogoutResponse, ApiError>,
    user_reply: Result<Option<AuthenticatedUser>, ApiError>,
    calls: Arc<AtomicUsize>,
    contexts: Arc<Mutex<Vec<ExecutionContext>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            auth_reply: Ok(AuthResponse {
                success: false,
                message: None,
                token: None,
            }),
            logout_reply: Ok(LogoutResponse {
                success: true,
                message: None,
            }),
            user_reply: Ok(None),
            calls: Arc::new(AtomicUsize::new(0)),
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeApi {
    /// Auth mutations succeed and issue `token`.
    pub fn issuing(token: &str) -> Self {
        Self {
            auth_reply: Ok(AuthResponse {
                success: true,
                message: None,
                token: Some(AccessToken {
                    access_token: token.to_string(),
                }),
            }),
            ..Self::default()
        }
    }

    /// Auth mutations report `success: false`.
    pub fn rejecting(message: Option<&str>) -> Self {
        Self {
            auth_reply: Ok(AuthResponse {
                success: false,
                message: message.map(str::to_string),
                token: None,
            }),
            ..Self::default()
        }
    }

    /// Every call fails with `err`.
    pub fn failing(err: ApiError) -> Self {
        Self {
            auth_reply: Err(err.clone()),
            logout_reply: Err(err.clone()),
            user_reply: Err(err),
            ..Self::default()
        }
    }

    pub fn with_user(user: Option<AuthenticatedUser>) -> Self {
        Self {
            user_reply: Ok(user),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contexts(&self) -> Vec<ExecutionContext> {
        self.contexts.lock().unwrap().clone()
    }

    async fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Let a concurrently polled caller observe the in-flight call.
        tokio::task::yield_now().await;
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, _input: &LoginInput) -> Result<AuthResponse, ApiError> {
        self.hit().await;
        self.auth_reply.clone()
    }

    async fn signup(&self, _input: &SignupInput) -> Result<AuthResponse, ApiError> {
        self.hit().await;
        self.auth_reply.clone()
    }

    async fn google_auth(&self, _input: &GoogleAuthInput) -> Result<AuthResponse, ApiError> {
        self.hit().await;
        self.auth_reply.clone()
    }

    async fn refresh_token(&self) -> Result<AuthResponse, ApiError> {
        self.hit().await;
        self.auth_reply.clone()
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        self.hit().await;
        self.logout_reply.clone()
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, ApiError> {
        self.hit().await;
        self.user_reply.clone()
    }
}

impl ApiConnector for FakeApi {
    type Api = FakeApi;

    fn connect(&self, context: ExecutionContext) -> FakeApi {
        self.contexts.lock().unwrap().push(context);
        self.clone()
    }
}

pub fn user(name: &str, agency: Option<&str>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: "u1".to_string(),
        name: name.to_string(),
        email: "ann@example.com".to_string(),
        agency: agency.map(|a| AgencyRef {
            id: "ag1".to_string(),
            name: a.to_string(),
        }),
        roles: vec![Role::new("admin")],
    }
}
