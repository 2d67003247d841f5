//! The auth RPC boundary as seen by session code.

use async_trait::async_trait;

use netgn_auth::AuthenticatedUser;

use crate::context::ExecutionContext;
use crate::error::ApiError;
use crate::operations::{AuthResponse, GoogleAuthInput, LoginInput, LogoutResponse, SignupInput};

/// Auth operations exposed by the backend.
///
/// Implementations attach credentials according to their
/// [`ExecutionContext`]; callers never pass tokens per call.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthApi {
    async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ApiError>;

    async fn signup(&self, input: &SignupInput) -> Result<AuthResponse, ApiError>;

    async fn google_auth(&self, input: &GoogleAuthInput) -> Result<AuthResponse, ApiError>;

    async fn refresh_token(&self) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<LogoutResponse, ApiError>;

    /// `Ok(None)` means anonymous: no error, just nobody signed in.
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, ApiError>;
}

/// Produces an [`AuthApi`] bound to one execution context.
pub trait ApiConnector {
    type Api: AuthApi;

    fn connect(&self, context: ExecutionContext) -> Self::Api;
}
