use netgn_auth::TokenStore;
use netgn_client::AuthApi;

/// Ask the backend for a fresh credential and store it.
///
/// Invoked on demand only; nothing schedules it. Returns whether a new
/// credential is now in the store.
pub async fn refresh_session<A: AuthApi>(api: &A, store: &TokenStore) -> bool {
    match api.refresh_token().await {
        Ok(resp) => match resp.issued_token() {
            Some(token) => store.set(token),
            None => {
                tracing::warn!(message = ?resp.message(), "token refresh rejected");
                false
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "token refresh failed");
            false
        }
    }
}
