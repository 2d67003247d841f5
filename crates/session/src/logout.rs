use netgn_auth::TokenStore;
use netgn_client::AuthApi;

use crate::navigation::{FlowOutcome, SIGN_IN_ROUTE};

/// End the session on the backend, then drop the local credential.
///
/// If the backend call fails the local session is left as it was and the
/// user stays where they are.
pub async fn sign_out<A: AuthApi>(api: &A, store: &TokenStore) -> FlowOutcome {
    match api.logout().await {
        Ok(resp) => {
            if !resp.success {
                tracing::warn!(message = ?resp.message, "backend reported unsuccessful logout");
            }
            store.remove();
            FlowOutcome::redirect(SIGN_IN_ROUTE, None)
        }
        Err(err) => {
            tracing::error!(error = %err, "logout failed");
            FlowOutcome::stay(None)
        }
    }
}
