//! Password sign-in and sign-up.

use netgn_auth::{TokenStore, is_valid};
use netgn_client::{AuthApi, AuthResponse, LoginInput, SignupInput};

use crate::navigation::{AUTHENTICATED_LANDING_ROUTE, FlowOutcome, HOME_ROUTE, Notice};

pub const SIGN_IN_SUCCESS_MESSAGE: &str = "Sign In Successful";
pub const SIGN_IN_FAILED_MESSAGE: &str = "Authentication failed";
pub const SIGN_UP_SUCCESS_MESSAGE: &str = "Sign Up successful";
pub const SIGN_UP_FAILED_MESSAGE: &str = "Sign up failed";
pub const TOKEN_NOT_SAVED_MESSAGE: &str = "Failed to save authentication token";

/// Email/password login. On success the credential is stored and the user
/// is sent home; on failure they stay on the form with a message.
pub async fn sign_in<A: AuthApi>(api: &A, store: &TokenStore, input: LoginInput) -> FlowOutcome {
    let email = input.email.clone();
    let result = api.login(&input).await;

    match result {
        Ok(resp) => complete(
            resp,
            store,
            HOME_ROUTE,
            SIGN_IN_SUCCESS_MESSAGE,
            SIGN_IN_FAILED_MESSAGE,
        ),
        Err(err) => {
            tracing::error!(%email, error = %err, "sign-in request failed");
            FlowOutcome::stay(Some(Notice::error(
                err.user_message().unwrap_or_else(|| SIGN_IN_FAILED_MESSAGE.to_string()),
            )))
        }
    }
}

/// Account registration; a successful sign-up is also a sign-in.
pub async fn sign_up<A: AuthApi>(api: &A, store: &TokenStore, input: SignupInput) -> FlowOutcome {
    match api.signup(&input).await {
        Ok(resp) => complete(
            resp,
            store,
            AUTHENTICATED_LANDING_ROUTE,
            SIGN_UP_SUCCESS_MESSAGE,
            SIGN_UP_FAILED_MESSAGE,
        ),
        Err(err) => {
            tracing::error!(email = %input.email, error = %err, "sign-up request failed");
            FlowOutcome::stay(Some(Notice::error(
                err.user_message().unwrap_or_else(|| SIGN_UP_FAILED_MESSAGE.to_string()),
            )))
        }
    }
}

fn complete(
    resp: AuthResponse,
    store: &TokenStore,
    landing: &str,
    success_message: &str,
    failure_message: &str,
) -> FlowOutcome {
    let Some(token) = resp.issued_token() else {
        let message = resp.message().unwrap_or(failure_message);
        return FlowOutcome::stay(Some(Notice::error(message)));
    };

    if is_valid(token) && store.set(token) {
        FlowOutcome::redirect(landing, Some(Notice::success(success_message)))
    } else {
        tracing::error!("issued credential could not be stored");
        FlowOutcome::stay(Some(Notice::error(TOKEN_NOT_SAVED_MESSAGE)))
    }
}
