use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use netgn_session::{FlowOutcome, Notice};

use crate::context::SessionContext;

pub mod auth;
pub mod console;
pub mod system;

/// Router for every page that needs the request's session cookies.
pub fn router() -> Router {
    Router::new()
        .route("/", get(console::landing))
        .route("/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/sign-up", get(auth::sign_up_page).post(auth::sign_up))
        .route("/auth/google", get(auth::google_login))
        .route("/login-success", get(auth::login_success))
        .route("/logout", post(auth::logout))
        .route("/main", get(console::main))
        .route("/main/*rest", get(console::main_section))
}

/// Follow a flow's redirect, or re-render the current page with its notice.
///
/// A notice that travels with a redirect goes into the flash cookie.
fn respond(
    session: &SessionContext,
    outcome: FlowOutcome,
    stay: impl FnOnce(Option<&Notice>) -> Response,
) -> Response {
    match outcome.redirect.as_deref() {
        Some(to) => {
            if let Some(notice) = &outcome.notice {
                session.set_flash(notice);
            }
            Redirect::to(to).into_response()
        }
        None => stay(outcome.notice.as_ref()),
    }
}
