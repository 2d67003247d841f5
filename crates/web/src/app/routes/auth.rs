//! Sign-in, sign-up, OAuth landing and sign-out.
//!
//! These run the client-side flows on the server against the request's
//! cookies; credential writes leave as `Set-Cookie`.

use std::sync::Arc;

use axum::{
    Form,
    extract::{Extension, Query},
    response::{IntoResponse, Redirect, Response},
};

use netgn_auth::sign_in_error_message;
use netgn_session::{AUTHENTICATED_LANDING_ROUTE, Notice, OAuthCallbackCoordinator, SIGN_IN_ROUTE};

use super::respond;
use crate::app::ConsoleServices;
use crate::app::dto::{LoginSuccessQuery, SignInForm, SignInQuery, SignUpForm};
use crate::context::SessionContext;
use crate::render;

pub const API_URL_MISSING_MESSAGE: &str = "Base API URL not configured";

pub async fn sign_in_page(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<SignInQuery>,
) -> Response {
    let flash = session.take_flash();
    let notice = match query.error.as_deref() {
        Some(code) => Some(Notice::error(sign_in_error_message(code))),
        None => flash,
    };
    render::sign_in_page(notice.as_ref(), services.google_login_url.is_some())
}

pub async fn sign_in(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<SignInForm>,
) -> Response {
    let api = services.for_session(&session).browser();
    let outcome = netgn_session::sign_in(&api, session.store(), form.into()).await;

    let google = services.google_login_url.is_some();
    respond(&session, outcome, |notice| render::sign_in_page(notice, google))
}

pub async fn sign_up_page(Extension(session): Extension<SessionContext>) -> Response {
    render::sign_up_page(session.take_flash().as_ref())
}

pub async fn sign_up(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<SignUpForm>,
) -> Response {
    let api = services.for_session(&session).browser();
    let outcome = netgn_session::sign_up(&api, session.store(), form.into()).await;
    respond(&session, outcome, render::sign_up_page)
}

pub async fn google_login(Extension(services): Extension<Arc<ConsoleServices>>) -> Response {
    match &services.google_login_url {
        Some(url) => Redirect::to(url).into_response(),
        None => {
            tracing::error!("google login requested but NETGN_API_URL is not configured");
            render::sign_in_page(Some(&Notice::error(API_URL_MISSING_MESSAGE)), false)
        }
    }
}

/// OAuth landing: `/login-success?token=<one-time token>`.
pub async fn login_success(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<LoginSuccessQuery>,
) -> Response {
    let api = services.for_session(&session).browser();
    let coordinator = OAuthCallbackCoordinator::new(api, session.store().clone());

    match coordinator.complete(query.token.as_deref()).await {
        Some(outcome) => {
            let google = services.google_login_url.is_some();
            respond(&session, outcome, |notice| render::sign_in_page(notice, google))
        }
        // Fresh coordinator per request; it cannot already be claimed.
        None => Redirect::to(SIGN_IN_ROUTE).into_response(),
    }
}

pub async fn logout(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let api = services.for_session(&session).browser();
    let outcome = netgn_session::sign_out(&api, session.store()).await;
    respond(&session, outcome, |notice| {
        if let Some(notice) = notice {
            session.set_flash(notice);
        }
        Redirect::to(AUTHENTICATED_LANDING_ROUTE).into_response()
    })
}
