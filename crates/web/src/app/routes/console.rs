//! Protected console area, gated per render.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use netgn_session::{AUTHENTICATED_LANDING_ROUTE, GateOutcome, SessionGate};

use crate::app::ConsoleServices;
use crate::context::SessionContext;
use crate::middleware::cookie_header;
use crate::render;

/// `/` forwards to the console.
pub async fn landing() -> Response {
    Redirect::to(AUTHENTICATED_LANDING_ROUTE).into_response()
}

pub async fn main(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
) -> Response {
    gated(&services, &session, &headers, "").await
}

pub async fn main_section(
    Extension(services): Extension<Arc<ConsoleServices>>,
    Extension(session): Extension<SessionContext>,
    Path(rest): Path<String>,
    headers: HeaderMap,
) -> Response {
    gated(&services, &session, &headers, &rest).await
}

async fn gated(
    services: &ConsoleServices,
    session: &SessionContext,
    headers: &HeaderMap,
    section: &str,
) -> Response {
    let gate = SessionGate::new(services.connector.clone());

    match gate.check(cookie_header(headers).as_deref()).await {
        GateOutcome::Authorized(user) => {
            render::console_page(&user, section, session.take_flash().as_ref())
        }
        GateOutcome::OnboardingRequired => render::onboarding_page(),
        // The flash stays queued for the page the gate sends the browser to.
        GateOutcome::Redirect(signal) => Redirect::to(signal.location()).into_response(),
    }
}
