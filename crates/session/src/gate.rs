//! Authorization checkpoint for every protected area render.

use netgn_auth::{AuthenticatedUser, Credential, TOKEN_COOKIE, find_cookie};
use netgn_client::{ApiConnector, ApiError, AuthApi, ExecutionContext, NavigationSignal};

use crate::navigation::SIGN_IN_ROUTE;

/// Complete decision table of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the protected subtree for this user.
    Authorized(AuthenticatedUser),

    /// Signed in, but no agency yet: render onboarding instead.
    OnboardingRequired,

    /// Navigate away. Either the sign-in redirect for anonymous/failed
    /// sessions, or a navigation signal passed through untouched.
    Redirect(NavigationSignal),
}

/// Resolves the current user for a server render and decides access.
pub struct SessionGate<C> {
    connector: C,
}

impl<C: ApiConnector> SessionGate<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Gate a render given the inbound request's raw `Cookie` header.
    pub async fn check(&self, cookie_header: Option<&str>) -> GateOutcome {
        let token = cookie_header
            .and_then(|raw| find_cookie(raw, TOKEN_COOKIE))
            .and_then(Credential::parse);
        self.check_credential(token).await
    }

    pub async fn check_credential(&self, token: Option<Credential>) -> GateOutcome {
        let api = self.connector.connect(ExecutionContext::server(token));

        match api.current_user().await {
            Err(ApiError::Navigation(signal)) => GateOutcome::Redirect(signal),
            Err(err) => {
                tracing::error!(error = %err, "session check failed");
                deny()
            }
            Ok(None) => deny(),
            Ok(Some(user)) if user.name.is_empty() => {
                tracing::warn!(user_id = %user.id, "current user has no name");
                deny()
            }
            Ok(Some(user)) if user.agency.is_none() => {
                tracing::info!(user_id = %user.id, "user has no agency; onboarding");
                GateOutcome::OnboardingRequired
            }
            Ok(Some(user)) => GateOutcome::Authorized(user),
        }
    }
}

fn deny() -> GateOutcome {
    GateOutcome::Redirect(NavigationSignal::to(SIGN_IN_ROUTE))
}
