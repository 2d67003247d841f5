//! Console application wiring (Axum router + backend connector).
//!
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: form and query parameter shapes

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use netgn_client::GraphqlConnector;

use crate::config::ConsoleConfig;
use crate::context::SessionContext;
use crate::middleware;

pub mod dto;
pub mod routes;

/// Process-wide handles shared by every request.
pub struct ConsoleServices {
    pub connector: GraphqlConnector,
    pub google_login_url: Option<String>,
}

impl ConsoleServices {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            connector: GraphqlConnector::new(config.graphql_url.clone()),
            google_login_url: config.google_login_url(),
        }
    }

    /// Connector whose browser calls read and write this request's cookies.
    pub fn for_session(&self, session: &SessionContext) -> GraphqlConnector {
        self.connector.with_store(session.store().clone())
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: ConsoleConfig) -> Router {
    let services = Arc::new(ConsoleServices::new(&config));
    let session_state = middleware::SessionState {
        cookie_secure: config.cookie_secure,
    };

    let pages = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(pages)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_id_middleware)))
}
