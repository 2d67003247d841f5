//! `netgn-client`: GraphQL access to the console backend's auth operations.
//!
//! Callers pick an [`ExecutionContext`] up front; the client then decides per
//! call which `Authorization` header (if any) goes out. Responses are never
//! cached.

pub mod api;
pub mod context;
pub mod error;
pub mod graphql;
pub mod operations;

pub use api::{ApiConnector, AuthApi};
pub use context::{ExecutionContext, RequestContextBuilder};
pub use error::{ApiError, NavigationSignal, REDIRECT_MARKER};
pub use graphql::{GraphqlClient, GraphqlConnector};
pub use operations::{AccessToken, AuthResponse, GoogleAuthInput, LoginInput, LogoutResponse, SignupInput};
