//! `reqwest`-backed GraphQL transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use netgn_auth::{AuthenticatedUser, Credential, TokenStore};

use crate::api::{ApiConnector, AuthApi};
use crate::context::{ExecutionContext, RequestContextBuilder};
use crate::error::{ApiError, NavigationSignal, REDIRECT_MARKER};
use crate::operations::{
    self, AuthResponse, CurrentUserData, GoogleAuthData, GoogleAuthInput, LoginData, LoginInput,
    LogoutData, LogoutResponse, Operation, RefreshTokenData, SignupData, SignupInput,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Option<serde_json::Value>,
}

impl GraphQlError {
    fn navigation(&self) -> Option<NavigationSignal> {
        let ext = self.extensions.as_ref()?;
        if ext.get("code")?.as_str()? != REDIRECT_MARKER {
            return None;
        }
        let location = ext.get("location")?.as_str()?;
        Some(NavigationSignal::to(location))
    }
}

impl<T> GraphQlResponse<T> {
    /// Resolve the envelope into the field `pick` selects.
    ///
    /// Partial data is accepted (errors are logged). A redirect marker in
    /// `errors` always wins and surfaces as [`ApiError::Navigation`].
    fn extract<R>(self, operation: &'static str, pick: impl FnOnce(T) -> Option<R>) -> Result<R, ApiError> {
        if let Some(signal) = self.errors.iter().find_map(GraphQlError::navigation) {
            return Err(ApiError::Navigation(signal));
        }

        let messages = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        match self.data.and_then(pick) {
            Some(value) => {
                if !self.errors.is_empty() {
                    tracing::warn!(operation, errors = %messages, "graphql returned partial data");
                }
                Ok(value)
            }
            None if !self.errors.is_empty() => Err(ApiError::GraphQl(messages)),
            None => Err(ApiError::MissingData(operation)),
        }
    }
}

/// GraphQL client bound to one [`ExecutionContext`].
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    context: ExecutionContext,
    request_context: RequestContextBuilder,
}

impl GraphqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        context: ExecutionContext,
        request_context: RequestContextBuilder,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            context,
            request_context,
        }
    }

    /// Client for a server render, carrying the inbound request's token.
    pub fn for_server(endpoint: impl Into<String>, token: Option<Credential>) -> Self {
        Self::new(
            endpoint,
            ExecutionContext::server(token),
            RequestContextBuilder::new(TokenStore::detached()),
        )
    }

    /// Client that reads its token from `store` on every call.
    pub fn for_browser(endpoint: impl Into<String>, store: TokenStore) -> Self {
        Self::new(endpoint, ExecutionContext::browser(), RequestContextBuilder::new(store))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>, ApiError> {
        let body = GraphQlRequest {
            query: operation.document,
            operation_name: operation.name,
            variables,
        };

        tracing::debug!(
            operation = operation.name,
            server_render = self.context.is_server(),
            "graphql request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .headers(self.request_context.headers(&self.context))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), resp.text().await.unwrap_or_default()));
        }

        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthApi for GraphqlClient {
    async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ApiError> {
        self.execute::<LoginData>(&operations::LOGIN, json!({ "input": input }))
            .await?
            .extract("login", |d| d.login)
    }

    async fn signup(&self, input: &SignupInput) -> Result<AuthResponse, ApiError> {
        self.execute::<SignupData>(&operations::SIGNUP, json!({ "input": input }))
            .await?
            .extract("signup", |d| d.signup)
    }

    async fn google_auth(&self, input: &GoogleAuthInput) -> Result<AuthResponse, ApiError> {
        self.execute::<GoogleAuthData>(&operations::GOOGLE_AUTH, json!({ "input": input }))
            .await?
            .extract("googleAuth", |d| d.google_auth)
    }

    async fn refresh_token(&self) -> Result<AuthResponse, ApiError> {
        self.execute::<RefreshTokenData>(&operations::REFRESH_TOKEN, json!({}))
            .await?
            .extract("refreshToken", |d| d.refresh_token)
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        self.execute::<LogoutData>(&operations::LOGOUT, json!({}))
            .await?
            .extract("logout", |d| d.logout)
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, ApiError> {
        self.execute::<CurrentUserData>(&operations::CURRENT_USER, json!({}))
            .await?
            .extract("currentUser", |d| Some(d.current_user))
    }
}

/// Shared HTTP client plus endpoint; hands out context-bound clients.
#[derive(Debug, Clone)]
pub struct GraphqlConnector {
    http: reqwest::Client,
    endpoint: String,
    store: TokenStore,
}

impl GraphqlConnector {
    /// Connector with no client storage (server renders only).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            store: TokenStore::detached(),
        }
    }

    /// Same endpoint and HTTP pool, browser calls reading `store`.
    pub fn with_store(&self, store: TokenStore) -> Self {
        Self {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            store,
        }
    }

    pub fn browser(&self) -> GraphqlClient {
        self.connect(ExecutionContext::browser())
    }
}

impl ApiConnector for GraphqlConnector {
    type Api = GraphqlClient;

    fn connect(&self, context: ExecutionContext) -> GraphqlClient {
        GraphqlClient {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            context,
            request_context: RequestContextBuilder::new(self.store.clone()),
        }
    }
}
