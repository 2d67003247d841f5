use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::context::{RequestId, SessionContext};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Copy)]
pub struct SessionState {
    pub cookie_secure: bool,
}

/// Wrap the request in a span keyed by its request id and echo the id back.
pub async fn request_id_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(RequestId::parse)
        .unwrap_or_default();

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(id);

    let mut res = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!(status = res.status().as_u16(), "request completed"));

    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Attach a [`SessionContext`] and turn its cookie writes into `Set-Cookie`.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let raw = cookie_header(req.headers());
    let session = SessionContext::new(raw.as_deref(), state.cookie_secure);
    req.extensions_mut().insert(session.clone());

    let mut res = next.run(req).await;

    for cookie in session.take_set_cookies() {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "unencodable Set-Cookie dropped"),
        }
    }
    res
}

/// All inbound `Cookie` headers folded into one `name=value; ...` string.
pub fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_cookie_headers_are_folded() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("token=a.b.c"));

        assert_eq!(cookie_header(&headers).as_deref(), Some("theme=dark; token=a.b.c"));
        assert_eq!(cookie_header(&HeaderMap::new()), None);
    }
}
