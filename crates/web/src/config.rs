//! Console configuration from environment variables.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8000/graphql";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a socket address, got {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend GraphQL endpoint.
    pub graphql_url: String,
    /// Backend base URL; the Google login redirect is built from it.
    pub api_base_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Emit `Secure` on the credential cookie.
    pub cookie_secure: bool,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let graphql_url = lookup("NETGN_GRAPHQL_URL").unwrap_or_else(|| {
            tracing::warn!("NETGN_GRAPHQL_URL not set; using {DEFAULT_GRAPHQL_URL}");
            DEFAULT_GRAPHQL_URL.to_string()
        });
        let graphql_url = http_url("NETGN_GRAPHQL_URL", graphql_url)?;

        let api_base_url = match lookup("NETGN_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(http_url("NETGN_API_URL", raw)?.trim_end_matches('/').to_string()),
            None => {
                tracing::warn!("NETGN_API_URL not set; Google login is unavailable");
                None
            }
        };

        let raw_addr = lookup("NETGN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: "NETGN_BIND_ADDR",
                value: raw_addr.clone(),
            })?;

        let cookie_secure = match lookup("NETGN_COOKIE_SECURE") {
            None => true,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                var: "NETGN_COOKIE_SECURE",
                value: raw.clone(),
            })?,
        };
        if !cookie_secure {
            tracing::warn!("credential cookie will be sent without the Secure attribute");
        }

        Ok(Self {
            graphql_url,
            api_base_url,
            bind_addr,
            cookie_secure,
        })
    }

    /// Where `/auth/google` sends the browser, if a backend is configured.
    pub fn google_login_url(&self) -> Option<String> {
        self.api_base_url
            .as_deref()
            .map(|base| format!("{base}/auth/google/login"))
    }
}

/// Absolute `http`/`https` URL with a host; returned trimmed, otherwise as given.
fn http_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    let usable = Url::parse(&value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    });
    if usable {
        Ok(value)
    } else {
        Err(ConfigError::InvalidUrl { var, value })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ConsoleConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(cfg.api_base_url, None);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert!(cfg.cookie_secure);
        assert_eq!(cfg.google_login_url(), None);
    }

    #[test]
    fn google_login_url_joins_base() {
        let cfg = load(&[("NETGN_API_URL", "https://api.netgn.test/")]).unwrap();
        assert_eq!(
            cfg.google_login_url().as_deref(),
            Some("https://api.netgn.test/auth/google/login")
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("NETGN_GRAPHQL_URL", "localhost:8000")]),
            Err(ConfigError::InvalidUrl { var: "NETGN_GRAPHQL_URL", .. })
        ));
        assert!(matches!(
            load(&[("NETGN_BIND_ADDR", "nowhere")]),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            load(&[("NETGN_COOKIE_SECURE", "maybe")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn urls_must_parse_with_a_host() {
        let bad_urls = [
            "http://",
            "https://exa mple.test",
            "ftp://files.test",
            "http//missing-colon",
            "javascript:alert(1)",
        ];
        for bad in bad_urls {
            assert!(
                matches!(
                    load(&[("NETGN_GRAPHQL_URL", bad)]),
                    Err(ConfigError::InvalidUrl { var: "NETGN_GRAPHQL_URL", .. })
                ),
                "{bad}"
            );
        }
        assert!(matches!(
            load(&[("NETGN_API_URL", "https://")]),
            Err(ConfigError::InvalidUrl { var: "NETGN_API_URL", .. })
        ));

        let cfg = load(&[("NETGN_GRAPHQL_URL", " http://10.0.0.5:8000/graphql ")]).unwrap();
        assert_eq!(cfg.graphql_url, "http://10.0.0.5:8000/graphql");
    }

    #[test]
    fn insecure_cookies_can_be_enabled_for_local_http() {
        let cfg = load(&[("NETGN_COOKIE_SECURE", "false")]).unwrap();
        assert!(!cfg.cookie_secure);
    }
}
