use thiserror::Error;

/// `extensions.code` value marking a GraphQL error as a navigation request
/// from the hosting pipeline rather than an application failure.
pub const REDIRECT_MARKER: &str = "NETGN_REDIRECT";

/// A "redirect now" decision travelling through the API boundary.
///
/// Not an error: whoever receives one must hand it on unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSignal {
    location: String,
}

impl NavigationSignal {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl core::fmt::Display for NavigationSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({0}): {1}")]
    Status(u16, String),

    /// Error messages reported by the GraphQL layer, joined with `; `.
    #[error("{0}")]
    GraphQl(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("no data returned for {0}")]
    MissingData(&'static str),

    #[error("{0}")]
    Navigation(NavigationSignal),
}

impl ApiError {
    /// Message suitable for a toast.
    ///
    /// Only GraphQL errors qualify: the backend writes those for users.
    /// Transport, status and decode failures carry URLs and raw bodies and
    /// stay in the logs.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ApiError::GraphQl(msg) if !msg.trim().is_empty() => Some(msg.clone()),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationSignal> {
        match self {
            ApiError::Navigation(signal) => Some(signal),
            _ => None,
        }
    }
}
