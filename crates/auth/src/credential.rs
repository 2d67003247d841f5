use serde::{Deserialize, Serialize};

/// Structural check for a bearer token.
///
/// A token is accepted iff it is non-empty and has exactly three
/// dot-separated segments (header/payload/signature shape). Nothing is
/// decoded and no signature is checked; the backend owns verification.
pub fn is_valid(token: &str) -> bool {
    !token.is_empty() && token.split('.').count() == 3
}

/// Opaque bearer credential issued by the backend.
///
/// Only structurally valid tokens can be wrapped. The value is never
/// mutated in place: a new login produces a new `Credential`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    /// Wrap `token` if it passes [`is_valid`]. Invalid input is treated as absence.
    pub fn parse(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        is_valid(&token).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// `Authorization` header value for this credential.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens end up in logs via `?field` formatting; keep them out.
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl TryFrom<String> for Credential {
    type Error = InvalidCredential;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or(InvalidCredential)
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token is not a three-segment bearer credential")]
pub struct InvalidCredential;
