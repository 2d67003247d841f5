//! Error codes the OAuth backend appends to the sign-in URL (`?error=`).

/// Message for codes outside the known set.
pub const GENERIC_SIGN_IN_ERROR: &str = "Authentication failed";

/// Closed set of failure codes delivered on `/sign-in?error=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInError {
    NoCode,
    NoCredentials,
    UserInfoFailed,
    GoogleAuthFailed,
}

impl SignInError {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no_code" => Some(Self::NoCode),
            "no_credentials" => Some(Self::NoCredentials),
            "user_info_failed" => Some(Self::UserInfoFailed),
            "google_auth_failed" => Some(Self::GoogleAuthFailed),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCode => "no_code",
            Self::NoCredentials => "no_credentials",
            Self::UserInfoFailed => "user_info_failed",
            Self::GoogleAuthFailed => "google_auth_failed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NoCode => "Authorization code not received from Google",
            Self::NoCredentials => "Failed to obtain Google credentials",
            Self::UserInfoFailed => "Failed to fetch your Google account details",
            Self::GoogleAuthFailed => "Google authentication failed",
        }
    }
}

/// Human-readable message for an `error` query value.
pub fn sign_in_error_message(code: &str) -> &'static str {
    SignInError::from_code(code)
        .map(|e| e.message())
        .unwrap_or(GENERIC_SIGN_IN_ERROR)
}
