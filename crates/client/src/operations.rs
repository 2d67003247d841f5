//! GraphQL documents and wire types for the auth boundary.

use serde::{Deserialize, Serialize};

use netgn_auth::AuthenticatedUser;

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const LOGIN: Operation = Operation {
    name: "Login",
    document: r#"mutation Login($input: LoginInput!) {
  login(input: $input) { success message token { accessToken } }
}"#,
};

pub const SIGNUP: Operation = Operation {
    name: "Signup",
    document: r#"mutation Signup($input: SignupInput!) {
  signup(input: $input) { success message token { accessToken } }
}"#,
};

pub const GOOGLE_AUTH: Operation = Operation {
    name: "GoogleAuth",
    document: r#"mutation GoogleAuth($input: GoogleAuthInput!) {
  googleAuth(input: $input) { success message token { accessToken } }
}"#,
};

pub const REFRESH_TOKEN: Operation = Operation {
    name: "RefreshToken",
    document: r#"mutation RefreshToken {
  refreshToken { success message token { accessToken } }
}"#,
};

pub const LOGOUT: Operation = Operation {
    name: "Logout",
    document: r#"mutation Logout {
  logout { success message }
}"#,
};

pub const CURRENT_USER: Operation = Operation {
    name: "CurrentUser",
    document: r#"query CurrentUser {
  currentUser { id name email agency { id name } roles }
}"#,
};

#[derive(Clone, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Serialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}

impl core::fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignupInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish_non_exhaustive()
    }
}

/// One-time token delivered to the OAuth landing page.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthInput {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

/// Shape shared by `login`, `signup`, `googleAuth` and `refreshToken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<AccessToken>,
}

impl AuthResponse {
    /// Issued access token, only when the call reported success.
    pub fn issued_token(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.token.as_ref().map(|t| t.access_token.as_str())
    }

    /// Backend message, if it sent a non-blank one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// Response `data` roots. Fields are optional because GraphQL nulls a failed
// root field and reports the reason in `errors`.

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub login: Option<AuthResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupData {
    pub signup: Option<AuthResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleAuthData {
    pub google_auth: Option<AuthResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenData {
    pub refresh_token: Option<AuthResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogoutData {
    pub logout: Option<LogoutResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentUserData {
    #[serde(default)]
    pub current_user: Option<AuthenticatedUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issued_token_requires_success() {
        let ok: AuthResponse = serde_json::from_value(json!({
            "success": true,
            "token": { "accessToken": "a.b.c" }
        }))
        .unwrap();
        assert_eq!(ok.issued_token(), Some("a.b.c"));

        let rejected: AuthResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Invalid token",
            "token": { "accessToken": "a.b.c" }
        }))
        .unwrap();
        assert_eq!(rejected.issued_token(), None);
        assert_eq!(rejected.message(), Some("Invalid token"));
    }

    #[test]
    fn signup_input_skips_absent_optionals() {
        let input = SignupInput {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "pw".into(),
            address: None,
            phone: Some("0712345678".into()),
            agency: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value.get("phone"), Some(&json!("0712345678")));
        assert!(value.get("address").is_none());
        assert!(!format!("{input:?}").contains("pw\""));
    }

    #[test]
    fn documents_name_their_operation() {
        for op in [LOGIN, SIGNUP, GOOGLE_AUTH, REFRESH_TOKEN, LOGOUT, CURRENT_USER] {
            assert!(op.document.contains(op.name), "{} document mismatch", op.name);
        }
    }
}
