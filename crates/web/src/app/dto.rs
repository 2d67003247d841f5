use serde::Deserialize;

use netgn_client::{LoginInput, SignupInput};

#[derive(Debug, Default, Deserialize)]
pub struct SignInQuery {
    /// Failure code set by the backend's OAuth redirect.
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginSuccessQuery {
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl From<SignInForm> for LoginInput {
    fn from(form: SignInForm) -> Self {
        LoginInput {
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}

#[derive(Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
}

impl From<SignUpForm> for SignupInput {
    fn from(form: SignUpForm) -> Self {
        SignupInput {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
            address: non_blank(form.address),
            phone: non_blank(form.phone),
            agency: non_blank(form.agency),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
