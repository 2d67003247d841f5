//! Minimal HTML pages for the console shell.

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use netgn_auth::AuthenticatedUser;
use netgn_session::Notice;

/// Escape text for HTML element and attribute content.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, notice: Option<&Notice>, body: &str) -> Response {
    let notice = notice
        .map(|n| {
            format!(
                r#"<div class="notice notice-{}" role="status">{}</div>"#,
                n.level.as_str(),
                escape(&n.message)
            )
        })
        .unwrap_or_default();

    let html = format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{} | NetGN</title></head>\
         <body>{notice}{body}</body></html>",
        escape(title)
    );

    (StatusCode::OK, [(header::CACHE_CONTROL, "no-store")], Html(html)).into_response()
}

pub fn sign_in_page(notice: Option<&Notice>, google_enabled: bool) -> Response {
    let google = if google_enabled {
        r#"<a class="google" href="/auth/google">Sign in with Google</a>"#
    } else {
        ""
    };
    let body = format!(
        r#"<h1>Sign in</h1>
<form method="post" action="/sign-in">
<input type="email" name="email" required>
<input type="password" name="password" required>
<button type="submit">Sign in</button>
</form>
{google}
<a href="/sign-up">Create an account</a>"#
    );
    page("Sign in", notice, &body)
}

pub fn sign_up_page(notice: Option<&Notice>) -> Response {
    let body = r#"<h1>Create account</h1>
<form method="post" action="/sign-up">
<input type="text" name="name" required>
<input type="email" name="email" required>
<input type="password" name="password" required>
<input type="text" name="address">
<input type="tel" name="phone">
<input type="text" name="agency">
<button type="submit">Sign up</button>
</form>
<a href="/sign-in">Back to sign in</a>"#;
    page("Sign up", notice, body)
}

pub fn console_page(user: &AuthenticatedUser, section: &str, notice: Option<&Notice>) -> Response {
    let agency = user.agency.as_ref().map(|a| a.name.as_str()).unwrap_or_default();
    let roles = user
        .roles
        .iter()
        .map(|role| format!(r#"<li class="role">{}</li>"#, escape(role.as_str())))
        .collect::<String>();
    let body = format!(
        r#"<header><span class="avatar">{}</span> <span class="user">{}</span> <span class="agency">{}</span>
<ul class="roles">{roles}</ul>
<form method="post" action="/logout"><button type="submit">Sign out</button></form></header>
<main data-section="{}"></main>"#,
        escape(&user.initial().to_string()),
        escape(&user.name),
        escape(agency),
        escape(section)
    );
    page("Console", notice, &body)
}

pub fn onboarding_page() -> Response {
    let body = r#"<h1>Set up your agency</h1>
<p>Your account is not linked to an agency yet.</p>
<form method="post" action="/logout"><button type="submit">Sign out</button></form>"#;
    page("Onboarding", None, body)
}
