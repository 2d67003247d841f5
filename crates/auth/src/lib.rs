//! `netgn-auth`: console credential model and client-side session storage.
//!
//! Nothing here talks HTTP; the backend is reached through `netgn-client`.

pub mod cookie;
pub mod credential;
pub mod roles;
pub mod sign_in;
pub mod store;
pub mod user;

#[cfg(target_arch = "wasm32")]
pub use cookie::DocumentCookie;
pub use cookie::{CookieError, CookieSlot, MemoryCookieJar, ResponseCookies, SameSite, SetCookie, find_cookie};
pub use credential::{Credential, InvalidCredential, is_valid};
pub use roles::Role;
pub use sign_in::{GENERIC_SIGN_IN_ERROR, SignInError, sign_in_error_message};
pub use store::{TOKEN_COOKIE, TOKEN_MAX_AGE_SECS, TokenStore};
pub use user::{AgencyRef, AuthenticatedUser};
