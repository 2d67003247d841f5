//! `netgn-session`: login flows, OAuth landing, and the
//! gate in front of every protected area.
//!
//! Flows return decisions ([`FlowOutcome`], [`GateOutcome`]); they never
//! navigate or render themselves, and no backend error escapes them.

pub mod callback;
pub mod gate;
pub mod login;
pub mod logout;
pub mod navigation;
pub mod refresh;

#[cfg(test)]
mod fake;

pub use callback::{CallbackState, OAuthCallbackCoordinator};
pub use gate::{GateOutcome, SessionGate};
pub use login::{sign_in, sign_up};
pub use logout::sign_out;
pub use navigation::{
    AUTHENTICATED_LANDING_ROUTE, FlowOutcome, HOME_ROUTE, Notice, NoticeLevel, SIGN_IN_ROUTE,
};
pub use refresh::refresh_session;
