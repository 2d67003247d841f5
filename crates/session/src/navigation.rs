//! Navigation targets and user-facing notices produced by session flows.

pub const SIGN_IN_ROUTE: &str = "/sign-in";
pub const AUTHENTICATED_LANDING_ROUTE: &str = "/main";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(NoticeLevel::Success),
            "error" => Some(NoticeLevel::Error),
            _ => None,
        }
    }
}

/// Short toast-level message shown after a flow completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Decision returned by a client-side flow: where to go and what to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub redirect: Option<String>,
    pub notice: Option<Notice>,
}

impl FlowOutcome {
    pub fn redirect(to: impl Into<String>, notice: Option<Notice>) -> Self {
        Self {
            redirect: Some(to.into()),
            notice,
        }
    }

    /// Remain on the current view.
    pub fn stay(notice: Option<Notice>) -> Self {
        Self {
            redirect: None,
            notice,
        }
    }
}
