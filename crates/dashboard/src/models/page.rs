//! Page flag and flash messages.

use serde::{Deserialize, Serialize};

/// The views the dashboard can render.
///
/// `Logout` is never rendered; resolving it performs the logout and lands on
/// `Login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    Signup,
    Overview,
    Chatbot,
    History,
    Logout,
}

impl Page {
    /// Parse a page name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "login" => Some(Self::Login),
            "signup" => Some(Self::Signup),
            "overview" => Some(Self::Overview),
            "chatbot" => Some(Self::Chatbot),
            "history" => Some(Self::History),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }

    /// Name used in forms, query strings and the session.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Overview => "overview",
            Self::Chatbot => "chatbot",
            Self::History => "history",
            Self::Logout => "logout",
        }
    }

    /// Decide which page to show for a requested page flag.
    ///
    /// Authenticated users get the dashboard pages (anything else falls back
    /// to `Overview`); anonymous users only see `Login` and `Signup`. A
    /// `Logout` request from an authenticated user is returned unchanged so
    /// the caller can clear the session.
    #[must_use]
    pub const fn resolve(requested: Option<Self>, authenticated: bool) -> Self {
        match (authenticated, requested) {
            (true, Some(page @ (Self::Overview | Self::Chatbot | Self::History | Self::Logout))) => {
                page
            }
            (true, _) => Self::Overview,
            (false, Some(page @ (Self::Login | Self::Signup))) => page,
            (false, _) => Self::Login,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Warning,
    Error,
}

impl FlashKind {
    /// CSS modifier class for the alert box.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Error => "alert-error",
        }
    }
}

/// A one-shot message shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// CSS class for the template.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.kind.css_class()
    }
}
