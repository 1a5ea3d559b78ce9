//! View routing.

use std::fmt;

use crate::session::SessionPhase;

/// Top-level navigation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Discover,
    Host,
    Attendance,
    Profile,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Discover, Self::Host, Self::Attendance, Self::Profile];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::Host => "host",
            Self::Attendance => "attendance",
            Self::Profile => "profile",
        }
    }

    /// Tab for a navigation label. Unknown labels fall back to
    /// [`Tab::Discover`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Tab {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

/// Screen the app should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SignIn,
    ProfileSetup,
    Discover,
    Host,
    Attendance,
    Profile,
}

impl From<Tab> for View {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Discover => Self::Discover,
            Tab::Host => Self::Host,
            Tab::Attendance => Self::Attendance,
            Tab::Profile => Self::Profile,
        }
    }
}

/// Pick the screen for the session phase and the active tab. The tab only
/// matters once the profile is complete.
#[must_use]
pub fn route(phase: SessionPhase, tab: Tab) -> View {
    match phase {
        SessionPhase::Anonymous => View::SignIn,
        SessionPhase::Authenticated => View::ProfileSetup,
        SessionPhase::Active => View::from(tab),
    }
}
