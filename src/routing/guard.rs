//! Per-navigation reachability, computed from the session and nothing else.

use crate::auth::{AccessLevel, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Admin,
}

/// Who a view is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Only useful while signed out (login, registration).
    Guest,
    Authenticated,
    Privileged,
}

pub const LOGIN_VIEW: View = View::Login;
pub const DEFAULT_VIEW: View = View::Dashboard;

impl View {
    pub const ALL: [View; 4] = [View::Login, View::Register, View::Dashboard, View::Admin];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/",
            Self::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL.into_iter().find(|view| view.path() == normalized)
    }

    pub fn requirement(self) -> Requirement {
        match self {
            Self::Login | Self::Register => Requirement::Guest,
            Self::Dashboard => Requirement::Authenticated,
            Self::Admin => Requirement::Privileged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(View),
    Redirect(View),
    /// Session restore has not finished; render nothing yet.
    Deferred,
}

/// Decide whether `view` is reachable for `session`.
pub fn evaluate(session: &Session, view: View) -> Navigation {
    if !session.is_initialized() {
        return Navigation::Deferred;
    }

    match (session.access_level(), view.requirement()) {
        (AccessLevel::AuthenticatedPrivileged, _)
        | (AccessLevel::Unauthenticated, Requirement::Guest)
        | (AccessLevel::AuthenticatedStandard, Requirement::Authenticated) => {
            Navigation::Allow(view)
        }
        (AccessLevel::Unauthenticated, _) => Navigation::Redirect(LOGIN_VIEW),
        (AccessLevel::AuthenticatedStandard, Requirement::Guest | Requirement::Privileged) => {
            Navigation::Redirect(DEFAULT_VIEW)
        }
    }
}

/// Like [`evaluate`], sending unknown paths to the access level's home view.
pub fn evaluate_path(session: &Session, path: &str) -> Navigation {
    match View::from_path(path) {
        Some(view) => evaluate(session, view),
        None if !session.is_initialized() => Navigation::Deferred,
        None if session.is_authenticated() => Navigation::Redirect(DEFAULT_VIEW),
        None => Navigation::Redirect(LOGIN_VIEW),
    }
}

/// Navigation bar entries shown for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Dashboard,
    Admin,
    Logout,
}

pub fn nav_links(session: &Session) -> Vec<NavLink> {
    match session.access_level() {
        AccessLevel::Unauthenticated => Vec::new(),
        AccessLevel::AuthenticatedStandard => vec![NavLink::Dashboard, NavLink::Logout],
        AccessLevel::AuthenticatedPrivileged => {
            vec![NavLink::Dashboard, NavLink::Admin, NavLink::Logout]
        }
    }
}
