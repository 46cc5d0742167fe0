use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Top-level pages of the site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Properties,
    Blog,
    Login,
    Admin,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Properties => "properties",
            Self::Blog => "blog",
            Self::Login => "login",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the active page. No history and no guards: the admin page is
/// reachable while signed out and simply has nothing to show.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn navigate(&mut self, view: View) {
        debug!(from = %self.current, to = %view, "navigate");
        self.current = view;
    }
}
