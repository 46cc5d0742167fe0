pub mod store;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token storage at {} is not accessible", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client-held proof of admin authentication.
///
/// The token is the only state: the session is authenticated exactly when a
/// token is present, so the two can never disagree. Durable storage is the
/// source of truth and is read once, in [`Session::restore`].
pub struct Session {
    store: Box<dyn TokenStore>,
    token: Option<String>,
}

impl Session {
    /// Seed the in-memory token from durable storage.
    ///
    /// An unreadable store is logged and yields an unauthenticated session.
    pub fn restore(store: impl TokenStore + 'static) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "could not read stored token, starting signed out");
                None
            }
        };
        if token.is_some() {
            info!("restored admin session from storage");
        }
        Self {
            store: Box::new(store),
            token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Persist `token` and mark the session authenticated.
    ///
    /// If the write fails the in-memory session is left untouched.
    pub fn login(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        self.store.save(&token)?;
        self.token = Some(token);
        info!("admin signed in");
        Ok(())
    }

    /// Forget the token in durable storage, then in memory.
    ///
    /// If the store cannot be cleared the session stays signed in.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.token = None;
        info!("admin signed out");
        Ok(())
    }

    /// Drop a token the server rejected.
    pub fn invalidate(&mut self) {
        if self.token.is_none() {
            return;
        }
        warn!("server rejected the stored token, clearing session");
        self.token = None;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to remove rejected token from storage");
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
