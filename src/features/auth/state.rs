//! Auth session state. The context is built explicitly at startup, hydrated
//! from its store once, and torn down by `logout`. Callers share it by
//! reference; there is no global instance.

use super::client;
use super::store::{SessionStore, SessionStoreError};
use super::types::Session;
use crate::api::{ApiClient, ApiError};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

pub struct AuthContext<S> {
    store: S,
    session: RwLock<Option<Session>>,
}

impl<S: SessionStore> AuthContext<S> {
    /// Reads the persisted session. An unreadable session file is discarded
    /// and the context starts logged out.
    ///
    /// # Errors
    /// Returns `SessionStoreError` only when a corrupt session cannot be removed.
    pub fn init(store: S) -> Result<Self, SessionStoreError> {
        let session = match store.load() {
            Ok(session) => session,
            Err(err @ SessionStoreError::Format { .. }) => {
                warn!(error = %err, "Discarding unreadable session");
                store.clear()?;
                None
            }
            Err(err) => return Err(err),
        };

        if let Some(session) = &session {
            info!(email = %session.email, "Restored session");
        }

        Ok(Self {
            store,
            session: RwLock::new(session),
        })
    }

    /// Authenticates, then replaces the current session in memory and in the store.
    ///
    /// # Errors
    /// Returns `AuthError::Api` when login fails and `AuthError::Store` when
    /// the session cannot be persisted; in both cases the previous session stays.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, AuthError> {
        let response = client::login(api, email, password).await?;
        let session = Session::from_login(email.trim(), response);
        self.store.save(&session)?;
        self.set_session(session.clone());
        info!(email = %session.email, "Logged in");
        Ok(session)
    }

    /// Clears the session from memory and from the store.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the store cannot be cleared; memory is cleared regardless.
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            info!(email = %previous.email, "Logged out");
        }
        self.store.clear()
    }

    pub fn set_session(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns `api` with the session's bearer token attached, if there is one.
    #[must_use]
    pub fn api_client(&self, api: ApiClient) -> ApiClient {
        let token = self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|session| session.token.as_ref())
            .map(|token| SecretString::from(token.expose_secret().to_string()));

        match token {
            Some(token) => api.with_bearer(token),
            None => api,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
